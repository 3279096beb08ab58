//! Domain types and pure logic for the media catalog master-data service.
//!
//! This crate performs no I/O. Everything that touches the key-value store
//! lives in `mediadex-db`.

pub mod error;
pub mod keys;
pub mod master_data;
pub mod patch;
pub mod sync;
pub mod token_list;
pub mod types;
