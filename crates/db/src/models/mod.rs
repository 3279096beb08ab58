//! Domain model structs and DTOs.
//!
//! Master data items are fully typed. Catalog records are owned by other
//! parts of the system, so they are handled as raw JSON objects and only
//! their name-bearing fields are ever touched.

pub mod catalog;
pub mod master_data;
