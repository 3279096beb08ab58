//! Name-based referential integrity between master data and the catalog.
//!
//! The store has no foreign keys and no transactions. Catalog records keep
//! names as text, and consistency is restored by rewriting them after a
//! rename. This is eventual and best-effort: a rename is durable as soon as
//! the master item is written, whatever happens to the catalog afterwards.
//!
//! Deleting a master data item does not touch the catalog.

pub mod dispatcher;
pub mod propagator;

pub use dispatcher::{SyncDispatcher, SyncedUpdate};
pub use propagator::RenamePropagator;

/// Records fetched per page while streaming a catalog collection.
pub const DEFAULT_SCAN_PAGE_SIZE: usize = 200;
