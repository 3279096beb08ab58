//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&dyn KvStore` as the first argument.

pub mod catalog_repo;
pub mod master_data_repo;

pub use catalog_repo::{CatalogRepo, RewriteOutcome};
pub use master_data_repo::{MasterDataRepo, MasterDataUpdate};
