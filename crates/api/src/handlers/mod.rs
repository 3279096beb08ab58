pub mod master_data;
pub mod sync;
