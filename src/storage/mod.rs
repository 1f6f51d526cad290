// storage/mod.rs
// Pluggable storage sinks for pipeline records

pub mod jsonl;
pub mod pool;
pub mod sink;
pub mod sqlite;

#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used items
pub use jsonl::JsonlStore;
pub use pool::init_db_pool_with_path;
pub use sink::{to_row, validate_identifier, StorageSink, StoreRow};
pub use sqlite::SqliteStore;
