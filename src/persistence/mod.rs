pub mod adapter;
pub mod error;
pub mod files;
pub mod store;

pub use adapter::PersistenceAdapter;
pub use error::PersistenceError;
pub use files::{ensure_dir, init_local_docket, log_file, resolve_docket_dir};
pub use store::{FileStore, KeyValueStore};
#[cfg(test)]
pub use store::MemoryStore;
