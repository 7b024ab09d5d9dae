#![forbid(unsafe_code)]

pub mod keys;
pub mod repository;
pub mod sqlite;

pub use keys::StorageKeys;
pub use repository::{InMemoryRepository, KeyValueRepository, Storage, StorageError};
