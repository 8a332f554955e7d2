//! Storage module for the persistence substrates, store, and configuration.

pub mod backend;
pub mod config;
pub mod seed;
pub mod store;

pub use backend::{BackendError, JsonFileBackend, MemoryBackend, SqliteBackend, StorageBackend};
pub use config::{AppConfig, BackendKind, ConfigError, SeedSettings, StorageSettings};
pub use store::{LocalStore, StoreError};
