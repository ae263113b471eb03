//! File storage primitives shared by the TOML-backed repositories.

mod atomic_toml;

pub use atomic_toml::{AtomicTomlFile, StorageError};
