//! Device-local storage adapters for the `KeyValueStorage` port.

mod atomic_io;
mod dir_storage;

pub use dir_storage::DirKeyValueStorage;
