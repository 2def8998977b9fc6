//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the postal-code directory and device-local storage). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

mod macros;
pub(crate) use macros::define_port_error;

mod key_value_storage;
mod postal_code_lookup;
mod user_store;

#[cfg(test)]
pub use key_value_storage::MockKeyValueStorage;
pub use key_value_storage::{KeyValueStorage, MemoryKeyValueStorage, StorageError};
#[cfg(test)]
pub use postal_code_lookup::MockPostalCodeLookup;
pub use postal_code_lookup::{FixturePostalCodeLookup, PostalCodeLookup, PostalLookupError};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
