//! Port abstraction for the persisted user collection and its errors.

use super::{StorageError, define_port_error};
use crate::domain::{UserDetails, UserId, UserRecord};

define_port_error! {
    /// Errors raised by [`UserStore`] implementations.
    pub enum UserStoreError {
        /// No record carries the requested identity.
        NotFound { id: String } => "user {id} not found",
        /// The persisted collection cannot be decoded or breaks the
        /// identity-uniqueness invariant.
        Corrupt { message: String } => "stored user collection is corrupt: {message}",
        /// Every freshly minted identity collided with a stored one.
        IdentityExhausted { attempts: usize } =>
            "no unused user identity after {attempts} attempts",
        /// The persisted collection could not be encoded.
        Encode { message: String } => "user collection encode failed: {message}",
        /// The underlying storage failed.
        Storage { message: String } => "user storage failed: {message}",
    }
}

impl From<StorageError> for UserStoreError {
    fn from(value: StorageError) -> Self {
        Self::storage(value.to_string())
    }
}

/// Keyed, insertion-ordered collection of user records.
///
/// Implementations own identity minting: callers hand over details and get
/// the new identity back.
#[cfg_attr(test, mockall::automock)]
pub trait UserStore: Send + Sync {
    /// Every record, in insertion order.
    fn list(&self) -> Result<Vec<UserRecord>, UserStoreError>;

    /// Record with identity `id`, if present.
    fn find(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError>;

    /// Append a record under a freshly minted identity.
    fn create(&self, details: UserDetails) -> Result<UserId, UserStoreError>;

    /// Replace the details of record `id` in place, keeping its position.
    ///
    /// Fails with [`UserStoreError::NotFound`] without writing when `id` is
    /// unknown.
    fn update(&self, id: &UserId, details: UserDetails) -> Result<(), UserStoreError>;

    /// Remove record `id`, keeping the order of the rest.
    ///
    /// Fails with [`UserStoreError::NotFound`] without writing when `id` is
    /// unknown.
    fn delete(&self, id: &UserId) -> Result<(), UserStoreError>;
}
