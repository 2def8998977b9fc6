//! Record store backed by a single key-value entry.
//!
//! Every operation reads the whole `users` collection, mutates it in memory,
//! and writes the whole collection back. There is no cross-call transaction.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::ports::{KeyValueStorage, UserStore, UserStoreError};
use super::{UserDetails, UserId, UserRecord};

/// Storage key holding the serialised user collection.
pub const USERS_STORAGE_KEY: &str = "users";

/// Attempts at minting an unused identity before giving up.
const MAX_MINT_ATTEMPTS: usize = 8;

/// [`UserStore`] persisting the ordered collection as one JSON array.
pub struct LocalUserStore<K> {
    storage: Arc<K>,
}

impl<K> LocalUserStore<K> {
    /// Create a store over `storage`.
    pub fn new(storage: Arc<K>) -> Self {
        Self { storage }
    }
}

impl<K> LocalUserStore<K>
where
    K: KeyValueStorage,
{
    fn load(&self) -> Result<Vec<UserRecord>, UserStoreError> {
        let Some(raw) = self.storage.get(USERS_STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        let records: Vec<UserRecord> = serde_json::from_str(&raw)
            .map_err(|error| UserStoreError::corrupt(format!("invalid JSON: {error}")))?;

        let mut seen = HashSet::with_capacity(records.len());
        if let Some(duplicate) = records.iter().find(|record| !seen.insert(record.id())) {
            return Err(UserStoreError::corrupt(format!(
                "identity {} appears more than once",
                duplicate.id()
            )));
        }
        Ok(records)
    }

    fn save(&self, records: &[UserRecord]) -> Result<(), UserStoreError> {
        let raw = serde_json::to_string(records)
            .map_err(|error| UserStoreError::encode(error.to_string()))?;
        self.storage.set(USERS_STORAGE_KEY, &raw)?;
        Ok(())
    }

    fn position(records: &[UserRecord], id: &UserId) -> Result<usize, UserStoreError> {
        records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| UserStoreError::not_found(id.as_str()))
    }

    fn mint(
        records: &[UserRecord],
        candidates: impl FnMut() -> UserId,
    ) -> Result<UserId, UserStoreError> {
        std::iter::repeat_with(candidates)
            .take(MAX_MINT_ATTEMPTS)
            .find(|candidate| records.iter().all(|record| record.id() != candidate))
            .ok_or_else(|| UserStoreError::identity_exhausted(MAX_MINT_ATTEMPTS))
    }
}

impl<K> UserStore for LocalUserStore<K>
where
    K: KeyValueStorage,
{
    fn list(&self) -> Result<Vec<UserRecord>, UserStoreError> {
        self.load()
    }

    fn find(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self.load()?.into_iter().find(|record| record.id() == id))
    }

    fn create(&self, details: UserDetails) -> Result<UserId, UserStoreError> {
        let mut records = self.load()?;
        let id = Self::mint(&records, UserId::random)?;
        records.push(UserRecord::new(id.clone(), details));
        self.save(&records)?;
        debug!(user_id = %id, total = records.len(), "user record created");
        Ok(id)
    }

    fn update(&self, id: &UserId, details: UserDetails) -> Result<(), UserStoreError> {
        let mut records = self.load()?;
        let index = Self::position(&records, id)?;
        if let Some(slot) = records.get_mut(index) {
            *slot = UserRecord::new(id.clone(), details);
        }
        self.save(&records)?;
        debug!(user_id = %id, "user record updated");
        Ok(())
    }

    fn delete(&self, id: &UserId) -> Result<(), UserStoreError> {
        let mut records = self.load()?;
        let index = Self::position(&records, id)?;
        records.remove(index);
        self.save(&records)?;
        debug!(user_id = %id, remaining = records.len(), "user record deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_store_tests.rs"]
mod tests;
