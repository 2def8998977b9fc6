//! Tests for the key-value backed user store.

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{MemoryKeyValueStorage, MockKeyValueStorage, StorageError};
use crate::test_support::{copacabana_draft, details, praca_da_se_draft};

type MemoryStore = LocalUserStore<MemoryKeyValueStorage>;

#[fixture]
fn storage() -> Arc<MemoryKeyValueStorage> {
    Arc::new(MemoryKeyValueStorage::default())
}

fn store(storage: &Arc<MemoryKeyValueStorage>) -> MemoryStore {
    LocalUserStore::new(Arc::clone(storage))
}

#[rstest]
fn empty_storage_lists_nothing(storage: Arc<MemoryKeyValueStorage>) {
    assert!(store(&storage).list().expect("list").is_empty());
}

#[rstest]
fn create_then_find_round_trips(storage: Arc<MemoryKeyValueStorage>) {
    let store = store(&storage);
    let created = details(&praca_da_se_draft());

    let id = store.create(created.clone()).expect("create");
    let found = store.find(&id).expect("find").expect("record exists");

    assert_eq!(found.id(), &id);
    assert_eq!(found.details(), &created);
}

#[rstest]
fn list_preserves_insertion_order(storage: Arc<MemoryKeyValueStorage>) {
    let store = store(&storage);
    let first = store.create(details(&praca_da_se_draft())).expect("first");
    let second = store.create(details(&copacabana_draft())).expect("second");

    let ids: Vec<UserId> = store
        .list()
        .expect("list")
        .into_iter()
        .map(|record| record.id().clone())
        .collect();

    assert_eq!(ids, vec![first, second]);
}

#[rstest]
fn update_replaces_in_place(storage: Arc<MemoryKeyValueStorage>) {
    let store = store(&storage);
    let first = store.create(details(&praca_da_se_draft())).expect("first");
    let second = store.create(details(&copacabana_draft())).expect("second");

    let mut draft = praca_da_se_draft();
    draft.full_name = "Maria Souza Lima".to_owned();
    store.update(&first, details(&draft)).expect("update");

    let records = store.list().expect("list");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), &first);
    assert_eq!(records[0].details().full_name(), "Maria Souza Lima");
    assert_eq!(records[1].id(), &second);
}

#[rstest]
fn update_of_unknown_identity_is_not_found_and_writes_nothing(
    storage: Arc<MemoryKeyValueStorage>,
) {
    let store = store(&storage);
    store.create(details(&praca_da_se_draft())).expect("create");
    let before = storage.get(USERS_STORAGE_KEY).expect("read");

    let missing = UserId::new("missing").expect("valid id");
    let error = store
        .update(&missing, details(&copacabana_draft()))
        .expect_err("unknown id");

    assert_eq!(error, UserStoreError::not_found("missing"));
    assert_eq!(storage.get(USERS_STORAGE_KEY).expect("read"), before);
}

#[rstest]
fn delete_removes_exactly_one_record(storage: Arc<MemoryKeyValueStorage>) {
    let store = store(&storage);
    let first = store.create(details(&praca_da_se_draft())).expect("first");
    let second = store.create(details(&copacabana_draft())).expect("second");
    let third = store.create(details(&praca_da_se_draft())).expect("third");

    store.delete(&second).expect("delete");

    let ids: Vec<UserId> = store
        .list()
        .expect("list")
        .into_iter()
        .map(|record| record.id().clone())
        .collect();
    assert_eq!(ids, vec![first, third]);
}

#[rstest]
fn delete_of_unknown_identity_is_not_found(storage: Arc<MemoryKeyValueStorage>) {
    let store = store(&storage);
    let missing = UserId::new("42").expect("valid id");
    assert!(matches!(
        store.delete(&missing),
        Err(UserStoreError::NotFound { .. })
    ));
}

#[rstest]
fn duplicate_identities_are_reported_as_corrupt(storage: Arc<MemoryKeyValueStorage>) {
    let record = serde_json::to_value(UserRecord::new(
        UserId::new("1").expect("valid id"),
        details(&praca_da_se_draft()),
    ))
    .expect("serialise");
    let payload = json!([record.clone(), record]).to_string();
    storage.set(USERS_STORAGE_KEY, &payload).expect("seed");

    let error = store(&storage).list().expect_err("duplicates");
    assert!(matches!(error, UserStoreError::Corrupt { .. }));
}

#[rstest]
fn malformed_collection_is_reported_as_corrupt(storage: Arc<MemoryKeyValueStorage>) {
    storage.set(USERS_STORAGE_KEY, "{not json").expect("seed");
    assert!(matches!(
        store(&storage).list(),
        Err(UserStoreError::Corrupt { .. })
    ));
}

#[test]
fn storage_failures_surface_as_storage_errors() {
    let mut storage = MockKeyValueStorage::new();
    storage
        .expect_get()
        .times(1)
        .return_once(|key| Err(StorageError::read(key, "disk unplugged")));

    let store = LocalUserStore::new(Arc::new(storage));
    let error = store.list().expect_err("read fails");

    assert!(matches!(error, UserStoreError::Storage { .. }));
    assert!(error.to_string().contains("disk unplugged"));
}

#[test]
fn create_writes_the_whole_collection_under_the_users_key() {
    let mut storage = MockKeyValueStorage::new();
    storage.expect_get().times(1).return_once(|_| Ok(None));
    storage
        .expect_set()
        .withf(|key, value| key == USERS_STORAGE_KEY && value.starts_with('['))
        .times(1)
        .return_once(|_, _| Ok(()));

    let store = LocalUserStore::new(Arc::new(storage));
    store
        .create(details(&praca_da_se_draft()))
        .expect("create succeeds");
}

#[rstest]
fn minting_skips_identities_already_in_use() {
    let taken = UserId::new("taken").expect("valid id");
    let fresh = UserId::new("fresh").expect("valid id");
    let records = vec![UserRecord::new(taken.clone(), details(&praca_da_se_draft()))];
    let mut candidates = vec![taken, fresh.clone()].into_iter();

    let minted = MemoryStore::mint(&records, || candidates.next().expect("candidate left"));

    assert_eq!(minted, Ok(fresh));
}

#[rstest]
fn minting_gives_up_after_repeated_collisions() {
    let taken = UserId::new("taken").expect("valid id");
    let records = vec![UserRecord::new(taken.clone(), details(&praca_da_se_draft()))];

    let minted = MemoryStore::mint(&records, || taken.clone());

    assert_eq!(
        minted,
        Err(UserStoreError::IdentityExhausted {
            attempts: MAX_MINT_ATTEMPTS
        })
    );
    assert!(
        minted
            .expect_err("minting fails")
            .to_string()
            .starts_with("no unused user identity")
    );
}
