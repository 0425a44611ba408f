use std::collections::HashSet;

use mockall::{Sequence, predicate::*};

use super::*;
use crate::storage::{MockUserStorage, UserEntity};

const ADMIN_ID: i64 = 123456789;

fn ids(items: &[i64]) -> HashSet<i64> {
    items.iter().copied().collect()
}

#[tokio::test]
async fn test_seeded_admin_is_authorized() {
    let mut mock_storage = MockUserStorage::new();
    mock_storage.expect_get_user_ids().times(1).returning(|| Ok(ids(&[ADMIN_ID])));

    let access = AccessList::load(Arc::new(mock_storage)).await.unwrap();

    assert!(access.is_authorized(UserId(ADMIN_ID as u64)).await);
}

#[tokio::test]
async fn test_unknown_users_are_not_authorized() {
    let mut mock_storage = MockUserStorage::new();
    mock_storage.expect_get_user_ids().times(1).returning(|| Ok(ids(&[ADMIN_ID])));

    let access = AccessList::load(Arc::new(mock_storage)).await.unwrap();

    for id in [0, 1, 42, ADMIN_ID as u64 + 1, u64::MAX] {
        assert!(!access.is_authorized(UserId(id)).await, "id {id} must not be authorized");
    }
}

#[tokio::test]
async fn test_load_fails_when_store_is_unreadable() {
    let mut mock_storage = MockUserStorage::new();
    mock_storage
        .expect_get_user_ids()
        .returning(|| Err(sqlx::Error::PoolClosed.into()));

    let result = AccessList::load(Arc::new(mock_storage)).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_new_users_are_seen_only_after_refresh() {
    let mut mock_storage = MockUserStorage::new();
    let mut seq = Sequence::new();
    mock_storage
        .expect_get_user_ids()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(ids(&[ADMIN_ID])));
    mock_storage
        .expect_get_user_ids()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(ids(&[ADMIN_ID, 7])));

    let access = AccessList::load(Arc::new(mock_storage)).await.unwrap();
    assert!(!access.is_authorized(UserId(7)).await);

    let count = access.refresh().await.unwrap();

    assert_eq!(count, 2);
    assert!(access.is_authorized(UserId(7)).await);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_list() {
    let mut mock_storage = MockUserStorage::new();
    let mut seq = Sequence::new();
    mock_storage
        .expect_get_user_ids()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(ids(&[ADMIN_ID])));
    mock_storage
        .expect_get_user_ids()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(sqlx::Error::PoolClosed.into()));

    let access = AccessList::load(Arc::new(mock_storage)).await.unwrap();

    assert!(access.refresh().await.is_err());
    assert!(access.is_authorized(UserId(ADMIN_ID as u64)).await);
}

#[tokio::test]
async fn test_is_admin_uses_department() {
    let mut mock_storage = MockUserStorage::new();
    mock_storage.expect_get_user_ids().returning(|| Ok(ids(&[1, 2])));
    mock_storage
        .expect_get_user()
        .with(eq(1))
        .returning(|_| Ok(Some(UserEntity::new(1, "Ann", "admin", "employee"))));
    mock_storage
        .expect_get_user()
        .with(eq(2))
        .returning(|_| Ok(Some(UserEntity::new(2, "Admin", "IT", "admin"))));
    mock_storage.expect_get_user().with(eq(3)).returning(|_| Ok(None));

    let access = AccessList::load(Arc::new(mock_storage)).await.unwrap();

    assert!(access.is_admin(UserId(1)).await.unwrap());
    assert!(!access.is_admin(UserId(2)).await.unwrap());
    assert!(!access.is_admin(UserId(3)).await.unwrap());
}
