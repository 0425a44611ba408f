
pub mod sqlite;
mod user_entity;

use std::collections::HashSet;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
pub use user_entity::UserEntity;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[automock]
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert a user unless one with the same Telegram id already exists.
    /// Returns `true` if a row was inserted.
    async fn seed_user(&self, user: &UserEntity) -> StorageResult<bool>;

    /// Get the Telegram ids of every stored user.
    async fn get_user_ids(&self) -> StorageResult<HashSet<i64>>;

    /// Get a single user by Telegram id.
    async fn get_user(&self, tg_id: i64) -> StorageResult<Option<UserEntity>>;

    /// Get all users in insertion order.
    async fn get_all_users(&self) -> StorageResult<Vec<UserEntity>>;
}
