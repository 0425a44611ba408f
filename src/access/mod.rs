#[cfg(test)]
mod tests;

use std::{collections::HashSet, sync::Arc};

use teloxide::types::UserId;
use tokio::sync::RwLock;

use crate::storage::{StorageResult, UserStorage};

/// In-memory allow-list of Telegram users, loaded from the user store.
///
/// The set is read once at startup. Users added to the store afterwards are
/// not recognized until [`AccessList::refresh`] is called.
pub struct AccessList {
    storage: Arc<dyn UserStorage>,
    allowed: RwLock<HashSet<i64>>,
}

impl AccessList {
    /// Loads the allow-list from the store.
    pub async fn load(storage: Arc<dyn UserStorage>) -> StorageResult<Self> {
        let allowed = storage.get_user_ids().await?;
        tracing::info!("Loaded {} authorized users", allowed.len());

        Ok(Self { storage, allowed: RwLock::new(allowed) })
    }

    /// Returns `true` if the user is on the allow-list.
    pub async fn is_authorized(&self, user_id: UserId) -> bool {
        match i64::try_from(user_id.0) {
            Ok(id) => self.allowed.read().await.contains(&id),
            Err(_) => false,
        }
    }

    /// Re-reads the allow-list from the store. Returns the number of allowed
    /// users.
    pub async fn refresh(&self) -> StorageResult<usize> {
        let allowed = self.storage.get_user_ids().await?;
        let count = allowed.len();
        *self.allowed.write().await = allowed;
        tracing::info!("Refreshed allow-list: {count} authorized users");

        Ok(count)
    }

    /// Returns `true` if the user's stored department is the admin department.
    ///
    /// Checked against the store on every call, unlike the allow-list.
    pub async fn is_admin(&self, user_id: UserId) -> StorageResult<bool> {
        let Ok(id) = i64::try_from(user_id.0) else {
            return Ok(false);
        };
        let user = self.storage.get_user(id).await?;

        Ok(user.is_some_and(|u| u.is_admin()))
    }
}
