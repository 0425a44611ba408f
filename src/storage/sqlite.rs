use std::{collections::HashSet, str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    Pool, Sqlite, migrate, query, query_as, query_scalar,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::storage::{StorageResult, UserEntity, UserStorage};

pub struct SqliteStorage {
    pool: Pool<Sqlite>,
}

impl SqliteStorage {
    pub async fn new(database_url: &str) -> StorageResult<Self> {
        tracing::debug!("Connecting to SQLite database: {database_url}");
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            // Each connection to `:memory:` is a separate database.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }
        let pool = pool_options.connect_with(options).await?;

        migrate!("./migrations").run(&pool).await?;
        tracing::debug!("SQLite database migrated");

        Ok(Self { pool })
    }
}

#[async_trait]
impl UserStorage for SqliteStorage {
    async fn seed_user(&self, user: &UserEntity) -> StorageResult<bool> {
        tracing::debug!("Seeding user {} ({})", user.tg_id, user.name);

        let result = query(
            "INSERT OR IGNORE INTO users (tg_id, name, department, role) VALUES (?, ?, ?, ?)",
        )
        .bind(user.tg_id)
        .bind(&user.name)
        .bind(&user.department)
        .bind(&user.role)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_user_ids(&self) -> StorageResult<HashSet<i64>> {
        let ids = query_scalar::<_, i64>("SELECT tg_id FROM users").fetch_all(&self.pool).await?;
        tracing::debug!("Loaded {} user ids", ids.len());

        Ok(ids.into_iter().collect())
    }

    async fn get_user(&self, tg_id: i64) -> StorageResult<Option<UserEntity>> {
        tracing::debug!("Getting user: {tg_id}");

        let user = query_as::<_, UserEntity>(
            "SELECT tg_id, name, department, role FROM users WHERE tg_id = ?",
        )
        .bind(tg_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_all_users(&self) -> StorageResult<Vec<UserEntity>> {
        let users = query_as::<_, UserEntity>(
            "SELECT tg_id, name, department, role FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
