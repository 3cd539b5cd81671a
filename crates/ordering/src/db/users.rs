//! User directory backed by `PostgreSQL`.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use pronto_core::UserId;

use super::RepositoryError;
use crate::users::UserDirectory;

/// [`UserDirectory`] over the `users` table.
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    /// Create a new directory over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn birth_date(&self, id: UserId) -> Result<Option<NaiveDate>, RepositoryError> {
        let birth_date: Option<Option<NaiveDate>> =
            sqlx::query_scalar("SELECT birth_date FROM users WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(birth_date.flatten())
    }
}
