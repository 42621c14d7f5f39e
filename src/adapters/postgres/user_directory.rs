//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use super::database_error;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::UserProfile;
use crate::ports::UserDirectory;

pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    full_name: String,
    email: String,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserProfile::new(UserId::new(row.id)?, row.full_name, row.email))
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, full_name, email FROM users WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| database_error("Failed to load user", e))?;

        row.map(UserProfile::try_from).transpose()
    }
}
