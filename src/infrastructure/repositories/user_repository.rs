//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the `users` table and the domain User entity.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{PasswordHash, User, UserId, UserRepository, Username};
use crate::shared::error::AppError;

/// Database row representation of the users table.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
}

impl UserRow {
    /// Convert database row to domain User entity.
    ///
    /// Rows written by this service always satisfy the domain invariants; a
    /// row that does not is reported as a validation error.
    fn into_user(self) -> Result<User, AppError> {
        Ok(User::with_id(
            UserId::new(self.id),
            Username::new(self.username)?,
            PasswordHash::new(self.password_hash)?,
        ))
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: &User) -> Result<UserId, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Username already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(UserId::new(id))
    }

    async fn find_by_username(&self, username: &Username) -> Option<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await;

        match row {
            Ok(row) => row.and_then(|r| {
                r.into_user()
                    .map_err(|e| tracing::error!(error = %e, "Stored user row is invalid"))
                    .ok()
            }),
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed");
                None
            }
        }
    }
}
