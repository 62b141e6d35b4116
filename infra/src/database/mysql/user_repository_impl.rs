//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use stazy_core::domain::entities::user::{OneTimeCode, User};
use stazy_core::errors::{AuthError, DomainError};
use stazy_core::repositories::UserRepository;

use super::{db_error, is_unique_violation, parse_uuid};

const USER_COLUMNS: &str = r#"
    id, email, password_hash, salt, email_verified, profile_completed,
    first_name, last_name, phone_number,
    verification_code_hash, verification_expires_at,
    reset_code_hash, reset_expires_at,
    created_at, updated_at
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let get_err = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get_err("id", e))?;

        Ok(User {
            id: parse_uuid(&id, "users.id")?,
            email: row.try_get("email").map_err(|e| get_err("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| get_err("password_hash", e))?,
            salt: row.try_get("salt").map_err(|e| get_err("salt", e))?,
            email_verified: row
                .try_get("email_verified")
                .map_err(|e| get_err("email_verified", e))?,
            profile_completed: row
                .try_get("profile_completed")
                .map_err(|e| get_err("profile_completed", e))?,
            first_name: row.try_get("first_name").map_err(|e| get_err("first_name", e))?,
            last_name: row.try_get("last_name").map_err(|e| get_err("last_name", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| get_err("phone_number", e))?,
            email_verification: Self::code_from_row(
                row,
                "verification_code_hash",
                "verification_expires_at",
            )?,
            password_reset: Self::code_from_row(row, "reset_code_hash", "reset_expires_at")?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get_err("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| get_err("updated_at", e))?,
        })
    }

    /// A pending code exists only when both of its columns are set
    fn code_from_row(
        row: &sqlx::mysql::MySqlRow,
        hash_column: &str,
        expiry_column: &str,
    ) -> Result<Option<OneTimeCode>, DomainError> {
        let hash: Option<String> = row.try_get(hash_column).map_err(|e| DomainError::Internal {
            message: format!("Failed to get {}: {}", hash_column, e),
        })?;
        let expires_at: Option<DateTime<Utc>> =
            row.try_get(expiry_column).map_err(|e| DomainError::Internal {
                message: format!("Failed to get {}: {}", expiry_column, e),
            })?;

        Ok(match (hash, expires_at) {
            (Some(hash), Some(expires_at)) => Some(OneTimeCode::new(hash, expires_at)),
            _ => None,
        })
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, filter);

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load user"))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, salt, email_verified, profile_completed,
                first_name, last_name, phone_number,
                verification_code_hash, verification_expires_at,
                reset_code_hash, reset_expires_at,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.salt)
            .bind(user.email_verified)
            .bind(user.profile_completed)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone_number)
            .bind(user.email_verification.as_ref().map(|c| c.code_hash.clone()))
            .bind(user.email_verification.as_ref().map(|c| c.expires_at))
            .bind(user.password_reset.as_ref().map(|c| c.code_hash.clone()))
            .bind(user.password_reset.as_ref().map(|c| c.expires_at))
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(AuthError::DuplicateAccount.into()),
            Err(e) => Err(db_error("Failed to create user")(e)),
        }
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                password_hash = ?, salt = ?, email_verified = ?, profile_completed = ?,
                first_name = ?, last_name = ?, phone_number = ?,
                verification_code_hash = ?, verification_expires_at = ?,
                reset_code_hash = ?, reset_expires_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.password_hash)
            .bind(&user.salt)
            .bind(user.email_verified)
            .bind(user.profile_completed)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone_number)
            .bind(user.email_verification.as_ref().map(|c| c.code_hash.clone()))
            .bind(user.email_verification.as_ref().map(|c| c.expires_at))
            .bind(user.password_reset.as_ref().map(|c| c.code_hash.clone()))
            .bind(user.password_reset.as_ref().map(|c| c.expires_at))
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update user"))?;

        if result.rows_affected() == 0 && !self.exists_by_email(&user.email).await? {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check user existence"))?;

        let total: i64 = row
            .try_get("total")
            .map_err(db_error("Failed to read user count"))?;
        Ok(total > 0)
    }
}
