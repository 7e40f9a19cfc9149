use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{
    error::AuthError,
    password::hash_password_blocking,
    repo_types::{NewUser, User, UserRow, UserWithSecret},
};

/// Backing store for user rows. Implementations must reject a second row
/// with an existing email atomically, returning [`AuthError::DuplicateEmail`].
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, AuthError>;
    async fn insert(&self, row: UserRow) -> Result<(), AuthError>;
}

pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(AuthError::storage)?;
        Ok(row)
    }

    async fn insert(&self, row: UserRow) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.password_hash)
        .bind(row.created_at)
        .execute(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AuthError::DuplicateEmail,
            other => AuthError::storage(other),
        })?;
        Ok(())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// User persistence with the credential policy applied on top of a [`UserStore`].
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Lookup without credential material.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .find_by_email_with_secret(email)
            .await?
            .map(UserWithSecret::into_user))
    }

    pub async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<UserWithSecret>, AuthError> {
        let email = normalize_email(email);
        Ok(self.store.find_by_email(&email).await?.map(Into::into))
    }

    /// Validates, hashes the secret and persists a new account.
    pub async fn create(&self, candidate: NewUser) -> Result<User, AuthError> {
        let name = candidate.name.trim().to_string();
        let email = normalize_email(&candidate.email);

        if name.is_empty() {
            return Err(AuthError::validation("name is required"));
        }
        if email.is_empty() {
            return Err(AuthError::validation("email is required"));
        }
        if !is_valid_email(&email) {
            warn!(email = %email, "invalid email");
            return Err(AuthError::validation("invalid email"));
        }
        if candidate.secret.is_empty() {
            return Err(AuthError::validation("secret is required"));
        }

        let password_hash = hash_password_blocking(candidate.secret).await?;
        let row = UserRow {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        self.store.insert(row.clone()).await?;
        debug!(user_id = %row.id, "user row inserted");

        Ok(UserWithSecret::from(row).into_user())
    }
}
