use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use super::{error::AuthError, repo::UserStore, repo_types::UserRow};

/// Process-local store keyed by normalized email.
#[derive(Default)]
pub struct InMemoryUserStore {
    rows: Mutex<HashMap<String, UserRow>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, AuthError> {
        let rows = self.rows.lock().expect("user store lock");
        Ok(rows.get(email).cloned())
    }

    async fn insert(&self, row: UserRow) -> Result<(), AuthError> {
        let mut rows = self.rows.lock().expect("user store lock");
        if rows.contains_key(&row.email) {
            return Err(AuthError::DuplicateEmail);
        }
        rows.insert(row.email.clone(), row);
        Ok(())
    }
}

/// Store whose lookups and inserts both fail.
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<UserRow>, AuthError> {
        Err(AuthError::storage(anyhow::anyhow!("connection reset by peer")))
    }

    async fn insert(&self, _row: UserRow) -> Result<(), AuthError> {
        Err(AuthError::storage(anyhow::anyhow!("connection reset by peer")))
    }
}

/// Store that finds nobody and rejects every insert.
pub struct ReadOnlyUserStore;

#[async_trait]
impl UserStore for ReadOnlyUserStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<UserRow>, AuthError> {
        Ok(None)
    }

    async fn insert(&self, _row: UserRow) -> Result<(), AuthError> {
        Err(AuthError::storage(anyhow::anyhow!("relation \"users\" does not exist")))
    }
}
