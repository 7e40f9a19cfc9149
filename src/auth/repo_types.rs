use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Public view of an account. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A user together with its stored hash, for credential checks only.
#[derive(Debug, Clone)]
pub struct UserWithSecret {
    pub user: User,
    pub password_hash: String,
}

impl UserWithSecret {
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Registration input as received from the client.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub secret: String,
}

/// Row in the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,                   // unique user ID
    pub name: String,               // display name
    pub email: String,              // normalized email
    pub password_hash: String,      // argon2 PHC string
    pub created_at: OffsetDateTime, // creation timestamp
}

impl From<UserRow> for UserWithSecret {
    fn from(r: UserRow) -> Self {
        Self {
            user: User {
                id: r.id,
                name: r.name,
                email: r.email,
                created_at: r.created_at,
            },
            password_hash: r.password_hash,
        }
    }
}
