use anyhow::Result;
use libsql::Connection;
use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// The password digest never leaves the process; it is skipped on every
/// serialization, not filtered per response.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_digest: Option<String>,
}

fn row_to_user(row: &libsql::Row) -> Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        password_digest: row.get(2)?,
    })
}

fn digest_with_salt(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Salted digest in `salt$digest` form.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill(&mut salt[..]);
    let salt = hex::encode(salt);
    let digest = digest_with_salt(&salt, password);
    format!("{salt}${digest}")
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, digest)) => digest_with_salt(salt, password) == digest,
        None => false,
    }
}

pub struct Users<'a> {
    conn: &'a Connection,
}

impl<'a> Users<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, name: &str, password_digest: &str) -> Result<User> {
        let query = r#"
            INSERT INTO users (name, password_digest)
            VALUES (?, ?)
            RETURNING id, name, password_digest
        "#;

        let mut rows = self
            .conn
            .query(query, libsql::params![name, password_digest])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(row_to_user(&row)?)
        } else {
            anyhow::bail!("Failed to create user")
        }
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        let query = "SELECT id, name, password_digest FROM users WHERE id = ?";

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let query = "SELECT id, name, password_digest FROM users WHERE name = ?";

        let mut rows = self.conn.query(query, libsql::params![name]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }
}
