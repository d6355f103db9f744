use anyhow::Result;
use libsql::Connection;
use rand::Rng;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct Token {
    pub id: i64,
    pub value: String,
    pub user_id: i64,
}

fn row_to_token(row: &libsql::Row) -> Result<Token> {
    Ok(Token {
        id: row.get(0)?,
        value: row.get(1)?,
        user_id: row.get(2)?,
    })
}

/// Opaque session identifier: the hex digest of 32 random bytes.
pub fn generate_value() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes[..]);
    hex::encode(Sha256::digest(bytes))
}

pub struct Tokens<'a> {
    conn: &'a Connection,
}

impl<'a> Tokens<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn generate_for_user(&self, user_id: i64) -> Result<Token> {
        let query = r#"
            INSERT INTO tokens (value, user_id)
            VALUES (?, ?)
            RETURNING id, value, user_id
        "#;

        let mut rows = self
            .conn
            .query(query, libsql::params![generate_value(), user_id])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(row_to_token(&row)?)
        } else {
            anyhow::bail!("Failed to create token")
        }
    }

    /// Exact, case-sensitive match on the stored value.
    pub async fn find_by_value(&self, value: &str) -> Result<Option<Token>> {
        let query = "SELECT id, value, user_id FROM tokens WHERE value = ?";

        let mut rows = self.conn.query(query, libsql::params![value]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row_to_token(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn delete_by_value(&self, value: &str) -> Result<bool> {
        let result = self
            .conn
            .execute("DELETE FROM tokens WHERE value = ?", libsql::params![value])
            .await?;
        Ok(result > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::users::Users;

    #[test]
    fn generated_values_are_hex_and_unique() {
        let a = generate_value();
        let b = generate_value();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn tokens_round_trip_through_the_store() {
        let db = Database::memory().await.unwrap();
        let conn = db.connection();

        let user = Users::new(conn).create("Whitney", "digest").await.unwrap();
        let tokens = Tokens::new(conn);
        let token = tokens.generate_for_user(user.id).await.unwrap();

        let found = tokens.find_by_value(&token.value).await.unwrap().unwrap();
        assert_eq!(found.id, token.id);
        assert_eq!(found.user_id, user.id);

        assert!(tokens.find_by_value("abc1234").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let db = Database::memory().await.unwrap();
        let conn = db.connection();

        let user = Users::new(conn).create("Whitney", "digest").await.unwrap();
        let tokens = Tokens::new(conn);
        let token = tokens.generate_for_user(user.id).await.unwrap();

        let upper = token.value.to_uppercase();
        assert_ne!(upper, token.value);
        assert!(tokens.find_by_value(&upper).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_token_ends_the_session() {
        let db = Database::memory().await.unwrap();
        let conn = db.connection();

        let user = Users::new(conn).create("Whitney", "digest").await.unwrap();
        let tokens = Tokens::new(conn);
        let token = tokens.generate_for_user(user.id).await.unwrap();

        assert!(tokens.delete_by_value(&token.value).await.unwrap());
        assert!(tokens.find_by_value(&token.value).await.unwrap().is_none());
        assert!(!tokens.delete_by_value(&token.value).await.unwrap());
    }
}
