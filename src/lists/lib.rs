use anyhow::Result;
use libsql::Connection;
use serde::Serialize;

use crate::places::{Place, row_to_place};

#[derive(Debug, Clone, Serialize)]
pub struct List {
    pub id: i64,
    pub name: String,
    pub user_id: Option<i64>,
}

fn row_to_list(row: &libsql::Row) -> Result<List> {
    Ok(List {
        id: row.get(0)?,
        name: row.get(1)?,
        user_id: row.get(2)?,
    })
}

pub struct Lists<'a> {
    conn: &'a Connection,
}

impl<'a> Lists<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, name: &str, user_id: Option<i64>) -> Result<List> {
        let query = r#"
            INSERT INTO lists (name, user_id)
            VALUES (?, ?)
            RETURNING id, name, user_id
        "#;

        let mut rows = self
            .conn
            .query(query, libsql::params![name, user_id])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(row_to_list(&row)?)
        } else {
            anyhow::bail!("Failed to create list")
        }
    }

    pub async fn get(&self, id: i64) -> Result<Option<List>> {
        let query = "SELECT id, name, user_id FROM lists WHERE id = ?";

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row_to_list(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn list_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<List>> {
        let query = r#"
            SELECT id, name, user_id
            FROM lists
            WHERE user_id = ?
            ORDER BY id
            LIMIT ?
        "#;

        let mut rows = self
            .conn
            .query(query, libsql::params![user_id, limit])
            .await?;
        let mut lists = Vec::new();

        while let Some(row) = rows.next().await? {
            lists.push(row_to_list(&row)?);
        }

        Ok(lists)
    }

    /// Membership is at-most-once per (list, place) pair; adding the same
    /// place twice converges to a single row.
    pub async fn add_place(&self, list_id: i64, place_id: i64) -> Result<()> {
        let query = "INSERT OR IGNORE INTO lists_places (list_id, place_id) VALUES (?, ?)";
        self.conn
            .execute(query, libsql::params![list_id, place_id])
            .await?;
        Ok(())
    }

    pub async fn remove_place(&self, list_id: i64, place_id: i64) -> Result<()> {
        let query = "DELETE FROM lists_places WHERE list_id = ? AND place_id = ?";
        self.conn
            .execute(query, libsql::params![list_id, place_id])
            .await?;
        Ok(())
    }

    pub async fn places_for_list(&self, list_id: i64) -> Result<Vec<Place>> {
        let query = r#"
            SELECT places.id, places.name, places.google_place_id, places.location,
                   places.icon_url, places.address, places.phone, places.intl_phone,
                   places.locality, places.neighborhood, places.country,
                   places.postal_code, places.timezone, places.website, places.types,
                   places.temporary
            FROM places
            JOIN lists_places ON lists_places.place_id = places.id
            WHERE lists_places.list_id = ?
            ORDER BY places.id
        "#;

        let mut rows = self.conn.query(query, libsql::params![list_id]).await?;
        let mut places = Vec::new();

        while let Some(row) = rows.next().await? {
            places.push(row_to_place(&row)?);
        }

        Ok(places)
    }

    pub async fn places_for_user_list(&self, user_id: i64, list_id: i64) -> Result<Vec<Place>> {
        let query = r#"
            SELECT places.id, places.name, places.google_place_id, places.location,
                   places.icon_url, places.address, places.phone, places.intl_phone,
                   places.locality, places.neighborhood, places.country,
                   places.postal_code, places.timezone, places.website, places.types,
                   places.temporary
            FROM places
            JOIN lists_places ON lists_places.place_id = places.id
            JOIN lists ON lists.id = lists_places.list_id
            WHERE lists.id = ? AND lists.user_id = ?
            ORDER BY places.id
        "#;

        let mut rows = self
            .conn
            .query(query, libsql::params![list_id, user_id])
            .await?;
        let mut places = Vec::new();

        while let Some(row) = rows.next().await? {
            places.push(row_to_place(&row)?);
        }

        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::places::{PlaceId, Places};

    #[tokio::test]
    async fn membership_is_idempotent() {
        let db = Database::memory().await.unwrap();
        let conn = db.connection();
        let lists = Lists::new(conn);

        let place = Places::new(conn).create("Alma Chocolates").await.unwrap();
        let place_id = place.id.as_saved().unwrap();
        let list = lists.create("Sweet Treats", Some(1)).await.unwrap();

        lists.add_place(list.id, place_id).await.unwrap();
        lists.add_place(list.id, place_id).await.unwrap();

        let members = lists.places_for_list(list.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, PlaceId::Saved(place_id));

        lists.remove_place(list.id, place_id).await.unwrap();
        let members = lists.places_for_list(list.id).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn places_are_returned_in_id_order() {
        let db = Database::memory().await.unwrap();
        let conn = db.connection();
        let lists = Lists::new(conn);
        let places = Places::new(conn);

        let alma = places.create("Alma Chocolates").await.unwrap();
        let _barista = places.create("Barista").await.unwrap();
        let coava = places.create("Coava Coffee").await.unwrap();

        let list = lists.create("Sweet Treats", Some(1)).await.unwrap();
        lists
            .add_place(list.id, coava.id.as_saved().unwrap())
            .await
            .unwrap();
        lists
            .add_place(list.id, alma.id.as_saved().unwrap())
            .await
            .unwrap();

        let members = lists.places_for_list(list.id).await.unwrap();
        let ids: Vec<_> = members.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![PlaceId::Saved(1), PlaceId::Saved(3)]);
    }

    #[tokio::test]
    async fn user_scoped_query_only_sees_the_owners_list() {
        let db = Database::memory().await.unwrap();
        let conn = db.connection();
        let lists = Lists::new(conn);

        let place = Places::new(conn).create("Barista").await.unwrap();
        let list = lists.create("Coffee Shops", Some(1)).await.unwrap();
        lists
            .add_place(list.id, place.id.as_saved().unwrap())
            .await
            .unwrap();

        let members = lists.places_for_user_list(1, list.id).await.unwrap();
        assert_eq!(members.len(), 1);

        let members = lists.places_for_user_list(2, list.id).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn lists_are_scoped_to_their_owner() {
        let db = Database::memory().await.unwrap();
        let lists = Lists::new(db.connection());

        lists.create("Coffee Shops", Some(1)).await.unwrap();
        lists.create("Sweet Treats", Some(2)).await.unwrap();
        lists.create("Date Night", None).await.unwrap();

        let mine = lists.list_for_user(1, 100).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Coffee Shops");
    }
}
