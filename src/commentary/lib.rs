use anyhow::Result;
use chrono::NaiveDate;
use libsql::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Commentary {
    pub id: i64,
    pub headline: String,
    pub rating: Option<i64>,
    pub date_added: Option<NaiveDate>,
    pub place_id: i64,
    pub user_id: i64,
}

/// Commentary as attached to a place detail response: the foreign keys are
/// dropped, they are implied by the surrounding payload.
#[derive(Debug, Serialize)]
pub struct CommentaryView {
    pub id: i64,
    pub headline: String,
    pub rating: Option<i64>,
    pub date_added: Option<NaiveDate>,
}

impl From<Commentary> for CommentaryView {
    fn from(commentary: Commentary) -> Self {
        CommentaryView {
            id: commentary.id,
            headline: commentary.headline,
            rating: commentary.rating,
            date_added: commentary.date_added,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentary {
    pub headline: String,
    pub rating: Option<i64>,
    pub date_added: Option<NaiveDate>,
}

fn row_to_commentary(row: &libsql::Row) -> Result<Commentary> {
    let date_added: Option<String> = row.get(3)?;
    let date_added = date_added.map(|s| s.parse::<NaiveDate>()).transpose()?;

    Ok(Commentary {
        id: row.get(0)?,
        headline: row.get(1)?,
        rating: row.get(2)?,
        date_added,
        place_id: row.get(4)?,
        user_id: row.get(5)?,
    })
}

pub struct Commentaries<'a> {
    conn: &'a Connection,
}

impl<'a> Commentaries<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        user_id: i64,
        place_id: i64,
        input: CreateCommentary,
    ) -> Result<Commentary> {
        let query = r#"
            INSERT INTO commentaries (headline, rating, date_added, place_id, user_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, headline, rating, date_added, place_id, user_id
        "#;

        let date_added = input.date_added.map(|d| d.to_string());
        let mut rows = self
            .conn
            .query(
                query,
                libsql::params![input.headline, input.rating, date_added, place_id, user_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(row_to_commentary(&row)?)
        } else {
            anyhow::bail!("Failed to create commentary")
        }
    }

    /// A user keeps at most one meaningful commentary per place; reads take
    /// the first match.
    pub async fn find_for_user_and_place(
        &self,
        user_id: i64,
        place_id: i64,
    ) -> Result<Option<Commentary>> {
        let query = r#"
            SELECT id, headline, rating, date_added, place_id, user_id
            FROM commentaries
            WHERE user_id = ? AND place_id = ?
            ORDER BY id
            LIMIT 1
        "#;

        let mut rows = self
            .conn
            .query(query, libsql::params![user_id, place_id])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row_to_commentary(&row)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::places::Places;
    use crate::users::Users;

    #[tokio::test]
    async fn creates_and_finds_commentary_for_a_user_and_place() {
        let db = Database::memory().await.unwrap();
        let conn = db.connection();

        let user = Users::new(conn).create("Whitney", "digest").await.unwrap();
        let place = Places::new(conn).create("Alma Chocolates").await.unwrap();
        let place_id = place.id.as_saved().unwrap();

        let commentaries = Commentaries::new(conn);
        let created = commentaries
            .create(
                user.id,
                place_id,
                CreateCommentary {
                    headline: "best chocolate in town".to_string(),
                    rating: Some(5),
                    date_added: Some("2015-10-20".parse().unwrap()),
                },
            )
            .await
            .unwrap();
        assert_eq!(created.rating, Some(5));

        let found = commentaries
            .find_for_user_and_place(user.id, place_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.headline, "best chocolate in town");
        assert_eq!(found.date_added, Some("2015-10-20".parse().unwrap()));

        assert!(
            commentaries
                .find_for_user_and_place(user.id + 1, place_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn view_drops_the_foreign_keys() {
        let commentary = Commentary {
            id: 1,
            headline: "solid pour".to_string(),
            rating: None,
            date_added: None,
            place_id: 3,
            user_id: 7,
        };

        let json = serde_json::to_value(CommentaryView::from(commentary)).unwrap();
        assert!(json.get("place_id").is_none());
        assert!(json.get("user_id").is_none());
        assert_eq!(json["headline"], serde_json::json!("solid pour"));
    }
}
