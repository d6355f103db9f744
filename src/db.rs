use crate::config::Config;
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::Path;
use std::time::Duration;
use tokio::sync::Mutex;

const SYSTEM_MIGRATIONS: &[(&str, &str)] = &[(
    "system/000_migrations_table.sql",
    include_str!("migrations/system/000_migrations_table.sql"),
)];

pub struct Database {
    db: LibsqlDatabase,
    conn: Connection,
    tx_lock: Mutex<()>,
    turso_url: Option<String>,
    turso_auth_token: Option<String>,
}

impl Database {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn is_replica(turso_url: &Option<String>, turso_auth_token: &Option<String>) -> bool {
        turso_url.is_some() && turso_auth_token.is_some()
    }

    pub async fn sync(&self) -> Result<()> {
        if Self::is_replica(&self.turso_url, &self.turso_auth_token) {
            self.db
                .sync()
                .await
                .map_err(|e| anyhow::anyhow!("sync failed: {}", e))?;
        }
        Ok(())
    }

    async fn is_migration_applied(conn: &Connection, name: &str) -> Result<bool> {
        let query = "SELECT 1 FROM _migrations WHERE name = ?";
        match conn.query(query, libsql::params![name]).await {
            Ok(mut rows) => Ok(rows.next().await?.is_some()),
            Err(e) => {
                if e.to_string().contains("no such table") {
                    Ok(false)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn record_migration(conn: &Connection, name: &str) -> Result<()> {
        let query = r#"
            INSERT INTO _migrations (name, applied_at)
            VALUES (?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#;
        match conn.execute(query, libsql::params![name]).await {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.to_string().contains("no such table") {
                    Ok(())
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
        if Self::is_migration_applied(conn, name).await? {
            tracing::debug!("migration {} already applied, skipping", name);
            return Ok(());
        }

        tracing::info!("applying migration: {}", name);
        conn.execute_batch(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to execute migration {name}: {e}"))?;

        Self::record_migration(conn, name).await?;
        Ok(())
    }

    async fn apply_migrations(conn: &Connection) -> Result<()> {
        for (filename, sql) in SYSTEM_MIGRATIONS {
            Self::run_migration(conn, filename, sql).await?;
        }

        // Referenced tables first: lists and tokens point at users, the
        // join table points at lists and places.
        for (filename, sql) in crate::users::migrations() {
            Self::run_migration(conn, filename, sql).await?;
        }

        for (filename, sql) in crate::places::migrations() {
            Self::run_migration(conn, filename, sql).await?;
        }

        for (filename, sql) in crate::lists::migrations() {
            Self::run_migration(conn, filename, sql).await?;
        }

        for (filename, sql) in crate::auth::migrations() {
            Self::run_migration(conn, filename, sql).await?;
        }

        for (filename, sql) in crate::commentary::migrations() {
            Self::run_migration(conn, filename, sql).await?;
        }

        Ok(())
    }

    pub async fn new(cfg: &Config, data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(cfg.app.get_db());
        let turso_url = cfg.app.turso_url.clone();
        let turso_auth_token = cfg.app.turso_auth_token.clone();

        let db = match (&turso_url, &turso_auth_token) {
            (Some(url), Some(token)) => {
                tracing::info!("[db] running in synced database mode (offline writes)");
                let sync_interval = Duration::from_secs(cfg.app.sync_interval_seconds);
                Builder::new_synced_database(&path, url.clone(), token.clone())
                    .sync_interval(sync_interval)
                    .build()
                    .await?
            }
            _ => Builder::new_local(&path).build().await?,
        };

        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        // The schema's REFERENCES clauses are declarative, matching the
        // original app (Knex/SQLite runs with FK enforcement off by default);
        // libsql enables foreign_keys by default, so turn it back off.
        conn.execute("PRAGMA foreign_keys = OFF", ()).await?;

        Self::apply_migrations(&conn).await?;

        Ok(Database {
            db,
            conn,
            tx_lock: Mutex::new(()),
            turso_url,
            turso_auth_token,
        })
    }

    /// Delete a list after clearing its place associations.
    pub async fn delete_list(&self, list_id: i64) -> Result<()> {
        let _guard = self.tx_lock.lock().await;

        self.conn.execute("BEGIN TRANSACTION", ()).await?;

        let result = async {
            self.conn
                .execute(
                    "DELETE FROM lists_places WHERE list_id = ?",
                    libsql::params![list_id],
                )
                .await?;
            self.conn
                .execute("DELETE FROM lists WHERE id = ?", libsql::params![list_id])
                .await?;
            Ok::<(), anyhow::Error>(())
        }
        .await;

        match result {
            Ok(_) => {
                self.conn.execute("COMMIT", ()).await?;
                Ok(())
            }
            Err(e) => {
                let _ = self.conn.execute("ROLLBACK", ()).await;
                Err(e)
            }
        }
    }

    /// Delete a place after detaching it from every list.
    pub async fn delete_place(&self, place_id: i64) -> Result<()> {
        let _guard = self.tx_lock.lock().await;

        self.conn.execute("BEGIN TRANSACTION", ()).await?;

        let result = async {
            self.conn
                .execute(
                    "DELETE FROM lists_places WHERE place_id = ?",
                    libsql::params![place_id],
                )
                .await?;
            self.conn
                .execute("DELETE FROM places WHERE id = ?", libsql::params![place_id])
                .await?;
            Ok::<(), anyhow::Error>(())
        }
        .await;

        match result {
            Ok(_) => {
                self.conn.execute("COMMIT", ()).await?;
                Ok(())
            }
            Err(e) => {
                let _ = self.conn.execute("ROLLBACK", ()).await;
                Err(e)
            }
        }
    }

    #[cfg(test)]
    pub(crate) async fn memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        let conn = db.connect()?;
        conn.execute("PRAGMA foreign_keys = OFF", ()).await?;
        Self::apply_migrations(&conn).await?;

        Ok(Database {
            db,
            conn,
            tx_lock: Mutex::new(()),
            turso_url: None,
            turso_auth_token: None,
        })
    }
}
