use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    store::{Change, StoreError, StoreResult, TodoStore},
    todo::{TodoId, TodoItem},
};

#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoStore {
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        prepare_parent_dir(database_url).map_err(|e| StoreError::Database(sqlx::Error::Io(e)))?;
        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let in_memory = database_url.contains(":memory:");
        let options = if in_memory {
            // every connection to :memory: is a separate database, so pin a single one
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = options.connect_with(connect_options).await?;
        tracing::debug!(%database_url, in_memory, "sqlite pool ready");
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn init(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todo_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                is_complete BOOLEAN NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn all(&self) -> StoreResult<Vec<TodoItem>> {
        let rows = sqlx::query("SELECT id, name, is_complete FROM todo_items ORDER BY id")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(row_to_item).collect::<Result<Vec<_>, _>>()?)
    }

    async fn find(&self, id: TodoId) -> StoreResult<Option<TodoItem>> {
        let row = sqlx::query("SELECT id, name, is_complete FROM todo_items WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_item).transpose()?)
    }

    async fn apply(&self, changes: Vec<Change>) -> StoreResult<usize> {
        let count = changes.len();
        let mut tx = self.pool.begin().await?;
        for change in changes {
            match change {
                Change::Remove(id) => {
                    sqlx::query("DELETE FROM todo_items WHERE id = ?1")
                        .bind(id.0)
                        .execute(&mut *tx)
                        .await?;
                }
                Change::Add(item) if item.id.is_unassigned() => {
                    sqlx::query("INSERT INTO todo_items (name, is_complete) VALUES (?1, ?2)")
                        .bind(&item.name)
                        .bind(item.is_complete)
                        .execute(&mut *tx)
                        .await?;
                }
                Change::Add(item) => {
                    sqlx::query("INSERT INTO todo_items (id, name, is_complete) VALUES (?1, ?2, ?3)")
                        .bind(item.id.0)
                        .bind(&item.name)
                        .bind(item.is_complete)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| map_conflict(e, item.id))?;
                }
            }
        }
        // dropping an uncommitted transaction rolls it back
        tx.commit().await?;
        Ok(count)
    }
}

fn map_conflict(err: sqlx::Error, id: TodoId) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        // 1555 = SQLITE_CONSTRAINT_PRIMARYKEY, 2067 = SQLITE_CONSTRAINT_UNIQUE
        let key_clash = matches!(db.code().as_deref(), Some("1555") | Some("2067"));
        if db.is_unique_violation() || key_clash { return StoreError::Conflict(id); }
    }
    StoreError::Database(err)
}

fn row_to_item(row: &SqliteRow) -> Result<TodoItem, sqlx::Error> {
    Ok(TodoItem {
        id: TodoId(row.try_get("id")?),
        name: row.try_get("name")?,
        is_complete: row.try_get("is_complete")?,
    })
}

/// Creates the directory holding a file-backed database; sqlx creates the file.
fn prepare_parent_dir(database_url: &str) -> std::io::Result<()> {
    if database_url.contains(":memory:") { return Ok(()); }
    let Some(path) = database_url.strip_prefix("sqlite://").or_else(|| database_url.strip_prefix("sqlite:")) else { return Ok(()) };
    let path = path.split('?').next().unwrap_or(path);
    // On Windows, absolute paths may look like /C:/path; strip the leading slash
    let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
        &path[1..]
    } else {
        path
    };
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
    }
    Ok(())
}
