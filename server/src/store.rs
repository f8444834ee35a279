//! Embedded document store for items.
//!
//! Each item is kept as a JSON document keyed by its id. Rows carry an
//! autoincrement sequence so listing returns items in insertion order.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::item::{Item, NewItem};

const MEMORY_URI: &str = "sqlite::memory:";
const SQLITE_SCHEME: &str = "sqlite://";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to connect to store at {uri}: {source}")]
    Connect {
        uri: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Unsupported store URI: {0}")]
    UnsupportedUri(String),

    #[error("Store error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Malformed item document: {0}")]
    Document(#[from] serde_json::Error),
}

enum Location<'a> {
    Memory,
    File(&'a str),
}

fn locate(uri: &str) -> Result<Location<'_>, StoreError> {
    if uri == MEMORY_URI {
        return Ok(Location::Memory);
    }
    let path = uri.strip_prefix(SQLITE_SCHEME).unwrap_or(uri);
    if path.is_empty() || path.contains("://") {
        return Err(StoreError::UnsupportedUri(uri.to_string()));
    }
    Ok(Location::File(path))
}

/// Shared handle to the single store connection.
///
/// Opened once at startup and cloned into every request.
#[derive(Clone)]
pub struct ItemStore {
    conn: Arc<Mutex<Connection>>,
}

impl ItemStore {
    pub fn connect(uri: &str) -> Result<Self, StoreError> {
        let connect_err = |source| StoreError::Connect {
            uri: uri.to_string(),
            source,
        };

        let conn = match locate(uri)? {
            Location::Memory => Connection::open_in_memory().map_err(connect_err)?,
            Location::File(path) => {
                let is_new = !Path::new(path).exists();
                let conn = Connection::open(path).map_err(connect_err)?;
                if is_new {
                    info!("Store created: {path}");
                } else {
                    info!("Store opened: {path}");
                }
                conn
            }
        };

        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(connect_err)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS items (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                doc TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn list(&self) -> Result<Vec<Item>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, doc FROM items ORDER BY seq")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut items = Vec::new();
        for row in rows {
            let (id, doc) = row?;
            let fields: NewItem = serde_json::from_str(&doc)?;
            items.push(fields.with_id(id));
        }
        Ok(items)
    }

    pub fn insert(&self, new_item: NewItem) -> Result<Item, StoreError> {
        let id = Uuid::new_v4().to_string();
        let doc = serde_json::to_string(&new_item)?;

        self.conn.lock().execute(
            "INSERT INTO items (id, doc) VALUES (?1, ?2)",
            params![id, doc],
        )?;

        debug!(%id, "Item inserted");
        Ok(new_item.with_id(id))
    }

    /// Removes the item with `id`, returning whether a document was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self
            .conn
            .lock()
            .execute("DELETE FROM items WHERE id = ?1", params![id])?;

        debug!(%id, removed, "Item delete");
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> ItemStore {
        ItemStore::connect(MEMORY_URI).unwrap()
    }

    fn new_item(name: &str, price: f64) -> NewItem {
        NewItem {
            name: name.to_string(),
            description: None,
            price,
        }
    }

    #[test]
    fn empty_store_lists_nothing() {
        assert!(memory_store().list().unwrap().is_empty());
    }

    #[test]
    fn insert_assigns_distinct_ids() {
        let store = memory_store();
        let a = store.insert(new_item("A", 1.0)).unwrap();
        let b = store.insert(new_item("B", 2.0)).unwrap();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let store = memory_store();
        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            store.insert(new_item(name, i as f64)).unwrap();
        }

        let names: Vec<_> = store.list().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn round_trips_exact_price_and_description() {
        let store = memory_store();
        let created = store
            .insert(NewItem {
                name: "Widget".into(),
                description: Some("A widget".into()),
                price: 9.99,
            })
            .unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![created]);
        assert_eq!(listed[0].price, 9.99);
    }

    #[test]
    fn delete_reports_prior_existence() {
        let store = memory_store();
        let item = store.insert(new_item("Pen", 1.5)).unwrap();

        assert!(store.delete(&item.id).unwrap());
        assert!(!store.delete(&item.id).unwrap());
        assert!(!store.delete("never-existed").unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn file_store_persists_across_connections() {
        let path = std::env::temp_dir().join(format!("items-{}.sqlite", Uuid::new_v4()));
        let uri = format!("sqlite://{}", path.display());

        let id = ItemStore::connect(&uri)
            .unwrap()
            .insert(new_item("Kept", 3.0))
            .unwrap()
            .id;

        let reopened = ItemStore::connect(&uri).unwrap().list().unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened[0].id, id);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn unreachable_path_fails_to_connect() {
        let err = ItemStore::connect("sqlite:///definitely/missing/dir/items.sqlite")
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::Connect { .. }));
    }

    #[test]
    fn foreign_scheme_is_unsupported() {
        let err = ItemStore::connect("mongodb://localhost:27017/merndb")
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::UnsupportedUri(_)));
    }
}
