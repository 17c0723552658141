//! SQLite-backed asset store for the Tally ledger.
//!
//! Provides [`AssetStore`], the single owner of the asset table:
//! create/read/update/delete plus the search and aggregation queries
//! the agent tools are built on.
//!
//! All SQL lives in `sql/*.sql` files, loaded via `include_str!`.

pub use asset::{Asset, AssetPatch, NewAsset};
pub use error::StoreError;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};
use std::{path::Path, sync::Mutex};
use ulid::Ulid;

mod asset;
mod error;

const SQL_SCHEMA: &str = include_str!("../sql/schema.sql");
const SQL_INSERT: &str = include_str!("../sql/insert_asset.sql");
const SQL_SELECT: &str = include_str!("../sql/select_asset.sql");
const SQL_SELECT_PAGE: &str = include_str!("../sql/select_page.sql");
const SQL_UPDATE: &str = include_str!("../sql/update_asset.sql");
const SQL_DELETE: &str = include_str!("../sql/delete_asset.sql");
const SQL_SEARCH: &str = include_str!("../sql/search_assets.sql");
const SQL_SELECT_MAX: &str = include_str!("../sql/select_max.sql");
const SQL_SELECT_MIN: &str = include_str!("../sql/select_min.sql");
const SQL_SELECT_MEAN: &str = include_str!("../sql/select_mean.sql");

/// SQLite-backed asset store.
///
/// Wraps a `rusqlite::Connection` in a `Mutex` for thread safety. Each
/// operation acquires the connection for its own duration and releases
/// it on every exit path; update runs inside a transaction that rolls
/// back on drop.
pub struct AssetStore {
    conn: Mutex<Connection>,
}

impl AssetStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory database (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SQL_SCHEMA)?;
        Ok(())
    }

    /// Create a new asset, assigning its id and creation timestamp.
    pub fn create(&self, new: NewAsset) -> Result<Asset, StoreError> {
        validate(new.value, new.quantity)?;

        let asset = Asset {
            id: Ulid::new().to_string(),
            name: new.name,
            category: new.category,
            value: new.value,
            quantity: new.quantity,
            status: new.status,
            purchase_date: new.purchase_date,
            created_at: Utc::now(),
        };

        let result = {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                SQL_INSERT,
                rusqlite::params![
                    asset.id,
                    asset.name,
                    asset.category,
                    asset.value,
                    asset.quantity,
                    asset.status,
                    asset.purchase_date.map(|d| d.to_rfc3339()),
                    asset.created_at.to_rfc3339(),
                ],
            )
        };
        trace("create", result)?;
        tracing::info!(id = %asset.id, "created asset record");
        Ok(asset)
    }

    /// Fetch a single asset by id.
    pub fn get(&self, id: &str) -> Result<Asset, StoreError> {
        let conn = self.conn.lock().unwrap();
        let found = trace(
            "get",
            conn.query_row(SQL_SELECT, [id], row_to_asset).optional(),
        )?;
        found.ok_or_else(|| {
            tracing::warn!(id, "asset not found");
            StoreError::NotFound
        })
    }

    /// List assets with pagination.
    pub fn page(&self, offset: i64, limit: i64) -> Result<Vec<Asset>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let result = (|| {
            let mut stmt = conn.prepare(SQL_SELECT_PAGE)?;
            let rows = stmt.query_map(rusqlite::params![limit, offset], row_to_asset)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })();
        trace("page", result)
    }

    /// Apply a partial update, leaving omitted fields unchanged.
    pub fn update(&self, id: &str, patch: AssetPatch) -> Result<Asset, StoreError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = trace("update", conn.transaction())?;

        let mut asset = trace(
            "update",
            tx.query_row(SQL_SELECT, [id], row_to_asset).optional(),
        )?
        .ok_or(StoreError::NotFound)?;

        patch.apply(&mut asset);
        validate(asset.value, asset.quantity)?;

        let result = (|| {
            tx.execute(
                SQL_UPDATE,
                rusqlite::params![
                    asset.id,
                    asset.name,
                    asset.category,
                    asset.value,
                    asset.quantity,
                    asset.status,
                    asset.purchase_date.map(|d| d.to_rfc3339()),
                ],
            )?;
            tx.commit()
        })();
        trace("update", result)?;
        Ok(asset)
    }

    /// Delete an asset by id.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let affected = trace("delete", conn.execute(SQL_DELETE, [id]))?;
        if affected == 0 {
            tracing::warn!(id, "asset not found");
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Case-insensitive substring search over name and category.
    pub fn search(&self, text: &str) -> Result<Vec<Asset>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let result = (|| {
            let mut stmt = conn.prepare(SQL_SEARCH)?;
            let rows = stmt.query_map([text], row_to_asset)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })();
        trace("search", result)
    }

    /// The most valuable asset, or `None` on an empty store.
    pub fn max_value(&self) -> Result<Option<Asset>, StoreError> {
        let conn = self.conn.lock().unwrap();
        trace(
            "max_value",
            conn.query_row(SQL_SELECT_MAX, [], row_to_asset).optional(),
        )
    }

    /// The least valuable asset, or `None` on an empty store.
    pub fn min_value(&self) -> Result<Option<Asset>, StoreError> {
        let conn = self.conn.lock().unwrap();
        trace(
            "min_value",
            conn.query_row(SQL_SELECT_MIN, [], row_to_asset).optional(),
        )
    }

    /// The mean asset value rounded to 2 decimals, or `None` on an
    /// empty store, never a computed zero.
    pub fn mean_value(&self) -> Result<Option<f64>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mean: Option<f64> = trace(
            "mean_value",
            conn.query_row(SQL_SELECT_MEAN, [], |row| row.get(0)),
        )?;
        Ok(mean.map(|m| (m * 100.0).round() / 100.0))
    }
}

/// Check the asset value invariants.
fn validate(value: f64, quantity: f64) -> Result<(), StoreError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(StoreError::Invalid("value must be positive".into()));
    }
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(StoreError::Invalid("quantity must be non-negative".into()));
    }
    Ok(())
}

/// Log a storage fault at the operation boundary and convert it into
/// the typed error.
fn trace<T, E: Into<StoreError>>(op: &'static str, result: Result<T, E>) -> Result<T, StoreError> {
    result.map_err(|e| {
        let e = e.into();
        if let StoreError::Storage(cause) = &e {
            tracing::error!("storage failure during {op}: {cause}");
        }
        e
    })
}

/// Map a result row onto an [`Asset`].
fn row_to_asset(row: &Row<'_>) -> rusqlite::Result<Asset> {
    let purchase_date: Option<String> = row.get(6)?;
    let created_at: String = row.get(7)?;
    Ok(Asset {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        value: row.get(3)?,
        quantity: row.get(4)?,
        status: row.get(5)?,
        purchase_date: purchase_date
            .map(|d| parse_timestamp(6, &d))
            .transpose()?,
        created_at: parse_timestamp(7, &created_at)?,
    })
}

/// Parse an RFC 3339 timestamp stored as TEXT.
fn parse_timestamp(idx: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AssetStore {
        AssetStore::in_memory().unwrap()
    }

    fn macbook() -> NewAsset {
        NewAsset {
            name: "MacBook Pro".into(),
            category: "Electronics".into(),
            value: 2000.0,
            quantity: 1.0,
            status: "Active".into(),
            purchase_date: None,
        }
    }

    fn gold() -> NewAsset {
        NewAsset {
            name: "Ounce of Gold".into(),
            category: "Commodities".into(),
            value: 2500.0,
            quantity: 2.5,
            status: "Active".into(),
            purchase_date: Some(Utc::now()),
        }
    }

    #[test]
    fn open_file_backed() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::open(dir.path().join("ledger.db")).unwrap();
        store.create(macbook()).unwrap();
        assert_eq!(store.page(0, 10).unwrap().len(), 1);
    }

    #[test]
    fn create_then_get_roundtrip() {
        let store = store();
        let created = store.create(gold()).unwrap();
        let fetched = store.get(&created.id).unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Ounce of Gold");
        assert_eq!(fetched.category, "Commodities");
        assert_eq!(fetched.value, 2500.0);
        assert_eq!(fetched.quantity, 2.5);
        assert_eq!(fetched.status, "Active");
        assert_eq!(fetched.purchase_date, created.purchase_date);
    }

    #[test]
    fn create_rejects_nonpositive_value() {
        let store = store();
        let mut asset = macbook();
        asset.value = 0.0;
        assert!(matches!(
            store.create(asset),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn create_rejects_negative_quantity() {
        let store = store();
        let mut asset = macbook();
        asset.quantity = -1.0;
        assert!(matches!(
            store.create(asset),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn quantity_defaults_to_one() {
        let new: NewAsset = serde_json::from_value(serde_json::json!({
            "name": "Desk",
            "category": "Furniture",
            "value": 300.0,
            "status": "Active"
        }))
        .unwrap();
        assert_eq!(new.quantity, 1.0);
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = store();
        assert!(matches!(store.get("missing"), Err(StoreError::NotFound)));
    }

    #[test]
    fn partial_update_keeps_omitted_fields() {
        let store = store();
        let created = store.create(gold()).unwrap();

        let patch = AssetPatch {
            value: Some(2600.0),
            ..Default::default()
        };
        let updated = store.update(&created.id, patch).unwrap();

        assert_eq!(updated.value, 2600.0);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.category, created.category);
        assert_eq!(updated.quantity, created.quantity);
        assert_eq!(updated.status, created.status);
        assert_eq!(updated.purchase_date, created.purchase_date);
    }

    #[test]
    fn update_rejects_invalid_merged_value() {
        let store = store();
        let created = store.create(macbook()).unwrap();
        let patch = AssetPatch {
            value: Some(-5.0),
            ..Default::default()
        };
        assert!(matches!(
            store.update(&created.id, patch),
            Err(StoreError::Invalid(_))
        ));
        // Rolled back: the stored value is untouched.
        assert_eq!(store.get(&created.id).unwrap().value, 2000.0);
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = store();
        assert!(matches!(
            store.update("missing", AssetPatch::default()),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn delete_then_get_not_found() {
        let store = store();
        let created = store.create(macbook()).unwrap();
        store.delete(&created.id).unwrap();
        assert!(matches!(store.get(&created.id), Err(StoreError::NotFound)));
    }

    #[test]
    fn delete_missing_is_not_found() {
        let store = store();
        assert!(matches!(store.delete("missing"), Err(StoreError::NotFound)));
    }

    #[test]
    fn search_matches_name_case_insensitive() {
        let store = store();
        store.create(macbook()).unwrap();
        store.create(gold()).unwrap();

        let hits = store.search("macbook").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "MacBook Pro");
    }

    #[test]
    fn search_matches_category_substring() {
        let store = store();
        store.create(macbook()).unwrap();
        store.create(gold()).unwrap();

        let hits = store.search("ELECTRO").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, "Electronics");
    }

    #[test]
    fn search_no_match_is_empty() {
        let store = store();
        store.create(macbook()).unwrap();
        assert!(store.search("yacht").unwrap().is_empty());
    }

    #[test]
    fn page_respects_offset_and_limit() {
        let store = store();
        for i in 0..5 {
            let mut asset = macbook();
            asset.name = format!("Asset {i}");
            store.create(asset).unwrap();
        }
        let page = store.page(2, 2).unwrap();
        assert_eq!(page.len(), 2);
        let all = store.page(0, 100).unwrap();
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn mean_empty_store_is_none() {
        let store = store();
        assert_eq!(store.mean_value().unwrap(), None);
    }

    #[test]
    fn mean_rounds_to_two_decimals() {
        let store = store();
        let mut a = macbook();
        a.value = 10.0;
        store.create(a).unwrap();
        let mut b = macbook();
        b.value = 11.0;
        store.create(b).unwrap();
        let mut c = macbook();
        c.value = 13.0;
        store.create(c).unwrap();

        // (10 + 11 + 13) / 3 = 11.333...
        assert_eq!(store.mean_value().unwrap(), Some(11.33));
    }

    #[test]
    fn max_and_min_values() {
        let store = store();
        store.create(macbook()).unwrap();
        store.create(gold()).unwrap();

        assert_eq!(store.max_value().unwrap().unwrap().name, "Ounce of Gold");
        assert_eq!(store.min_value().unwrap().unwrap().name, "MacBook Pro");
    }

    #[test]
    fn max_empty_store_is_none() {
        let store = store();
        assert!(store.max_value().unwrap().is_none());
    }
}
