//! SQLite storage sink.
//!
//! Each installed collection becomes a table with one untyped column per
//! schema field (SQLite keeps the value's own type), plus bookkeeping
//! columns. Field descriptions are kept in the `store_fields` table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqlitePool};

use super::sink::{validate_identifier, StorageSink, StoreRow};
use crate::error_handling::DatabaseError;

const STORE_FIELDS_TABLE: &str = "CREATE TABLE IF NOT EXISTS store_fields (
    collection TEXT NOT NULL,
    field TEXT NOT NULL,
    description TEXT NOT NULL,
    PRIMARY KEY (collection, field)
)";

/// [`StorageSink`] writing one row per record into SQLite.
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
    run_id: Option<String>,
    collections: RwLock<HashMap<String, Vec<String>>>,
}

impl SqliteStore {
    /// Creates a sink over `pool`; rows are tagged with `run_id` when given.
    pub fn new(pool: Arc<SqlitePool>, run_id: Option<String>) -> Self {
        Self {
            pool,
            run_id,
            collections: RwLock::new(HashMap::new()),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn installed_fields(&self, collection: &str) -> Result<Vec<String>, DatabaseError> {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        collections
            .get(collection)
            .cloned()
            .ok_or_else(|| DatabaseError::UnknownCollection(collection.to_string()))
    }
}

#[async_trait]
impl StorageSink for SqliteStore {
    async fn install_store(
        &self,
        collection: &str,
        schema: &[(&str, &str)],
    ) -> Result<(), DatabaseError> {
        let collection = validate_identifier(collection)?;
        let fields = schema
            .iter()
            .map(|(field, _)| validate_identifier(field).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        let mut columns = vec![
            "id INTEGER PRIMARY KEY AUTOINCREMENT".to_string(),
            "run_id TEXT".to_string(),
            "observed_at_ms INTEGER NOT NULL".to_string(),
        ];
        columns.extend(fields.iter().map(|field| format!("\"{field}\"")));
        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS \"{collection}\" ({})",
            columns.join(", ")
        );

        let mut tx = self.pool.begin().await?;
        sqlx::query(STORE_FIELDS_TABLE).execute(&mut *tx).await?;
        sqlx::query(&create_table).execute(&mut *tx).await?;
        for (field, description) in schema {
            sqlx::query(
                "INSERT INTO store_fields (collection, field, description) VALUES (?, ?, ?)
                ON CONFLICT(collection, field) DO UPDATE SET description=excluded.description",
            )
            .bind(collection)
            .bind(*field)
            .bind(*description)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!("Installed store {collection} with {} fields", fields.len());
        self.collections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(collection.to_string(), fields);
        Ok(())
    }

    async fn one(&self, collection: &str, row: &StoreRow) -> Result<(), DatabaseError> {
        let fields = self.installed_fields(collection)?;

        for key in row.keys().filter(|key| !fields.contains(key)) {
            debug!("Dropping field {key} not in the {collection} schema");
        }

        let columns = fields
            .iter()
            .map(|field| format!(", \"{field}\""))
            .collect::<String>();
        let placeholders = ", ?".repeat(fields.len());
        let sql = format!(
            "INSERT INTO \"{collection}\" (run_id, observed_at_ms{columns}) VALUES (?, ?{placeholders})"
        );

        let mut query = sqlx::query(&sql)
            .bind(self.run_id.clone())
            .bind(chrono::Utc::now().timestamp_millis());
        for field in &fields {
            query = bind_value(query, row.get(field));
        }
        query.execute(self.pool.as_ref()).await?;

        Ok(())
    }
}

/// Binds a JSON value with the closest SQLite storage class.
fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: Option<&Value>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        None | Some(Value::Null) => query.bind(None::<String>),
        Some(Value::Bool(b)) => query.bind(*b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Some(Value::String(s)) => query.bind(s.clone()),
        Some(other) => query.bind(other.to_string()),
    }
}
