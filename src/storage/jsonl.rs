//! JSON Lines storage sink.
//!
//! Each collection is written to `<dir>/<collection>.jsonl`, one record per
//! line, with its field descriptions in `<dir>/<collection>.schema.json`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::sink::{validate_identifier, StorageSink, StoreRow};
use crate::error_handling::DatabaseError;

#[derive(Serialize)]
struct FieldDescription<'a> {
    field: &'a str,
    description: &'a str,
}

/// [`StorageSink`] appending records to per-collection JSONL files.
pub struct JsonlStore {
    dir: PathBuf,
    // Serializes appends so concurrent records never interleave within a line
    installed: Mutex<HashSet<String>>,
}

impl JsonlStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            installed: Mutex::new(HashSet::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the data file for `collection`.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.jsonl"))
    }
}

#[async_trait]
impl StorageSink for JsonlStore {
    async fn install_store(
        &self,
        collection: &str,
        schema: &[(&str, &str)],
    ) -> Result<(), DatabaseError> {
        let collection = validate_identifier(collection)?;
        let fields = schema
            .iter()
            .map(|(field, description)| {
                validate_identifier(field).map(|field| FieldDescription { field, description })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut installed = self.installed.lock().await;
        tokio::fs::create_dir_all(&self.dir).await?;
        let schema_path = self.dir.join(format!("{collection}.schema.json"));
        tokio::fs::write(&schema_path, serde_json::to_vec_pretty(&fields)?).await?;
        debug!("Installed store {collection} at {}", self.dir.display());

        installed.insert(collection.to_string());
        Ok(())
    }

    async fn one(&self, collection: &str, row: &StoreRow) -> Result<(), DatabaseError> {
        let installed = self.installed.lock().await;
        if !installed.contains(collection) {
            return Err(DatabaseError::UnknownCollection(collection.to_string()));
        }

        let mut line = serde_json::to_vec(row)?;
        line.push(b'\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.collection_path(collection))
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}
