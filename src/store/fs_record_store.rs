use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::model::catalog_entry::CatalogEntry;
use crate::store::{ensure_known_field, RecordSink};
use crate::util::error::CatalogError;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Record {
    pub id: Option<String>,
    pub api_resources: Option<Vec<CatalogEntry>>,
    pub name: String,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

/// Keeps the record of one cluster in `<records_dir>/<name>.yaml`. The file is rewritten
/// every time the id is set.
pub struct FsRecordStore {
    name: String,
    record: Record,
    records_dir: Option<PathBuf>,
}

impl FsRecordStore {
    pub fn new(records_dir: Option<PathBuf>, name: &str) -> Self {
        let mut instance = Self {
            records_dir,
            name: name.to_string(),
            record: Record {
                id: None,
                api_resources: None,
                name: name.to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        };

        match instance.load() {
            Ok(record) => instance.record = record,
            Err(err) => {
                debug!("No previous record for {}: {}", name, err);
            }
        };

        instance
    }

    fn record_path(&self) -> anyhow::Result<PathBuf> {
        let dir = self.records_dir.as_ref().context("Records dir is not set")?;
        Ok(dir.join(format!("{}.yaml", self.name)))
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn dump(&self) -> anyhow::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.record_path()?)?;
        serde_yaml::to_writer(file, &self.record)?;
        Ok(())
    }

    pub fn load(&self) -> anyhow::Result<Record> {
        let file = File::open(self.record_path()?)?;
        let record: Record = serde_yaml::from_reader(file)?;
        Ok(record)
    }

    fn update_record_meta(&mut self) {
        self.record.updated_at = Utc::now();
        self.record.name = self.name.to_string();
    }
}

impl RecordSink for FsRecordStore {
    fn set_field(&mut self, field: &str, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
        ensure_known_field(field)?;
        self.record.api_resources = Some(entries.to_vec());
        self.update_record_meta();
        Ok(())
    }

    fn set_id(&mut self, id: &str) -> Result<(), CatalogError> {
        if self.record.id.as_deref().is_some_and(|prev| prev != id) {
            warn!("Record {} changed id to {}", self.name, id);
        }
        self.record.id = Some(id.to_string());
        self.update_record_meta();
        Ok(self.dump()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::API_RESOURCES_FIELD;

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            fully_qualified_name: name.to_string(),
            api_group_version: "v1".to_string(),
            verbs: ["get".to_string()].into_iter().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_dump_and_reload() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = FsRecordStore::new(Some(dir.path().to_path_buf()), "cluster_local");
        store
            .set_field(API_RESOURCES_FIELD, &[entry("pods"), entry("services")])
            .unwrap();
        store.set_id("abc").unwrap();
        assert!(dir.path().join("cluster_local.yaml").is_file());

        let reloaded = FsRecordStore::new(Some(dir.path().to_path_buf()), "cluster_local");
        assert_eq!(reloaded.record(), store.record());
        assert_eq!(reloaded.record().id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_shorter_record_overwrites() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = FsRecordStore::new(Some(dir.path().to_path_buf()), "c");
        store
            .set_field(API_RESOURCES_FIELD, &[entry("pods"), entry("services")])
            .unwrap();
        store.set_id("first").unwrap();

        store.set_field(API_RESOURCES_FIELD, &[]).unwrap();
        store.set_id("second").unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.id.as_deref(), Some("second"));
        assert_eq!(reloaded.api_resources, Some(vec![]));
    }

    #[test]
    fn test_without_records_dir_set_id_fails() {
        let mut store = FsRecordStore::new(None, "c");
        store.set_field(API_RESOURCES_FIELD, &[]).unwrap();
        let err = store.set_id("abc").unwrap_err();
        assert!(matches!(err, CatalogError::AnyhowError(_)));
    }
}
