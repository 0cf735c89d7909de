use anyhow::Result;
use serde_json::Value;

use crate::{
    filter::FilterSpec,
    module::ModuleConfig,
    record::{self, RecordDao, CREATED_DATE},
    sort::{SortDirection, SortSpec},
    Db,
};

/// A successful update: the record as it was loaded and as it was stored.
#[derive(Clone, PartialEq, Debug)]
pub struct RecordUpdate {
    previous: RecordDao,
    current: RecordDao,
}

impl RecordUpdate {
    pub fn previous(&self) -> &RecordDao {
        &self.previous
    }

    pub fn current(&self) -> &RecordDao {
        &self.current
    }
}

/// Generic create/read/update/delete over one module's collection.
///
/// Each write is a full read-modify-write of the collection with no
/// locking, so concurrent writers to the same module race and the last
/// write wins.
pub struct CrudEngine<'a> {
    db: &'a Db,
    module: &'a ModuleConfig,
}

impl<'a> CrudEngine<'a> {
    pub fn new(db: &'a Db, module: &'a ModuleConfig) -> Self {
        Self { db, module }
    }

    pub fn module(&self) -> &ModuleConfig {
        self.module
    }

    pub async fn get_all(&self) -> Vec<RecordDao> {
        self.module.collection().db_select(self.db).await
    }

    /// First record whose id matches.
    pub async fn get_by_id(&self, id: &str) -> Option<RecordDao> {
        self.module.collection().db_select_one(self.db, id).await
    }

    pub async fn create(&self, mut record: RecordDao) -> Result<RecordDao> {
        let collection = self.module.collection();
        let mut records = collection.db_select(self.db).await;
        let id_field = self.module.id_field();

        if record.has_blank_id(id_field) {
            let existing = records
                .iter()
                .filter_map(|r| r.id(id_field))
                .collect::<Vec<_>>();
            let id = self
                .module
                .id_format()
                .next(existing.iter().map(String::as_str));
            record.insert(id_field, Value::String(id));
        } else if let Some(id) = record.id(id_field) {
            if records.iter().any(|r| r.id(id_field).as_deref() == Some(id.as_str())) {
                gp_log::warn(
                    None,
                    &format!(
                        "[CrudEngine] Module '{}' already has a record with id '{id}'",
                        self.module.key()
                    ),
                );
            }
        }

        record.stamp_created(&record::now_timestamp());
        records.push(record.clone());
        collection.db_replace(self.db, &records).await?;
        Ok(record)
    }

    /// Replaces the first record with `id`, keeping its id and
    /// `created_date`. `None` when there is no such record.
    pub async fn update(&self, id: &str, mut record: RecordDao) -> Result<Option<RecordUpdate>> {
        let collection = self.module.collection();
        let mut records = collection.db_select(self.db).await;
        let id_field = self.module.id_field();

        let idx = match records
            .iter()
            .position(|r| r.id(id_field).as_deref() == Some(id))
        {
            Some(idx) => idx,
            None => return Ok(None),
        };

        let stored = &records[idx];
        match stored.get(id_field) {
            Some(stored_id) => record.insert(id_field, stored_id.clone()),
            None => record.insert(id_field, Value::String(id.to_owned())),
        }
        match stored.get(CREATED_DATE) {
            Some(created) => record.insert(CREATED_DATE, created.clone()),
            None => {
                record.remove(CREATED_DATE);
            }
        }
        record.stamp_modified(&record::now_timestamp());

        let previous = std::mem::replace(&mut records[idx], record.clone());
        collection.db_replace(self.db, &records).await?;
        Ok(Some(RecordUpdate {
            previous,
            current: record,
        }))
    }

    /// Removes every record with `id`. `false` and no write when none match.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let collection = self.module.collection();
        let records = collection.db_select(self.db).await;
        let id_field = self.module.id_field();

        let before = records.len();
        let kept = records
            .into_iter()
            .filter(|r| r.id(id_field).as_deref() != Some(id))
            .collect::<Vec<_>>();
        if kept.len() == before {
            return Ok(false);
        }
        collection.db_replace(self.db, &kept).await?;
        Ok(true)
    }

    pub fn filter(records: &[RecordDao], spec: &FilterSpec) -> Vec<RecordDao> {
        spec.apply(records)
    }

    pub fn sort(records: &[RecordDao], field: &str, direction: &SortDirection) -> Vec<RecordDao> {
        SortSpec::new(field, direction).apply(records)
    }
}
