use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tokio::{fs, task};

use crate::model::{self, RecordJsonModel};

/// File-per-collection store rooted at one data directory.
///
/// Collections live at `<root>/<category>/<file>.json`. Reads never fail:
/// anything missing or unparsable comes back as an empty collection.
pub struct JsonDb {
    root: PathBuf,
}

impl JsonDb {
    pub async fn new(path: &str) -> Result<Self> {
        gp_log::info(Some("⚡"), "[JsonDb] Initializing component");

        fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create data directory {path}"))?;

        Ok(Self {
            root: PathBuf::from(path),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, category: &str, file: &str) -> PathBuf {
        self.root.join(category).join(format!("{file}.json"))
    }

    pub async fn read_collection(&self, category: &str, file: &str) -> Vec<RecordJsonModel> {
        let path = self.collection_path(category, file);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                gp_log::warn(
                    None,
                    format!("[JsonDb] Reading {} failed, treating as empty: {err}", path.display()),
                );
                return Vec::new();
            }
        };

        match model::parse_collection(&bytes) {
            Ok(records) => records,
            Err(err) => {
                gp_log::warn(
                    None,
                    format!("[JsonDb] {} is malformed, treating as empty: {err}", path.display()),
                );
                Vec::new()
            }
        }
    }

    /// Replaces the whole collection: the body goes to a uniquely named
    /// temporary file in the same directory, which is renamed over the target.
    pub async fn write_collection(
        &self,
        category: &str,
        file: &str,
        records: &[RecordJsonModel],
    ) -> Result<()> {
        let path = self.collection_path(category, file);
        let parent = match path.parent() {
            Some(parent) => parent.to_path_buf(),
            None => self.root.clone(),
        };
        fs::create_dir_all(&parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;

        let body = model::serialize_collection(records)?;
        let prefix = format!(".{file}.");
        let target = path.clone();

        task::spawn_blocking(move || -> Result<()> {
            let mut tmp_file = tempfile::Builder::new()
                .prefix(&prefix)
                .suffix(".json.tmp")
                .tempfile_in(&parent)
                .with_context(|| format!("Failed to create a temporary file in {}", parent.display()))?;
            tmp_file.write_all(&body)?;
            tmp_file.as_file().sync_all()?;
            tmp_file
                .persist(&target)
                .with_context(|| format!("Failed to replace {}", target.display()))?;
            Ok(())
        })
        .await??;

        gp_log::debug(
            None,
            format!("[JsonDb] Wrote {} records to {}", records.len(), path.display()),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::*;

    fn record(value: Value) -> RecordJsonModel {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let db = JsonDb::new(dir.path().to_str().unwrap()).await.unwrap();

        assert!(db.read_collection("safety", "hazards").await.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let db = JsonDb::new(dir.path().to_str().unwrap()).await.unwrap();

        let path = db.collection_path("safety", "hazards");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert!(db.read_collection("safety", "hazards").await.is_empty());
    }

    #[tokio::test]
    async fn write_then_read_keeps_order_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = JsonDb::new(dir.path().to_str().unwrap()).await.unwrap();

        let records = vec![
            record(json!({"hazard_id": "HAZ-002", "severity": "High"})),
            record(json!({"hazard_id": "HAZ-001", "severity": null})),
        ];
        db.write_collection("safety", "hazards", &records)
            .await
            .unwrap();

        let loaded = db.read_collection("safety", "hazards").await;
        assert_eq!(loaded, records);

        let entries = std::fs::read_dir(dir.path().join("safety"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(entries, vec!["hazards.json"]);
    }

    #[tokio::test]
    async fn write_overwrites_previous_collection() {
        let dir = tempfile::tempdir().unwrap();
        let db = JsonDb::new(dir.path().to_str().unwrap()).await.unwrap();

        db.write_collection("equipment", "inventory", &[record(json!({"equipment_id": "EQ-0001"}))])
            .await
            .unwrap();
        db.write_collection("equipment", "inventory", &[])
            .await
            .unwrap();

        assert!(db.read_collection("equipment", "inventory").await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writes_all_succeed_and_leave_a_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = Arc::new(JsonDb::new(dir.path().to_str().unwrap()).await.unwrap());

        for _ in 0..5 {
            let mut handles = Vec::new();
            for writer in 0..8 {
                let db = db.clone();
                handles.push(tokio::spawn(async move {
                    let records = (0..500)
                        .map(|n| record(json!({"rfi_number": format!("RFI-{n:03}"), "writer": writer})))
                        .collect::<Vec<_>>();
                    db.write_collection("engineering", "rfis", &records).await
                }));
            }
            for handle in handles {
                handle.await.unwrap().unwrap();
            }

            let path = db.collection_path("engineering", "rfis");
            let loaded = model::parse_collection(&std::fs::read(&path).unwrap()).unwrap();
            assert_eq!(loaded.len(), 500);
        }

        let entries = std::fs::read_dir(dir.path().join("engineering")).unwrap().count();
        assert_eq!(entries, 1);
    }
}
