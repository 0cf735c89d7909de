use anyhow::{Error, Result};
use chrono::{SecondsFormat, Utc};
use gp_db_sqlite::model::record::{RecordColumnModel, RecordRowModel};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value;

pub const CREATED_DATE: &str = "created_date";
pub const MODIFIED_DATE: &str = "modified_date";

/// One module record: field name to JSON value, in insertion order.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug, Default)]
#[serde(transparent)]
pub struct RecordDao {
    data: Map<String, Value>,
}

impl RecordDao {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_owned(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Id as text: strings as-is, other values as their JSON text, `None`
    /// when missing or null.
    pub fn id(&self, id_field: &str) -> Option<String> {
        self.get(id_field).and_then(stringify)
    }

    /// Whether the id field is missing, null or an empty string.
    pub fn has_blank_id(&self, id_field: &str) -> bool {
        match self.get(id_field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }

    pub fn stamp_created(&mut self, now: &str) {
        self.insert(CREATED_DATE, Value::String(now.to_owned()));
        self.insert(MODIFIED_DATE, Value::String(now.to_owned()));
    }

    pub fn stamp_modified(&mut self, now: &str) {
        self.insert(MODIFIED_DATE, Value::String(now.to_owned()));
    }

    pub fn to_sqlitedb_model(
        &self,
        id_field: &str,
        columns: &[RecordColumnModel],
    ) -> Result<RecordRowModel> {
        let mut extra = self.data.clone();
        let mut values = Vec::with_capacity(columns.len());
        for col in columns {
            let column_value = self
                .get(col.name())
                .and_then(|v| value::to_sqlitedb_model(col.kind(), v));
            match column_value {
                Some(column_value) => {
                    extra.shift_remove(col.name());
                    values.push(column_value);
                }
                None => values.push(gp_db_sqlite::model::value::ColumnValue::none(col.kind())),
            }
        }
        Ok(RecordRowModel::new(
            &self.id(id_field),
            values,
            &serde_json::to_string(&extra)?,
            &serde_json::to_string(&self.keys().collect::<Vec<_>>())?,
        ))
    }

    pub fn from_sqlitedb_model(
        columns: &[RecordColumnModel],
        model: &RecordRowModel,
    ) -> Result<Self> {
        if columns.len() != model.values().len() {
            return Err(Error::msg(format!(
                "Row has {} values for {} columns",
                model.values().len(),
                columns.len()
            )));
        }
        let mut data = Map::with_capacity(columns.len());
        for (col, column_value) in columns.iter().zip(model.values()) {
            if let Some(value) = value::from_sqlitedb_model(col.kind(), column_value)? {
                data.insert(col.name().to_owned(), value);
            }
        }
        match serde_json::from_str::<Value>(model.extra())? {
            Value::Object(extra) => data.extend(extra),
            _ => return Err(Error::msg("Row extra column is not a JSON object")),
        }

        // Stored field order first, then anything the order list misses.
        let order = serde_json::from_str::<Vec<String>>(model.fields())?;
        let mut ordered = Map::with_capacity(data.len());
        for key in order {
            if let Some(value) = data.shift_remove(&key) {
                ordered.insert(key, value);
            }
        }
        ordered.extend(data);
        Ok(Self { data: ordered })
    }
}

impl From<Map<String, Value>> for RecordDao {
    fn from(data: Map<String, Value>) -> Self {
        Self::new(data)
    }
}

/// Text form of a value used for id comparison and search.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.to_owned()),
        other => Some(other.to_string()),
    }
}

/// Current time as RFC 3339 UTC with second precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use gp_db_sqlite::model::value::ColumnKind;
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> RecordDao {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn ids_are_stringified() {
        assert_eq!(record(json!({"id": "RFI-001"})).id("id").as_deref(), Some("RFI-001"));
        assert_eq!(record(json!({"id": 7})).id("id").as_deref(), Some("7"));
        assert_eq!(record(json!({"id": null})).id("id"), None);
        assert_eq!(record(json!({})).id("id"), None);
    }

    #[test]
    fn blank_ids() {
        assert!(record(json!({"id": ""})).has_blank_id("id"));
        assert!(record(json!({"id": null})).has_blank_id("id"));
        assert!(record(json!({})).has_blank_id("id"));
        assert!(!record(json!({"id": 0})).has_blank_id("id"));
    }

    #[test]
    fn timestamps_have_second_precision() {
        let now = now_timestamp();
        assert_eq!(now.len(), 20);
        assert!(now.ends_with('Z'));
    }

    #[test]
    fn sqlite_rows_keep_unfit_values_in_extra() {
        let columns = vec![
            RecordColumnModel::new("id", &ColumnKind::Text),
            RecordColumnModel::new("cost", &ColumnKind::Real),
            RecordColumnModel::new("open", &ColumnKind::Boolean),
        ];
        let original = record(json!({
            "id": "EQ-0001",
            "cost": 12,
            "open": null,
            "tags": ["a", {"b": 1}],
        }));
        let row = original.to_sqlitedb_model("id", &columns).unwrap();
        assert_eq!(row.id().as_deref(), Some("EQ-0001"));
        let extra: Value = serde_json::from_str(row.extra()).unwrap();
        assert_eq!(extra, json!({"cost": 12, "open": null, "tags": ["a", {"b": 1}]}));
        assert_eq!(RecordDao::from_sqlitedb_model(&columns, &row).unwrap(), original);
    }

    #[test]
    fn sqlite_rows_keep_field_order() {
        let columns = vec![
            RecordColumnModel::new("id", &ColumnKind::Text),
            RecordColumnModel::new("cost", &ColumnKind::Real),
        ];
        let original = record(json!({"notes": "n", "cost": 1.5, "id": "EQ-0001", "hours": 3}));
        let row = original.to_sqlitedb_model("id", &columns).unwrap();
        let loaded = RecordDao::from_sqlitedb_model(&columns, &row).unwrap();
        assert_eq!(
            loaded.keys().collect::<Vec<_>>(),
            vec!["notes", "cost", "id", "hours"]
        );

        let unordered = RecordRowModel::new(row.id(), row.values().clone(), row.extra(), "[]");
        let loaded = RecordDao::from_sqlitedb_model(&columns, &unordered).unwrap();
        assert_eq!(loaded, original);
    }
}
