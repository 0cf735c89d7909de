use anyhow::{Error, Result};
use serde_json::{Map, Value};

/// One record as it sits in the collection file.
pub type RecordJsonModel = Map<String, Value>;

/// Parses a collection file body. The top level must be an array and every
/// element an object.
pub fn parse_collection(bytes: &[u8]) -> Result<Vec<RecordJsonModel>> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(values) => {
            let mut records = Vec::with_capacity(values.len());
            for (idx, value) in values.into_iter().enumerate() {
                match value {
                    Value::Object(record) => records.push(record),
                    _ => return Err(Error::msg(format!("Element {idx} is not an object"))),
                }
            }
            Ok(records)
        }
        _ => Err(Error::msg("Top-level value is not an array")),
    }
}

pub fn serialize_collection(records: &[RecordJsonModel]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}
