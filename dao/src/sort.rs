use std::cmp::Ordering;

use anyhow::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{filter::DATE_FORMAT, record::RecordDao};

#[derive(Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_str(&self) -> &str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_str(str: &str) -> Result<Self> {
        match str.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(Error::msg(format!("Unknown sort direction '{str}'"))),
        }
    }

    pub fn flip(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Clone, Debug)]
pub struct SortSpec {
    field: String,
    direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: &str, direction: &SortDirection) -> Self {
        Self {
            field: field.to_owned(),
            direction: *direction,
        }
    }

    pub fn asc(field: &str) -> Self {
        Self::new(field, &SortDirection::Asc)
    }

    pub fn desc(field: &str) -> Self {
        Self::new(field, &SortDirection::Desc)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> &SortDirection {
        &self.direction
    }

    /// Stable sort. Missing and null values go last ascending and first
    /// descending; equal keys keep their input order either way.
    pub fn apply(&self, records: &[RecordDao]) -> Vec<RecordDao> {
        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| {
            let ord = compare(a.get(&self.field), b.get(&self.field));
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        sorted
    }
}

enum SortKey<'a> {
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    String(&'a str),
    Array,
    Object,
    Null,
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::String(_) => 3,
            Self::Array => 4,
            Self::Object => 5,
            Self::Null => 6,
        }
    }
}

fn sort_key(value: Option<&Value>) -> SortKey<'_> {
    match value {
        None | Some(Value::Null) => SortKey::Null,
        Some(Value::Bool(b)) => SortKey::Bool(*b),
        Some(Value::Number(n)) => SortKey::Number(n.as_f64().unwrap_or(f64::NAN)),
        Some(Value::String(s)) => match as_date(s) {
            Some(date) => SortKey::Date(date),
            None => SortKey::String(s),
        },
        Some(Value::Array(_)) => SortKey::Array,
        Some(Value::Object(_)) => SortKey::Object,
    }
}

/// `YYYY-MM-DD` strings that are real calendar dates.
fn as_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a, b) = (sort_key(a), sort_key(b));
    match (&a, &b) {
        (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
        (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
        (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
        (SortKey::String(a), SortKey::String(b)) => a.cmp(b),
        _ => a.rank().cmp(&b.rank()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(values: Value) -> Vec<RecordDao> {
        serde_json::from_value(values).unwrap()
    }

    fn column(records: &[RecordDao], field: &str) -> Vec<Value> {
        records
            .iter()
            .map(|r| r.get(field).cloned().unwrap_or(Value::Null))
            .collect()
    }

    #[test]
    fn nulls_last_ascending_first_descending() {
        let input = records(json!([{"v": 2}, {"v": null}, {"v": 1}, {}]));
        let asc = SortSpec::asc("v").apply(&input);
        assert_eq!(column(&asc, "v"), vec![json!(1), json!(2), Value::Null, Value::Null]);
        let desc = SortSpec::desc("v").apply(&input);
        assert_eq!(column(&desc, "v"), vec![Value::Null, Value::Null, json!(2), json!(1)]);
    }

    #[test]
    fn dates_sort_chronologically() {
        let input = records(json!([
            {"d": "2025-12-01"},
            {"d": "2024-02-29"},
            {"d": "2025-01-15"},
        ]));
        let asc = SortSpec::asc("d").apply(&input);
        assert_eq!(
            column(&asc, "d"),
            vec![json!("2024-02-29"), json!("2025-01-15"), json!("2025-12-01")]
        );
    }

    #[test]
    fn mixed_kinds_follow_rank() {
        let input = records(json!([
            {"v": {"a": 1}},
            {"v": "text"},
            {"v": [1]},
            {"v": "2025-01-01"},
            {"v": 3},
            {"v": true},
        ]));
        let asc = SortSpec::asc("v").apply(&input);
        assert_eq!(
            column(&asc, "v"),
            vec![json!(true), json!(3), json!("2025-01-01"), json!("text"), json!([1]), json!({"a": 1})]
        );
    }

    #[test]
    fn ties_keep_input_order_both_ways() {
        let input = records(json!([
            {"id": "a", "v": 1},
            {"id": "b", "v": 1},
            {"id": "c", "v": 0},
        ]));
        let asc = SortSpec::asc("v").apply(&input);
        assert_eq!(column(&asc, "id"), vec![json!("c"), json!("a"), json!("b")]);
        let desc = SortSpec::desc("v").apply(&input);
        assert_eq!(column(&desc, "id"), vec![json!("a"), json!("b"), json!("c")]);
    }

    #[test]
    fn invalid_calendar_date_sorts_as_string() {
        assert!(as_date("2025-02-30").is_none());
        assert!(as_date("2025-2-3").is_none());
        assert_eq!(as_date("2025-02-03"), NaiveDate::from_ymd_opt(2025, 2, 3));
    }

    #[test]
    fn direction_parsing() {
        assert_eq!(SortDirection::from_str("DESC").unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::Asc.flip(), SortDirection::Desc);
        assert!(SortDirection::from_str("up").is_err());
    }
}
