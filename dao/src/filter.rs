use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::record::RecordDao;

pub const SEARCH_TEXT: &str = "search_text";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, PartialEq, Debug)]
pub enum Condition {
    /// Field equals the value. Numbers compare numerically and a missing
    /// field equals `null`.
    Equals { field: String, value: Value },
    /// Some top-level string field contains the text, ignoring case.
    SearchText(String),
    /// Field parses as a date within the inclusive bounds.
    DateRange {
        field: String,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Condition {
    pub fn matches(&self, record: &RecordDao) -> bool {
        match self {
            Self::Equals { field, value } => values_equal(record.get(field), value),
            Self::SearchText(text) => {
                if text.is_empty() {
                    return true;
                }
                let needle = text.to_lowercase();
                record.data().values().any(|v| match v {
                    Value::String(s) => s.to_lowercase().contains(&needle),
                    _ => false,
                })
            }
            Self::DateRange { field, start, end } => {
                let date = match record.get(field) {
                    Some(Value::String(s)) => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
                        Ok(date) => date,
                        Err(_) => return false,
                    },
                    _ => return false,
                };
                start.map_or(true, |start| date >= start) && end.map_or(true, |end| date <= end)
            }
        }
    }
}

/// Ordered list of conditions; a record passes when it meets all of them.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FilterSpec {
    conditions: Vec<Condition>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds equality conditions from a field map, where the key
    /// `search_text` becomes a text search.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut spec = Self::new();
        for (field, value) in map {
            if field == SEARCH_TEXT {
                let text = match value {
                    Value::String(s) => s.to_owned(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                spec.push(Condition::SearchText(text));
            } else {
                spec.push(Condition::Equals {
                    field: field.to_owned(),
                    value: value.clone(),
                });
            }
        }
        spec
    }

    pub fn conditions(&self) -> &Vec<Condition> {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.push(condition);
        self
    }

    pub fn matches(&self, record: &RecordDao) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
    }

    pub fn apply(&self, records: &[RecordDao]) -> Vec<RecordDao> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn values_equal(actual: Option<&Value>, expected: &Value) -> bool {
    match (actual, expected) {
        (None, expected) => expected.is_null(),
        (Some(Value::Number(a)), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => a == b,
            },
        },
        (Some(actual), expected) => actual == expected,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records() -> Vec<RecordDao> {
        serde_json::from_value(json!([
            {"id": "RFI-001", "status": "open", "subject": "Steel beam", "cost": 10, "due": "2025-03-01"},
            {"id": "RFI-002", "status": "closed", "subject": "HVAC", "cost": 10.0, "due": "2025-04-15"},
            {"id": "RFI-003", "status": "open", "subject": "Roof", "notes": ["steel deck"], "due": "soon"},
        ]))
        .unwrap()
    }

    fn ids(records: &[RecordDao]) -> Vec<String> {
        records.iter().filter_map(|r| r.id("id")).collect()
    }

    #[test]
    fn equality_filter() {
        let spec = FilterSpec::from_map(json!({"status": "open"}).as_object().unwrap());
        assert_eq!(ids(&spec.apply(&records())), vec!["RFI-001", "RFI-003"]);
    }

    #[test]
    fn numbers_compare_numerically() {
        let spec = FilterSpec::from_map(json!({"cost": 10}).as_object().unwrap());
        assert_eq!(ids(&spec.apply(&records())), vec!["RFI-001", "RFI-002"]);
    }

    #[test]
    fn missing_field_equals_null() {
        let spec = FilterSpec::from_map(json!({"cost": null}).as_object().unwrap());
        assert_eq!(ids(&spec.apply(&records())), vec!["RFI-003"]);
    }

    #[test]
    fn search_text_is_case_insensitive_on_top_level_strings() {
        let spec = FilterSpec::from_map(json!({"search_text": "STEEL"}).as_object().unwrap());
        assert_eq!(ids(&spec.apply(&records())), vec!["RFI-001"]);

        let spec = FilterSpec::from_map(json!({"search_text": ""}).as_object().unwrap());
        assert_eq!(spec.apply(&records()).len(), 3);
    }

    #[test]
    fn date_range_is_inclusive_and_drops_unparsable() {
        let spec = FilterSpec::new().with(Condition::DateRange {
            field: "due".to_owned(),
            start: parse_date("2025-03-01"),
            end: parse_date("2025-04-15"),
        });
        assert_eq!(ids(&spec.apply(&records())), vec!["RFI-001", "RFI-002"]);

        let spec = FilterSpec::new().with(Condition::DateRange {
            field: "due".to_owned(),
            start: parse_date("2025-03-02"),
            end: None,
        });
        assert_eq!(ids(&spec.apply(&records())), vec!["RFI-002"]);
    }

    #[test]
    fn empty_spec_keeps_everything() {
        assert_eq!(FilterSpec::new().apply(&records()).len(), 3);
    }
}
