use anyhow::{Error, Result};
use gp_db_sqlite::model::value::{ColumnKind as ColumnKindSqlite, ColumnValue as ColumnValueSqlite};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use strum_macros::EnumIter;

/// Form widget kind of a module field.
#[derive(Deserialize, Serialize, EnumIter, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,        // single line input
    Textarea,    // multi line input
    Number,      // decimal number
    Integer,     // whole number
    Date,        // YYYY-MM-DD
    Boolean,     // checkbox
    Select,      // one of the options
    Multiselect, // list of the options
}

impl FieldKind {
    pub fn to_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
        }
    }

    pub fn from_str(str: &str) -> Result<Self> {
        match str {
            "text" => Ok(Self::Text),
            "textarea" => Ok(Self::Textarea),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "date" => Ok(Self::Date),
            "boolean" => Ok(Self::Boolean),
            "select" => Ok(Self::Select),
            "multiselect" => Ok(Self::Multiselect),
            _ => Err(Error::msg(format!("Unknown field kind '{str}'"))),
        }
    }

    pub fn to_sqlitedb_model(&self) -> ColumnKindSqlite {
        match self {
            Self::Text | Self::Textarea | Self::Select => ColumnKindSqlite::Text,
            Self::Number => ColumnKindSqlite::Real,
            Self::Integer => ColumnKindSqlite::Integer,
            Self::Date => ColumnKindSqlite::Date,
            Self::Boolean => ColumnKindSqlite::Boolean,
            Self::Multiselect => ColumnKindSqlite::Json,
        }
    }
}

/// Typed column value for `value`, or `None` when the value does not fit the
/// column exactly and has to be kept in the row's extra object instead.
pub fn to_sqlitedb_model(kind: &ColumnKindSqlite, value: &Value) -> Option<ColumnValueSqlite> {
    match (kind, value) {
        (ColumnKindSqlite::Text | ColumnKindSqlite::Date, Value::String(s)) => {
            Some(ColumnValueSqlite::Text(Some(s.to_owned())))
        }
        (ColumnKindSqlite::Integer, Value::Number(n)) if !n.is_f64() => {
            n.as_i64().map(|n| ColumnValueSqlite::Integer(Some(n)))
        }
        (ColumnKindSqlite::Real, Value::Number(n)) if n.is_f64() => {
            n.as_f64().map(|n| ColumnValueSqlite::Real(Some(n)))
        }
        (ColumnKindSqlite::Boolean, Value::Bool(b)) => Some(ColumnValueSqlite::Boolean(Some(*b))),
        (ColumnKindSqlite::Json, Value::Array(_) | Value::Object(_)) => {
            serde_json::to_string(value)
                .ok()
                .map(|s| ColumnValueSqlite::Text(Some(s)))
        }
        _ => None,
    }
}

/// JSON value of a stored column, `None` for NULL.
pub fn from_sqlitedb_model(
    kind: &ColumnKindSqlite,
    value: &ColumnValueSqlite,
) -> Result<Option<Value>> {
    match value {
        ColumnValueSqlite::Boolean(v) => Ok(v.map(Value::Bool)),
        ColumnValueSqlite::Integer(v) => Ok(v.map(Value::from)),
        ColumnValueSqlite::Real(v) => match v {
            Some(v) => match Number::from_f64(*v) {
                Some(n) => Ok(Some(Value::Number(n))),
                None => Err(Error::msg(format!("Stored real {v} is not a JSON number"))),
            },
            None => Ok(None),
        },
        ColumnValueSqlite::Text(v) => match (kind, v) {
            (ColumnKindSqlite::Json, Some(v)) => Ok(Some(serde_json::from_str(v)?)),
            (_, Some(v)) => Ok(Some(Value::String(v.to_owned()))),
            (_, None) => Ok(None),
        },
    }
}
