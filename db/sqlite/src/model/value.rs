use anyhow::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColumnKind {
    Boolean,
    Integer,
    Real,
    Text,
    Date,
    Json,
}

impl ColumnKind {
    /// Declared SQL type. Dates and JSON are kept as text so they decode as strings.
    pub fn to_str(&self) -> &str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text | Self::Date | Self::Json => "text",
        }
    }

    pub fn from_str(str: &str) -> Result<Self> {
        match str {
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "real" => Ok(Self::Real),
            "text" => Ok(Self::Text),
            "date" => Ok(Self::Date),
            "json" => Ok(Self::Json),
            _ => Err(Error::msg(format!("Unknown column kind '{str}'"))),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ColumnValue {
    Boolean(Option<bool>),
    Integer(Option<i64>),
    Real(Option<f64>),
    Text(Option<String>),
}

impl ColumnValue {
    pub fn none(kind: &ColumnKind) -> Self {
        match kind {
            ColumnKind::Boolean => Self::Boolean(None),
            ColumnKind::Integer => Self::Integer(None),
            ColumnKind::Real => Self::Real(None),
            ColumnKind::Text | ColumnKind::Date | ColumnKind::Json => Self::Text(None),
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            Self::Boolean(v) => v.is_none(),
            Self::Integer(v) => v.is_none(),
            Self::Real(v) => v.is_none(),
            Self::Text(v) => v.is_none(),
        }
    }
}
