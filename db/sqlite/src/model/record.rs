use super::value::{ColumnKind, ColumnValue};

pub struct RecordColumnModel {
    name: String,
    kind: ColumnKind,
}

impl RecordColumnModel {
    pub fn new(name: &str, kind: &ColumnKind) -> Self {
        Self {
            name: name.to_owned(),
            kind: *kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }
}

/// One stored record. `values` lines up with the column list it was built
/// or selected against; `extra` holds a JSON object for everything else and
/// `fields` the JSON array of field names in record order.
#[derive(Clone, PartialEq, Debug)]
pub struct RecordRowModel {
    id: Option<String>,
    values: Vec<ColumnValue>,
    extra: String,
    fields: String,
}

impl RecordRowModel {
    pub fn new(id: &Option<String>, values: Vec<ColumnValue>, extra: &str, fields: &str) -> Self {
        Self {
            id: id.clone(),
            values,
            extra: extra.to_owned(),
            fields: fields.to_owned(),
        }
    }

    pub fn id(&self) -> &Option<String> {
        &self.id
    }

    pub fn values(&self) -> &Vec<ColumnValue> {
        &self.values
    }

    pub fn extra(&self) -> &str {
        &self.extra
    }

    pub fn fields(&self) -> &str {
        &self.fields
    }
}
