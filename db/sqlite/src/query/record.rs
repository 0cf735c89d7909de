use itertools::Itertools;

use crate::model::record::RecordColumnModel;

pub const POSITION_COLUMN: &str = "_position";
pub const ID_COLUMN: &str = "_id";
pub const EXTRA_COLUMN: &str = "_extra";
pub const FIELDS_COLUMN: &str = "_fields";

pub const TABLE_EXISTS: &str =
    "SELECT COUNT(1) FROM \"sqlite_master\" WHERE \"type\" = 'table' AND \"name\" = ?";
pub const TABLE_COLUMNS: &str = "SELECT \"name\" FROM pragma_table_info(?)";

pub fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub fn create_table(record_table: &str, columns: &[RecordColumnModel]) -> String {
    let mut defs = vec![
        format!("{} integer", quote(POSITION_COLUMN)),
        format!("{} text", quote(ID_COLUMN)),
    ];
    defs.extend(
        columns
            .iter()
            .map(|col| format!("{} {}", quote(col.name()), col.kind().to_str())),
    );
    defs.push(format!("{} text", quote(EXTRA_COLUMN)));
    defs.push(format!("{} text", quote(FIELDS_COLUMN)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote(record_table),
        defs.join(", ")
    )
}

/// SQLite accepts a single ADD COLUMN per ALTER TABLE.
pub fn add_column(record_table: &str, column: &RecordColumnModel) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        quote(record_table),
        quote(column.name()),
        column.kind().to_str()
    )
}

pub fn insert(record_table: &str, columns: &[RecordColumnModel]) -> String {
    let names = [POSITION_COLUMN, ID_COLUMN]
        .into_iter()
        .chain(columns.iter().map(|col| col.name()))
        .chain([EXTRA_COLUMN, FIELDS_COLUMN])
        .collect::<Vec<_>>();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(record_table),
        names.iter().map(|col| quote(col)).join(", "),
        names.iter().map(|_| "?").join(", ")
    )
}

pub fn select_all(record_table: &str, columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {} ASC",
        columns.iter().map(|col| quote(col)).join(", "),
        quote(record_table),
        quote(POSITION_COLUMN)
    )
}

/// First row whose `_id` is the bound value.
pub fn select_by_id(record_table: &str, columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ? ORDER BY {} ASC LIMIT 1",
        columns.iter().map(|col| quote(col)).join(", "),
        quote(record_table),
        quote(ID_COLUMN),
        quote(POSITION_COLUMN)
    )
}

pub fn delete_all(record_table: &str) -> String {
    format!("DELETE FROM {}", quote(record_table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::value::ColumnKind;

    fn columns() -> Vec<RecordColumnModel> {
        vec![
            RecordColumnModel::new("title", &ColumnKind::Text),
            RecordColumnModel::new("cost", &ColumnKind::Real),
        ]
    }

    #[test]
    fn create_table_wraps_fields_with_bookkeeping_columns() {
        assert_eq!(
            create_table("record_rfis", &columns()),
            "CREATE TABLE IF NOT EXISTS \"record_rfis\" (\"_position\" integer, \"_id\" text, \"title\" text, \"cost\" real, \"_extra\" text, \"_fields\" text)"
        );
    }

    #[test]
    fn insert_has_one_placeholder_per_column() {
        assert_eq!(
            insert("record_rfis", &columns()),
            "INSERT INTO \"record_rfis\" (\"_position\", \"_id\", \"title\", \"cost\", \"_extra\", \"_fields\") VALUES (?, ?, ?, ?, ?, ?)"
        );
    }

    #[test]
    fn select_by_id_takes_the_first_match() {
        assert_eq!(
            select_by_id("record_rfis", &["_id", "title"]),
            "SELECT \"_id\", \"title\" FROM \"record_rfis\" WHERE \"_id\" = ? ORDER BY \"_position\" ASC LIMIT 1"
        );
    }

    #[test]
    fn quote_escapes_embedded_quotes() {
        assert_eq!(quote("a\"b"), "\"a\"\"b\"");
    }
}
