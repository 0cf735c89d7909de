use ahash::{HashSet, HashSetExt};
use anyhow::Result;
use gp_db_json::{db::JsonDb, model::RecordJsonModel};
use gp_db_sqlite::{
    db::SqliteDb,
    model::{record::RecordColumnModel, value::ColumnKind as ColumnKindSqlite},
    query::record::{EXTRA_COLUMN, FIELDS_COLUMN, ID_COLUMN, POSITION_COLUMN},
};

use crate::{record::RecordDao, value::FieldKind, Db};

/// Handle on one stored collection of records.
///
/// With the JSON store this is `<root>/<category>/<file>.json`; with SQLite
/// it is the table `record_<key>` with one typed column per field.
pub struct CollectionDao {
    key: String,
    category: String,
    file: String,
    id_field: String,
    columns: Vec<(String, FieldKind)>,
}

impl CollectionDao {
    pub fn new(
        key: &str,
        category: &str,
        file: &str,
        id_field: &str,
        columns: &[(String, FieldKind)],
    ) -> Self {
        Self {
            key: key.to_owned(),
            category: category.to_owned(),
            file: file.to_owned(),
            id_field: id_field.to_owned(),
            columns: columns.to_vec(),
        }
    }

    pub fn new_table_name(key: &str) -> String {
        "record_".to_owned() + key
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Whole collection in stored order. Never fails: a missing or
    /// unreadable collection is logged and read as empty.
    pub async fn db_select(&self, db: &Db) -> Vec<RecordDao> {
        match db {
            Db::Json(db) => self.jsondb_select(db).await,
            Db::Sqlite(db) => match self.sqlitedb_select(db).await {
                Ok(records) => records,
                Err(err) => {
                    gp_log::warn(
                        None,
                        &format!(
                            "[CollectionDao] Reading table '{}' failed, treating as empty: {err}",
                            Self::new_table_name(&self.key)
                        ),
                    );
                    Vec::new()
                }
            },
        }
    }

    /// First record whose id is `id`. SQLite looks it up by the `_id`
    /// column; read failures are logged and give `None`.
    pub async fn db_select_one(&self, db: &Db, id: &str) -> Option<RecordDao> {
        match db {
            Db::Json(db) => self
                .jsondb_select(db)
                .await
                .into_iter()
                .find(|r| r.id(&self.id_field).as_deref() == Some(id)),
            Db::Sqlite(db) => match self.sqlitedb_select_one(db, id).await {
                Ok(record) => record,
                Err(err) => {
                    gp_log::warn(
                        None,
                        &format!(
                            "[CollectionDao] Reading '{id}' from table '{}' failed: {err}",
                            Self::new_table_name(&self.key)
                        ),
                    );
                    None
                }
            },
        }
    }

    /// Overwrites the whole collection.
    pub async fn db_replace(&self, db: &Db, records: &[RecordDao]) -> Result<()> {
        match db {
            Db::Json(db) => self.jsondb_replace(db, records).await,
            Db::Sqlite(db) => self.sqlitedb_replace(db, records).await,
        }
    }

    async fn jsondb_select(&self, db: &JsonDb) -> Vec<RecordDao> {
        db.read_collection(&self.category, &self.file)
            .await
            .into_iter()
            .map(RecordDao::from)
            .collect()
    }

    async fn jsondb_replace(&self, db: &JsonDb, records: &[RecordDao]) -> Result<()> {
        let models = records
            .iter()
            .map(|r| r.data().clone())
            .collect::<Vec<RecordJsonModel>>();
        db.write_collection(&self.category, &self.file, &models)
            .await
    }

    async fn sqlitedb_select(&self, db: &SqliteDb) -> Result<Vec<RecordDao>> {
        let columns = self.sqlitedb_columns();
        let rows = db
            .select_records(&Self::new_table_name(&self.key), &columns)
            .await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(RecordDao::from_sqlitedb_model(&columns, row)?);
        }
        Ok(records)
    }

    async fn sqlitedb_select_one(&self, db: &SqliteDb, id: &str) -> Result<Option<RecordDao>> {
        let columns = self.sqlitedb_columns();
        match db
            .select_record(&Self::new_table_name(&self.key), &columns, id)
            .await?
        {
            Some(row) => Ok(Some(RecordDao::from_sqlitedb_model(&columns, &row)?)),
            None => Ok(None),
        }
    }

    async fn sqlitedb_replace(&self, db: &SqliteDb, records: &[RecordDao]) -> Result<()> {
        let columns = self.sqlitedb_columns();
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push(record.to_sqlitedb_model(&self.id_field, &columns)?);
        }
        db.replace_records(&Self::new_table_name(&self.key), &columns, &rows)
            .await
    }

    /// Typed columns: the id field first, then every configured field once,
    /// skipping names the table layout reserves.
    fn sqlitedb_columns(&self) -> Vec<RecordColumnModel> {
        let reserved = [POSITION_COLUMN, ID_COLUMN, EXTRA_COLUMN, FIELDS_COLUMN];
        let mut seen = HashSet::with_capacity(self.columns.len() + 1);
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        if !reserved.contains(&self.id_field.as_str()) && seen.insert(self.id_field.clone()) {
            let kind = self
                .columns
                .iter()
                .find(|(name, _)| *name == self.id_field)
                .map_or(ColumnKindSqlite::Text, |(_, kind)| kind.to_sqlitedb_model());
            columns.push(RecordColumnModel::new(&self.id_field, &kind));
        }
        for (name, kind) in &self.columns {
            if reserved.contains(&name.as_str()) || !seen.insert(name.clone()) {
                continue;
            }
            columns.push(RecordColumnModel::new(name, &kind.to_sqlitedb_model()));
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_column_comes_first_and_reserved_names_are_skipped() {
        let collection = CollectionDao::new(
            "equipment",
            "equipment",
            "equipment",
            "equipment_id",
            &[
                ("name".to_owned(), FieldKind::Text),
                ("_id".to_owned(), FieldKind::Text),
                ("_fields".to_owned(), FieldKind::Text),
                ("equipment_id".to_owned(), FieldKind::Text),
                ("hours".to_owned(), FieldKind::Number),
                ("name".to_owned(), FieldKind::Textarea),
            ],
        );
        let names = collection
            .sqlitedb_columns()
            .iter()
            .map(|c| c.name().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["equipment_id", "name", "hours"]);
        assert_eq!(CollectionDao::new_table_name("equipment"), "record_equipment");
    }
}
