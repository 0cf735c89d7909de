use ahash::HashSet;
use anyhow::{Context, Error, Result};
use sqlx::{
    sqlite::{SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};

use crate::{
    model::{
        record::{RecordColumnModel, RecordRowModel},
        value::{ColumnKind, ColumnValue},
    },
    query::record::{self, EXTRA_COLUMN, FIELDS_COLUMN, ID_COLUMN},
};

pub struct SqliteDb {
    pool: Pool<Sqlite>,
}

impl SqliteDb {
    pub async fn new(path: &str, max_connections: &u32) -> Result<Self> {
        gp_log::info(Some("⚡"), "[SQLite] Initializing component");

        let url = format!("sqlite:{path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(*max_connections)
            .connect(&url)
            .await
            .with_context(|| format!("Failed to open SQLite database {path}"))?;

        Ok(Self { pool })
    }

    pub async fn table_exists(&self, record_table: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(record::TABLE_EXISTS)
            .bind(record_table)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Rows in stored order. A missing table reads as no rows; configured
    /// columns the table does not have yet read as NULL.
    pub async fn select_records(
        &self,
        record_table: &str,
        columns: &[RecordColumnModel],
    ) -> Result<Vec<RecordRowModel>> {
        let existing = match self.table_columns(record_table).await? {
            Some(existing) => existing,
            None => return Ok(Vec::new()),
        };

        let names = Self::selected_names(columns, &existing);
        let rows = sqlx::query(&record::select_all(record_table, &names))
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            records.push(Self::row_model(row, columns, &existing)?);
        }
        Ok(records)
    }

    /// First row in stored order whose `_id` equals `id`.
    pub async fn select_record(
        &self,
        record_table: &str,
        columns: &[RecordColumnModel],
        id: &str,
    ) -> Result<Option<RecordRowModel>> {
        let existing = match self.table_columns(record_table).await? {
            Some(existing) => existing,
            None => return Ok(None),
        };

        let names = Self::selected_names(columns, &existing);
        let row = sqlx::query(&record::select_by_id(record_table, &names))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_model(&row, columns, &existing)?)),
            None => Ok(None),
        }
    }

    async fn table_columns(&self, record_table: &str) -> Result<Option<HashSet<String>>> {
        if !self.table_exists(record_table).await? {
            return Ok(None);
        }
        let existing = sqlx::query_scalar::<_, String>(record::TABLE_COLUMNS)
            .bind(record_table)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .collect();
        Ok(Some(existing))
    }

    fn selected_names<'a>(
        columns: &'a [RecordColumnModel],
        existing: &HashSet<String>,
    ) -> Vec<&'a str> {
        let mut names = vec![ID_COLUMN];
        names.extend(
            columns
                .iter()
                .map(|col| col.name())
                .filter(|name| existing.contains(*name)),
        );
        names.push(EXTRA_COLUMN);
        if existing.contains(FIELDS_COLUMN) {
            names.push(FIELDS_COLUMN);
        }
        names
    }

    fn row_model(
        row: &SqliteRow,
        columns: &[RecordColumnModel],
        existing: &HashSet<String>,
    ) -> Result<RecordRowModel> {
        let id: Option<String> = row.try_get(ID_COLUMN)?;
        let mut values = Vec::with_capacity(columns.len());
        for col in columns {
            if !existing.contains(col.name()) {
                values.push(ColumnValue::none(col.kind()));
                continue;
            }
            let value = match col.kind() {
                ColumnKind::Boolean => ColumnValue::Boolean(row.try_get(col.name())?),
                ColumnKind::Integer => ColumnValue::Integer(row.try_get(col.name())?),
                ColumnKind::Real => ColumnValue::Real(row.try_get(col.name())?),
                ColumnKind::Text | ColumnKind::Date | ColumnKind::Json => {
                    ColumnValue::Text(row.try_get(col.name())?)
                }
            };
            values.push(value);
        }
        let extra: Option<String> = row.try_get(EXTRA_COLUMN)?;
        let fields: Option<String> = if existing.contains(FIELDS_COLUMN) {
            row.try_get(FIELDS_COLUMN)?
        } else {
            None
        };
        Ok(RecordRowModel::new(
            &id,
            values,
            extra.as_deref().unwrap_or("{}"),
            fields.as_deref().unwrap_or("[]"),
        ))
    }

    /// Replaces the whole table content in one transaction, creating the
    /// table and any missing columns first.
    pub async fn replace_records(
        &self,
        record_table: &str,
        columns: &[RecordColumnModel],
        rows: &[RecordRowModel],
    ) -> Result<()> {
        if let Some(row) = rows.iter().find(|row| row.values().len() != columns.len()) {
            return Err(Error::msg(format!(
                "Row '{}' has {} values but table '{record_table}' has {} columns",
                row.id().as_deref().unwrap_or_default(),
                row.values().len(),
                columns.len()
            )));
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(&record::create_table(record_table, columns))
            .execute(&mut *tx)
            .await?;

        let existing: HashSet<String> = sqlx::query_scalar::<_, String>(record::TABLE_COLUMNS)
            .bind(record_table)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .collect();
        let fields_column = RecordColumnModel::new(FIELDS_COLUMN, &ColumnKind::Text);
        for col in columns
            .iter()
            .chain([&fields_column])
            .filter(|col| !existing.contains(col.name()))
        {
            gp_log::info(
                Some("🔧"),
                &format!(
                    "[SQLite] Adding column '{}' to table '{record_table}'",
                    col.name()
                ),
            );
            sqlx::query(&record::add_column(record_table, col))
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(&record::delete_all(record_table))
            .execute(&mut *tx)
            .await?;

        let sql = record::insert(record_table, columns);
        for (position, row) in rows.iter().enumerate() {
            let mut query = sqlx::query(&sql)
                .bind(position as i64)
                .bind(row.id().clone());
            for value in row.values() {
                query = match value {
                    ColumnValue::Boolean(v) => query.bind(*v),
                    ColumnValue::Integer(v) => query.bind(*v),
                    ColumnValue::Real(v) => query.bind(*v),
                    ColumnValue::Text(v) => query.bind(v.clone()),
                };
            }
            query
                .bind(row.extra().to_owned())
                .bind(row.fields().to_owned())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
