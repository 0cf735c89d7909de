use gp_db_json::db::JsonDb;
use gp_db_sqlite::db::SqliteDb;

pub mod collection;
pub mod dto;
pub mod engine;
pub mod filter;
pub mod id;
pub mod module;
pub mod record;
pub mod registry;
pub mod search;
pub mod sort;
pub mod value;
pub mod workflow;

pub enum Db {
    Json(JsonDb),
    Sqlite(SqliteDb),
}
