use serde::Deserialize;

use self::{json::DbJsonConfig, sqlite::DbSqliteConfig};

pub mod json;
pub mod sqlite;

#[derive(Deserialize)]
pub struct DbConfig {
    json: Option<DbJsonConfig>,
    sqlite: Option<DbSqliteConfig>,
}

impl DbConfig {
    pub fn json(&self) -> &Option<DbJsonConfig> {
        &self.json
    }

    pub fn sqlite(&self) -> &Option<DbSqliteConfig> {
        &self.sqlite
    }
}
