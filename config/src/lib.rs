use std::fs::File;

use anyhow::{Context, Result};
use api::ApiConfig;
use app::AppConfig;
use db::DbConfig;
use log::LogConfig;
use serde::Deserialize;

pub mod api;
pub mod app;
pub mod db;
pub mod log;

#[derive(Deserialize)]
pub struct Config {
    app: AppConfig,
    log: LogConfig,
    db: DbConfig,
    api: ApiConfig,
}

impl Config {
    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn log(&self) -> &LogConfig {
        &self.log
    }

    pub fn db(&self) -> &DbConfig {
        &self.db
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }
}

pub fn from_path(path: &str) -> Result<Config> {
    let file = File::open(path).with_context(|| format!("Failed to open config file {path}"))?;
    from_reader(file).with_context(|| format!("Failed to parse config file {path}"))
}

pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Config> {
    Ok(serde_yaml::from_reader::<_, Config>(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppConfigMode;

    const SAMPLE: &str = r#"
app:
  mode: production
log:
  display_level: true
  level_filter: debug
db:
  sqlite:
    path: data/gcpanel.db
    max_connections: 2
api:
  rest:
    host: 0.0.0.0
    port: 9090
"#;

    #[test]
    fn parses_full_config() {
        let config = from_reader(SAMPLE.as_bytes()).unwrap();

        assert!(matches!(config.app().mode(), AppConfigMode::Production));
        assert!(*config.log().display_level());
        assert_eq!(config.log().level_filter(), "debug");
        assert!(config.db().json().is_none());

        let sqlite = config.db().sqlite().as_ref().unwrap();
        assert_eq!(sqlite.path(), "data/gcpanel.db");
        assert_eq!(*sqlite.max_connections(), 2);

        assert_eq!(config.api().rest().host(), "0.0.0.0");
        assert_eq!(*config.api().rest().port(), 9090);
        assert!(config.api().rest().allowed_origin().is_none());
    }

    #[test]
    fn rejects_unknown_mode() {
        let yaml = SAMPLE.replace("production", "staging");
        assert!(from_reader(yaml.as_bytes()).is_err());
    }
}
