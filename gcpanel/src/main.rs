use std::sync::Arc;

use gp_api_rest::{
    context::{ApiRestCtx, ApiRestDaoCtx},
    ApiRestServer,
};
use gp_dao::{registry::ModuleRegistry, Db};
use gp_db_json::db::JsonDb;
use gp_db_sqlite::db::SqliteDb;
use tokio_util::sync::CancellationToken;

mod config_path;

#[tokio::main]
async fn main() {
    let config_path = config_path::get();
    let config = match gp_config::from_path(&config_path) {
        Ok(config) => config,
        Err(err) => gp_log::panic(None, format!("[gcPanel] {err:#}")),
    };

    gp_log::init(config.log().display_level(), config.log().level_filter());

    gp_log::info(
        Some("🚀"),
        format!("[gcPanel] Starting for {}", config.app().project_name()),
    );

    let db = if let Some(json) = config.db().json() {
        if config.db().sqlite().is_some() {
            gp_log::warn(
                None,
                "[gcPanel] Both db.json and db.sqlite are configured, using db.json",
            );
        }
        match JsonDb::new(json.path()).await {
            Ok(db) => Arc::new(Db::Json(db)),
            Err(err) => gp_log::panic(None, format!("[gcPanel] Opening JSON store failed: {err:#}")),
        }
    } else if let Some(sqlite) = config.db().sqlite() {
        match SqliteDb::new(sqlite.path(), sqlite.max_connections()).await {
            Ok(db) => Arc::new(Db::Sqlite(db)),
            Err(err) => gp_log::panic(None, format!("[gcPanel] Opening SQLite store failed: {err:#}")),
        }
    } else {
        gp_log::panic(None, "[gcPanel] No database configuration is specified")
    };

    let registry = ModuleRegistry::builtin();
    gp_log::info(
        Some("📦"),
        format!("[gcPanel] Serving {} modules", registry.modules().len()),
    );

    let api_rest_server = ApiRestServer::new(
        config.app().mode(),
        config.api().rest().host(),
        config.api().rest().port(),
        config.api().rest().allowed_origin(),
        ApiRestCtx::new(
            ApiRestDaoCtx::new(db),
            registry,
            config.app().project_name(),
        ),
    );

    let cancel_token = CancellationToken::new();

    match api_rest_server.run(cancel_token.clone()).await {
        Ok(Ok(())) => gp_log::info(Some("👋"), "[gcPanel] Turned off"),
        Ok(Err(err)) => {
            cancel_token.cancel();
            gp_log::warn(Some("👋"), format!("[gcPanel] Turned off with error: {err:#}"));
        }
        Err(err) => {
            cancel_token.cancel();
            gp_log::warn(Some("👋"), format!("[gcPanel] Turned off after a panic: {err}"));
        }
    }
}
