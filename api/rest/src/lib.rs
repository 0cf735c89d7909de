use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::{ErrorHandlers, Logger},
    web, App, HttpServer,
};
use anyhow::Result;
use configure::configure;
use context::ApiRestCtx;
use error_handler::default_error_handler;
use gp_config::app::AppConfigMode;
use logger::logger_format;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

mod configure;
pub mod context;
mod error_handler;
mod logger;
mod model;
mod service;

#[cfg(test)]
mod tests;

pub struct ApiRestServer {
    mode: AppConfigMode,
    address: String,
    allowed_origin: Option<String>,
    context: web::Data<ApiRestCtx>,
}

impl ApiRestServer {
    pub fn new(
        mode: &AppConfigMode,
        host: &str,
        port: &u16,
        allowed_origin: &Option<String>,
        ctx: ApiRestCtx,
    ) -> Self {
        gp_log::info(Some("⚡"), "[ApiRestServer] Initializing component");

        let address = format!("{}:{}", host, port);
        let context = web::Data::new(ctx);

        Self {
            mode: *mode,
            address,
            allowed_origin: allowed_origin.clone(),
            context,
        }
    }

    pub fn run(self, cancel_token: CancellationToken) -> JoinHandle<Result<()>> {
        gp_log::info(Some("💫"), "[ApiRestServer] Running component");

        tokio::spawn(async move {
            let context = self.context;
            let allowed_origin = self.allowed_origin;
            let mode = self.mode;
            let server = HttpServer::new(move || {
                let cors = match &allowed_origin {
                    Some(origin) => Cors::default()
                        .allowed_origin(origin)
                        .allowed_methods(["GET", "POST", "PUT", "DELETE"])
                        .allowed_header(header::CONTENT_TYPE),
                    None => match mode {
                        AppConfigMode::Development => Cors::permissive(),
                        AppConfigMode::Production => Cors::default(),
                    },
                };
                App::new()
                    .wrap(cors)
                    .wrap(Logger::new(logger_format()))
                    .wrap(ErrorHandlers::new().default_handler(default_error_handler))
                    .app_data(context.clone())
                    .configure(configure)
            })
            .bind(&self.address)?
            .run();

            let handle = server.handle();
            tokio::select! {
                res = server => res?,
                _ = cancel_token.cancelled() => {
                    gp_log::info(Some("💤"), "[ApiRestServer] Shutting down component");
                    handle.stop(true).await;
                }
            }

            Ok(())
        })
    }
}
