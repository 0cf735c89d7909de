use actix_web::{http::StatusCode, web, HttpResponse};

use crate::{context::ApiRestCtx, model::Response};

pub fn root_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/api", web::get().to(root))
        .route("/api/rest", web::get().to(root));
}

async fn root(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    Response::data(
        &StatusCode::OK,
        &None,
        format!("gcPanel is running for {}", ctx.project_name()),
    )
}
