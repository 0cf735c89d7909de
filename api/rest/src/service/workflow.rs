use actix_web::{http::StatusCode, web, HttpResponse};
use gp_dao::workflow;

use crate::{context::ApiRestCtx, model::Response};

pub fn workflow_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/workflow/status", web::get().to(status))
        .route("/workflow/relationships", web::get().to(relationships));
}

async fn status(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    Response::data(&StatusCode::OK, &None, workflow::status(ctx.dao().db()).await)
}

async fn relationships() -> HttpResponse {
    Response::data(&StatusCode::OK, &None, &workflow::RELATIONSHIPS)
}
