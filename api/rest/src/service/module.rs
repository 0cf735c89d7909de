use actix_web::{http::StatusCode, web, HttpResponse};
use gp_error::Error;

use crate::{
    context::ApiRestCtx,
    model::{module::FindOneModuleReqPath, PaginationRes, Response},
};

pub fn module_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/modules", web::get().to(find_many))
        .route("/module/{module}", web::get().to(find_one));
}

async fn find_many(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    let modules = ctx.registry().modules();
    Response::data(
        &StatusCode::OK,
        &Some(PaginationRes::new(&modules.len(), &modules.len())),
        modules,
    )
}

async fn find_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<FindOneModuleReqPath>,
) -> HttpResponse {
    match ctx.registry().get(path.module()) {
        Some(module) => Response::data(&StatusCode::OK, &None, module),
        None => Response::error(&Error::NotFound(format!(
            "Module '{}' does not exist",
            path.module()
        ))),
    }
}
