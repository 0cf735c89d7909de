use actix_web::{http::StatusCode, web, HttpResponse};
use gp_dao::search;
use gp_error::Error;
use validator::Validate;

use crate::{
    context::ApiRestCtx,
    model::{search::SearchReqQuery, PaginationRes, Response},
};

pub fn search_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(search_all));
}

async fn search_all(ctx: web::Data<ApiRestCtx>, query: web::Query<SearchReqQuery>) -> HttpResponse {
    if let Err(err) = query.validate() {
        return Response::error(&Error::BadRequest(err.to_string()));
    }

    let results = search::search(ctx.dao().db(), ctx.registry(), query.q()).await;
    let total = results.iter().map(|r| r.records().len()).sum::<usize>();

    Response::data(
        &StatusCode::OK,
        &Some(PaginationRes::new(&results.len(), &total)),
        &results,
    )
}
