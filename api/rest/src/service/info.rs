use actix_web::{http::StatusCode, web, HttpResponse};
use gp_dao::value::FieldKind;
use strum::IntoEnumIterator;

use crate::model::Response;

pub fn info_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/info/field_kinds", web::get().to(field_kinds));
}

async fn field_kinds() -> HttpResponse {
    let mut kinds = Vec::new();

    for kind in FieldKind::iter() {
        kinds.push(kind.to_str().to_owned());
    }

    Response::data(&StatusCode::OK, &None, &kinds)
}
