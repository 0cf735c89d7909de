use actix_web::web;

use crate::service::{
    info::info_api, module::module_api, record::record_api, root::root_api, search::search_api,
    workflow::workflow_api,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(root_api).service(
        web::scope("/api/rest")
            .configure(info_api)
            .configure(module_api)
            .configure(record_api)
            .configure(search_api)
            .configure(workflow_api),
    );
}
