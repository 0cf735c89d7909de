use actix_web::{http::StatusCode, web, HttpResponse};
use gp_dao::{
    dto::{pagination::Pagination, view_state::{FormValidator, ViewState}},
    engine::CrudEngine,
    filter::{self, Condition, FilterSpec},
    module::ModuleConfig,
    record::RecordDao,
    sort::{SortDirection, SortSpec},
    workflow,
};
use gp_error::Error;
use serde_json::json;
use validator::Validate;

use crate::{
    context::ApiRestCtx,
    model::{
        record::{
            DeleteOneRecordReqPath, FindManyRecordReqJson, FindManyRecordReqPath,
            FindOneRecordReqPath, InsertOneRecordReqJson, InsertOneRecordReqPath,
            ListRecordReqQuery, UpdateOneRecordReqJson, UpdateOneRecordReqPath,
        },
        PaginationRes, Response,
    },
};

pub fn record_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/module/{module}/record", web::post().to(insert_one))
        .route("/module/{module}/record/{record_id}", web::get().to(find_one))
        .route("/module/{module}/record/{record_id}", web::put().to(update_one))
        .route("/module/{module}/record/{record_id}", web::delete().to(delete_one))
        .route("/module/{module}/records", web::get().to(list))
        .route("/module/{module}/records", web::post().to(find_many));
}

fn get_module<'a>(ctx: &'a ApiRestCtx, key: &str) -> Result<&'a ModuleConfig, Error> {
    ctx.registry()
        .get(key)
        .ok_or_else(|| Error::NotFound(format!("Module '{key}' does not exist")))
}

fn record_not_found(module: &ModuleConfig, id: &str) -> Error {
    Error::NotFound(format!("Record '{id}' does not exist in {}", module.name()))
}

fn sort_spec(field: &Option<String>, direction: &Option<String>) -> Result<Option<SortSpec>, Error> {
    let direction = match direction {
        Some(direction) => match SortDirection::from_str(direction) {
            Ok(direction) => direction,
            Err(err) => return Err(Error::BadRequest(err.to_string())),
        },
        None => SortDirection::Asc,
    };
    Ok(field.as_ref().map(|field| SortSpec::new(field, &direction)))
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<InsertOneRecordReqPath>,
    data: web::Json<InsertOneRecordReqJson>,
) -> HttpResponse {
    let module = match get_module(&ctx, path.module()) {
        Ok(module) => module,
        Err(err) => return Response::error(&err),
    };

    let record = RecordDao::new(data.into_inner());
    if let Err(message) = FormValidator::required_fields(module).validate(&record) {
        return Response::error(&Error::BadRequest(message));
    }

    let record = match CrudEngine::new(ctx.dao().db(), module).create(record).await {
        Ok(record) => record,
        Err(err) => return Response::error(&Error::InternalServerError(err.to_string())),
    };

    workflow::fire_created(ctx.dao().db(), module, &record).await;

    Response::data(&StatusCode::CREATED, &None, &record)
}

async fn find_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<FindOneRecordReqPath>,
) -> HttpResponse {
    let module = match get_module(&ctx, path.module()) {
        Ok(module) => module,
        Err(err) => return Response::error(&err),
    };

    match CrudEngine::new(ctx.dao().db(), module)
        .get_by_id(path.record_id())
        .await
    {
        Some(record) => Response::data(&StatusCode::OK, &None, &record),
        None => Response::error(&record_not_found(module, path.record_id())),
    }
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<UpdateOneRecordReqPath>,
    data: web::Json<UpdateOneRecordReqJson>,
) -> HttpResponse {
    let module = match get_module(&ctx, path.module()) {
        Ok(module) => module,
        Err(err) => return Response::error(&err),
    };

    let record = RecordDao::new(data.into_inner());
    if let Err(message) = FormValidator::required_fields(module).validate(&record) {
        return Response::error(&Error::BadRequest(message));
    }

    let update = match CrudEngine::new(ctx.dao().db(), module)
        .update(path.record_id(), record)
        .await
    {
        Ok(Some(update)) => update,
        Ok(None) => return Response::error(&record_not_found(module, path.record_id())),
        Err(err) => return Response::error(&Error::InternalServerError(err.to_string())),
    };

    let previous_status = module
        .status_field()
        .as_deref()
        .and_then(|field| update.previous().get(field));
    workflow::fire_updated(ctx.dao().db(), module, previous_status, update.current()).await;

    Response::data(&StatusCode::OK, &None, update.current())
}

async fn delete_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<DeleteOneRecordReqPath>,
) -> HttpResponse {
    let module = match get_module(&ctx, path.module()) {
        Ok(module) => module,
        Err(err) => return Response::error(&err),
    };

    match CrudEngine::new(ctx.dao().db(), module)
        .delete(path.record_id())
        .await
    {
        Ok(true) => Response::data(&StatusCode::OK, &None, json!({ "id": path.record_id() })),
        Ok(false) => Response::error(&record_not_found(module, path.record_id())),
        Err(err) => Response::error(&Error::InternalServerError(err.to_string())),
    }
}

async fn list(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<FindManyRecordReqPath>,
    query: web::Query<ListRecordReqQuery>,
) -> HttpResponse {
    let module = match get_module(&ctx, path.module()) {
        Ok(module) => module,
        Err(err) => return Response::error(&err),
    };

    if let Err(err) = query.validate() {
        return Response::error(&Error::BadRequest(err.to_string()));
    }

    let mut view = ViewState::new();
    if let Some(search) = query.search() {
        view.set_search(search);
    }
    view.set_status_filter(query.status());
    match sort_spec(query.sort(), query.direction()) {
        Ok(sort) => view.set_sort(&sort),
        Err(err) => return Response::error(&err),
    }
    if let Some(page) = query.page() {
        view.set_page(page);
    }
    if let Some(limit) = query.limit() {
        view.set_page_size(limit);
    }

    let records = CrudEngine::new(ctx.dao().db(), module).get_all().await;
    let page = view.list_page(module, &records);

    Response::data(
        &StatusCode::OK,
        &Some(PaginationRes::new(page.count(), page.total())),
        &page,
    )
}

async fn find_many(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<FindManyRecordReqPath>,
    data: web::Json<FindManyRecordReqJson>,
) -> HttpResponse {
    let module = match get_module(&ctx, path.module()) {
        Ok(module) => module,
        Err(err) => return Response::error(&err),
    };

    if let Err(err) = data.validate() {
        return Response::error(&Error::BadRequest(err.to_string()));
    }

    let mut spec = match data.filter() {
        Some(filter) => FilterSpec::from_map(filter),
        None => FilterSpec::new(),
    };
    if let Some(date_range) = data.date_range() {
        let mut bounds = Vec::with_capacity(2);
        for bound in [date_range.start(), date_range.end()] {
            bounds.push(match bound {
                Some(date) => match filter::parse_date(date) {
                    Some(date) => Some(date),
                    None => {
                        return Response::error(&Error::BadRequest(format!(
                            "Date '{date}' is not in YYYY-MM-DD format"
                        )))
                    }
                },
                None => None,
            });
        }
        spec.push(Condition::DateRange {
            field: date_range.field().to_owned(),
            start: bounds[0],
            end: bounds[1],
        });
    }

    let sort = match sort_spec(data.sort(), data.direction()) {
        Ok(sort) => sort.or_else(|| module.default_sort().clone()),
        Err(err) => return Response::error(&err),
    };

    let records = CrudEngine::new(ctx.dao().db(), module).get_all().await;
    let records = CrudEngine::filter(&records, &spec);
    let records = match sort {
        Some(sort) => CrudEngine::sort(&records, sort.field(), sort.direction()),
        None => records,
    };

    let pagination = Pagination::new(data.page(), data.limit());
    let page = pagination.apply(&records);

    Response::data(
        &StatusCode::OK,
        &Some(PaginationRes::new(&page.len(), &records.len())),
        &page,
    )
}
