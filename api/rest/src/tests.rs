use std::sync::Arc;

use actix_web::{
    http::StatusCode,
    middleware::ErrorHandlers,
    test::{self, TestRequest},
    web, App,
};
use gp_dao::{registry::ModuleRegistry, Db};
use gp_db_json::db::JsonDb;
use serde_json::{json, Value};

use crate::{
    configure::configure,
    context::{ApiRestCtx, ApiRestDaoCtx},
    error_handler::default_error_handler,
};

async fn context(dir: &tempfile::TempDir) -> web::Data<ApiRestCtx> {
    let db = JsonDb::new(dir.path().to_str().unwrap()).await.unwrap();
    web::Data::new(ApiRestCtx::new(
        ApiRestDaoCtx::new(Arc::new(Db::Json(db))),
        ModuleRegistry::builtin(),
        "Highland Tower Development",
    ))
}

macro_rules! app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(ErrorHandlers::new().default_handler(default_error_handler))
                .app_data($ctx.clone())
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn root_and_field_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir).await;
    let app = app!(ctx);

    let res: Value = test::call_and_read_body_json(&app, TestRequest::get().uri("/api").to_request()).await;
    assert_eq!(res["data"], json!("gcPanel is running for Highland Tower Development"));

    let res: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/rest/info/field_kinds").to_request(),
    )
    .await;
    assert_eq!(res["data"].as_array().unwrap().len(), 8);
    assert_eq!(res["data"][0], json!("text"));
}

#[actix_web::test]
async fn modules_are_listed_and_unknown_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir).await;
    let app = app!(ctx);

    let res: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/rest/modules").to_request(),
    )
    .await;
    assert_eq!(res["pagination"]["total"], json!(21));
    assert_eq!(res["data"][0]["key"], json!("rfis"));

    let res = test::call_service(
        &app,
        TestRequest::get().uri("/api/rest/module/estimates").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn record_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir).await;
    let app = app!(ctx);

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/rest/module/hazards/record")
            .set_json(json!({"hazard_type": "Fall"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body["error"]["message"],
        json!("Please fill in the following required fields: Identification Date, Location")
    );

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/rest/module/hazards/record")
            .set_json(json!({
                "identification_date": "2025-03-01",
                "hazard_type": "Fall",
                "location": "Level 3",
                "status": "Open",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["hazard_id"], json!("HAZ-001"));

    let res = test::call_service(
        &app,
        TestRequest::put()
            .uri("/api/rest/module/hazards/record/HAZ-001")
            .set_json(json!({
                "identification_date": "2025-03-01",
                "hazard_type": "Fall",
                "location": "Level 4",
                "status": "Mitigated",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri("/api/rest/module/hazards/record/HAZ-001")
            .to_request(),
    )
    .await;
    assert_eq!(res["data"]["location"], json!("Level 4"));

    let res = test::call_service(
        &app,
        TestRequest::delete()
            .uri("/api/rest/module/hazards/record/HAZ-001")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        TestRequest::delete()
            .uri("/api/rest/module/hazards/record/HAZ-001")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn list_and_find_many() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir).await;
    let app = app!(ctx);

    for (date, location, status) in [
        ("2025-01-10", "Roof", "Open"),
        ("2025-02-10", "Level 1", "Closed"),
        ("2025-03-10", "Level 2", "Open"),
    ] {
        let res = test::call_service(
            &app,
            TestRequest::post()
                .uri("/api/rest/module/hazards/record")
                .set_json(json!({
                    "identification_date": date,
                    "hazard_type": "Trip",
                    "location": location,
                    "status": status,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri("/api/rest/module/hazards/records?status=Open&limit=1")
            .to_request(),
    )
    .await;
    assert_eq!(res["pagination"], json!({"count": 1, "total": 2}));
    assert_eq!(res["data"]["rows"][0]["location"], json!("Level 2"));
    assert_eq!(res["data"]["total_pages"], json!(2));

    let res: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri("/api/rest/module/hazards/records?status=All&sort=location&direction=asc")
            .to_request(),
    )
    .await;
    assert_eq!(res["data"]["rows"][0]["location"], json!("Level 1"));

    let res: Value = test::call_and_read_body_json(
        &app,
        TestRequest::post()
            .uri("/api/rest/module/hazards/records")
            .set_json(json!({
                "filter": {"search_text": "level"},
                "date_range": {"field": "identification_date", "start": "2025-03-01"},
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res["pagination"], json!({"count": 1, "total": 1}));
    assert_eq!(res["data"][0]["hazard_id"], json!("HAZ-003"));

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/rest/module/hazards/records?direction=sideways")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/rest/module/hazards/records")
            .set_json(json!({"date_range": {"field": "identification_date", "end": "03/01/2025"}}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn search_and_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir).await;
    let app = app!(ctx);

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/rest/module/safety_incidents/record")
            .set_json(json!({
                "incident_date": "2025-03-01",
                "location": "Crane pad",
                "description": "Dropped load near crane",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/rest/search?q=crane%20load").to_request(),
    )
    .await;
    assert_eq!(res["data"][0]["module"], json!("safety_incidents"));
    assert_eq!(res["pagination"]["total"], json!(1));

    let res: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/rest/workflow/status").to_request(),
    )
    .await;
    assert_eq!(res["data"]["total_executions"], json!(1));
    assert_eq!(res["data"]["success_rate"], json!(100.0));
}

#[actix_web::test]
async fn malformed_body_is_wrapped() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir).await;
    let app = app!(ctx);

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/rest/module/hazards/record")
            .insert_header(("content-type", "application/json"))
            .set_payload("[1, 2")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"]["status"], json!("Bad Request"));
}

#[actix_web::test]
async fn status_hook_fires_once_on_transition() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir).await;
    let app = app!(ctx);

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/rest/module/change_orders/record")
            .set_json(json!({"title": "Extra rebar", "company_name": "Acme", "status": "Draft"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    for _ in 0..2 {
        let res = test::call_service(
            &app,
            TestRequest::put()
                .uri("/api/rest/module/change_orders/record/CO-001")
                .set_json(json!({"title": "Extra rebar", "company_name": "Acme", "status": "Approved"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/rest/workflow/status").to_request(),
    )
    .await;
    assert_eq!(res["data"]["total_executions"], json!(1));
}
