//! Tests HTTP de la API con `actix_web::test`.
mod common;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use gradpath::algorithm::eligibility::EligibilityPolicy;
use gradpath::algorithm::prereq_graph::validate_catalog;
use gradpath::api_json::AppState;
use gradpath::server::configure;

fn state() -> web::Data<AppState> {
    let catalog = common::bundled_catalog();
    let issues = validate_catalog(&catalog);
    web::Data::new(AppState::new(catalog, EligibilityPolicy::default(), issues))
}

#[actix_web::test]
async fn test_catalog_and_grade_filter() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/catalog").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 65);
    assert_eq!(body["courses"][0]["code"], "2401");
    assert_eq!(body["courses"][0]["department"], "English");

    let req = test::TestRequest::get().uri("/catalog?grade=8").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let codes: Vec<&str> = body["courses"].as_array().unwrap().iter().map(|c| c["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["4301", "4304", "6101", "6201", "SP1"]);
}

#[actix_web::test]
async fn test_departments_and_issues() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/catalog/departments").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let fine_arts = body["departments"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["department"] == "Fine Arts")
        .expect("Fine Arts presente");
    assert_eq!(fine_arts["codes"], json!(["MUS", "DRM", "ART"]));

    let req = test::TestRequest::get().uri("/catalog/issues").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 0);
}

#[actix_web::test]
async fn test_eligible_and_select_roundtrip() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/eligible")
        .set_json(json!({"plan": {"ms_credits": ["Algebra I"]}, "year": 9, "slot": 1}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let codes: Vec<&str> = body["courses"].as_array().unwrap().iter().map(|c| c["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["4301", "4304", "4401", "4402"]);

    let req = test::TestRequest::post()
        .uri("/plan/select")
        .set_json(json!({"plan": {"ms_credits": ["Algebra I"]}, "year": 9, "slot": 1, "code": "4401"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["plan"]["years"]["9"][1], "4401");
    assert_eq!(body["cleared"], json!([]));

    let req = test::TestRequest::post()
        .uri("/plan/select")
        .set_json(json!({"year": 9, "slot": 1, "code": "4401"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_ms_credits_limit() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri("/plan/ms-credits")
        .set_json(json!({"names": ["Algebra I", "Spanish I", "Concert Band", "Concert Choir", "Honors Algebra I"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "at most 4 middle-school credits are allowed, got 5");
}

#[actix_web::test]
async fn test_evaluate_endpoints() {
    let catalog = common::bundled_catalog();
    let plan = common::full_plan(&catalog);
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/evaluate")
        .set_json(json!({"plan": plan, "pathway": "Career & Technical"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pathway"], "career_and_technical");
    assert_eq!(body["all_met"], true);
    assert_eq!(body["cte_cluster"]["name"], "Information Technology");

    let req = test::TestRequest::post().uri("/evaluate/all").set_json(json!({"plan": {}})).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let reports = body["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r["all_met"] == false));

    let req = test::TestRequest::post()
        .uri("/evaluate")
        .set_json(json!({"plan": {}, "pathway": "Vocational"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_export_html_and_help() {
    let catalog = common::bundled_catalog();
    let plan = common::full_plan(&catalog);
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/export/html")
        .set_json(json!({"student": "Jordan", "plan": plan, "pathway": "University"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Four-Year Plan: Jordan"));
    assert!(html.contains("All requirements met"));
    assert!(html.contains("English I (2401)"));

    let req = test::TestRequest::get().uri("/help").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pathway_choices"].as_array().unwrap().len(), 3);
}
