use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::algorithm::eligibility::ms_credit_options;
use crate::api_json::{AppState, CatalogQuery, CourseDto};

/// GET /catalog?grade=10
/// Cursos en orden de catálogo, opcionalmente filtrados por grado.
pub async fn catalog_handler(state: web::Data<AppState>, query: web::Query<CatalogQuery>) -> impl Responder {
    let courses: Vec<CourseDto> = state
        .catalog
        .courses()
        .iter()
        .filter(|c| query.grade.is_none_or(|g| c.offered_in(g)))
        .map(CourseDto::from)
        .collect();
    HttpResponse::Ok().json(json!({"count": courses.len(), "courses": courses}))
}

/// GET /catalog/departments
/// Departamentos presentes, con sus códigos de tres letras.
pub async fn departments_handler(state: web::Data<AppState>) -> impl Responder {
    let departments: Vec<serde_json::Value> = state
        .catalog
        .departments()
        .iter()
        .map(|d| json!({"department": d.label(), "codes": d.codes()}))
        .collect();
    HttpResponse::Ok().json(json!({"departments": departments}))
}

/// GET /catalog/issues
pub async fn issues_handler(state: web::Data<AppState>) -> impl Responder {
    let messages: Vec<String> = state.issues.iter().map(|i| i.to_string()).collect();
    HttpResponse::Ok().json(json!({"count": state.issues.len(), "issues": state.issues, "messages": messages}))
}

/// GET /catalog/ms-options
/// Cursos de grado 8 que pueden declararse como créditos de enseñanza media.
pub async fn ms_options_handler(state: web::Data<AppState>) -> impl Responder {
    let courses: Vec<CourseDto> = ms_credit_options(&state.catalog).into_iter().map(CourseDto::from).collect();
    HttpResponse::Ok().json(json!({"courses": courses}))
}
