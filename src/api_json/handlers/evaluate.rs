use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::algorithm::requirements::{evaluate, evaluate_all, Pathway};
use crate::api_json::{AppState, EvaluateAllRequest, EvaluateRequest};

pub(crate) fn unknown_pathway(raw: &str) -> HttpResponse {
    let choices: Vec<&str> = Pathway::ALL.iter().map(|p| p.label()).collect();
    HttpResponse::BadRequest().json(json!({"error": format!("unknown pathway '{}'", raw), "pathway_choices": choices}))
}

/// POST /evaluate
pub async fn evaluate_handler(state: web::Data<AppState>, body: web::Json<EvaluateRequest>) -> impl Responder {
    let req = body.into_inner();
    let Some(pathway) = Pathway::parse(&req.pathway) else {
        return unknown_pathway(&req.pathway);
    };
    HttpResponse::Ok().json(evaluate(pathway, &state.catalog, &req.plan))
}

/// POST /evaluate/all
pub async fn evaluate_all_handler(state: web::Data<AppState>, body: web::Json<EvaluateAllRequest>) -> impl Responder {
    let req = body.into_inner();
    HttpResponse::Ok().json(json!({"reports": evaluate_all(&state.catalog, &req.plan)}))
}
