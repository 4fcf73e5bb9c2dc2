use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use tracing::debug;

use crate::algorithm::eligibility::{clear_slot, eligible_courses, select_course, set_ms_credits, SlotSelector};
use crate::api_json::{
    cleared_slots, AppState, ClearRequest, CourseDto, EligibleRequest, EligibleResponse, MsCreditsRequest,
    PlanResponse, SelectRequest,
};
use crate::error::SelectionError;

fn rejected(err: SelectionError) -> HttpResponse {
    debug!(error = %err, "plan change rejected");
    HttpResponse::UnprocessableEntity().json(json!({"error": err.to_string(), "reason": err}))
}

/// POST /eligible
/// Cursos elegibles para un slot. Un selector vacío en un slot electivo
/// devuelve una lista vacía, no un error.
pub async fn eligible_handler(state: web::Data<AppState>, body: web::Json<EligibleRequest>) -> impl Responder {
    let req = body.into_inner();
    let selector = SlotSelector::parse(&req.selector);
    let courses = eligible_courses(&state.catalog, &selector, req.year, req.slot, &req.plan, &state.policy)
        .into_iter()
        .map(CourseDto::from)
        .collect();
    HttpResponse::Ok().json(EligibleResponse { year: req.year, slot: req.slot, courses })
}

/// POST /plan/select
pub async fn select_handler(state: web::Data<AppState>, body: web::Json<SelectRequest>) -> impl Responder {
    let req = body.into_inner();
    let selector = SlotSelector::parse(&req.selector);
    match select_course(&state.catalog, &req.plan, req.year, req.slot, &req.code, &selector, &state.policy) {
        Ok(plan) => {
            let cleared = cleared_slots(&req.plan, &plan, (req.year, req.slot));
            HttpResponse::Ok().json(PlanResponse { plan, cleared })
        }
        Err(e) => rejected(e),
    }
}

/// POST /plan/clear
pub async fn clear_handler(state: web::Data<AppState>, body: web::Json<ClearRequest>) -> impl Responder {
    let req = body.into_inner();
    match clear_slot(&state.catalog, &req.plan, req.year, req.slot, &state.policy) {
        Ok(plan) => {
            let cleared = cleared_slots(&req.plan, &plan, (req.year, req.slot));
            HttpResponse::Ok().json(PlanResponse { plan, cleared })
        }
        Err(e) => rejected(e),
    }
}

/// POST /plan/ms-credits
pub async fn ms_credits_handler(state: web::Data<AppState>, body: web::Json<MsCreditsRequest>) -> impl Responder {
    let req = body.into_inner();
    match set_ms_credits(&state.catalog, &req.plan, &req.names) {
        Ok(plan) => HttpResponse::Ok().json(PlanResponse { plan, cleared: Vec::new() }),
        Err(e) => rejected(e),
    }
}
