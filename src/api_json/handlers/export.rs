use actix_web::{web, HttpResponse, Responder};

use crate::algorithm::requirements::{evaluate, Pathway};
use crate::api_json::handlers::evaluate::unknown_pathway;
use crate::api_json::{AppState, ExportRequest};
use crate::export::render_html;

/// POST /export/html
/// Resumen imprimible del plan con el reporte de la trayectoria pedida.
pub async fn export_html_handler(state: web::Data<AppState>, body: web::Json<ExportRequest>) -> impl Responder {
    let req = body.into_inner();
    let Some(pathway) = Pathway::parse(&req.pathway) else {
        return unknown_pathway(&req.pathway);
    };
    let report = evaluate(pathway, &state.catalog, &req.plan);
    let html = render_html(&req.student, &state.catalog, &req.plan, &report);
    HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html)
}
