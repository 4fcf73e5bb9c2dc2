use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::algorithm::requirements::Pathway;
use crate::models::Plan;

/// GET /help
pub async fn help_handler() -> impl Responder {
    let example_plan = Plan::new()
        .with_ms_credits(["Algebra I"])
        .with_slot(9, 0, Some("2401"))
        .with_slot(9, 1, Some("4401"));

    let help = json!({
        "description": "Planificador de 4 años: cursos elegibles por slot y evaluación de trayectorias de graduación. El servidor no guarda planes; cada request envía el plan completo.",
        "endpoints": {
            "GET /catalog": "cursos en orden de catálogo (?grade=9 filtra por grado)",
            "GET /catalog/departments": "departamentos y códigos de tres letras",
            "GET /catalog/issues": "problemas detectados al cargar el catálogo",
            "GET /catalog/ms-options": "cursos de grado 8 para créditos de enseñanza media",
            "POST /eligible": "{plan, year, slot, selector}",
            "POST /plan/select": "{plan, year, slot, code, selector}",
            "POST /plan/clear": "{plan, year, slot}",
            "POST /plan/ms-credits": "{plan, names}",
            "POST /evaluate": "{plan, pathway}",
            "POST /evaluate/all": "{plan}",
            "POST /export/html": "{student, plan, pathway}"
        },
        "example_plan": example_plan,
        "pathway_choices": Pathway::ALL.iter().map(|p| p.label()).collect::<Vec<_>>(),
        "selector_note": "slots 0-3 tienen departamento fijo; en 4-7 el selector es un departamento, un código de 3 letras (ENG, MUS, ...), un tag o '*'"
    });

    HttpResponse::Ok().json(help)
}
