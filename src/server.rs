use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::{info, warn};

use crate::algorithm::prereq_graph::validate_catalog;
use crate::api_json::handlers::{
    catalog_handler, clear_handler, departments_handler, eligible_handler, evaluate_all_handler, evaluate_handler,
    export_html_handler, help_handler, issues_handler, ms_credits_handler, ms_options_handler, select_handler,
};
use crate::api_json::AppState;
use crate::config::AppConfig;
use crate::error::CatalogError;
use crate::excel::{get_data_dir, load_catalog, resolve_catalog_path};

/// Registra todas las rutas. Se comparte entre `run_server` y los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/catalog", web::get().to(catalog_handler))
        .route("/catalog/departments", web::get().to(departments_handler))
        .route("/catalog/issues", web::get().to(issues_handler))
        .route("/catalog/ms-options", web::get().to(ms_options_handler))
        .route("/eligible", web::post().to(eligible_handler))
        .route("/plan/select", web::post().to(select_handler))
        .route("/plan/clear", web::post().to(clear_handler))
        .route("/plan/ms-credits", web::post().to(ms_credits_handler))
        .route("/evaluate", web::post().to(evaluate_handler))
        .route("/evaluate/all", web::post().to(evaluate_all_handler))
        .route("/export/html", web::post().to(export_html_handler))
        .route("/help", web::get().to(help_handler));
}

/// Carga y valida el catálogo configurado. Los problemas de datos quedan en
/// el estado (y en el log); sólo falla si el archivo no se puede leer.
pub fn load_state(config: &AppConfig) -> Result<AppState, CatalogError> {
    let data_dir = get_data_dir(config.data_dir.as_deref());
    let path = resolve_catalog_path(&data_dir, config.catalog.as_deref())?;
    let catalog = load_catalog(&path)?;

    let mut issues = catalog.issues().to_vec();
    issues.extend(validate_catalog(&catalog));
    for issue in &issues {
        warn!(%issue, "catalog issue");
    }
    info!(
        path = %path.display(),
        courses = catalog.len(),
        issues = issues.len(),
        same_year = ?config.policy.same_year,
        stale_selections = ?config.policy.stale_selections,
        "planner state ready"
    );
    Ok(AppState::new(catalog, config.policy.clone(), issues))
}

pub async fn run_server(bind_addr: &str, state: AppState) -> std::io::Result<()> {
    let data = web::Data::new(state);
    info!(bind = %bind_addr, "starting HTTP server");
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
