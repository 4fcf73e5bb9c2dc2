// Biblioteca raíz del crate `gradpath`: modelo de catálogo y plan, filtro de
// elegibilidad, motor de requisitos de graduación y la API HTTP alrededor.
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod error;
pub mod excel;
pub mod export;
pub mod models;
pub mod server;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::{load_state, run_server};
