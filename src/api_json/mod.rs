//! Formas JSON de la API HTTP y estado compartido de los handlers.
//!
//! El servidor no guarda planes: cada request trae el `Plan` completo y cada
//! respuesta que lo modifica devuelve el plan nuevo.
//!
//! # Ejemplo: `POST /eligible`
//! ```json
//! {
//!   "plan": { "ms_credits": ["Algebra I"], "years": { "9": ["2401", null, null, null, null, null, null, null] } },
//!   "year": 10,
//!   "slot": 0,
//!   "selector": ""
//! }
//! ```
//!
//! # Ejemplo: `POST /evaluate`
//! ```json
//! { "plan": { ... }, "pathway": "University" }
//! ```

pub mod handlers;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::algorithm::eligibility::{ClearedSlot, EligibilityPolicy};
use crate::error::Issue;
use crate::models::{Catalog, Course, Credits, Plan, Prerequisite, Repeatable, Year, SLOTS_PER_YEAR, YEARS};

/// Estado inmutable compartido por todos los workers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub policy: EligibilityPolicy,
    /// Problemas del catálogo detectados al cargar y validar.
    pub issues: Vec<Issue>,
}

impl AppState {
    pub fn new(catalog: Catalog, policy: EligibilityPolicy, issues: Vec<Issue>) -> Self {
        AppState { catalog, policy, issues }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CourseDto {
    pub code: String,
    pub name: String,
    pub department: String,
    pub grade_levels: BTreeSet<u8>,
    pub prerequisite: Prerequisite,
    /// `None` si el valor del archivo no es numérico.
    pub credits: Option<f64>,
    pub tags: Vec<String>,
    pub notes: String,
    pub repeatable: Repeatable,
}

impl From<&Course> for CourseDto {
    fn from(c: &Course) -> Self {
        CourseDto {
            code: c.code.clone(),
            name: c.name.clone(),
            department: c.department.label().to_string(),
            grade_levels: c.grade_levels.clone(),
            prerequisite: c.prerequisite.clone(),
            credits: match c.credits {
                Credits::Value(v) => Some(v),
                Credits::Invalid(_) => None,
            },
            tags: c.tags.clone(),
            notes: c.notes.clone(),
            repeatable: c.repeatable,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct CatalogQuery {
    /// Solo cursos ofrecidos en este grado.
    pub grade: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct EligibleRequest {
    #[serde(default)]
    pub plan: Plan,
    pub year: Year,
    pub slot: usize,
    /// Texto del selector electivo: departamento, código de 3 letras, tag o `*`.
    #[serde(default)]
    pub selector: String,
}

#[derive(Debug, Serialize)]
pub struct EligibleResponse {
    pub year: Year,
    pub slot: usize,
    pub courses: Vec<CourseDto>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub plan: Plan,
    pub year: Year,
    pub slot: usize,
    pub code: String,
    #[serde(default)]
    pub selector: String,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub plan: Plan,
    pub year: Year,
    pub slot: usize,
}

#[derive(Debug, Deserialize)]
pub struct MsCreditsRequest {
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: Plan,
    /// Otros slots vaciados por la invalidación en cascada.
    pub cleared: Vec<ClearedSlot>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub plan: Plan,
    pub pathway: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateAllRequest {
    #[serde(default)]
    pub plan: Plan,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub student: String,
    #[serde(default)]
    pub plan: Plan,
    pub pathway: String,
}

/// Slots con curso en `before` que quedaron vacíos en `after`, sin contar
/// el slot que se editó.
pub fn cleared_slots(before: &Plan, after: &Plan, edited: (Year, usize)) -> Vec<ClearedSlot> {
    let mut out = Vec::new();
    for year in YEARS {
        for slot in 0..SLOTS_PER_YEAR {
            if (year, slot) == edited {
                continue;
            }
            if let (Some(code), None) = (before.slot(year, slot), after.slot(year, slot)) {
                out.push(ClearedSlot { year, slot, code: code.to_string() });
            }
        }
    }
    out
}
