//! Errores y diagnósticos del crate.
//!
//! Las operaciones del núcleo (`is_satisfied`, `eligible_courses`, `evaluate`)
//! nunca devuelven error: los problemas de datos se absorben y viajan como
//! `Issue` dentro de los reportes. Los `Error` tipados quedan para las
//! superficies externas (carga de catálogo, mutación del plan, configuración).

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Fallos al leer el catálogo desde disco.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read spreadsheet '{path}': {message}")]
    Spreadsheet { path: PathBuf, message: String },

    #[error("failed to read csv '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("catalog '{path}' is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("unsupported catalog format '{0}' (expected .csv, .xlsx, .xls or .ods)")]
    UnsupportedFormat(String),

    #[error("catalog '{0}' has no course rows")]
    Empty(PathBuf),
}

/// Rechazos de la acción de selección sobre un slot del plan.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum SelectionError {
    #[error("year {0} is outside 9-12")]
    YearOutOfRange(u8),

    #[error("slot {0} is outside 0-7")]
    SlotOutOfRange(usize),

    #[error("course '{0}' is not in the catalog")]
    UnknownCourse(String),

    #[error("course '{code}' is not eligible for grade {year} slot {slot}")]
    NotEligible { code: String, year: u8, slot: usize },

    #[error("at most {max} middle-school credits are allowed, got {got}")]
    TooManyMiddleSchoolCredits { max: usize, got: usize },

    #[error("course '{0}' is not offered in grade 8")]
    NotMiddleSchoolCourse(String),
}

/// Valores de entorno mal formados.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Diagnóstico no fatal. Se registra con `tracing::warn!` en el punto donde
/// se detecta y se entrega al llamador dentro del reporte correspondiente.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// Un nombre o código seleccionado que no existe en el catálogo.
    DataIntegrity {
        reference: String,
        suggestion: Option<String>,
    },
    /// Prerrequisito ilegible: el curso queda no elegible (fail closed).
    PrerequisiteParse { code: String, raw: String },
    /// Créditos no numéricos: la fila no suma créditos.
    CreditParse { code: String, raw: String },
    /// Niveles de grado ilegibles: el curso nunca es elegible.
    InvalidGradeLevels { code: String, raw: String },
    /// Código repetido en el archivo; se conserva la primera fila.
    DuplicateCourse { code: String },
    /// Fila con nombre pero sin código; se descarta.
    MissingCode { name: String },
    /// Nombre repetido con otro código; la búsqueda por nombre resuelve al
    /// primero.
    DuplicateName { name: String, code: String },
    /// Crédito de grado 8 que existe pero no cuenta (no se ofrece en grado
    /// 8 o excede el máximo).
    IgnoredMiddleSchoolCredit { name: String, reason: String },
    /// Un prerrequisito apunta a un código ausente del catálogo.
    UnknownPrerequisite { code: String, missing: String },
    /// Ciclo de prerrequisitos entre cursos.
    PrerequisiteCycle { codes: Vec<String> },
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Issue::DataIntegrity { reference, suggestion: Some(s) } => {
                write!(f, "'{}' not found in catalog (did you mean '{}'?)", reference, s)
            }
            Issue::DataIntegrity { reference, suggestion: None } => {
                write!(f, "'{}' not found in catalog", reference)
            }
            Issue::PrerequisiteParse { code, raw } => {
                write!(f, "course {} has unparseable prerequisite '{}'", code, raw)
            }
            Issue::CreditParse { code, raw } => {
                write!(f, "course {} has non-numeric credits '{}'", code, raw)
            }
            Issue::InvalidGradeLevels { code, raw } => {
                write!(f, "course {} has unparseable grade levels '{}'", code, raw)
            }
            Issue::DuplicateCourse { code } => write!(f, "course code {} appears more than once", code),
            Issue::MissingCode { name } => write!(f, "course '{}' has no course code", name),
            Issue::DuplicateName { name, code } => {
                write!(f, "course name '{}' is repeated by course {}", name, code)
            }
            Issue::IgnoredMiddleSchoolCredit { name, reason } => {
                write!(f, "middle-school credit '{}' ignored: {}", name, reason)
            }
            Issue::UnknownPrerequisite { code, missing } => {
                write!(f, "course {} requires unknown course {}", code, missing)
            }
            Issue::PrerequisiteCycle { codes } => {
                write!(f, "prerequisite cycle between {}", codes.join(", "))
            }
        }
    }
}
