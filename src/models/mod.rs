// Estructuras de datos principales: curso, catálogo y plan.

mod catalog;
mod department;
mod plan;

pub use catalog::{Catalog, RawCourseRow};
pub use department::{Department, CORE_DEPARTMENTS};
pub use plan::{Plan, SameYearVisibility, TakenSet, Year, CORE_SLOTS, MAX_MS_CREDITS, SLOTS_PER_YEAR, YEARS};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Expresión de prerrequisito ya parseada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Prerequisite {
    #[default]
    None,
    SingleCode(String),
    /// Lista plana: basta uno (OR).
    AnyOf(Vec<String>),
    /// Lista de grupos OR; se exige cada grupo (AND).
    AllOfGroups(Vec<Vec<String>>),
    /// Texto que no se pudo interpretar. Nunca se satisface.
    Invalid(String),
}

impl Prerequisite {
    /// Todos los códigos mencionados, en orden de aparición.
    pub fn codes(&self) -> Vec<&str> {
        match self {
            Prerequisite::None | Prerequisite::Invalid(_) => Vec::new(),
            Prerequisite::SingleCode(c) => vec![c.as_str()],
            Prerequisite::AnyOf(codes) => codes.iter().map(String::as_str).collect(),
            Prerequisite::AllOfGroups(groups) => groups.iter().flatten().map(String::as_str).collect(),
        }
    }
}

/// Valor de créditos. `Invalid` conserva el texto original y no suma.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credits {
    Value(f64),
    Invalid(String),
}

impl Default for Credits {
    fn default() -> Self {
        Credits::Value(1.0)
    }
}

impl Credits {
    pub fn value(&self) -> Option<f64> {
        match self {
            Credits::Value(v) => Some(*v),
            Credits::Invalid(_) => None,
        }
    }
}

/// Cuántas veces puede aparecer un curso en un plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Repeatable {
    #[default]
    Once,
    MaxCount(u32),
    Unlimited,
}

impl Repeatable {
    /// Máximo de apariciones permitidas; `None` = sin límite.
    pub fn limit(&self) -> Option<u32> {
        match self {
            Repeatable::Once => Some(1),
            Repeatable::MaxCount(n) => Some(*n),
            Repeatable::Unlimited => None,
        }
    }
}

/// Curso del catálogo. Inmutable una vez cargado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub department: Department,
    pub grade_levels: BTreeSet<u8>,
    #[serde(default)]
    pub prerequisite: Prerequisite,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub repeatable: Repeatable,
}

impl Course {
    /// Curso de 1 crédito, grados 9-12, sin prerrequisitos.
    pub fn new(code: &str, name: &str, department: Department) -> Self {
        Course {
            code: code.to_string(),
            name: name.to_string(),
            department,
            grade_levels: (9..=12).collect(),
            prerequisite: Prerequisite::None,
            credits: Credits::default(),
            tags: Vec::new(),
            notes: String::new(),
            repeatable: Repeatable::Once,
        }
    }

    pub fn with_grades<I: IntoIterator<Item = u8>>(mut self, grades: I) -> Self {
        self.grade_levels = grades.into_iter().collect();
        self
    }

    pub fn with_prerequisite(mut self, prerequisite: Prerequisite) -> Self {
        self.prerequisite = prerequisite;
        self
    }

    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = Credits::Value(credits);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.trim().to_lowercase()).collect();
        self
    }

    pub fn with_repeatable(mut self, repeatable: Repeatable) -> Self {
        self.repeatable = repeatable;
        self
    }

    pub fn offered_in(&self, grade: u8) -> bool {
        self.grade_levels.contains(&grade)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim().to_lowercase();
        !wanted.is_empty() && self.tags.iter().any(|t| *t == wanted)
    }

    /// Cuenta para graduación si se ofrece en algún grado >= 8.
    pub fn counts_for_graduation(&self) -> bool {
        self.grade_levels.iter().any(|g| *g >= 8)
    }
}
