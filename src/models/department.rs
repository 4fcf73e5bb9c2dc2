// Departamentos canónicos y tabla de normalización.
//
// Toda etiqueta leída del catálogo pasa por `Department::parse` una sola vez,
// al cargar. Las consultas comparan variantes, nunca texto libre.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Department {
    English,
    Mathematics,
    Science,
    SocialStudies,
    FineArts,
    PhysicalEducation,
    Health,
    WorldLanguages,
    Cte,
    Business,
    ComputerScience,
    /// Etiqueta desconocida, conservada tal cual (recortada).
    Other(String),
}

/// Departamentos fijos de los slots troncales 0-3.
pub const CORE_DEPARTMENTS: [Department; 4] = [
    Department::English,
    Department::Mathematics,
    Department::Science,
    Department::SocialStudies,
];

/// Códigos de tres letras usados por el selector de electivos.
/// MUS, DRM y ART colapsan en Fine Arts.
const DEPARTMENT_CODES: &[(&str, Department)] = &[
    ("BUS", Department::Business),
    ("CSC", Department::ComputerScience),
    ("CTE", Department::Cte),
    ("ENG", Department::English),
    ("MUS", Department::FineArts),
    ("MTH", Department::Mathematics),
    ("DRM", Department::FineArts),
    ("PED", Department::PhysicalEducation),
    ("SCI", Department::Science),
    ("SOC", Department::SocialStudies),
    ("ART", Department::FineArts),
    ("WLG", Department::WorldLanguages),
    ("HLT", Department::Health),
];

/// Sinónimos (en minúsculas) -> departamento canónico.
const ALIASES: &[(&str, Department)] = &[
    ("english", Department::English),
    ("language arts", Department::English),
    ("mathematics", Department::Mathematics),
    ("math", Department::Mathematics),
    ("science", Department::Science),
    ("social studies", Department::SocialStudies),
    ("fine arts", Department::FineArts),
    ("fine arts and vocal music", Department::FineArts),
    ("vocal music", Department::FineArts),
    ("performing arts", Department::FineArts),
    ("visual arts", Department::FineArts),
    ("music", Department::FineArts),
    ("art", Department::FineArts),
    ("drama", Department::FineArts),
    ("physical education", Department::PhysicalEducation),
    ("pe", Department::PhysicalEducation),
    ("health/pe", Department::PhysicalEducation),
    ("health", Department::Health),
    ("world languages", Department::WorldLanguages),
    ("world language", Department::WorldLanguages),
    ("foreign language", Department::WorldLanguages),
    ("cte", Department::Cte),
    ("career & technical", Department::Cte),
    ("career and technical education", Department::Cte),
    ("business", Department::Business),
    ("computer science", Department::ComputerScience),
];

impl Department {
    /// Normaliza una etiqueta de departamento del catálogo.
    pub fn parse(raw: &str) -> Department {
        let key = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, d)| d.clone())
            .unwrap_or_else(|| Department::Other(raw.trim().to_string()))
    }

    /// Resuelve un código de tres letras (`ENG`, `mus`, ...).
    pub fn from_code(code: &str) -> Option<Department> {
        let upper = code.trim().to_ascii_uppercase();
        DEPARTMENT_CODES
            .iter()
            .find(|(c, _)| *c == upper)
            .map(|(_, d)| d.clone())
    }

    /// Departamento fijo de un slot troncal; `None` para electivos.
    pub fn for_core_slot(slot: usize) -> Option<Department> {
        CORE_DEPARTMENTS.get(slot).cloned()
    }

    /// Es una etiqueta reconocida por la tabla (no `Other`).
    pub fn is_known(&self) -> bool {
        !matches!(self, Department::Other(_))
    }

    pub fn label(&self) -> &str {
        match self {
            Department::English => "English",
            Department::Mathematics => "Mathematics",
            Department::Science => "Science",
            Department::SocialStudies => "Social Studies",
            Department::FineArts => "Fine Arts",
            Department::PhysicalEducation => "Physical Education",
            Department::Health => "Health",
            Department::WorldLanguages => "World Languages",
            Department::Cte => "CTE",
            Department::Business => "Business",
            Department::ComputerScience => "Computer Science",
            Department::Other(s) => s.as_str(),
        }
    }

    /// Códigos de tres letras que apuntan a este departamento.
    pub fn codes(&self) -> Vec<&'static str> {
        DEPARTMENT_CODES
            .iter()
            .filter(|(_, d)| d == self)
            .map(|(c, _)| *c)
            .collect()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Department {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Department {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Department::parse(&raw))
    }
}
