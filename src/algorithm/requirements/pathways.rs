// Tablas de requisitos por trayectoria de graduación.
//
// Cada trayectoria es una lista ordenada de `BucketRule`. El orden de la
// lista es el orden del reporte; el orden de reclamo de créditos lo decide
// `Scope::specificity` (códigos explícitos antes que departamentos).

use crate::models::Department;
use serde::{Deserialize, Serialize};

pub const ENGLISH_GROUPS: &[&[&str]] = &[&["2401", "2404"], &["2501", "2504"], &["2601", "2608"], &["2715", "2606"]];
/// Speech, Debate.
pub const SPEECH_CODES: &[&str] = &["2810", "2811"];
/// Algebra I, Geometry, Algebra II.
pub const MATH_GROUPS: &[&[&str]] = &[&["4301", "4304"], &["4401", "4402"], &["4506", "4504"]];
pub const ALGEBRA_I_GROUP: &[&[&str]] = &[&["4301", "4304"]];
/// Biology, Chemistry, Physical Science.
pub const HONORS_SCIENCE_GROUPS: &[&[&str]] = &[&["5301", "5304"], &["5401", "5404"], &["5201", "5204"]];
/// Geography, World History, U.S. History, U.S. Government.
pub const SOCIAL_STUDIES_GROUPS: &[&[&str]] = &[&["7101"], &["7201", "7204"], &["7301", "7304"], &["7401", "7404"]];
/// Personal Finance, Economics.
pub const FINANCE_CODES: &[&str] = &["7501", "7502"];
pub const NATIVE_AMERICAN_STUDIES_CODES: &[&str] = &["7601"];
/// PE I + Health.
pub const PE_HEALTH_CODES: &[&str] = &["9101", "9201"];
/// Código avanzado fuera del rango numérico > 4600.
pub const ADVANCED_MATH_EXTRA_CODE: &str = "4502";

pub const TOTAL_CREDITS_REQUIRED: f64 = 24.0;
pub const ELECTIVE_CREDITS_REQUIRED: f64 = 5.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pathway {
    University,
    CareerAndTechnical,
    HonorsScholarship,
}

impl Pathway {
    pub const ALL: [Pathway; 3] = [Pathway::University, Pathway::CareerAndTechnical, Pathway::HonorsScholarship];

    pub fn label(&self) -> &'static str {
        match self {
            Pathway::University => "University",
            Pathway::CareerAndTechnical => "Career & Technical",
            Pathway::HonorsScholarship => "Honors / Scholarship Opportunity",
        }
    }

    /// Acepta la etiqueta del formulario o el nombre en snake_case.
    pub fn parse(raw: &str) -> Option<Pathway> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "university" => Some(Pathway::University),
            "careertechnical" | "careerandtechnical" | "cte" => Some(Pathway::CareerAndTechnical),
            "honorsscholarshipopportunity" | "honorsscholarship" | "honors" => Some(Pathway::HonorsScholarship),
            _ => None,
        }
    }
}

/// Población de filas que un bucket puede reclamar.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    Codes(Vec<&'static str>),
    Department(Department),
    /// Lo que ningún otro bucket reclamó, más los excedentes.
    Electives,
    /// Todas las filas con crédito.
    Total,
}

impl Scope {
    /// Menor = reclama primero. `None` = no reclama filas.
    pub fn specificity(&self) -> Option<u8> {
        match self {
            Scope::Codes(_) => Some(0),
            Scope::Department(_) => Some(1),
            Scope::Electives | Scope::Total => None,
        }
    }

    pub fn accepts(&self, code: &str, department: &Department) -> bool {
        match self {
            Scope::Codes(codes) => codes.iter().any(|c| *c == code),
            Scope::Department(d) => d == department,
            Scope::Electives | Scope::Total => false,
        }
    }
}

/// Condición adicional de un bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extra {
    None,
    /// Los créditos deben venir de un mismo idioma (prefijo de 2 caracteres).
    SameLanguage,
    /// Además debe calificar algún cluster CTE.
    CteCluster,
    /// Debe incluir un curso avanzado (código > 4600 o 4502).
    AdvancedMath,
    /// Mismo idioma o, en su defecto, un cluster CTE que califique.
    SameLanguageOrCluster,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketRule {
    pub label: &'static str,
    pub required: f64,
    pub scope: Scope,
    /// Grupos que deben tener al menos un código reclamado cada uno.
    pub groups: &'static [&'static [&'static str]],
    pub extra: Extra,
}

impl BucketRule {
    fn new(label: &'static str, required: f64, scope: Scope) -> Self {
        BucketRule { label, required, scope, groups: &[], extra: Extra::None }
    }

    fn groups(mut self, groups: &'static [&'static [&'static str]]) -> Self {
        self.groups = groups;
        self
    }

    fn extra(mut self, extra: Extra) -> Self {
        self.extra = extra;
        self
    }
}

fn flat(groups: &'static [&'static [&'static str]]) -> Scope {
    Scope::Codes(groups.iter().flat_map(|g| g.iter().copied()).collect())
}

fn codes(codes: &'static [&'static str]) -> Scope {
    Scope::Codes(codes.to_vec())
}

pub fn is_advanced_math(code: &str) -> bool {
    code == ADVANCED_MATH_EXTRA_CODE || code.parse::<u32>().is_ok_and(|n| n > 4600)
}

/// Prefijo de idioma: los dos primeros caracteres del código.
pub fn language_prefix(code: &str) -> String {
    code.chars().take(2).collect::<String>().to_ascii_uppercase()
}

pub fn rules(pathway: Pathway) -> Vec<BucketRule> {
    match pathway {
        Pathway::University => vec![
            BucketRule::new("Language Arts", 4.0, flat(ENGLISH_GROUPS)).groups(ENGLISH_GROUPS),
            BucketRule::new("Speech/Debate", 0.5, codes(SPEECH_CODES)),
            BucketRule::new("Mathematics", 3.0, flat(MATH_GROUPS)).groups(MATH_GROUPS),
            BucketRule::new("Science", 3.0, Scope::Department(Department::Science)),
            BucketRule::new("Social Studies", 3.0, Scope::Department(Department::SocialStudies))
                .groups(SOCIAL_STUDIES_GROUPS),
            BucketRule::new("Personal Finance", 0.5, codes(FINANCE_CODES)),
            BucketRule::new("Physical Education", 0.5, Scope::Department(Department::PhysicalEducation)),
            BucketRule::new("Health", 0.5, Scope::Department(Department::Health)),
            BucketRule::new("Fine Arts", 1.0, Scope::Department(Department::FineArts)),
            BucketRule::new("World Language", 2.0, Scope::Department(Department::WorldLanguages))
                .extra(Extra::SameLanguage),
            BucketRule::new("Electives", ELECTIVE_CREDITS_REQUIRED, Scope::Electives),
            BucketRule::new("Total Credits", TOTAL_CREDITS_REQUIRED, Scope::Total),
        ],
        Pathway::CareerAndTechnical => vec![
            BucketRule::new("Language Arts", 4.0, Scope::Department(Department::English)),
            BucketRule::new("Speech", 0.5, codes(SPEECH_CODES)),
            BucketRule::new("Mathematics", 3.0, Scope::Department(Department::Mathematics)).groups(ALGEBRA_I_GROUP),
            BucketRule::new("Science", 3.0, Scope::Department(Department::Science)),
            BucketRule::new("Social Studies", 3.0, Scope::Department(Department::SocialStudies)),
            BucketRule::new("Personal Finance", 0.5, codes(FINANCE_CODES)),
            BucketRule::new("Physical Education & Health", 1.0, codes(PE_HEALTH_CODES)),
            BucketRule::new("Fine Arts", 1.0, Scope::Department(Department::FineArts)),
            BucketRule::new("Career & Technical Education", 2.0, Scope::Department(Department::Cte))
                .extra(Extra::CteCluster),
            BucketRule::new("Electives", ELECTIVE_CREDITS_REQUIRED, Scope::Electives),
            BucketRule::new("Total Credits", TOTAL_CREDITS_REQUIRED, Scope::Total),
        ],
        Pathway::HonorsScholarship => vec![
            BucketRule::new("Language Arts", 4.0, flat(ENGLISH_GROUPS)).groups(ENGLISH_GROUPS),
            BucketRule::new("Speech/Debate", 0.5, codes(SPEECH_CODES)),
            BucketRule::new("Mathematics", 4.0, Scope::Department(Department::Mathematics))
                .groups(MATH_GROUPS)
                .extra(Extra::AdvancedMath),
            BucketRule::new("Science", 4.0, Scope::Department(Department::Science)).groups(HONORS_SCIENCE_GROUPS),
            BucketRule::new("Social Studies", 3.0, Scope::Department(Department::SocialStudies))
                .groups(SOCIAL_STUDIES_GROUPS),
            BucketRule::new("Personal Finance", 0.5, codes(FINANCE_CODES)),
            BucketRule::new("Native American Studies", 0.5, codes(NATIVE_AMERICAN_STUDIES_CODES)),
            BucketRule::new("Physical Education", 0.5, Scope::Department(Department::PhysicalEducation)),
            BucketRule::new("Health", 0.5, Scope::Department(Department::Health)),
            BucketRule::new("Fine Arts", 1.0, Scope::Department(Department::FineArts)),
            BucketRule::new("World Language or CTE Cluster", 2.0, Scope::Department(Department::WorldLanguages))
                .extra(Extra::SameLanguageOrCluster),
            BucketRule::new("Total Credits", TOTAL_CREDITS_REQUIRED, Scope::Total),
        ],
    }
}
