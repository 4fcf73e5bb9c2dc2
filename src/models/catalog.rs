// Catálogo normalizado en memoria.
//
// `Catalog::from_rows` es el único punto donde se interpreta texto crudo del
// archivo (departamento, grados, prerrequisitos, créditos, repetición). El
// resto del crate trabaja sobre `Course` ya normalizado.

use crate::algorithm::prereq::parse_prerequisite;
use crate::error::Issue;
use crate::models::{Course, Credits, Department, Prerequisite, Repeatable};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use strsim::{jaro_winkler, levenshtein};
use tracing::warn;

/// Umbral de similitud para sugerir un nombre parecido.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Fila del archivo de catálogo tal como viene, sin interpretar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCourseRow {
    pub code: String,
    pub name: String,
    pub department: String,
    pub grade_levels: String,
    pub prerequisites: String,
    /// `None` cuando la celda viene vacía (vale 1.0).
    pub credits: Option<String>,
    pub tags: String,
    pub notes: String,
    pub repeatable: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    by_code: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    issues: Vec<Issue>,
}

impl Catalog {
    /// Construye el catálogo a partir de cursos ya normalizados. Ante códigos
    /// repetidos se conserva la primera fila.
    pub fn new(courses: Vec<Course>) -> Self {
        let mut catalog = Catalog::default();
        for course in courses {
            catalog.push(course);
        }
        catalog
    }

    /// Normaliza filas crudas del archivo. Los problemas de datos no abortan
    /// la carga: quedan en `issues()`.
    pub fn from_rows(rows: Vec<RawCourseRow>) -> Self {
        let mut catalog = Catalog::default();
        for row in rows {
            if row.code.trim().is_empty() {
                let name = row.name.trim();
                if !name.is_empty() {
                    warn!(name = %name, "catalog row without course code, skipping");
                    catalog.issues.push(Issue::MissingCode { name: name.to_string() });
                }
                continue;
            }
            let (course, mut row_issues) = course_from_row(&row);
            catalog.issues.append(&mut row_issues);
            catalog.push(course);
        }
        catalog
    }

    fn push(&mut self, course: Course) {
        if self.by_code.contains_key(&course.code) {
            warn!(code = %course.code, "duplicate course code in catalog, keeping first row");
            self.issues.push(Issue::DuplicateCourse { code: course.code.clone() });
            return;
        }
        let idx = self.courses.len();
        self.by_code.insert(course.code.clone(), idx);
        match self.by_name.entry(name_key(&course.name)) {
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
            Entry::Occupied(_) => {
                warn!(code = %course.code, name = %course.name, "duplicate course name, lookups by name resolve to the first");
                self.issues.push(Issue::DuplicateName { name: course.name.clone(), code: course.code.clone() });
            }
        }
        self.courses.push(course);
    }

    /// Cursos en orden de catálogo.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn by_code(&self, code: &str) -> Option<&Course> {
        self.by_code.get(code.trim()).map(|&i| &self.courses[i])
    }

    /// Búsqueda por nombre, sin distinguir mayúsculas ni espacios extra.
    pub fn by_name(&self, name: &str) -> Option<&Course> {
        self.by_name.get(&name_key(name)).map(|&i| &self.courses[i])
    }

    /// Posición del curso en el catálogo (para ordenar resultados).
    pub fn position(&self, code: &str) -> Option<usize> {
        self.by_code.get(code.trim()).copied()
    }

    /// Nombre de catálogo más parecido a `name`. Candidatos: Jaro-Winkler
    /// sobre el umbral; gana la menor distancia de edición y luego el mayor
    /// puntaje.
    pub fn suggest_name(&self, name: &str) -> Option<String> {
        let wanted = name_key(name);
        let mut best: Option<(usize, f64, &Course)> = None;
        for c in &self.courses {
            let key = name_key(&c.name);
            let score = jaro_winkler(&wanted, &key);
            if score < SUGGESTION_THRESHOLD {
                continue;
            }
            let distance = levenshtein(&wanted, &key);
            let better = match best {
                None => true,
                Some((d, s, _)) => distance < d || (distance == d && score > s),
            };
            if better {
                best = Some((distance, score, c));
            }
        }
        best.map(|(_, _, c)| c.name.clone())
    }

    /// Departamentos presentes, ordenados por etiqueta.
    pub fn departments(&self) -> Vec<Department> {
        let mut out: Vec<Department> = Vec::new();
        for c in &self.courses {
            if !out.contains(&c.department) {
                out.push(c.department.clone());
            }
        }
        out.sort_by(|a, b| a.label().cmp(b.label()));
        out
    }

    /// Diagnósticos acumulados durante la carga.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

fn name_key(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn course_from_row(row: &RawCourseRow) -> (Course, Vec<Issue>) {
    let code = row.code.trim().to_string();
    let mut issues = Vec::new();

    let grade_levels = match parse_grade_levels(&row.grade_levels) {
        Some(g) => g,
        None => {
            warn!(code = %code, raw = %row.grade_levels, "unparseable grade levels");
            issues.push(Issue::InvalidGradeLevels { code: code.clone(), raw: row.grade_levels.clone() });
            BTreeSet::new()
        }
    };

    let prerequisite = parse_prerequisite(&row.prerequisites);
    if let Prerequisite::Invalid(raw) = &prerequisite {
        warn!(code = %code, raw = %raw, "unparseable prerequisite, course will never be eligible");
        issues.push(Issue::PrerequisiteParse { code: code.clone(), raw: raw.clone() });
    }

    let credits = parse_credits(row.credits.as_deref());
    if let Credits::Invalid(raw) = &credits {
        warn!(code = %code, raw = %raw, "non-numeric credits, excluded from sums");
        issues.push(Issue::CreditParse { code: code.clone(), raw: raw.clone() });
    }

    let course = Course {
        code,
        name: row.name.trim().to_string(),
        department: Department::parse(&row.department),
        grade_levels,
        prerequisite,
        credits,
        tags: parse_tags(&row.tags),
        notes: row.notes.trim().to_string(),
        repeatable: parse_repeatable(&row.repeatable),
    };
    (course, issues)
}

/// Acepta `[9, 10]`, `9-12`, `9,10` y `9`. `None` si no se entiende.
pub fn parse_grade_levels(raw: &str) -> Option<BTreeSet<u8>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let inner = s.trim_start_matches(['[', '(', '{']).trim_end_matches([']', ')', '}']);
    if let Some((a, b)) = inner.split_once('-') {
        let lo = parse_grade(a)?;
        let hi = parse_grade(b)?;
        if lo > hi {
            return None;
        }
        return Some((lo..=hi).collect());
    }
    let mut out = BTreeSet::new();
    for part in inner.split(',') {
        if part.trim().is_empty() {
            continue;
        }
        out.insert(parse_grade(part)?);
    }
    if out.is_empty() { None } else { Some(out) }
}

fn parse_grade(s: &str) -> Option<u8> {
    let t = s.trim().trim_matches(['\'', '"']);
    // pandas suele dejar "9.0"
    let t = t.strip_suffix(".0").unwrap_or(t);
    t.parse::<u8>().ok().filter(|g| (1..=12).contains(g))
}

/// Celda vacía -> 1.0; texto no numérico -> `Credits::Invalid`.
pub fn parse_credits(raw: Option<&str>) -> Credits {
    match raw.map(str::trim) {
        None | Some("") => Credits::default(),
        Some(s) if s.eq_ignore_ascii_case("nan") => Credits::default(),
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Credits::Value(v),
            _ => Credits::Invalid(s.to_string()),
        },
    }
}

pub fn parse_repeatable(raw: &str) -> Repeatable {
    let s = raw.trim().to_lowercase();
    match s.as_str() {
        "" | "no" | "once" | "false" | "0" | "nan" => Repeatable::Once,
        "yes" | "unlimited" | "true" | "any" => Repeatable::Unlimited,
        _ => {
            let digits = s.trim_start_matches("max").trim();
            match digits.parse::<u32>() {
                Ok(n) if n >= 1 => Repeatable::MaxCount(n),
                _ => Repeatable::Once,
            }
        }
    }
}

pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in raw.split([';', ',']) {
        let t = t.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
