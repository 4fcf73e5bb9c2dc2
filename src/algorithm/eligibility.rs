//! Filtro de elegibilidad por slot y acción de selección sobre el plan.
//!
//! Para un `(year, slot)` se aplican, en orden:
//! 1. grado: el curso se ofrece en el grado del año
//! 2. departamento: fijo en slots troncales, el selector en electivos
//! 3. prerrequisitos contra lo cursado antes del slot (salvo grados eximidos)
//! 4. con `StaleSelections::Retain` el curso ya asignado al slot se mantiene
//!    visible aunque haya dejado de cumplir el paso 3
//!
//! El resultado respeta el orden del catálogo.

use crate::algorithm::prereq::is_satisfied;
use crate::error::SelectionError;
use crate::models::{
    Catalog, Course, Department, Plan, SameYearVisibility, Year, CORE_SLOTS, MAX_MS_CREDITS, SLOTS_PER_YEAR, YEARS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Qué hacer con selecciones que dejaron de ser elegibles tras cambiar un
/// slot anterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleSelections {
    /// Se conservan y siguen apareciendo en la lista del slot.
    #[default]
    Retain,
    /// Se vacían en cascada después de cada cambio.
    Invalidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    #[serde(default)]
    pub same_year: SameYearVisibility,
    /// Grados en los que no se exigen prerrequisitos.
    #[serde(default)]
    pub waived_grades: BTreeSet<u8>,
    #[serde(default)]
    pub stale_selections: StaleSelections,
}

impl EligibilityPolicy {
    pub fn enforces_prerequisites(&self, year: Year) -> bool {
        !self.waived_grades.contains(&year)
    }
}

/// Selector de un slot electivo.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SlotSelector {
    /// Sin departamento elegido: no hay opciones.
    #[default]
    None,
    /// Cualquier departamento.
    Any,
    Department(Department),
    /// Código de tres letras (`ENG`, `MUS`, ...).
    DepartmentCode(String),
    Tag(String),
}

impl SlotSelector {
    /// Interpreta el texto del desplegable: vacío -> `None`, `*` -> `Any`,
    /// código de tres letras, etiqueta de departamento conocida o, si nada
    /// de eso aplica, un tag.
    pub fn parse(raw: &str) -> SlotSelector {
        let s = raw.trim();
        if s.is_empty() {
            return SlotSelector::None;
        }
        if s == "*" {
            return SlotSelector::Any;
        }
        if Department::from_code(s).is_some() {
            return SlotSelector::DepartmentCode(s.to_ascii_uppercase());
        }
        let dept = Department::parse(s);
        if dept.is_known() {
            return SlotSelector::Department(dept);
        }
        SlotSelector::Tag(s.to_lowercase())
    }

    pub fn matches(&self, course: &Course) -> bool {
        match self {
            SlotSelector::None => false,
            SlotSelector::Any => true,
            SlotSelector::Department(d) => course.department == *d,
            SlotSelector::DepartmentCode(code) => {
                Department::from_code(code).is_some_and(|d| course.department == d)
            }
            SlotSelector::Tag(tag) => course.has_tag(tag),
        }
    }
}

fn matches_slot(course: &Course, slot: usize, selector: &SlotSelector) -> bool {
    match Department::for_core_slot(slot) {
        Some(dept) => course.department == dept,
        None => selector.matches(course),
    }
}

/// Cursos que el estudiante puede elegir en `(year, slot)`.
pub fn eligible_courses<'a>(
    catalog: &'a Catalog,
    selector: &SlotSelector,
    year: Year,
    slot: usize,
    plan: &Plan,
    policy: &EligibilityPolicy,
) -> Vec<&'a Course> {
    if !Plan::is_valid_year(year) || slot >= SLOTS_PER_YEAR {
        return Vec::new();
    }
    let enforce = policy.enforces_prerequisites(year);
    let taken = plan.taken_before(catalog, year, slot, policy.same_year);
    let retained = match policy.stale_selections {
        StaleSelections::Retain => plan.slot(year, slot),
        StaleSelections::Invalidate => None,
    };

    let out: Vec<&Course> = catalog
        .courses()
        .iter()
        .filter(|c| c.offered_in(year))
        .filter(|c| matches_slot(c, slot, selector))
        .filter(|c| !enforce || is_satisfied(&c.prerequisite, &taken) || retained == Some(c.code.as_str()))
        .collect();

    debug!(year, slot, eligible = out.len(), taken = taken.len(), "computed eligible courses");
    out
}

/// Elegibilidad estricta (sin retener la selección actual).
pub fn is_selectable(
    catalog: &Catalog,
    code: &str,
    selector: &SlotSelector,
    year: Year,
    slot: usize,
    plan: &Plan,
    policy: &EligibilityPolicy,
) -> bool {
    let Some(course) = catalog.by_code(code) else {
        return false;
    };
    if !Plan::is_valid_year(year) || slot >= SLOTS_PER_YEAR {
        return false;
    }
    if !course.offered_in(year) || !matches_slot(course, slot, selector) {
        return false;
    }
    if !policy.enforces_prerequisites(year) {
        return true;
    }
    let taken = plan.taken_before(catalog, year, slot, policy.same_year);
    is_satisfied(&course.prerequisite, &taken)
}

fn check_position(year: Year, slot: usize) -> Result<(), SelectionError> {
    if !Plan::is_valid_year(year) {
        return Err(SelectionError::YearOutOfRange(year));
    }
    if slot >= SLOTS_PER_YEAR {
        return Err(SelectionError::SlotOutOfRange(slot));
    }
    Ok(())
}

/// Asigna `code` a `(year, slot)` si es elegible en este momento y devuelve
/// el plan resultante. Volver a enviar el valor actual del slot no cambia
/// nada aunque ya no sea elegible.
pub fn select_course(
    catalog: &Catalog,
    plan: &Plan,
    year: Year,
    slot: usize,
    code: &str,
    selector: &SlotSelector,
    policy: &EligibilityPolicy,
) -> Result<Plan, SelectionError> {
    check_position(year, slot)?;
    let code = code.trim();
    if catalog.by_code(code).is_none() {
        return Err(SelectionError::UnknownCourse(code.to_string()));
    }
    if plan.slot(year, slot) == Some(code) {
        return Ok(plan.clone());
    }
    if !is_selectable(catalog, code, selector, year, slot, plan, policy) {
        return Err(SelectionError::NotEligible { code: code.to_string(), year, slot });
    }
    let next = plan.clone().with_slot(year, slot, Some(code));
    Ok(apply_stale_policy(catalog, next, policy))
}

/// Vacía `(year, slot)`.
pub fn clear_slot(
    catalog: &Catalog,
    plan: &Plan,
    year: Year,
    slot: usize,
    policy: &EligibilityPolicy,
) -> Result<Plan, SelectionError> {
    check_position(year, slot)?;
    let next = plan.clone().with_slot(year, slot, None);
    Ok(apply_stale_policy(catalog, next, policy))
}

fn apply_stale_policy(catalog: &Catalog, plan: Plan, policy: &EligibilityPolicy) -> Plan {
    match policy.stale_selections {
        StaleSelections::Retain => plan,
        StaleSelections::Invalidate => prune_ineligible(catalog, plan, policy).0,
    }
}

/// Slot vaciado por la invalidación en cascada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearedSlot {
    pub year: Year,
    pub slot: usize,
    pub code: String,
}

/// Recorre el plan en orden año -> slot y vacía cada selección que ya no es
/// elegible (grado, departamento troncal o prerrequisitos). Como cada slot
/// se evalúa sobre el plan ya depurado, la invalidación se propaga.
pub fn prune_ineligible(catalog: &Catalog, mut plan: Plan, policy: &EligibilityPolicy) -> (Plan, Vec<ClearedSlot>) {
    let mut cleared = Vec::new();
    for year in YEARS {
        for slot in 0..SLOTS_PER_YEAR {
            let Some(code) = plan.slot(year, slot).map(str::to_string) else {
                continue;
            };
            // En electivos no conocemos el selector con que se eligió.
            let selector = if slot < CORE_SLOTS { SlotSelector::None } else { SlotSelector::Any };
            if !is_selectable(catalog, &code, &selector, year, slot, &plan, policy) {
                debug!(year, slot, code = %code, "clearing stale selection");
                plan = plan.with_slot(year, slot, None);
                cleared.push(ClearedSlot { year, slot, code });
            }
        }
    }
    (plan, cleared)
}

/// Reemplaza los créditos de grado 8. Máximo cuatro, todos cursos que se
/// ofrecen en grado 8.
pub fn set_ms_credits(catalog: &Catalog, plan: &Plan, names: &[String]) -> Result<Plan, SelectionError> {
    let names: Vec<&str> = names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()).collect();
    if names.len() > MAX_MS_CREDITS {
        return Err(SelectionError::TooManyMiddleSchoolCredits { max: MAX_MS_CREDITS, got: names.len() });
    }
    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        let course = catalog
            .by_name(name)
            .ok_or_else(|| SelectionError::UnknownCourse(name.to_string()))?;
        if !course.offered_in(8) {
            return Err(SelectionError::NotMiddleSchoolCourse(course.name.clone()));
        }
        resolved.push(course.name.clone());
    }
    Ok(plan.clone().with_ms_credits(resolved))
}

/// Cursos de grado 8 disponibles para créditos de enseñanza media.
pub fn ms_credit_options(catalog: &Catalog) -> Vec<&Course> {
    catalog.courses().iter().filter(|c| c.offered_in(8)).collect()
}
