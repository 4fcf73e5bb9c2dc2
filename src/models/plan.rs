// Plan de 4 años x 8 slots más créditos de enseñanza media (grado 8).
//
// El plan es un valor: las operaciones que lo modifican devuelven un plan
// nuevo y nunca hay estado de sesión compartido.

use crate::error::Issue;
use crate::models::{Catalog, Course};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub type Year = u8;

pub const YEARS: [Year; 4] = [9, 10, 11, 12];
pub const SLOTS_PER_YEAR: usize = 8;
/// Slots 0-3: English, Mathematics, Science, Social Studies.
pub const CORE_SLOTS: usize = 4;
pub const MAX_MS_CREDITS: usize = 4;

type YearSlots = [Option<String>; SLOTS_PER_YEAR];

/// Qué slots del mismo año cuentan como "ya cursados".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SameYearVisibility {
    /// Los slots de índice menor del mismo año son visibles.
    #[default]
    PriorSlots,
    /// Sólo años anteriores (y créditos de grado 8) son visibles.
    PriorYears,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Nombres de cursos de grado 8 que otorgan crédito.
    #[serde(default)]
    pub ms_credits: Vec<String>,
    #[serde(default = "empty_years")]
    pub years: BTreeMap<Year, YearSlots>,
}

fn empty_years() -> BTreeMap<Year, YearSlots> {
    YEARS.iter().map(|y| (*y, YearSlots::default())).collect()
}

impl Default for Plan {
    fn default() -> Self {
        Plan::new()
    }
}

impl Plan {
    pub fn new() -> Self {
        Plan { ms_credits: Vec::new(), years: empty_years() }
    }

    pub fn is_valid_year(year: Year) -> bool {
        YEARS.contains(&year)
    }

    /// Código seleccionado en `(year, slot)`. Las cadenas vacías cuentan como
    /// slot libre (así las envía el formulario).
    pub fn slot(&self, year: Year, slot: usize) -> Option<&str> {
        self.years
            .get(&year)
            .and_then(|slots| slots.get(slot))
            .and_then(|s| s.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Copia del plan con el slot reemplazado. No valida elegibilidad: la
    /// acción validada es `algorithm::eligibility::select_course`.
    pub fn with_slot(mut self, year: Year, slot: usize, code: Option<&str>) -> Plan {
        if Plan::is_valid_year(year) && slot < SLOTS_PER_YEAR {
            let slots = self.years.entry(year).or_default();
            slots[slot] = code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        }
        self
    }

    pub fn with_ms_credits<I, S>(mut self, names: I) -> Plan
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ms_credits = names
            .into_iter()
            .map(Into::into)
            .filter(|n: &String| !n.trim().is_empty())
            .collect();
        self
    }

    /// Todos los códigos de los slots, en orden año -> slot.
    pub fn slot_codes(&self) -> Vec<(Year, usize, &str)> {
        let mut out = Vec::new();
        for year in YEARS {
            for slot in 0..SLOTS_PER_YEAR {
                if let Some(code) = self.slot(year, slot) {
                    out.push((year, slot, code));
                }
            }
        }
        out
    }

    /// Créditos de grado 8 que cuentan, resueltos por nombre. Sólo valen
    /// las primeras `MAX_MS_CREDITS` entradas y sólo cursos ofrecidos en
    /// grado 8; el resto vuelve como `Issue`.
    pub fn ms_courses<'a>(&self, catalog: &'a Catalog) -> (Vec<&'a Course>, Vec<Issue>) {
        let mut courses = Vec::new();
        let mut issues = Vec::new();
        let names = self.ms_credits.iter().map(|n| n.trim()).filter(|n| !n.is_empty());
        for (idx, name) in names.enumerate() {
            if idx >= MAX_MS_CREDITS {
                issues.push(Issue::IgnoredMiddleSchoolCredit {
                    name: name.to_string(),
                    reason: format!("only {} middle-school credits count", MAX_MS_CREDITS),
                });
                continue;
            }
            match catalog.by_name(name) {
                Some(c) if c.offered_in(8) => courses.push(c),
                Some(c) => issues.push(Issue::IgnoredMiddleSchoolCredit {
                    name: c.name.clone(),
                    reason: "not offered in grade 8".to_string(),
                }),
                None => issues.push(Issue::DataIntegrity {
                    reference: name.to_string(),
                    suggestion: catalog.suggest_name(name),
                }),
            }
        }
        (courses, issues)
    }

    /// Conjunto ordenado de códigos "ya cursados" antes de `(year, slot)`.
    ///
    /// Incluye los créditos de grado 8 válidos (ver `ms_courses`) y luego
    /// cada slot anterior según `rule`.
    pub fn taken_before(&self, catalog: &Catalog, year: Year, slot: usize, rule: SameYearVisibility) -> TakenSet {
        let mut taken = TakenSet::new();
        for course in self.ms_courses(catalog).0 {
            taken.insert(&course.code);
        }
        for y in YEARS.iter().copied().filter(|y| *y <= year) {
            for s in 0..SLOTS_PER_YEAR {
                let visible = if y < year {
                    true
                } else {
                    match rule {
                        SameYearVisibility::PriorSlots => s < slot,
                        SameYearVisibility::PriorYears => false,
                    }
                };
                if !visible {
                    continue;
                }
                if let Some(code) = self.slot(y, s) {
                    taken.insert(code);
                }
            }
        }
        taken
    }
}

/// Conjunto de códigos que conserva el orden de inserción.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TakenSet {
    order: Vec<String>,
    #[serde(skip)]
    index: HashSet<String>,
}

impl TakenSet {
    pub fn new() -> Self {
        TakenSet::default()
    }

    pub fn insert(&mut self, code: &str) {
        let code = code.trim();
        if code.is_empty() || self.index.contains(code) {
            return;
        }
        self.index.insert(code.to_string());
        self.order.push(code.to_string());
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains(code.trim())
    }

    pub fn codes(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TakenSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = TakenSet::new();
        for code in iter {
            set.insert(code.as_ref());
        }
        set
    }
}
