#![allow(dead_code)]

use gradpath::algorithm::eligibility::{select_course, set_ms_credits, EligibilityPolicy, SlotSelector};
use gradpath::excel::load_catalog;
use gradpath::models::{Catalog, Course, Department, Plan, Prerequisite, Year, CORE_SLOTS};
use std::path::PathBuf;

pub fn bundled_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join("WHS_course_catalog.csv")
}

pub fn bundled_catalog() -> Catalog {
    load_catalog(bundled_catalog_path()).expect("el catálogo incluido debe cargar")
}

/// English I / English II: el caso mínimo de prerrequisito.
pub fn english_catalog() -> Catalog {
    Catalog::new(vec![
        Course::new("2401", "English I", Department::English).with_grades([9, 10, 11, 12]),
        Course::new("2501", "English II", Department::English)
            .with_grades([9, 10, 11, 12])
            .with_prerequisite(Prerequisite::SingleCode("2401".into())),
    ])
}

/// Plan de 4 años que cumple las tres trayectorias con el catálogo incluido.
pub const FULL_PLAN: [(Year, [&str; 8]); 4] = [
    (9, ["2401", "4401", "5201", "7101", "2810", "9101", "9201", "6101"]),
    (10, ["2501", "4506", "5301", "7201", "SP2", "7501", "6301", "8191"]),
    (11, ["2601", "4601", "5401", "7301", "SP3", "3201", "8192", "6101"]),
    (12, ["2715", "4701", "5501", "7401", "3202", "8193", "6302", "7601"]),
];

pub const FULL_PLAN_MS: [&str; 2] = ["Algebra I", "Spanish I"];

/// Arma el plan pasando por la acción validada, slot por slot.
pub fn build_plan(catalog: &Catalog, ms: &[&str], years: &[(Year, [&str; 8])]) -> Plan {
    let policy = EligibilityPolicy::default();
    let names: Vec<String> = ms.iter().map(|s| s.to_string()).collect();
    let mut plan = set_ms_credits(catalog, &Plan::new(), &names).expect("créditos de grado 8 válidos");
    for (year, codes) in years {
        for (slot, code) in codes.iter().enumerate() {
            if code.is_empty() {
                continue;
            }
            let selector = if slot < CORE_SLOTS { SlotSelector::None } else { SlotSelector::Any };
            plan = select_course(catalog, &plan, *year, slot, code, &selector, &policy)
                .unwrap_or_else(|e| panic!("{} en {}/{}: {}", code, year, slot, e));
        }
    }
    plan
}

pub fn full_plan(catalog: &Catalog) -> Plan {
    build_plan(catalog, &FULL_PLAN_MS, &FULL_PLAN)
}

pub fn codes(courses: &[&Course]) -> Vec<String> {
    courses.iter().map(|c| c.code.clone()).collect()
}
