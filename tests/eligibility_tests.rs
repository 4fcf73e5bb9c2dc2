//! Tests del filtro de elegibilidad por slot y de la acción de selección.
mod common;

use gradpath::algorithm::eligibility::{
    clear_slot, eligible_courses, prune_ineligible, select_course, set_ms_credits, ClearedSlot, EligibilityPolicy,
    SlotSelector, StaleSelections,
};
use gradpath::error::SelectionError;
use gradpath::models::{Plan, SameYearVisibility, YEARS, SLOTS_PER_YEAR};

fn policy() -> EligibilityPolicy {
    EligibilityPolicy::default()
}

#[test]
fn test_never_returns_course_outside_grade() {
    let catalog = common::bundled_catalog();
    let plan = common::full_plan(&catalog);
    for selector in [SlotSelector::Any, SlotSelector::parse("MUS"), SlotSelector::parse("stem")] {
        for year in YEARS {
            for slot in 0..SLOTS_PER_YEAR {
                for course in eligible_courses(&catalog, &selector, year, slot, &plan, &policy()) {
                    assert!(course.offered_in(year), "{} devuelto para grado {}", course.code, year);
                }
            }
        }
    }
}

#[test]
fn test_core_slots_fixed_department_in_catalog_order() {
    let catalog = common::bundled_catalog();
    let plan = Plan::new();
    let english = eligible_courses(&catalog, &SlotSelector::Any, 9, 0, &plan, &policy());
    // El selector no afecta los slots troncales.
    assert_eq!(common::codes(&english), vec!["2401", "2404", "2810"]);

    let positions: Vec<usize> = english.iter().map(|c| catalog.position(&c.code).unwrap()).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn test_empty_selector_yields_empty_list() {
    let catalog = common::bundled_catalog();
    let out = eligible_courses(&catalog, &SlotSelector::parse(""), 9, 5, &Plan::new(), &policy());
    assert!(out.is_empty());
}

#[test]
fn test_elective_selector_by_code_department_and_tag() {
    let catalog = common::bundled_catalog();
    let plan = Plan::new();

    let music = eligible_courses(&catalog, &SlotSelector::parse("MUS"), 9, 4, &plan, &policy());
    assert_eq!(common::codes(&music), vec!["6101", "6201", "6301", "6401"]);

    let languages = eligible_courses(&catalog, &SlotSelector::parse("World Language"), 9, 4, &plan, &policy());
    // Spanish II exige Spanish I.
    assert_eq!(common::codes(&languages), vec!["SP1", "FR1"]);

    let ag = eligible_courses(&catalog, &SlotSelector::parse("agriculture"), 9, 6, &plan, &policy());
    assert_eq!(common::codes(&ag), vec!["8101"]);
}

#[test]
fn test_middle_school_credit_unlocks_prerequisite() {
    let catalog = common::bundled_catalog();
    let plan = Plan::new();
    let math = eligible_courses(&catalog, &SlotSelector::None, 9, 1, &plan, &policy());
    assert_eq!(common::codes(&math), vec!["4301", "4304"]);

    let plan = set_ms_credits(&catalog, &plan, &["Algebra I".to_string()]).unwrap();
    let math = eligible_courses(&catalog, &SlotSelector::None, 9, 1, &plan, &policy());
    assert_eq!(common::codes(&math), vec!["4301", "4304", "4401", "4402"]);
}

#[test]
fn test_same_year_visibility_both_rules() {
    let catalog = common::english_catalog();
    let plan = Plan::new().with_slot(9, 0, Some("2401"));

    let prior_slots = policy();
    let out = eligible_courses(&catalog, &SlotSelector::parse("English"), 9, 4, &plan, &prior_slots);
    assert_eq!(common::codes(&out), vec!["2401", "2501"]);

    let prior_years = EligibilityPolicy { same_year: SameYearVisibility::PriorYears, ..policy() };
    let out = eligible_courses(&catalog, &SlotSelector::parse("English"), 9, 4, &plan, &prior_years);
    assert_eq!(common::codes(&out), vec!["2401"]);
}

#[test]
fn test_waived_grade_skips_prerequisites() {
    let catalog = common::bundled_catalog();
    let plan = Plan::new();
    let strict = eligible_courses(&catalog, &SlotSelector::None, 12, 1, &plan, &policy());
    assert!(strict.is_empty(), "sin Algebra II nada de matemáticas de 12 es elegible");

    let waived = EligibilityPolicy { waived_grades: [12].into_iter().collect(), ..policy() };
    let out = eligible_courses(&catalog, &SlotSelector::None, 12, 1, &plan, &waived);
    assert_eq!(common::codes(&out), vec!["4502", "4601", "4701"]);
}

#[test]
fn test_retained_selection_stays_visible() {
    let catalog = common::english_catalog();
    let plan = Plan::new().with_slot(9, 0, Some("2401")).with_slot(10, 0, Some("2501"));
    // Se quita English I: English II deja de cumplir pero sigue en la lista del slot.
    let plan = clear_slot(&catalog, &plan, 9, 0, &policy()).unwrap();
    assert_eq!(plan.slot(10, 0), Some("2501"));

    let out = eligible_courses(&catalog, &SlotSelector::None, 10, 0, &plan, &policy());
    assert_eq!(common::codes(&out), vec!["2401", "2501"]);

    // Pero no en otro slot.
    let out = eligible_courses(&catalog, &SlotSelector::parse("*"), 10, 4, &plan, &policy());
    assert_eq!(common::codes(&out), vec!["2401"]);
}

#[test]
fn test_invalidate_clears_stale_selections_in_cascade() {
    let catalog = common::bundled_catalog();
    let invalidate = EligibilityPolicy { stale_selections: StaleSelections::Invalidate, ..policy() };
    let plan = Plan::new()
        .with_slot(9, 0, Some("2401"))
        .with_slot(10, 0, Some("2501"))
        .with_slot(11, 0, Some("2601"))
        .with_slot(9, 4, Some("6101"));

    let plan = clear_slot(&catalog, &plan, 9, 0, &invalidate).unwrap();
    assert_eq!(plan.slot(10, 0), None);
    assert_eq!(plan.slot(11, 0), None);
    assert_eq!(plan.slot(9, 4), Some("6101"));

    let stale = Plan::new().with_slot(10, 0, Some("2501")).with_slot(11, 0, Some("2601"));
    let (_, cleared) = prune_ineligible(&catalog, stale, &policy());
    assert_eq!(
        cleared,
        vec![
            ClearedSlot { year: 10, slot: 0, code: "2501".into() },
            ClearedSlot { year: 11, slot: 0, code: "2601".into() },
        ]
    );
}

#[test]
fn test_select_course_rejections() {
    let catalog = common::bundled_catalog();
    let plan = Plan::new();
    let any = SlotSelector::Any;

    assert_eq!(
        select_course(&catalog, &plan, 8, 0, "2401", &any, &policy()),
        Err(SelectionError::YearOutOfRange(8))
    );
    assert_eq!(
        select_course(&catalog, &plan, 9, 8, "2401", &any, &policy()),
        Err(SelectionError::SlotOutOfRange(8))
    );
    assert_eq!(
        select_course(&catalog, &plan, 9, 0, "9999", &any, &policy()),
        Err(SelectionError::UnknownCourse("9999".into()))
    );
    // Slot de inglés con un curso de matemáticas.
    assert!(matches!(
        select_course(&catalog, &plan, 9, 0, "4301", &any, &policy()),
        Err(SelectionError::NotEligible { .. })
    ));
    // Geometry sin Algebra I.
    assert!(matches!(
        select_course(&catalog, &plan, 9, 1, "4401", &any, &policy()),
        Err(SelectionError::NotEligible { .. })
    ));

    let ok = select_course(&catalog, &plan, 9, 0, "2401", &any, &policy()).unwrap();
    assert_eq!(ok.slot(9, 0), Some("2401"));
    assert_eq!(plan.slot(9, 0), None, "el plan original no cambia");
}

#[test]
fn test_ms_credit_rules() {
    let catalog = common::bundled_catalog();
    let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let too_many = names(&["Algebra I", "Spanish I", "Concert Band", "Concert Choir", "Honors Algebra I"]);
    assert_eq!(
        set_ms_credits(&catalog, &Plan::new(), &too_many),
        Err(SelectionError::TooManyMiddleSchoolCredits { max: 4, got: 5 })
    );
    assert_eq!(
        set_ms_credits(&catalog, &Plan::new(), &names(&["English I"])),
        Err(SelectionError::NotMiddleSchoolCourse("English I".into()))
    );
    let plan = set_ms_credits(&catalog, &Plan::new(), &names(&["algebra  i", "Spanish I"])).unwrap();
    assert_eq!(plan.ms_credits, vec!["Algebra I".to_string(), "Spanish I".to_string()]);
}

#[test]
fn test_full_plan_builds_through_selection() {
    let catalog = common::bundled_catalog();
    let plan = common::full_plan(&catalog);
    assert_eq!(plan.slot_codes().len(), 32);
    let (_, cleared) = prune_ineligible(&catalog, plan, &policy());
    assert!(cleared.is_empty());
}
