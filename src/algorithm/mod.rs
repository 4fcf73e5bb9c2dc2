// Algoritmos del planificador: prerrequisitos, elegibilidad por slot,
// validación del grafo de prerrequisitos y motor de requisitos de graduación.
pub mod eligibility;
pub mod prereq;
pub mod prereq_graph;
pub mod requirements;

pub use eligibility::{
    clear_slot, eligible_courses, is_selectable, ms_credit_options, prune_ineligible, select_course, set_ms_credits,
    ClearedSlot, EligibilityPolicy, SlotSelector, StaleSelections,
};
pub use prereq::{is_satisfied, parse_prerequisite};
pub use prereq_graph::validate_catalog;
pub use requirements::{evaluate, evaluate_all, BucketReport, Pathway, Report};
