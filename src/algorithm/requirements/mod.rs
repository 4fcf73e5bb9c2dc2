//! Motor de requisitos de graduación.
//!
//! `evaluate` es una función pura: arma las filas seleccionadas (créditos de
//! grado 8 + todos los slots), detecta repeticiones, reparte cada fila a un
//! único bucket y calcula créditos, excedentes y estado por bucket.
//!
//! Submódulos:
//! - `pathways`: tablas de buckets por trayectoria
//! - `clusters`: clusters CTE
//! - `duplicates`: cursos repetidos más allá de su política

pub mod clusters;
pub mod duplicates;
pub mod pathways;

pub use clusters::{best_cluster, cluster_progress, ClusterMatch, CTE_CLUSTERS};
pub use duplicates::{duplicate_warning, DuplicateViolation};
pub use pathways::{rules, BucketRule, Extra, Pathway, Scope};

use crate::error::Issue;
use crate::models::{Catalog, Course, Plan};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

const EPSILON: f64 = 1e-9;

/// Estado de un bucket en el reporte.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketReport {
    pub label: String,
    /// Créditos aplicados al bucket (tope: lo requerido, salvo Electives y
    /// Total que informan lo ganado completo).
    pub earned_credits: f64,
    pub required_credits: f64,
    /// Créditos sobrantes que pasan a Electives.
    pub rollover_credits: f64,
    pub met: bool,
    /// Códigos de las filas que el bucket reclamó.
    pub courses: Vec<String>,
    /// Grupos requeridos sin ningún curso.
    pub missing_groups: Vec<Vec<String>>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub pathway: Pathway,
    pub pathway_label: String,
    pub buckets: Vec<BucketReport>,
    pub all_met: bool,
    pub duplicates: Vec<DuplicateViolation>,
    pub duplicate_warning: Option<String>,
    pub cte_cluster: Option<ClusterMatch>,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn bucket(&self, label: &str) -> Option<&BucketReport> {
        self.buckets.iter().find(|b| b.label == label)
    }

    pub fn total_credits(&self) -> f64 {
        self.buckets
            .iter()
            .find(|b| b.label == "Total Credits")
            .map(|b| b.earned_credits)
            .unwrap_or(0.0)
    }
}

/// Fila seleccionada ya resuelta contra el catálogo.
struct Row<'a> {
    course: &'a Course,
    /// Créditos que suman; `None` si el valor es inválido o la fila no cuenta.
    credits: Option<f64>,
    /// Copia más allá del límite o curso sin grado >= 8: no reclama ni suma.
    counts: bool,
}

/// Resuelve créditos de grado 8 (por nombre, ver `Plan::ms_courses`) y
/// slots (por código). Lo que no cuenta se omite y queda como `Issue`.
fn collect_courses<'a>(catalog: &'a Catalog, plan: &Plan, issues: &mut Vec<Issue>) -> Vec<&'a Course> {
    let (mut out, ms_issues) = plan.ms_courses(catalog);
    for issue in &ms_issues {
        warn!(%issue, "middle-school credit skipped");
    }
    issues.extend(ms_issues);
    for (year, slot, code) in plan.slot_codes() {
        match catalog.by_code(code) {
            Some(c) => out.push(c),
            None => {
                warn!(year, slot, code = %code, "selected code not found in catalog, skipping");
                issues.push(Issue::DataIntegrity { reference: code.to_string(), suggestion: None });
            }
        }
    }
    out
}

/// Evalúa una trayectoria sobre el plan. Idempotente y sin efectos.
pub fn evaluate(pathway: Pathway, catalog: &Catalog, plan: &Plan) -> Report {
    let mut issues = Vec::new();
    let courses = collect_courses(catalog, plan, &mut issues);

    let duplicates = duplicates::find_duplicates(&courses);
    let excess = duplicates::excess_copies(&courses);

    let rows: Vec<Row> = courses
        .iter()
        .zip(excess)
        .map(|(course, is_excess)| {
            let counts = !is_excess && course.counts_for_graduation();
            Row { course, credits: if counts { course.credits.value() } else { None }, counts }
        })
        .collect();

    let cluster_rows: Vec<(&str, Option<f64>)> = rows
        .iter()
        .filter(|r| r.counts)
        .map(|r| (r.course.code.as_str(), r.credits))
        .collect();
    let cluster = best_cluster(&cluster_rows);

    let bucket_rules = rules(pathway);
    let claims = assign_rows(&bucket_rules, &rows);

    let mut buckets: Vec<Option<BucketReport>> = vec![None; bucket_rules.len()];
    let mut rollover_total = 0.0;
    for (idx, rule) in bucket_rules.iter().enumerate() {
        if rule.scope.specificity().is_none() {
            continue;
        }
        let claimed: Vec<&Row> = claims
            .iter()
            .filter(|(_, b)| *b == Some(idx))
            .map(|(r, _)| &rows[*r])
            .collect();
        let report = evaluate_bucket(rule, &claimed, cluster.as_ref());
        rollover_total += report.rollover_credits;
        buckets[idx] = Some(report);
    }

    let unclaimed: Vec<&Row> = claims
        .iter()
        .filter(|(r, b)| b.is_none() && rows[*r].counts)
        .map(|(r, _)| &rows[*r])
        .collect();
    let unclaimed_credits: f64 = unclaimed.iter().filter_map(|r| r.credits).sum();
    let total_credits: f64 = rows.iter().filter(|r| r.counts).filter_map(|r| r.credits).sum();

    for (idx, rule) in bucket_rules.iter().enumerate() {
        let (earned, courses) = match rule.scope {
            Scope::Electives => (
                unclaimed_credits + rollover_total,
                unclaimed.iter().map(|r| r.course.code.clone()).collect(),
            ),
            Scope::Total => (total_credits, Vec::new()),
            _ => continue,
        };
        buckets[idx] = Some(BucketReport {
            label: rule.label.to_string(),
            earned_credits: earned,
            required_credits: rule.required,
            rollover_credits: 0.0,
            met: earned + EPSILON >= rule.required,
            courses,
            missing_groups: Vec::new(),
            detail: None,
        });
    }

    let buckets: Vec<BucketReport> = buckets.into_iter().flatten().collect();
    let all_met = buckets.iter().all(|b| b.met);
    debug!(pathway = pathway.label(), all_met, total_credits, "evaluated graduation pathway");

    Report {
        pathway,
        pathway_label: pathway.label().to_string(),
        buckets,
        all_met,
        duplicate_warning: duplicate_warning(&duplicates),
        duplicates,
        cte_cluster: cluster,
        issues,
    }
}

/// Evalúa las tres trayectorias.
pub fn evaluate_all(catalog: &Catalog, plan: &Plan) -> Vec<Report> {
    Pathway::ALL.iter().map(|p| evaluate(*p, catalog, plan)).collect()
}

/// Reparte filas a buckets. Cada fila va al primer bucket, en orden de
/// especificidad y luego de tabla, cuyo alcance la acepta. Devuelve
/// (índice de fila, índice de bucket) para cada fila.
fn assign_rows(bucket_rules: &[BucketRule], rows: &[Row]) -> Vec<(usize, Option<usize>)> {
    let mut order: Vec<(u8, usize)> = bucket_rules
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.scope.specificity().map(|s| (s, i)))
        .collect();
    order.sort();

    rows.iter()
        .enumerate()
        .map(|(ri, row)| {
            if !row.counts {
                return (ri, None);
            }
            let bucket = order
                .iter()
                .map(|(_, bi)| *bi)
                .find(|bi| bucket_rules[*bi].scope.accepts(&row.course.code, &row.course.department));
            (ri, bucket)
        })
        .collect()
}

fn evaluate_bucket(rule: &BucketRule, claimed: &[&Row], cluster: Option<&ClusterMatch>) -> BucketReport {
    let raw: f64 = claimed.iter().filter_map(|r| r.credits).sum();
    let codes: Vec<&str> = claimed.iter().map(|r| r.course.code.as_str()).collect();

    let missing_groups: Vec<Vec<String>> = rule
        .groups
        .iter()
        .filter(|g| !g.iter().any(|c| codes.contains(c)))
        .map(|g| g.iter().map(|c| c.to_string()).collect())
        .collect();
    let groups_met = missing_groups.is_empty();

    let mut detail = None;
    let (credited, extra_met) = match rule.extra {
        Extra::None => (raw, true),
        Extra::SameLanguage => {
            let (best, prefix) = best_language(claimed);
            if let Some(p) = prefix {
                detail = Some(format!("best language prefix {}: {} credits", p, best));
            }
            (best, best + EPSILON >= rule.required)
        }
        Extra::CteCluster => {
            match cluster {
                Some(c) => detail = Some(format!("cluster {}: {} credits", c.name, c.credits)),
                None => detail = Some("no CTE cluster completed".to_string()),
            }
            (raw, cluster.is_some())
        }
        Extra::AdvancedMath => {
            let advanced = codes.iter().copied().find(|c| pathways::is_advanced_math(c));
            detail = Some(match advanced {
                Some(c) => format!("advanced math course {}", c),
                None => "missing advanced math course".to_string(),
            });
            (raw, advanced.is_some())
        }
        Extra::SameLanguageOrCluster => {
            let (best, prefix) = best_language(claimed);
            let language_met = best + EPSILON >= rule.required;
            detail = match (language_met, prefix, cluster) {
                (true, Some(p), _) => Some(format!("world language {}: {} credits", p, best)),
                (false, _, Some(c)) => Some(format!("CTE cluster {}", c.name)),
                _ => None,
            };
            (best, language_met || cluster.is_some())
        }
    };

    // Cumplido por cluster: el bucket queda completo y sus créditos de
    // idioma pasan a Electives.
    let via_cluster =
        rule.extra == Extra::SameLanguageOrCluster && extra_met && credited + EPSILON < rule.required;
    let (earned, rollover) = if via_cluster {
        (rule.required, raw)
    } else {
        let earned = credited.min(rule.required);
        (earned, (raw - earned).max(0.0))
    };
    let met = groups_met
        && extra_met
        && (credited + EPSILON >= rule.required || rule.extra == Extra::SameLanguageOrCluster);

    BucketReport {
        label: rule.label.to_string(),
        earned_credits: earned,
        required_credits: rule.required,
        rollover_credits: rollover,
        met,
        courses: codes.iter().map(|c| c.to_string()).collect(),
        missing_groups,
        detail,
    }
}

/// Créditos del idioma (prefijo de 2 caracteres) con más créditos.
fn best_language(claimed: &[&Row]) -> (f64, Option<String>) {
    let mut by_prefix: BTreeMap<String, f64> = BTreeMap::new();
    for row in claimed {
        *by_prefix.entry(pathways::language_prefix(&row.course.code)).or_default() += row.credits.unwrap_or(0.0);
    }
    let mut best: (f64, Option<String>) = (0.0, None);
    for (prefix, credits) in by_prefix {
        if best.1.is_none() || credits > best.0 {
            best = (credits, Some(prefix));
        }
    }
    best
}
