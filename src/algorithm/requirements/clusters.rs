// Clusters CTE: conjuntos fijos de códigos de cursos técnicos.
//
// Un cluster califica si el plan tiene todos sus códigos o si los cursos del
// cluster suman al menos `CLUSTER_CREDIT_THRESHOLD` créditos.

use serde::Serialize;
use std::collections::HashSet;

pub const CLUSTER_CREDIT_THRESHOLD: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub name: &'static str,
    pub codes: &'static [&'static str],
}

pub const CTE_CLUSTERS: [Cluster; 11] = [
    Cluster { name: "Ag, Food & Natural Resources", codes: &["8101", "8102", "8103", "8104", "8105"] },
    Cluster { name: "Architecture & Construction", codes: &["8111", "8112", "8113", "8114"] },
    Cluster { name: "Arts, A/V Technology & Communications", codes: &["8121", "8122", "8123", "8124"] },
    Cluster { name: "Business Management & Administration", codes: &["8131", "8132", "8133", "8134"] },
    Cluster { name: "Education & Training", codes: &["8141", "8142", "8143"] },
    Cluster { name: "Finance", codes: &["8151", "8152", "8153"] },
    Cluster { name: "Health Science", codes: &["8161", "8162", "8163", "8164"] },
    Cluster { name: "Hospitality & Tourism", codes: &["8171", "8172", "8173"] },
    Cluster { name: "Human Services", codes: &["8181", "8182", "8183"] },
    Cluster { name: "Information Technology", codes: &["8191", "8192", "8193", "8194"] },
    Cluster { name: "Manufacturing", codes: &["8201", "8202", "8203", "8204"] },
];

/// Avance del plan dentro de un cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMatch {
    pub name: String,
    pub credits: f64,
    /// Todos los códigos del cluster están en el plan.
    pub complete: bool,
    pub courses: Vec<String>,
}

impl ClusterMatch {
    pub fn qualifies(&self) -> bool {
        self.complete || self.credits + 1e-9 >= CLUSTER_CREDIT_THRESHOLD
    }
}

/// Avance en cada cluster con al menos un curso seleccionado, en el orden
/// de la tabla. `rows` son pares (código, créditos que cuentan).
pub fn cluster_progress(rows: &[(&str, Option<f64>)]) -> Vec<ClusterMatch> {
    let present: HashSet<&str> = rows.iter().map(|(code, _)| *code).collect();
    let mut out = Vec::new();
    for cluster in CTE_CLUSTERS.iter() {
        let members: Vec<&(&str, Option<f64>)> =
            rows.iter().filter(|(code, _)| cluster.codes.iter().any(|c| c == code)).collect();
        if members.is_empty() {
            continue;
        }
        let credits: f64 = members.iter().filter_map(|(_, c)| *c).sum();
        let mut courses: Vec<String> = Vec::new();
        for (code, _) in members {
            if !courses.iter().any(|c| c == code) {
                courses.push(code.to_string());
            }
        }
        out.push(ClusterMatch {
            name: cluster.name.to_string(),
            credits,
            complete: cluster.codes.iter().all(|c| present.contains(c)),
            courses,
        });
    }
    out
}

/// Cluster que califica con más créditos; empate -> el primero de la tabla.
pub fn best_cluster(rows: &[(&str, Option<f64>)]) -> Option<ClusterMatch> {
    let mut best: Option<ClusterMatch> = None;
    for m in cluster_progress(rows).into_iter().filter(ClusterMatch::qualifies) {
        if best.as_ref().is_none_or(|b| m.credits > b.credits) {
            best = Some(m);
        }
    }
    best
}
