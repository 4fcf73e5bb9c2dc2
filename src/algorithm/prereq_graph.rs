use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::error::Issue;
use crate::models::Catalog;

/// Grafo de prerrequisitos: arista `prerrequisito -> curso`.
pub struct PrereqGraph {
    pub graph: DiGraph<String, ()>,
    pub index: HashMap<String, NodeIndex>,
}

/// Construye el grafo con un nodo por curso del catálogo. Los códigos citados
/// que no existen se devuelven aparte como (curso, código faltante).
pub fn build_graph(catalog: &Catalog) -> (PrereqGraph, Vec<(String, String)>) {
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut index: HashMap<String, NodeIndex> = HashMap::new();
    for course in catalog.courses() {
        let idx = graph.add_node(course.code.clone());
        index.insert(course.code.clone(), idx);
    }

    let mut unknown = Vec::new();
    for course in catalog.courses() {
        let to = index[&course.code];
        for req in course.prerequisite.codes() {
            match index.get(req) {
                Some(from) => {
                    graph.update_edge(*from, to, ());
                }
                None => unknown.push((course.code.clone(), req.to_string())),
            }
        }
    }
    (PrereqGraph { graph, index }, unknown)
}

/// Revisa el catálogo: prerrequisitos a códigos inexistentes y ciclos.
/// Un ciclo deja sus cursos inalcanzables para siempre, así que se informa
/// como problema de datos sin abortar la carga.
pub fn validate_catalog(catalog: &Catalog) -> Vec<Issue> {
    let (pg, unknown) = build_graph(catalog);
    let mut issues: Vec<Issue> = unknown
        .into_iter()
        .map(|(code, missing)| Issue::UnknownPrerequisite { code, missing })
        .collect();

    for scc in tarjan_scc(&pg.graph) {
        let self_loop = scc.len() == 1 && pg.graph.contains_edge(scc[0], scc[0]);
        if scc.len() > 1 || self_loop {
            let mut codes: Vec<String> = scc.iter().map(|n| pg.graph[*n].clone()).collect();
            codes.sort_by_key(|c| catalog.position(c).unwrap_or(usize::MAX));
            issues.push(Issue::PrerequisiteCycle { codes });
        }
    }
    issues
}
