// Chequeo de cursos repetidos más allá de su política `repeatable`.

use crate::models::Course;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateViolation {
    pub code: String,
    pub name: String,
    pub count: u32,
    pub limit: u32,
}

/// Una entrada por código que excede su límite, en orden de primera
/// aparición, sin importar cuántas veces se repita.
pub fn find_duplicates(rows: &[&Course]) -> Vec<DuplicateViolation> {
    let mut counts: Vec<(&Course, u32)> = Vec::new();
    for course in rows {
        match counts.iter_mut().find(|(c, _)| c.code == course.code) {
            Some((_, n)) => *n += 1,
            None => counts.push((*course, 1)),
        }
    }
    counts
        .into_iter()
        .filter_map(|(course, count)| {
            let limit = course.repeatable.limit()?;
            (count > limit).then(|| DuplicateViolation {
                code: course.code.clone(),
                name: course.name.clone(),
                count,
                limit,
            })
        })
        .collect()
}

/// Para cada fila, `true` si es una copia más allá del límite del curso.
pub fn excess_copies(rows: &[&Course]) -> Vec<bool> {
    let mut seen: Vec<(&str, u32)> = Vec::new();
    rows.iter()
        .map(|course| {
            let n = match seen.iter_mut().find(|(code, _)| *code == course.code) {
                Some((_, n)) => {
                    *n += 1;
                    *n
                }
                None => {
                    seen.push((course.code.as_str(), 1));
                    1
                }
            };
            course.repeatable.limit().is_some_and(|limit| n > limit)
        })
        .collect()
}

/// Aviso agregado con los nombres de los cursos repetidos.
pub fn duplicate_warning(violations: &[DuplicateViolation]) -> Option<String> {
    if violations.is_empty() {
        return None;
    }
    let names: Vec<&str> = violations.iter().map(|v| v.name.as_str()).collect();
    Some(format!("Courses selected more times than allowed: {}", names.join(", ")))
}
