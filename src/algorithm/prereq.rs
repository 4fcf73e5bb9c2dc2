//! Evaluador de prerrequisitos y parser del texto de prerrequisitos del
//! catálogo.
//!
//! Formatos aceptados por `parse_prerequisite`:
//! - vacío, `None`, `nan` -> sin prerrequisito
//! - `2401` -> un código
//! - `['2401', '2404']` o `2401|2404` o `2401 or 2404` -> cualquiera (OR)
//! - `[['2401','2404'], ['4301']]` o `2401|2404 & 4301` -> grupos (AND de OR)
//!
//! Todo lo demás queda como `Prerequisite::Invalid`, que nunca se satisface.

use crate::models::{Prerequisite, TakenSet};
use serde_json::Value;

/// `true` si la expresión se cumple con los códigos ya cursados.
pub fn is_satisfied(expr: &Prerequisite, taken: &TakenSet) -> bool {
    match expr {
        Prerequisite::None => true,
        Prerequisite::SingleCode(code) => taken.contains(code),
        Prerequisite::AnyOf(codes) => codes.iter().any(|c| taken.contains(c)),
        Prerequisite::AllOfGroups(groups) => groups.iter().all(|g| g.iter().any(|c| taken.contains(c))),
        Prerequisite::Invalid(_) => false,
    }
}

pub fn parse_prerequisite(raw: &str) -> Prerequisite {
    let s = raw.trim();
    let lower = s.to_ascii_lowercase();
    if s.is_empty() || matches!(lower.as_str(), "none" | "nan" | "n/a" | "-") {
        return Prerequisite::None;
    }
    if s.starts_with('[') || s.starts_with('(') {
        return parse_list_literal(s);
    }
    parse_infix(s)
}

// Literales estilo Python: comillas simples y tuplas se llevan a JSON.
fn parse_list_literal(s: &str) -> Prerequisite {
    let json = s.replace('\'', "\"").replace('(', "[").replace(')', "]");
    let value: Value = match serde_json::from_str(&json) {
        Ok(v) => v,
        Err(_) => return Prerequisite::Invalid(s.to_string()),
    };
    let items = match value {
        Value::Array(items) => items,
        _ => return Prerequisite::Invalid(s.to_string()),
    };
    if items.is_empty() {
        return Prerequisite::None;
    }

    if items.iter().all(Value::is_array) {
        let mut groups = Vec::new();
        for item in &items {
            let group: Option<Vec<String>> = item
                .as_array()
                .map(|g| g.iter().map(scalar_code).collect::<Option<Vec<_>>>())
                .unwrap_or(None);
            match group {
                Some(g) if !g.is_empty() => groups.push(g),
                _ => return Prerequisite::Invalid(s.to_string()),
            }
        }
        return Prerequisite::AllOfGroups(groups);
    }

    match items.iter().map(scalar_code).collect::<Option<Vec<_>>>() {
        Some(mut codes) if codes.len() == 1 => Prerequisite::SingleCode(codes.remove(0)),
        Some(codes) => Prerequisite::AnyOf(codes),
        None => Prerequisite::Invalid(s.to_string()),
    }
}

fn scalar_code(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if is_code_token(s.trim()) => Some(s.trim().to_string()),
        Value::Number(n) => n.as_u64().map(|i| i.to_string()),
        _ => None,
    }
}

fn parse_infix(s: &str) -> Prerequisite {
    let spaced = s.replace('&', " & ").replace('|', " | ").replace(',', " | ");
    let mut groups: Vec<Vec<String>> = vec![Vec::new()];
    let mut expect_code = true;

    for tok in spaced.split_whitespace() {
        match tok.to_ascii_lowercase().as_str() {
            "&" | "and" => {
                if expect_code {
                    return Prerequisite::Invalid(s.to_string());
                }
                groups.push(Vec::new());
                expect_code = true;
            }
            "|" | "or" => {
                if expect_code {
                    return Prerequisite::Invalid(s.to_string());
                }
                expect_code = true;
            }
            _ => {
                if !expect_code || !is_code_token(tok) {
                    return Prerequisite::Invalid(s.to_string());
                }
                if let Some(group) = groups.last_mut() {
                    group.push(tok.to_string());
                }
                expect_code = false;
            }
        }
    }
    if expect_code {
        return Prerequisite::Invalid(s.to_string());
    }

    if groups.len() > 1 {
        return Prerequisite::AllOfGroups(groups);
    }
    let mut codes = groups.remove(0);
    if codes.len() == 1 {
        Prerequisite::SingleCode(codes.remove(0))
    } else {
        Prerequisite::AnyOf(codes)
    }
}

// Un código debe contener al menos un dígito ("2401", "WL1A"); así frases
// como "Teacher approval" no pasan por códigos.
fn is_code_token(tok: &str) -> bool {
    !tok.is_empty()
        && tok.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && tok.chars().any(|c| c.is_ascii_digit())
}
