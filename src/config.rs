//! Configuración del servicio desde variables de entorno (y `.env`).

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::algorithm::eligibility::{EligibilityPolicy, StaleSelections};
use crate::error::ConfigError;
use crate::models::SameYearVisibility;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_FILTER: &str = "gradpath=info,actix_web=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: String,
    /// Archivo de catálogo explícito (`GRADPATH_CATALOG`).
    pub catalog: Option<String>,
    /// Directorio de datos explícito (`GRADPATH_DATA_DIR`).
    pub data_dir: Option<PathBuf>,
    pub policy: EligibilityPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: DEFAULT_BIND.to_string(),
            catalog: None,
            data_dir: None,
            policy: EligibilityPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Carga `.env` si existe y lee el entorno del proceso.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let _ = dotenv::dotenv();
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env` pero con una función de búsqueda arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = AppConfig::default();

        if let Some(bind) = get("GRADPATH_BIND") {
            cfg.bind = bind;
        }
        cfg.catalog = get("GRADPATH_CATALOG");
        cfg.data_dir = get("GRADPATH_DATA_DIR").map(PathBuf::from);

        if let Some(v) = get("GRADPATH_SAME_YEAR") {
            cfg.policy.same_year = parse_same_year(&v)?;
        }
        if let Some(v) = get("GRADPATH_WAIVE_PREREQS") {
            cfg.policy.waived_grades = parse_grades(&v)?;
        }
        if let Some(v) = get("GRADPATH_STALE_SELECTIONS") {
            cfg.policy.stale_selections = parse_stale(&v)?;
        }
        Ok(cfg)
    }
}

fn parse_same_year(v: &str) -> Result<SameYearVisibility, ConfigError> {
    match v.to_ascii_lowercase().replace('_', "-").as_str() {
        "prior-slots" => Ok(SameYearVisibility::PriorSlots),
        "prior-years" => Ok(SameYearVisibility::PriorYears),
        _ => Err(ConfigError::InvalidValue {
            key: "GRADPATH_SAME_YEAR",
            value: v.to_string(),
            reason: "expected prior-slots or prior-years",
        }),
    }
}

fn parse_stale(v: &str) -> Result<StaleSelections, ConfigError> {
    match v.to_ascii_lowercase().as_str() {
        "retain" => Ok(StaleSelections::Retain),
        "invalidate" => Ok(StaleSelections::Invalidate),
        _ => Err(ConfigError::InvalidValue {
            key: "GRADPATH_STALE_SELECTIONS",
            value: v.to_string(),
            reason: "expected retain or invalidate",
        }),
    }
}

fn parse_grades(v: &str) -> Result<BTreeSet<u8>, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: "GRADPATH_WAIVE_PREREQS",
        value: v.to_string(),
        reason: "expected a comma separated list of grades 9-12",
    };
    let mut out = BTreeSet::new();
    for part in v.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let grade: u8 = part.parse().map_err(|_| invalid())?;
        if !(9..=12).contains(&grade) {
            return Err(invalid());
        }
        out.insert(grade);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind, DEFAULT_BIND);
        assert!(cfg.policy.waived_grades.is_empty());
    }

    #[test]
    fn test_all_values() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("GRADPATH_BIND", "0.0.0.0:9000"),
            ("GRADPATH_CATALOG", "cat.csv"),
            ("GRADPATH_DATA_DIR", "/srv/data"),
            ("GRADPATH_SAME_YEAR", "prior-years"),
            ("GRADPATH_WAIVE_PREREQS", "12, 11"),
            ("GRADPATH_STALE_SELECTIONS", "Invalidate"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind, "0.0.0.0:9000");
        assert_eq!(cfg.catalog.as_deref(), Some("cat.csv"));
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/srv/data")));
        assert_eq!(cfg.policy.same_year, SameYearVisibility::PriorYears);
        assert_eq!(cfg.policy.waived_grades, [11, 12].into_iter().collect::<BTreeSet<u8>>());
        assert_eq!(cfg.policy.stale_selections, StaleSelections::Invalidate);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("GRADPATH_WAIVE_PREREQS", "8")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "GRADPATH_WAIVE_PREREQS", .. }));
        assert!(AppConfig::from_lookup(lookup(&[("GRADPATH_SAME_YEAR", "whenever")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("GRADPATH_STALE_SELECTIONS", "drop")])).is_err());
    }
}
