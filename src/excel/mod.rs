//! Módulo `excel`: carga del catálogo de cursos desde disco.
//!
//! Submódulos:
//! - `io`: lectura de hojas (calamine) y CSV (polars) a una `Table` de texto
//! - `catalog`: mapeo de encabezados a `RawCourseRow`
//!
//! La normalización de valores (departamento, grados, prerrequisitos,
//! créditos) vive en `models::Catalog::from_rows`; aquí solo se lee.

mod catalog;
mod io;

pub use catalog::rows_from_table;
pub use io::{cell_to_string, normalize_header, read_csv, read_sheet, Table};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::models::Catalog;

/// Directorio por defecto de archivos de datos (relativo al CWD).
pub const DATA_DIR: &str = "data";

/// Nombre del catálogo incluido en el repositorio.
pub const DEFAULT_CATALOG: &str = "WHS_course_catalog.csv";

const EXTENSIONS: [&str; 5] = ["csv", "xlsx", "xlsm", "xls", "ods"];

/// Lee el catálogo según la extensión y lo normaliza. Los problemas por fila
/// no abortan: quedan en `Catalog::issues`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CatalogError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let table = match ext.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xls" | "ods" => read_sheet(path, None)?,
        _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
    };

    let rows = rows_from_table(path, &table)?;
    debug!(path = %path.display(), rows = rows.len(), "read catalog rows");
    let catalog = Catalog::from_rows(rows);
    info!(
        path = %path.display(),
        courses = catalog.len(),
        issues = catalog.issues().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Resuelve el directorio de datos: el valor configurado si existe, luego
/// `data/` desde el CWD y por último relativo al ejecutable.
pub fn get_data_dir(configured: Option<&Path>) -> PathBuf {
    if let Some(p) = configured {
        if p.is_dir() {
            debug!(dir = %p.display(), "using configured data directory");
            return p.to_path_buf();
        }
        warn!(dir = %p.display(), "configured data directory does not exist, searching defaults");
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let from_cwd = cwd.join(DATA_DIR);
    if from_cwd.is_dir() {
        return from_cwd;
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let candidates = [exe_dir.join(DATA_DIR), exe_dir.join("../../").join(DATA_DIR)];
            for candidate in candidates {
                if let Ok(canonical) = candidate.canonicalize() {
                    if canonical.is_dir() {
                        debug!(dir = %canonical.display(), "data directory found next to executable");
                        return canonical;
                    }
                }
            }
        }
    }

    warn!(dir = %from_cwd.display(), "no data directory found, falling back to default");
    from_cwd
}

/// Resuelve el archivo de catálogo: `name` tal cual si existe, si no dentro
/// de `data_dir`. Sin nombre se toma el catálogo incluido o, en su defecto,
/// el archivo de catálogo más reciente del directorio.
pub fn resolve_catalog_path(data_dir: &Path, name: Option<&str>) -> Result<PathBuf, CatalogError> {
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        let direct = PathBuf::from(name);
        if direct.is_file() {
            return Ok(direct);
        }
        let joined = data_dir.join(name);
        if joined.is_file() {
            return Ok(joined);
        }
        return Err(CatalogError::Io {
            path: joined,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "catalog file not found"),
        });
    }

    let bundled = data_dir.join(DEFAULT_CATALOG);
    if bundled.is_file() {
        return Ok(bundled);
    }
    latest_catalog_file(data_dir).ok_or_else(|| CatalogError::Io {
        path: data_dir.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no catalog file in data directory"),
    })
}

/// Archivos de catálogo del directorio, ordenados por nombre.
pub fn list_catalog_files(dir: &Path) -> Result<Vec<String>, CatalogError> {
    let read = fs::read_dir(dir).map_err(|source| CatalogError::Io { path: dir.to_path_buf(), source })?;
    let mut names: Vec<String> = read
        .flatten()
        .map(|e| e.path())
        .filter(|p| is_catalog_file(p))
        .filter_map(|p| p.file_name().and_then(|s| s.to_str()).map(str::to_string))
        .collect();
    names.sort();
    Ok(names)
}

fn is_catalog_file(p: &Path) -> bool {
    if !p.is_file() {
        return false;
    }
    let Some(name) = p.file_name().and_then(|s| s.to_str()) else {
        return false;
    };
    // temporales de editores (.~x.xlsx, x.csv~)
    if name.starts_with('.') || name.starts_with('~') || name.ends_with('~') {
        return false;
    }
    let ext = p.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).unwrap_or_default();
    EXTENSIONS.contains(&ext.as_str())
}

fn latest_catalog_file(dir: &Path) -> Option<PathBuf> {
    let read = match fs::read_dir(dir) {
        Ok(r) => r,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot read data directory");
            return None;
        }
    };

    let mut best: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in read.flatten() {
        let p = entry.path();
        if !is_catalog_file(&p) {
            continue;
        }
        let is_catalog_name = p
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|n| n.to_lowercase().contains("catalog"));
        if !is_catalog_name {
            continue;
        }
        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        if best.as_ref().is_none_or(|(t, _)| modified > *t) {
            best = Some((modified, p));
        }
    }
    best.map(|(_, p)| p)
}
