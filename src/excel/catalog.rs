// Mapeo de columnas del archivo de catálogo a `RawCourseRow`.

use std::path::Path;

use super::io::{normalize_header, Table};
use crate::error::CatalogError;
use crate::models::RawCourseRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Code,
    Name,
    Department,
    GradeLevels,
    Prerequisites,
    Credits,
    Tags,
    Notes,
    Repeatable,
}

/// Columnas obligatorias con su nombre canónico (para el mensaje de error).
const REQUIRED: [(Field, &str); 4] = [
    (Field::Code, "Course Code"),
    (Field::Name, "Course Name"),
    (Field::Department, "Department"),
    (Field::GradeLevels, "Grade Levels"),
];

fn field_for_header(header: &str) -> Option<Field> {
    match normalize_header(header).as_str() {
        "coursecode" | "code" => Some(Field::Code),
        "coursename" | "name" | "title" => Some(Field::Name),
        "department" | "dept" => Some(Field::Department),
        "gradelevels" | "grades" | "gradelevel" => Some(Field::GradeLevels),
        "prerequisites" | "prerequisite" | "prereqs" => Some(Field::Prerequisites),
        "credits" | "credit" => Some(Field::Credits),
        "tags" => Some(Field::Tags),
        "notes" => Some(Field::Notes),
        "repeatable" => Some(Field::Repeatable),
        _ => None,
    }
}

/// Convierte una tabla leída en filas crudas del catálogo. Falla solo si
/// falta una columna obligatoria o no hay filas.
pub fn rows_from_table(path: &Path, table: &Table) -> Result<Vec<RawCourseRow>, CatalogError> {
    let mapping: Vec<Option<Field>> = table.headers.iter().map(|h| field_for_header(h)).collect();
    for (field, column) in REQUIRED {
        if !mapping.contains(&Some(field)) {
            return Err(CatalogError::MissingColumn { path: path.to_path_buf(), column });
        }
    }

    let mut out = Vec::with_capacity(table.rows.len());
    for cells in &table.rows {
        if cells.iter().all(Option::is_none) {
            continue;
        }
        let mut row = RawCourseRow::default();
        for (idx, field) in mapping.iter().enumerate() {
            let (Some(field), Some(value)) = (field, cells.get(idx).cloned().flatten()) else {
                continue;
            };
            match field {
                Field::Code => row.code = value,
                Field::Name => row.name = value,
                Field::Department => row.department = value,
                Field::GradeLevels => row.grade_levels = value,
                Field::Prerequisites => row.prerequisites = value,
                Field::Credits => row.credits = Some(value),
                Field::Tags => row.tags = value,
                Field::Notes => row.notes = value,
                Field::Repeatable => row.repeatable = value,
            }
        }
        out.push(row);
    }

    if out.is_empty() {
        return Err(CatalogError::Empty(path.to_path_buf()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| (!c.is_empty()).then(|| c.to_string())).collect())
                .collect(),
        }
    }

    #[test]
    fn test_maps_headers_in_any_order() {
        let t = table(
            &["Department", "Course Name", "Grade Levels", "Course Code", "Credits", "Extra"],
            &[&["English", "English I", "9", "2401", "", "x"]],
        );
        let rows = rows_from_table(Path::new("c.csv"), &t).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "2401");
        assert_eq!(rows[0].name, "English I");
        assert_eq!(rows[0].credits, None);
    }

    #[test]
    fn test_missing_required_column() {
        let t = table(&["Course Code", "Course Name", "Department"], &[&["2401", "English I", "English"]]);
        let err = rows_from_table(Path::new("c.csv"), &t).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn { column: "Grade Levels", .. }));
    }

    #[test]
    fn test_blank_rows_skipped_and_empty_rejected() {
        let t = table(&["Course Code", "Course Name", "Department", "Grade Levels"], &[&["", "", "", ""]]);
        assert!(matches!(rows_from_table(Path::new("c.csv"), &t), Err(CatalogError::Empty(_))));
    }
}
