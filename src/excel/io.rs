use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::path::Path;

use crate::error::CatalogError;

/// Tabla leída de disco: encabezados + filas como texto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    /// `None` = celda vacía o nula.
    pub rows: Vec<Vec<Option<String>>>,
}

/// Convierte un `Data` de calamine a String (versión genérica para celdas)
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Normaliza encabezados eliminando espacios y pasando a minúsculas.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// Lee la hoja pedida (o la primera si no existe) de un workbook.
/// La primera fila no vacía se toma como encabezado.
pub fn read_sheet<P: AsRef<Path>>(path: P, sheet_name: Option<&str>) -> Result<Table, CatalogError> {
    let path = path.as_ref();
    let spreadsheet_err = |message: String| CatalogError::Spreadsheet { path: path.to_path_buf(), message };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_err(e.to_string()))?;

    let names = workbook.sheet_names().to_owned();
    let sheet_to_use = match sheet_name {
        Some(wanted) if names.iter().any(|s| s == wanted) => wanted.to_string(),
        _ => names.first().cloned().unwrap_or_default(),
    };
    if sheet_to_use.is_empty() {
        return Err(CatalogError::Empty(path.to_path_buf()));
    }

    let range = workbook
        .worksheet_range(&sheet_to_use)
        .map_err(|e| spreadsheet_err(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect::<Vec<String>>())
        .skip_while(|r| r.iter().all(|c| c.is_empty()));

    let headers = rows.next().unwrap_or_default();
    let rows = rows.map(|r| r.into_iter().map(non_empty).collect()).collect();
    Ok(Table { headers, rows })
}

/// Lee un CSV con encabezado. Todas las columnas se leen como texto para
/// que códigos como `0101` no pierdan ceros.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table, CatalogError> {
    let path = path.as_ref();
    let csv_err = |source: PolarsError| CatalogError::Csv { path: path.to_path_buf(), source };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(csv_err)?
        .finish()
        .map_err(csv_err)?;

    let headers: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    let mut columns = Vec::with_capacity(headers.len());
    for name in &headers {
        let column = df.column(name.as_str()).map_err(csv_err)?;
        let values: Vec<Option<String>> = column
            .as_materialized_series()
            .str()
            .map_err(csv_err)?
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()).and_then(non_empty))
            .collect();
        columns.push(values);
    }

    let rows = (0..df.height())
        .map(|i| columns.iter().map(|col| col.get(i).cloned().flatten()).collect())
        .collect();
    Ok(Table { headers, rows })
}
