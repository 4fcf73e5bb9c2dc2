// Resumen imprimible del plan: tabla de años x slots y tabla de requisitos
// de la trayectoria elegida, en HTML plano.

use chrono::{DateTime, Local, TimeZone};

use crate::algorithm::requirements::Report;
use crate::models::{Catalog, Plan, SLOTS_PER_YEAR, YEARS};

/// Escapa texto para insertarlo en HTML.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn fmt_credits(v: f64) -> String {
    if (v.fract()).abs() < 1e-9 { format!("{:.0}", v) } else { format!("{}", v) }
}

/// Nombre del curso para la tabla; códigos desconocidos se muestran tal cual.
fn course_label(catalog: &Catalog, code: &str) -> String {
    match catalog.by_code(code) {
        Some(c) => format!("{} ({})", escape_html(&c.name), escape_html(&c.code)),
        None => escape_html(code),
    }
}

fn plan_rows(catalog: &Catalog, plan: &Plan) -> String {
    YEARS
        .iter()
        .map(|year| {
            let cells: String = (0..SLOTS_PER_YEAR)
                .map(|slot| {
                    let label = plan.slot(*year, slot).map(|c| course_label(catalog, c)).unwrap_or_default();
                    format!("<td>{label}</td>")
                })
                .collect();
            format!("<tr><th>Grade {year}</th>{cells}</tr>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn requirement_rows(report: &Report) -> String {
    report
        .buckets
        .iter()
        .map(|b| {
            let status = if b.met { "Met" } else { "Not met" };
            let detail = b.detail.as_deref().map(escape_html).unwrap_or_default();
            format!(
                "<tr class=\"{class}\"><td>{label}</td><td>{earned} / {required}</td><td>{status}</td><td>{detail}</td></tr>",
                class = if b.met { "met" } else { "unmet" },
                label = escape_html(&b.label),
                earned = fmt_credits(b.earned_credits),
                required = fmt_credits(b.required_credits),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// HTML del resumen con una marca de tiempo dada.
pub fn render_html_at<Tz: TimeZone>(
    student: &str,
    catalog: &Catalog,
    plan: &Plan,
    report: &Report,
    generated_at: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let student = if student.trim().is_empty() { "Student".to_string() } else { escape_html(student.trim()) };
    let ms = if plan.ms_credits.is_empty() {
        "None".to_string()
    } else {
        plan.ms_credits.iter().map(|n| escape_html(n)).collect::<Vec<_>>().join(", ")
    };
    let slot_headers: String = (1..=SLOTS_PER_YEAR).map(|i| format!("<th>Slot {i}</th>")).collect();
    let warning = report
        .duplicate_warning
        .as_deref()
        .map(|w| format!("<p class=\"warning\">{}</p>", escape_html(w)))
        .unwrap_or_default();
    let overall = if report.all_met { "All requirements met" } else { "Requirements not yet met" };

    format!(
        "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>Four-Year Plan: {student}</title></head><body>\
<h1>Four-Year Plan: {student}</h1>\
<p>Generated {timestamp}</p>\
<p>Middle-school credits: {ms}</p>\
<table><tr><th>Grade</th>{slot_headers}</tr>{plan_rows}</table>\
<h2>{pathway} Pathway</h2>\
<p>{overall}</p>{warning}\
<table><tr><th>Requirement</th><th>Credits</th><th>Status</th><th>Detail</th></tr>{req_rows}</table>\
</body></html>",
        timestamp = generated_at.format("%Y-%m-%d %H:%M"),
        plan_rows = plan_rows(catalog, plan),
        pathway = escape_html(report.pathway.label()),
        req_rows = requirement_rows(report),
    )
}

/// HTML del resumen fechado con la hora local actual.
pub fn render_html(student: &str, catalog: &Catalog, plan: &Plan, report: &Report) -> String {
    render_html_at(student, catalog, plan, report, &Local::now())
}
