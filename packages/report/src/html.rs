//! HTML rendering of report rows.

use chrono::Datelike;

use crate::ReportRow;

/// Event names longer than this are cut in the table.
pub const NAME_DISPLAY_CHARS: usize = 50;

const HEADER: &str = "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"/>\
                      <title>Events near Bicing and parkings</title></head><body>\
                      <table border=\"1\">\n";

const FOOTER: &str = "</table></body></html>\n";

/// Escapes text for use inside an HTML element.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn push_row(html: &mut String, cells: &[&str]) {
    html.push_str("<tr>");
    for cell in cells {
        html.push_str("<td>");
        html.push_str(&escape(cell));
        html.push_str("</td>");
    }
    html.push_str("</tr>\n");
}

fn push_facility(html: &mut String, label: &str, id: u64, distance_km: f64) {
    push_row(
        html,
        &[label, &id.to_string(), &format!("{distance_km:.2} km")],
    );
}

fn render_row(html: &mut String, row: &ReportRow) {
    let event = &row.event;
    let name: String = event.name.chars().take(NAME_DISPLAY_CHARS).collect();
    let date = event
        .date
        .map(|d| format!("{}/{}/{}", d.day(), d.month(), d.year()))
        .unwrap_or_default();

    push_row(html, &["evento", &name, &event.address, &date, &event.time]);

    for n in &row.free_slot_stations {
        push_facility(html, "bicing aparcable", n.item.id, n.distance_km);
    }
    for n in &row.bike_stations {
        push_facility(html, "bicing con bicis", n.item.id, n.distance_km);
    }
    for n in &row.parkings {
        push_facility(html, "parking disponible", n.item.id, n.distance_km);
    }
}

/// Renders the report as a standalone HTML page.
#[must_use]
pub fn render_html(rows: &[ReportRow]) -> String {
    let mut html = String::from(HEADER);
    for row in rows {
        render_row(&mut html, row);
    }
    html.push_str(FOOTER);
    html
}
