pub mod report;

use serde::Serialize;

use crate::normalize::Row;
use crate::schema::columns;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".csv") {
        return Some(OutputFormat::Csv);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, Serialize)]
pub struct PlaceRecord {
    pub place: String,
    pub city: Option<String>,
    pub category: Option<String>,
    pub sub_categories: Vec<String>,
    pub visited: bool,
    pub visit_date: Option<String>,
    pub notes: String,
    pub pros: String,
    pub cons: String,
    pub reservation: bool,
    pub rating: Option<f64>,
    pub price_range: Option<String>,
    pub cuisines: Vec<String>,
    pub address: String,
    pub pic_url: Option<String>,
    pub social: Option<String>,
}

pub fn build_records(rows: &[Row]) -> Vec<PlaceRecord> {
    rows.iter()
        .map(|row| PlaceRecord {
            place: row.text(columns::PLACE).unwrap_or_default().to_string(),
            city: row.text(columns::CITY).map(str::to_string),
            category: row.text(columns::CATEGORY).map(str::to_string),
            sub_categories: row.tags(columns::SUB_CATEGORY).to_vec(),
            visited: row.boolean(columns::VISITED),
            visit_date: row.text(columns::VISIT_DATE).map(str::to_string),
            notes: row.text(columns::NOTES).unwrap_or_default().to_string(),
            pros: row.text(columns::PROS).unwrap_or_default().to_string(),
            cons: row.text(columns::CONS).unwrap_or_default().to_string(),
            reservation: row.boolean(columns::RESERVATION),
            rating: row.number(columns::RATING),
            price_range: row.text(columns::PRICE_RANGE).map(str::to_string),
            cuisines: row.tags(columns::CUISINE).to_vec(),
            address: row.text(columns::ADDRESS).unwrap_or_default().to_string(),
            pic_url: row.text(columns::PIC_URL).map(str::to_string),
            social: row.text(columns::SOCIAL).map(str::to_string),
        })
        .collect()
}

fn format_rating(value: f64) -> String {
    format!("{value}")
}

fn push_card_line(out: &mut String, label: &str, value: &str) {
    let value = if value.is_empty() { "-" } else { value };
    out.push_str(&format!("{label:<20} : {value}\n"));
}

pub fn render_text(records: &[PlaceRecord]) -> Vec<u8> {
    let mut out = String::new();
    for (i, r) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        push_card_line(&mut out, columns::PLACE, &r.place);
        push_card_line(&mut out, columns::CITY, r.city.as_deref().unwrap_or(""));
        push_card_line(
            &mut out,
            columns::CATEGORY,
            r.category.as_deref().unwrap_or(""),
        );
        push_card_line(&mut out, columns::SUB_CATEGORY, &r.sub_categories.join(", "));
        push_card_line(&mut out, columns::VISITED, &r.visited.to_string());
        push_card_line(
            &mut out,
            columns::VISIT_DATE,
            r.visit_date.as_deref().unwrap_or(""),
        );
        push_card_line(&mut out, columns::NOTES, &r.notes);
        push_card_line(&mut out, columns::PROS, &r.pros);
        push_card_line(&mut out, columns::CONS, &r.cons);
        push_card_line(&mut out, columns::RESERVATION, &r.reservation.to_string());
        push_card_line(
            &mut out,
            columns::RATING,
            &r.rating.map(format_rating).unwrap_or_default(),
        );
        push_card_line(
            &mut out,
            columns::PRICE_RANGE,
            r.price_range.as_deref().unwrap_or(""),
        );
        push_card_line(&mut out, columns::CUISINE, &r.cuisines.join(", "));
        push_card_line(&mut out, columns::ADDRESS, &r.address);
        push_card_line(&mut out, columns::PIC_URL, r.pic_url.as_deref().unwrap_or(""));
        push_card_line(&mut out, columns::SOCIAL, r.social.as_deref().unwrap_or(""));
    }
    out.into_bytes()
}

pub fn render_json(records: &[PlaceRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        out.push_str(&value.replace('"', "\"\""));
        out.push('"');
        out
    } else {
        value.to_string()
    }
}

pub fn render_csv(records: &[PlaceRecord]) -> Vec<u8> {
    let mut out = String::new();
    let header = [
        columns::PLACE,
        columns::CITY,
        columns::CATEGORY,
        columns::SUB_CATEGORY,
        columns::VISITED,
        columns::VISIT_DATE,
        columns::NOTES,
        columns::PROS,
        columns::CONS,
        columns::RESERVATION,
        columns::RATING,
        columns::PRICE_RANGE,
        columns::CUISINE,
        columns::ADDRESS,
        columns::PIC_URL,
        columns::SOCIAL,
    ];
    out.push_str(
        &header
            .iter()
            .map(|h| escape_csv(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');
    for r in records {
        let fields = [
            escape_csv(&r.place),
            escape_csv(r.city.as_deref().unwrap_or_default()),
            escape_csv(r.category.as_deref().unwrap_or_default()),
            escape_csv(&r.sub_categories.join(", ")),
            r.visited.to_string(),
            escape_csv(r.visit_date.as_deref().unwrap_or_default()),
            escape_csv(&r.notes),
            escape_csv(&r.pros),
            escape_csv(&r.cons),
            r.reservation.to_string(),
            r.rating.map(format_rating).unwrap_or_default(),
            escape_csv(r.price_range.as_deref().unwrap_or_default()),
            escape_csv(&r.cuisines.join(", ")),
            escape_csv(&r.address),
            escape_csv(r.pic_url.as_deref().unwrap_or_default()),
            escape_csv(r.social.as_deref().unwrap_or_default()),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_html(records: &[PlaceRecord]) -> Vec<u8> {
    report::render_html(records)
}
