use std::fmt;

use thiserror::Error;

use crate::fetch::wire::{Property, RawRecord, TextRun};
use crate::schema::{PropertyKind, Schema};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("record {record}: declared column {column:?} is not in the property map")]
    MissingProperty { column: String, record: String },

    #[error("record {record}: column {column:?} is declared {expected} but the record carries {actual}")]
    KindMismatch {
        column: String,
        expected: String,
        actual: String,
        record: String,
    },
}

/// One normalized value. Multi-valued columns are always `Tags`, never a
/// joined string; absent optional scalars are always `Missing`, never an
/// error.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Bool(bool),
    Number(f64),
    Tags(Vec<String>),
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(value) => f.write_str(value),
            Cell::Bool(value) => write!(f, "{}", value),
            Cell::Number(value) => write!(f, "{}", value),
            Cell::Tags(tags) => f.write_str(&tags.join(", ")),
            Cell::Missing => Ok(()),
        }
    }
}

/// One flat row, cells in schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    cells: Vec<(String, Cell)>,
}

const NO_TAGS: &[String] = &[];

impl Row {
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    /// Text-bearing cell (title, rich text, select, date, url) or None.
    pub fn text(&self, column: &str) -> Option<&str> {
        match self.get(column) {
            Some(Cell::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn boolean(&self, column: &str) -> bool {
        matches!(self.get(column), Some(Cell::Bool(true)))
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        match self.get(column) {
            Some(Cell::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn tags(&self, column: &str) -> &[String] {
        match self.get(column) {
            Some(Cell::Tags(tags)) => tags.as_slice(),
            _ => NO_TAGS,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(name, cell)| (name.as_str(), cell))
    }
}

/// Flattens one record into a row, applying the per-kind extraction policy
/// of the declared schema. A declared column missing from the record's
/// property map, or carrying a different kind than declared, is an error
/// for the whole pass.
pub fn normalize_record(record: &RawRecord, schema: &Schema) -> Result<Row, NormalizeError> {
    let mut cells = Vec::with_capacity(schema.len());
    for (column, kind) in schema.columns() {
        let prop =
            record
                .properties
                .get(column)
                .ok_or_else(|| NormalizeError::MissingProperty {
                    column: column.to_string(),
                    record: record.id.clone(),
                })?;
        let cell = match extract_cell(kind, prop) {
            Some(cell) => cell,
            None => {
                return Err(NormalizeError::KindMismatch {
                    column: column.to_string(),
                    expected: kind.as_str().to_string(),
                    actual: prop.kind_name().to_string(),
                    record: record.id.clone(),
                })
            }
        };
        cells.push((column.to_string(), cell));
    }
    Ok(Row { cells })
}

pub fn normalize_rows(records: &[RawRecord], schema: &Schema) -> Result<Vec<Row>, NormalizeError> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        rows.push(normalize_record(record, schema)?);
    }
    Ok(rows)
}

fn extract_cell(kind: &PropertyKind, prop: &Property) -> Option<Cell> {
    let cell = match (kind, prop) {
        (PropertyKind::Title, Property::Title { title }) => Cell::Text(first_plain(title)),
        (PropertyKind::RichText, Property::RichText { rich_text }) => {
            Cell::Text(first_plain(rich_text))
        }
        (PropertyKind::Checkbox, Property::Checkbox { checkbox }) => Cell::Bool(*checkbox),
        (PropertyKind::Select, Property::Select { select }) => match select {
            Some(option) => Cell::Text(option.name.clone()),
            None => Cell::Missing,
        },
        (PropertyKind::MultiSelect, Property::MultiSelect { multi_select }) => {
            Cell::Tags(multi_select.iter().map(|o| o.name.clone()).collect())
        }
        (PropertyKind::Date, Property::Date { date }) => match date {
            Some(date) => Cell::Text(date.start.clone()),
            None => Cell::Missing,
        },
        (PropertyKind::Number, Property::Number { number }) => match number {
            Some(value) => Cell::Number(*value),
            None => Cell::Missing,
        },
        (PropertyKind::Url, Property::Url { url }) => match url {
            Some(url) => Cell::Text(url.clone()),
            None => Cell::Missing,
        },
        // Unrecognized declared kinds flatten to missing so a field map can
        // name kinds this build does not extract.
        (PropertyKind::Other(_), _) => Cell::Missing,
        _ => return None,
    };
    Some(cell)
}

fn first_plain(runs: &[TextRun]) -> String {
    runs.first().map(|run| run.plain_text.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{columns, SchemaEntry};
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    fn places_record() -> RawRecord {
        record(json!({
            "id": "rec-1",
            "properties": {
                "Place": { "type": "title", "title": [{ "plain_text": "Bar Nestor" }] },
                "City": { "type": "rich_text", "rich_text": [{ "plain_text": "San Sebastian" }] },
                "Category": { "type": "select", "select": { "name": "Restaurant" } },
                "Sub-Category": { "type": "multi_select", "multi_select": [
                    { "name": "coffee" }, { "name": "dessert" }
                ] },
                "Visited": { "type": "checkbox", "checkbox": true },
                "Visit Date": { "type": "date", "date": { "start": "2023-09-14" } },
                "Notes": { "type": "rich_text", "rich_text": [] },
                "Pros": { "type": "rich_text", "rich_text": [{ "plain_text": "tortilla" }] },
                "Cons": { "type": "rich_text", "rich_text": [{ "plain_text": "queue" }] },
                "Reservation Required": { "type": "checkbox", "checkbox": false },
                "Rating": { "type": "number", "number": 4.5 },
                "Price Range": { "type": "select", "select": null },
                "Cuisine / Type": { "type": "multi_select", "multi_select": [{ "name": "basque" }] },
                "Address": { "type": "url", "url": "https://maps.example/nestor" },
                "PicURL": { "type": "url", "url": null },
                "Social": { "type": "url", "url": "https://instagram.com/barnestor" }
            }
        }))
    }

    #[test]
    fn flattens_every_declared_kind() {
        let row = normalize_record(&places_record(), &Schema::places()).unwrap();
        assert_eq!(row.text(columns::PLACE), Some("Bar Nestor"));
        assert_eq!(row.text(columns::CITY), Some("San Sebastian"));
        assert_eq!(row.text(columns::CATEGORY), Some("Restaurant"));
        assert!(row.boolean(columns::VISITED));
        assert!(!row.boolean(columns::RESERVATION));
        assert_eq!(row.text(columns::VISIT_DATE), Some("2023-09-14"));
        assert_eq!(row.number(columns::RATING), Some(4.5));
        assert_eq!(row.text(columns::ADDRESS), Some("https://maps.example/nestor"));
    }

    #[test]
    fn unset_select_is_missing_and_tags_stay_a_list() {
        let row = normalize_record(&places_record(), &Schema::places()).unwrap();
        assert!(row.get(columns::PRICE_RANGE).unwrap().is_missing());
        assert_eq!(
            row.tags(columns::SUB_CATEGORY),
            ["coffee".to_string(), "dessert".to_string()]
        );
    }

    #[test]
    fn empty_title_and_empty_multi_select() {
        let rec = record(json!({
            "id": "rec-2",
            "properties": {
                "Place": { "type": "title", "title": [] },
                "Sub-Category": { "type": "multi_select", "multi_select": [] }
            }
        }));
        let schema = Schema::from_entries(&[
            SchemaEntry {
                column: "Place".to_string(),
                kind: "title".to_string(),
            },
            SchemaEntry {
                column: "Sub-Category".to_string(),
                kind: "multi_select".to_string(),
            },
        ]);
        let row = normalize_record(&rec, &schema).unwrap();
        assert_eq!(row.text("Place"), Some(""));
        assert_eq!(row.get("Sub-Category"), Some(&Cell::Tags(Vec::new())));
        assert!(!row.get("Sub-Category").unwrap().is_missing());
    }

    #[test]
    fn unset_number_is_missing() {
        let rec = record(json!({
            "id": "rec-3",
            "properties": {
                "Rating": { "type": "number", "number": null }
            }
        }));
        let schema = Schema::from_entries(&[SchemaEntry {
            column: "Rating".to_string(),
            kind: "number".to_string(),
        }]);
        let row = normalize_record(&rec, &schema).unwrap();
        assert_eq!(row.get("Rating"), Some(&Cell::Missing));
        assert_eq!(row.number("Rating"), None);
    }

    #[test]
    fn only_the_first_text_run_is_kept() {
        let rec = record(json!({
            "id": "rec-4",
            "properties": {
                "Notes": { "type": "rich_text", "rich_text": [
                    { "plain_text": "first run" },
                    { "plain_text": "second run" }
                ] }
            }
        }));
        let schema = Schema::from_entries(&[SchemaEntry {
            column: "Notes".to_string(),
            kind: "rich_text".to_string(),
        }]);
        let row = normalize_record(&rec, &schema).unwrap();
        assert_eq!(row.text("Notes"), Some("first run"));
    }

    #[test]
    fn unknown_declared_kind_flattens_to_missing() {
        let rec = record(json!({
            "id": "rec-5",
            "properties": {
                "Attachments": { "type": "files", "files": [{ "name": "menu.pdf" }] }
            }
        }));
        let schema = Schema::from_entries(&[SchemaEntry {
            column: "Attachments".to_string(),
            kind: "files".to_string(),
        }]);
        let row = normalize_record(&rec, &schema).unwrap();
        assert_eq!(row.get("Attachments"), Some(&Cell::Missing));
    }

    #[test]
    fn missing_declared_column_aborts_with_the_column_name() {
        let rec = record(json!({ "id": "rec-6", "properties": {} }));
        let err = normalize_record(&rec, &Schema::places()).unwrap_err();
        match err {
            NormalizeError::MissingProperty { column, record } => {
                assert_eq!(column, columns::PLACE);
                assert_eq!(record, "rec-6");
            }
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn kind_mismatch_aborts_with_both_kinds() {
        let rec = record(json!({
            "id": "rec-7",
            "properties": {
                "Rating": { "type": "checkbox", "checkbox": true }
            }
        }));
        let schema = Schema::from_entries(&[SchemaEntry {
            column: "Rating".to_string(),
            kind: "number".to_string(),
        }]);
        let err = normalize_record(&rec, &schema).unwrap_err();
        match err {
            NormalizeError::KindMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, "number");
                assert_eq!(actual, "checkbox");
            }
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let rec = places_record();
        let schema = Schema::places();
        let first = normalize_record(&rec, &schema).unwrap();
        let second = normalize_record(&rec, &schema).unwrap();
        assert_eq!(first, second);
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }

    #[test]
    fn whole_pass_aborts_on_one_bad_record() {
        let good = places_record();
        let bad = record(json!({ "id": "rec-8", "properties": {} }));
        let err = normalize_rows(&[good, bad], &Schema::places()).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingProperty { .. }));
    }

    #[test]
    fn cell_display_joins_tags_and_blanks_missing() {
        assert_eq!(
            Cell::Tags(vec!["coffee".to_string(), "dessert".to_string()]).to_string(),
            "coffee, dessert"
        );
        assert_eq!(Cell::Missing.to_string(), "");
        assert_eq!(Cell::Number(4.0).to_string(), "4");
        assert_eq!(Cell::Bool(true).to_string(), "true");
    }
}
