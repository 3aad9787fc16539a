use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct QueryRequest {
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

/// One page of a collection query, as returned by the remote API.
#[derive(Clone, Debug, Deserialize)]
pub struct QueryPage {
    #[serde(default)]
    pub results: Vec<RawRecord>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

/// A typed property value. The payload key matches the `type` tag, so each
/// variant carries exactly the field the remote puts next to its tag.
/// Tags this build does not know about decode to `Unknown` instead of
/// failing the whole page.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Property {
    Title {
        #[serde(default)]
        title: Vec<TextRun>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<TextRun>,
    },
    Checkbox {
        checkbox: bool,
    },
    Select {
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Date {
        date: Option<DateValue>,
    },
    Number {
        number: Option<f64>,
    },
    Url {
        url: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

impl Property {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Property::Title { .. } => "title",
            Property::RichText { .. } => "rich_text",
            Property::Checkbox { .. } => "checkbox",
            Property::Select { .. } => "select",
            Property::MultiSelect { .. } => "multi_select",
            Property::Date { .. } => "date",
            Property::Number { .. } => "number",
            Property::Url { .. } => "url",
            Property::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_decodes_by_type_tag() {
        let prop: Property = serde_json::from_value(serde_json::json!({
            "type": "select",
            "select": { "name": "Restaurant", "color": "red" }
        }))
        .unwrap();
        match prop {
            Property::Select { select } => {
                assert_eq!(select.unwrap().name, "Restaurant");
            }
            other => panic!("decoded wrong variant: {}", other.kind_name()),
        }
    }

    #[test]
    fn unknown_type_tag_decodes_to_unknown() {
        let prop: Property = serde_json::from_value(serde_json::json!({
            "type": "rollup",
            "rollup": { "type": "number", "number": 3 }
        }))
        .unwrap();
        assert_eq!(prop.kind_name(), "unknown");
    }

    #[test]
    fn page_decode_tolerates_missing_cursor_fields() {
        let page: QueryPage = serde_json::from_value(serde_json::json!({
            "results": []
        }))
        .unwrap();
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
        assert!(page.results.is_empty());
    }
}
