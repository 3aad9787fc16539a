use serde::{Deserialize, Serialize};

/// Column names of the stock places collection.
pub mod columns {
    pub const PLACE: &str = "Place";
    pub const CITY: &str = "City";
    pub const CATEGORY: &str = "Category";
    pub const SUB_CATEGORY: &str = "Sub-Category";
    pub const VISITED: &str = "Visited";
    pub const VISIT_DATE: &str = "Visit Date";
    pub const NOTES: &str = "Notes";
    pub const PROS: &str = "Pros";
    pub const CONS: &str = "Cons";
    pub const RESERVATION: &str = "Reservation Required";
    pub const RATING: &str = "Rating";
    pub const PRICE_RANGE: &str = "Price Range";
    pub const CUISINE: &str = "Cuisine / Type";
    pub const ADDRESS: &str = "Address";
    pub const PIC_URL: &str = "PicURL";
    pub const SOCIAL: &str = "Social";
}

/// Declared kind of a column. `Other` keeps whatever string the config used
/// so the normalizer can apply its missing-value fallback without rejecting
/// kinds this build does not know about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Title,
    RichText,
    Checkbox,
    Select,
    MultiSelect,
    Date,
    Number,
    Url,
    Other(String),
}

impl PropertyKind {
    pub fn parse(input: &str) -> PropertyKind {
        match input.trim().to_lowercase().as_str() {
            "title" => PropertyKind::Title,
            "rich_text" | "rich-text" | "richtext" => PropertyKind::RichText,
            "checkbox" => PropertyKind::Checkbox,
            "select" => PropertyKind::Select,
            "multi_select" | "multi-select" | "multiselect" => PropertyKind::MultiSelect,
            "date" => PropertyKind::Date,
            "number" => PropertyKind::Number,
            "url" => PropertyKind::Url,
            other => PropertyKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropertyKind::Title => "title",
            PropertyKind::RichText => "rich_text",
            PropertyKind::Checkbox => "checkbox",
            PropertyKind::Select => "select",
            PropertyKind::MultiSelect => "multi_select",
            PropertyKind::Date => "date",
            PropertyKind::Number => "number",
            PropertyKind::Url => "url",
            PropertyKind::Other(name) => name.as_str(),
        }
    }
}

/// One `column: kind` pair as written in the config file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub column: String,
    pub kind: String,
}

/// Ordered column declarations. Order here is column order everywhere
/// downstream (normalized rows, CSV header, text cards).
#[derive(Clone, Debug)]
pub struct Schema {
    columns: Vec<(String, PropertyKind)>,
}

impl Schema {
    pub fn new(columns: Vec<(String, PropertyKind)>) -> Self {
        Self { columns }
    }

    /// The stock schema of the places collection.
    pub fn places() -> Self {
        Self::new(vec![
            (columns::PLACE.to_string(), PropertyKind::Title),
            (columns::CITY.to_string(), PropertyKind::RichText),
            (columns::CATEGORY.to_string(), PropertyKind::Select),
            (columns::SUB_CATEGORY.to_string(), PropertyKind::MultiSelect),
            (columns::VISITED.to_string(), PropertyKind::Checkbox),
            (columns::VISIT_DATE.to_string(), PropertyKind::Date),
            (columns::NOTES.to_string(), PropertyKind::RichText),
            (columns::PROS.to_string(), PropertyKind::RichText),
            (columns::CONS.to_string(), PropertyKind::RichText),
            (columns::RESERVATION.to_string(), PropertyKind::Checkbox),
            (columns::RATING.to_string(), PropertyKind::Number),
            (columns::PRICE_RANGE.to_string(), PropertyKind::Select),
            (columns::CUISINE.to_string(), PropertyKind::MultiSelect),
            (columns::ADDRESS.to_string(), PropertyKind::Url),
            (columns::PIC_URL.to_string(), PropertyKind::Url),
            (columns::SOCIAL.to_string(), PropertyKind::Url),
        ])
    }

    pub fn from_entries(entries: &[SchemaEntry]) -> Self {
        Self::new(
            entries
                .iter()
                .filter(|e| !e.column.trim().is_empty())
                .map(|e| (e.column.trim().to_string(), PropertyKind::parse(&e.kind)))
                .collect(),
        )
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &PropertyKind)> {
        self.columns.iter().map(|(name, kind)| (name.as_str(), kind))
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::places()
    }
}
