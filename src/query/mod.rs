use std::cmp::Ordering;
use std::sync::Arc;

use itertools::Itertools;
use regex::Regex;

use crate::normalize::Row;
use crate::schema::columns;

/// Yes / no / all filter over a boolean column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriState {
    #[default]
    All,
    Yes,
    No,
}

impl TriState {
    pub fn parse(input: &str) -> Option<TriState> {
        match input.trim().to_lowercase().as_str() {
            "all" | "any" => Some(TriState::All),
            "yes" | "y" | "true" => Some(TriState::Yes),
            "no" | "n" | "false" => Some(TriState::No),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriState::All => "all",
            TriState::Yes => "yes",
            TriState::No => "no",
        }
    }

    fn allows(&self, value: bool) -> bool {
        match self {
            TriState::All => true,
            TriState::Yes => value,
            TriState::No => !value,
        }
    }
}

/// Conjunctive row filters. Empty sets and `None` fields filter nothing.
/// Multi-valued columns match when any wanted tag is present; a missing
/// rating ranks as zero, so any positive threshold excludes it.
#[derive(Clone, Debug, Default)]
pub struct RowFilters {
    pub cities: Vec<String>,
    pub category: Option<String>,
    pub sub_categories: Vec<String>,
    pub cuisines: Vec<String>,
    pub visited: TriState,
    pub reservation: TriState,
    pub price_ranges: Vec<String>,
    pub min_rating: Option<f64>,
    pub search: Option<Arc<Regex>>,
}

impl RowFilters {
    pub fn matches(&self, row: &Row) -> bool {
        if !self.cities.is_empty() {
            let city = row.text(columns::CITY).unwrap_or("");
            if !self.cities.iter().any(|c| c == city) {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref() {
            if row.text(columns::CATEGORY) != Some(category) {
                return false;
            }
        }
        if !self.sub_categories.is_empty() && !any_tag(row, columns::SUB_CATEGORY, &self.sub_categories)
        {
            return false;
        }
        if !self.cuisines.is_empty() && !any_tag(row, columns::CUISINE, &self.cuisines) {
            return false;
        }
        if !self.visited.allows(row.boolean(columns::VISITED)) {
            return false;
        }
        if !self.reservation.allows(row.boolean(columns::RESERVATION)) {
            return false;
        }
        if !self.price_ranges.is_empty() {
            let price = row.text(columns::PRICE_RANGE).unwrap_or("");
            if !self.price_ranges.iter().any(|p| p == price) {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if row.number(columns::RATING).unwrap_or(0.0) < min {
                return false;
            }
        }
        if let Some(re) = self.search.as_ref() {
            if !re.is_match(&search_haystack(row)) {
                return false;
            }
        }
        true
    }
}

fn any_tag(row: &Row, column: &str, wanted: &[String]) -> bool {
    let tags = row.tags(column);
    wanted.iter().any(|want| tags.iter().any(|tag| tag == want))
}

fn search_haystack(row: &Row) -> String {
    let mut out = String::new();
    for column in [
        columns::PLACE,
        columns::CITY,
        columns::CATEGORY,
        columns::NOTES,
        columns::PROS,
        columns::CONS,
    ] {
        if let Some(text) = row.text(column) {
            out.push_str(text);
            out.push(' ');
        }
    }
    for column in [columns::SUB_CATEGORY, columns::CUISINE] {
        for tag in row.tags(column) {
            out.push_str(tag);
            out.push(' ');
        }
    }
    out
}

pub fn filter_rows(mut rows: Vec<Row>, filters: &RowFilters) -> Vec<Row> {
    rows.retain(|row| filters.matches(row));
    rows
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Name,
    City,
    Rating,
    VisitDate,
}

impl SortKey {
    pub fn parse(input: &str) -> Option<SortKey> {
        match input.trim().to_lowercase().as_str() {
            "name" | "place" => Some(SortKey::Name),
            "city" => Some(SortKey::City),
            "rating" => Some(SortKey::Rating),
            "visit-date" | "visit_date" | "date" => Some(SortKey::VisitDate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::City => "city",
            SortKey::Rating => "rating",
            SortKey::VisitDate => "visit-date",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn parse(input: &str) -> Option<SortOrder> {
        match input.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Ascending),
            "desc" | "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Stable sort. A missing rating or date ranks below every present value,
/// so it leads ascending and trails descending.
pub fn sort_rows(rows: &mut [Row], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => fold_text(a, columns::PLACE).cmp(&fold_text(b, columns::PLACE)),
            SortKey::City => fold_text(a, columns::CITY).cmp(&fold_text(b, columns::CITY)),
            SortKey::Rating => rating_rank(a)
                .partial_cmp(&rating_rank(b))
                .unwrap_or(Ordering::Equal),
            SortKey::VisitDate => date_rank(a).cmp(date_rank(b)),
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

fn fold_text(row: &Row, column: &str) -> String {
    row.text(column).unwrap_or("").to_lowercase()
}

fn rating_rank(row: &Row) -> f64 {
    row.number(columns::RATING).unwrap_or(f64::NEG_INFINITY)
}

fn date_rank(row: &Row) -> &str {
    row.text(columns::VISIT_DATE).unwrap_or("")
}

pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    ((total + per_page - 1) / per_page).max(1)
}

/// 1-based page slice, clamped into range. A zero `per_page` disables
/// pagination and returns everything.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if per_page == 0 {
        return items;
    }
    let pages = page_count(items.len(), per_page);
    let page = page.clamp(1, pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

pub fn distinct_text(rows: &[Row], column: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.text(column))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unique()
        .sorted()
        .collect()
}

pub fn distinct_tags(rows: &[Row], column: &str) -> Vec<String> {
    rows.iter()
        .flat_map(|row| row.tags(column).iter())
        .map(|s| s.to_string())
        .unique()
        .sorted()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::wire::RawRecord;
    use crate::normalize::normalize_record;
    use crate::schema::Schema;
    use serde_json::json;

    struct PlaceSeed {
        name: &'static str,
        city: &'static str,
        category: &'static str,
        sub_categories: Vec<&'static str>,
        visited: bool,
        rating: Option<f64>,
        price: Option<&'static str>,
        visit_date: Option<&'static str>,
    }

    impl Default for PlaceSeed {
        fn default() -> Self {
            Self {
                name: "Somewhere",
                city: "Lisbon",
                category: "Restaurant",
                sub_categories: Vec::new(),
                visited: false,
                rating: None,
                price: None,
                visit_date: None,
            }
        }
    }

    fn row(seed: PlaceSeed) -> Row {
        let record: RawRecord = serde_json::from_value(json!({
            "id": format!("rec-{}", seed.name),
            "properties": {
                "Place": { "type": "title", "title": [{ "plain_text": seed.name }] },
                "City": { "type": "rich_text", "rich_text": [{ "plain_text": seed.city }] },
                "Category": { "type": "select", "select": { "name": seed.category } },
                "Sub-Category": { "type": "multi_select", "multi_select":
                    seed.sub_categories.iter().map(|t| json!({ "name": t })).collect::<Vec<_>>() },
                "Visited": { "type": "checkbox", "checkbox": seed.visited },
                "Visit Date": { "type": "date", "date":
                    seed.visit_date.map(|d| json!({ "start": d })) },
                "Notes": { "type": "rich_text", "rich_text": [] },
                "Pros": { "type": "rich_text", "rich_text": [] },
                "Cons": { "type": "rich_text", "rich_text": [] },
                "Reservation Required": { "type": "checkbox", "checkbox": false },
                "Rating": { "type": "number", "number": seed.rating },
                "Price Range": { "type": "select", "select":
                    seed.price.map(|p| json!({ "name": p })) },
                "Cuisine / Type": { "type": "multi_select", "multi_select": [] },
                "Address": { "type": "url", "url": null },
                "PicURL": { "type": "url", "url": null },
                "Social": { "type": "url", "url": null }
            }
        }))
        .unwrap();
        normalize_record(&record, &Schema::places()).unwrap()
    }

    #[test]
    fn min_rating_excludes_missing_ratings() {
        let rows = vec![
            row(PlaceSeed {
                name: "Rated",
                rating: Some(3.0),
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Better",
                rating: Some(4.5),
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Unrated",
                rating: None,
                ..Default::default()
            }),
        ];
        let filters = RowFilters {
            min_rating: Some(3.0),
            ..Default::default()
        };
        let kept = filter_rows(rows, &filters);
        let names: Vec<&str> = kept
            .iter()
            .map(|r| r.text(columns::PLACE).unwrap())
            .collect();
        assert_eq!(names, vec!["Rated", "Better"]);
    }

    #[test]
    fn sub_category_matches_any_wanted_tag() {
        let rows = vec![
            row(PlaceSeed {
                name: "Cafe",
                sub_categories: vec!["coffee", "brunch"],
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Bakery",
                sub_categories: vec!["dessert"],
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Bar",
                sub_categories: vec!["wine"],
                ..Default::default()
            }),
        ];
        let filters = RowFilters {
            sub_categories: vec!["coffee".to_string(), "dessert".to_string()],
            ..Default::default()
        };
        let kept = filter_rows(rows, &filters);
        let names: Vec<&str> = kept
            .iter()
            .map(|r| r.text(columns::PLACE).unwrap())
            .collect();
        assert_eq!(names, vec!["Cafe", "Bakery"]);
    }

    #[test]
    fn tri_state_and_city_filters_are_conjunctive() {
        let rows = vec![
            row(PlaceSeed {
                name: "Visited in town",
                city: "Porto",
                visited: true,
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Unvisited in town",
                city: "Porto",
                visited: false,
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Visited elsewhere",
                city: "Faro",
                visited: true,
                ..Default::default()
            }),
        ];
        let filters = RowFilters {
            cities: vec!["Porto".to_string()],
            visited: TriState::Yes,
            ..Default::default()
        };
        let kept = filter_rows(rows, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text(columns::PLACE), Some("Visited in town"));
    }

    #[test]
    fn price_filter_drops_rows_with_price_unset() {
        let rows = vec![
            row(PlaceSeed {
                name: "Cheap",
                price: Some("$"),
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Unpriced",
                price: None,
                ..Default::default()
            }),
        ];
        let filters = RowFilters {
            price_ranges: vec!["$".to_string(), "$$".to_string()],
            ..Default::default()
        };
        let kept = filter_rows(rows, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text(columns::PLACE), Some("Cheap"));
    }

    #[test]
    fn search_covers_tags_and_is_case_insensitive() {
        let rows = vec![
            row(PlaceSeed {
                name: "Panificio",
                sub_categories: vec!["Bakery"],
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Taberna",
                ..Default::default()
            }),
        ];
        let re = regex::RegexBuilder::new("bakery")
            .case_insensitive(true)
            .build()
            .unwrap();
        let filters = RowFilters {
            search: Some(Arc::new(re)),
            ..Default::default()
        };
        let kept = filter_rows(rows, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text(columns::PLACE), Some("Panificio"));
    }

    #[test]
    fn rating_sort_puts_missing_below_every_present_value() {
        let mut rows = vec![
            row(PlaceSeed {
                name: "Zero",
                rating: Some(0.0),
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Unrated",
                rating: None,
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Top",
                rating: Some(5.0),
                ..Default::default()
            }),
        ];
        sort_rows(&mut rows, SortKey::Rating, SortOrder::Ascending);
        let names: Vec<&str> = rows.iter().map(|r| r.text(columns::PLACE).unwrap()).collect();
        assert_eq!(names, vec!["Unrated", "Zero", "Top"]);

        sort_rows(&mut rows, SortKey::Rating, SortOrder::Descending);
        let names: Vec<&str> = rows.iter().map(|r| r.text(columns::PLACE).unwrap()).collect();
        assert_eq!(names, vec!["Top", "Zero", "Unrated"]);
    }

    #[test]
    fn name_sort_ignores_case_and_is_stable() {
        let mut rows = vec![
            row(PlaceSeed {
                name: "casa",
                city: "B",
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Casa",
                city: "A",
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Azul",
                ..Default::default()
            }),
        ];
        sort_rows(&mut rows, SortKey::Name, SortOrder::Ascending);
        let names: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| {
                (
                    r.text(columns::PLACE).unwrap(),
                    r.text(columns::CITY).unwrap(),
                )
            })
            .collect();
        // equal keys keep input order
        assert_eq!(names, vec![("Azul", "Lisbon"), ("casa", "B"), ("Casa", "A")]);
    }

    #[test]
    fn visit_date_sorts_chronologically() {
        let mut rows = vec![
            row(PlaceSeed {
                name: "Later",
                visit_date: Some("2024-03-02"),
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Never",
                visit_date: None,
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "Earlier",
                visit_date: Some("2023-11-30"),
                ..Default::default()
            }),
        ];
        sort_rows(&mut rows, SortKey::VisitDate, SortOrder::Ascending);
        let names: Vec<&str> = rows.iter().map(|r| r.text(columns::PLACE).unwrap()).collect();
        assert_eq!(names, vec!["Never", "Earlier", "Later"]);
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
        assert_eq!(paginate(&items, 3, 10), &items[20..25]);
        // out-of-range pages clamp instead of panicking
        assert_eq!(paginate(&items, 99, 10), &items[20..25]);
        assert_eq!(paginate(&items, 0, 10), &items[0..10]);
    }

    #[test]
    fn pagination_of_nothing_is_empty() {
        let items: Vec<u32> = Vec::new();
        assert_eq!(page_count(0, 10), 1);
        assert!(paginate(&items, 1, 10).is_empty());
    }

    #[test]
    fn zero_per_page_disables_pagination() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 1, 0).len(), 25);
        assert_eq!(page_count(25, 0), 1);
    }

    #[test]
    fn distinct_values_are_sorted_and_deduplicated() {
        let rows = vec![
            row(PlaceSeed {
                name: "A",
                city: "Porto",
                sub_categories: vec!["wine", "coffee"],
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "B",
                city: "Faro",
                sub_categories: vec!["coffee"],
                ..Default::default()
            }),
            row(PlaceSeed {
                name: "C",
                city: "Porto",
                ..Default::default()
            }),
        ];
        assert_eq!(distinct_text(&rows, columns::CITY), vec!["Faro", "Porto"]);
        assert_eq!(
            distinct_tags(&rows, columns::SUB_CATEGORY),
            vec!["coffee", "wine"]
        );
    }
}
