use std::cell::RefCell;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::fetch::wire::{QueryPage, RawRecord};
use crate::normalize::normalize_rows;
use crate::query::{RowFilters, SortKey, SortOrder};
use crate::schema::{columns, Schema};

#[derive(Default)]
struct Place {
    id: &'static str,
    name: &'static str,
    city: &'static str,
    tags: &'static [&'static str],
    price: Option<&'static str>,
    rating: Option<f64>,
    visited: bool,
}

fn place_record(place: &Place) -> RawRecord {
    serde_json::from_value(serde_json::json!({
        "id": place.id,
        "properties": {
            "Place": { "type": "title", "title": [{ "plain_text": place.name }] },
            "City": { "type": "rich_text", "rich_text": [{ "plain_text": place.city }] },
            "Category": { "type": "select", "select": { "name": "Restaurant" } },
            "Sub-Category": { "type": "multi_select", "multi_select":
                place.tags.iter().map(|t| serde_json::json!({ "name": t })).collect::<Vec<_>>() },
            "Visited": { "type": "checkbox", "checkbox": place.visited },
            "Visit Date": { "type": "date", "date": null },
            "Notes": { "type": "rich_text", "rich_text": [] },
            "Pros": { "type": "rich_text", "rich_text": [] },
            "Cons": { "type": "rich_text", "rich_text": [] },
            "Reservation Required": { "type": "checkbox", "checkbox": false },
            "Rating": { "type": "number", "number": place.rating },
            "Price Range": { "type": "select", "select":
                place.price.map(|p| serde_json::json!({ "name": p })) },
            "Cuisine / Type": { "type": "multi_select", "multi_select": [] },
            "Address": { "type": "url", "url": null },
            "PicURL": { "type": "url", "url": null },
            "Social": { "type": "url", "url": null }
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn a_multi_page_fetch_flows_through_filters_sort_and_pagination() {
    let first = vec![
        place_record(&Place {
            id: "r1",
            name: "Brew Lab",
            city: "Porto",
            tags: &["coffee"],
            price: Some("$"),
            rating: Some(4.2),
            visited: true,
        }),
        place_record(&Place {
            id: "r2",
            name: "Schnitzel Haus",
            city: "Vienna",
            tags: &["dinner"],
            price: Some("$$"),
            rating: Some(4.8),
            ..Place::default()
        }),
    ];
    let second = vec![
        place_record(&Place {
            id: "r3",
            name: "Sugar Mill",
            city: "Porto",
            tags: &["dessert"],
            price: Some("$$"),
            rating: Some(4.6),
            visited: true,
        }),
        place_record(&Place {
            id: "r4",
            name: "Corner Cafe",
            city: "Porto",
            tags: &["coffee"],
            price: None,
            rating: Some(4.9),
            ..Place::default()
        }),
    ];
    let third = vec![place_record(&Place {
        id: "r5",
        name: "Granita Bar",
        city: "Palermo",
        tags: &["dessert"],
        price: Some("$"),
        rating: None,
        ..Place::default()
    })];

    let pages = RefCell::new(vec![
        QueryPage {
            results: first,
            has_more: true,
            next_cursor: Some("c1".to_string()),
        },
        QueryPage {
            results: second,
            has_more: true,
            next_cursor: Some("c2".to_string()),
        },
        QueryPage {
            results: third,
            has_more: false,
            next_cursor: None,
        },
    ]);

    let pb = ProgressBar::hidden();
    let (records, fetched) = crate::fetch::drain_pages(
        &pb,
        |_| {
            let next = pages.borrow_mut().remove(0);
            async move { Ok(next) }
        },
        10,
    )
    .await
    .unwrap();
    assert_eq!(fetched, 3);
    assert_eq!(records.len(), 5);

    let rows = normalize_rows(&records, &Schema::places()).unwrap();
    let filters = RowFilters {
        sub_categories: vec!["coffee".to_string(), "dessert".to_string()],
        price_ranges: vec!["$".to_string(), "$$".to_string()],
        ..Default::default()
    };
    let mut kept = crate::query::filter_rows(rows, &filters);
    crate::query::sort_rows(&mut kept, SortKey::Rating, SortOrder::Descending);

    // the unpriced cafe is dropped by the price filter even though its tag matches
    let names: Vec<&str> = kept
        .iter()
        .map(|r| r.text(columns::PLACE).unwrap())
        .collect();
    assert_eq!(names, vec!["Sugar Mill", "Brew Lab", "Granita Bar"]);

    let page_one = crate::query::paginate(&kept, 1, 2);
    assert_eq!(page_one.len(), 2);
    assert_eq!(page_one[0].text(columns::PLACE), Some("Sugar Mill"));
    let page_two = crate::query::paginate(&kept, 2, 2);
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].text(columns::PLACE), Some("Granita Bar"));
}

#[test]
fn cli_style_search_pattern_matches_normalized_tags() {
    let records = vec![
        place_record(&Place {
            id: "r1",
            name: "Panificio",
            tags: &["Bakery"],
            ..Place::default()
        }),
        place_record(&Place {
            id: "r2",
            name: "Taberna",
            ..Place::default()
        }),
    ];
    let rows = normalize_rows(&records, &Schema::places()).unwrap();
    let re = crate::utils::build_search_regex("bake.*").unwrap();
    let filters = RowFilters {
        search: Some(Arc::new(re)),
        ..Default::default()
    };
    let kept = crate::query::filter_rows(rows, &filters);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].text(columns::PLACE), Some("Panificio"));
}

#[test]
fn a_rerun_over_the_same_records_is_identical() {
    let records = vec![
        place_record(&Place {
            id: "r1",
            name: "Brew Lab",
            tags: &["coffee"],
            rating: Some(4.2),
            ..Place::default()
        }),
        place_record(&Place {
            id: "r2",
            name: "Sugar Mill",
            tags: &["dessert"],
            price: Some("$$"),
            ..Place::default()
        }),
        place_record(&Place {
            id: "r3",
            name: "Annex",
            tags: &["coffee", "brunch"],
            ..Place::default()
        }),
    ];
    let schema = Schema::places();
    let filters = RowFilters {
        sub_categories: vec!["coffee".to_string()],
        ..Default::default()
    };

    let run = |records: &[RawRecord]| {
        let rows = normalize_rows(records, &schema).unwrap();
        let mut kept = crate::query::filter_rows(rows, &filters);
        crate::query::sort_rows(&mut kept, SortKey::Name, SortOrder::Ascending);
        kept
    };

    assert_eq!(run(&records), run(&records));
}

#[test]
fn a_config_declared_schema_reaches_the_normalizer() {
    let cfg: crate::config::ConfigFile = serde_yaml::from_str(
        r#"
collection: col-1
schema:
  - column: Name
    kind: title
  - column: Done
    kind: checkbox
  - column: Attachments
    kind: files
"#,
    )
    .unwrap();
    let schema = Schema::from_entries(cfg.schema.as_deref().unwrap());

    let record: RawRecord = serde_json::from_value(serde_json::json!({
        "id": "rec-1",
        "properties": {
            "Name": { "type": "title", "title": [{ "plain_text": "errand" }] },
            "Done": { "type": "checkbox", "checkbox": true },
            "Attachments": { "type": "files", "files": [] }
        }
    }))
    .unwrap();

    let rows = normalize_rows(&[record], &schema).unwrap();
    assert_eq!(rows[0].text("Name"), Some("errand"));
    assert!(rows[0].boolean("Done"));
    assert!(rows[0].get("Attachments").unwrap().is_missing());
}

#[test]
fn rendered_formats_agree_on_the_row_set() {
    let records = vec![
        place_record(&Place {
            id: "r1",
            name: "Brew Lab",
            city: "Porto",
            tags: &["coffee"],
            rating: Some(4.2),
            visited: true,
            ..Place::default()
        }),
        place_record(&Place {
            id: "r2",
            name: "Granita Bar",
            city: "Palermo",
            tags: &["dessert"],
            ..Place::default()
        }),
    ];
    let rows = normalize_rows(&records, &Schema::places()).unwrap();
    let recs = crate::output::build_records(&rows);

    let json = crate::output::render_json(&recs);
    let decoded: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(decoded.as_array().unwrap().len(), 2);
    assert_eq!(decoded[0]["place"], "Brew Lab");
    assert!(decoded[1]["rating"].is_null());

    let csv = String::from_utf8(crate::output::render_csv(&recs)).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().next().unwrap().starts_with("Place,City,"));

    let html = String::from_utf8(crate::output::render_html(&recs)).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Granita Bar"));
}

#[test]
fn embedded_report_json_cannot_close_its_script_tag() {
    let records = vec![place_record(&Place {
        id: "r1",
        name: "Bad</script>Bar",
        city: "Porto",
        ..Place::default()
    })];
    let rows = normalize_rows(&records, &Schema::places()).unwrap();
    let recs = crate::output::build_records(&rows);

    let html = String::from_utf8(crate::output::render_html(&recs)).unwrap();
    assert!(html.contains(r"Bad<\/script>Bar"));
    assert!(!html.contains("Bad</script>Bar"));
}
