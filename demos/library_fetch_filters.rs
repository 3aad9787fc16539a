use std::error::Error;

use placeboard::query::{self, RowFilters, SortKey, SortOrder, TriState};
use placeboard::runner::{Options, Runner};
use placeboard::schema::columns;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        token: std::env::var("PLACEBOARD_TOKEN").unwrap_or_default(),
        collection: "d9824bdc84454327be8b5b47500af6ce".to_string(),
        cache_ttl_seconds: 300,
        ..Options::default()
    })?;

    let report = runner.run().await?;
    let filters = RowFilters {
        cities: vec!["Lisbon".to_string()],
        visited: TriState::No,
        min_rating: Some(3.0),
        ..RowFilters::default()
    };
    let mut rows = query::filter_rows(report.rows, &filters);
    query::sort_rows(&mut rows, SortKey::Rating, SortOrder::Descending);

    for row in query::paginate(&rows, 1, 20) {
        println!(
            "{} {} {}",
            row.text(columns::PLACE).unwrap_or(""),
            row.number(columns::RATING).unwrap_or(0.0),
            row.text(columns::VISIT_DATE).unwrap_or("-"),
        );
    }

    let again = runner.run().await?;
    println!("Cached rerun: {}", again.from_cache);

    runner.clear_cache();
    println!("Cache empty after clear: {}", runner.cache_is_empty());

    Ok(())
}
