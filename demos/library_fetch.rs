use std::error::Error;

use placeboard::runner::{Options, Runner};
use placeboard::schema::columns;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        token: std::env::var("PLACEBOARD_TOKEN").unwrap_or_default(),
        collection: "d9824bdc84454327be8b5b47500af6ce".to_string(),
        page_size: 100,
        max_pages: 50,
        ..Options::default()
    })?;
    let report = runner.run().await?;

    println!("Pages: {}", report.pages_fetched);
    println!("Rows: {}", report.rows.len());
    for row in report.rows.iter().take(10) {
        println!(
            "{} [{}]",
            row.text(columns::PLACE).unwrap_or(""),
            row.text(columns::CITY).unwrap_or("-"),
        );
    }

    Ok(())
}
