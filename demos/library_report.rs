use std::error::Error;

use placeboard::output;
use placeboard::runner::{Options, Runner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        token: std::env::var("PLACEBOARD_TOKEN").unwrap_or_default(),
        collection: "d9824bdc84454327be8b5b47500af6ce".to_string(),
        ..Options::default()
    })?;
    let report = runner.run().await?;

    let records = output::build_records(&report.rows);
    let html = output::render_html(&records);
    std::fs::write("places.html", html)?;

    println!("Rows: {}", report.rows.len());
    println!("Report written to places.html");

    Ok(())
}
