//! Popularity page parser
//!
//! The planet page of the popularity service holds a form posting to
//! `etd.php`. Its table's second row, fourth cell, is the number of
//! observation datasets uploaded for the planet.

use anyhow::{Context, Result, anyhow};
use scraper::{Html, Selector};

const FORM_SELECTOR: &str = r#"form[action="etd.php"]"#;
const COUNT_ROW: usize = 1;
const COUNT_CELL: usize = 3;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("selector error: {:?}", e))
}

/// Extract the sample count from a planet page.
pub fn parse_sample_count(html: &str) -> Result<u32> {
    let document = Html::parse_document(html);

    let form_sel = selector(FORM_SELECTOR)?;
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let td_sel = selector("td")?;

    let form = document
        .select(&form_sel)
        .next()
        .context("No observation form in planet page")?;
    let table = form
        .select(&table_sel)
        .next()
        .context("No table inside observation form")?;
    let row = table
        .select(&row_sel)
        .nth(COUNT_ROW)
        .context("Observation table has no data row")?;
    let cell = row
        .select(&td_sel)
        .nth(COUNT_CELL)
        .context("Observation table row is too short")?;

    let text = cell.text().collect::<String>();
    text.trim()
        .parse::<u32>()
        .with_context(|| format!("Sample count '{}' is not an integer", text.trim()))
}
