//! Transit table HTML parser
//!
//! Turns the prediction page of the transit-table service into
//! [`TransitCandidate`]s, one per data row.

use chrono::TimeDelta;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::time_parser::{parse_center, parse_edge};
use super::types::{Moment, TransitCandidate};
use crate::error::{PlannerError, Result};

const BEGIN_CELL: usize = 1;
const CENTER_CELL: usize = 2;
const END_CELL: usize = 3;
const DEPTH_CELL: usize = 6;

/// Furthest an edge may lie from the center once placed on its day
const MAX_HALF_DURATION_HOURS: i64 = 12;

/// Raw texts of one linked table row, before any interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct TransitRow {
    pub object: String,
    pub cells: Vec<String>,
}

impl TransitRow {
    fn cell(&self, index: usize) -> Result<&str> {
        self.cells.get(index).map(String::as_str).ok_or_else(|| {
            PlannerError::upstream_format(format!(
                "row for '{}' has {} cells, expected at least {}",
                self.object,
                self.cells.len(),
                DEPTH_CELL + 1
            ))
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| PlannerError::upstream_format(format!("invalid selector '{}': {:?}", css, e)))
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Collect the data rows of the transit table.
///
/// Rows without an object link are table formatting (headers, separators)
/// and are skipped.
pub fn extract_rows(html: &str) -> Result<Vec<TransitRow>> {
    let document = Html::parse_document(html);

    let container_sel = selector("div.center")?;
    let table_sel = selector("table")?;
    let row_sel = selector(r#"tr[valign="top"]"#)?;
    let td_sel = selector("td")?;
    let link_sel = selector("a")?;

    let container = document
        .select(&container_sel)
        .next()
        .ok_or_else(|| PlannerError::upstream_format("no <div class=\"center\"> in transit page"))?;
    let table = container
        .select(&table_sel)
        .next()
        .ok_or_else(|| PlannerError::upstream_format("no transit table in transit page"))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for tr in table.select(&row_sel) {
        let Some(link) = tr.select(&link_sel).next() else {
            skipped += 1;
            continue;
        };

        let object = element_text(link).trim().to_string();
        if object.is_empty() {
            return Err(PlannerError::upstream_format(
                "transit row has an object link without a name",
            ));
        }

        let cells = tr.select(&td_sel).map(element_text).collect();
        rows.push(TransitRow { object, cells });
    }

    debug!("Skipped {} table rows without an object link", skipped);
    Ok(rows)
}

/// Build one candidate from a row. `year` is the reference year for the
/// day/month printed in the center cell.
pub fn build_candidate(row: &TransitRow, year: i32) -> Result<TransitCandidate> {
    let depth_text = row.cell(DEPTH_CELL)?.trim();
    let magnitude_depth: f64 = depth_text.parse().map_err(|_| {
        PlannerError::upstream_format(format!(
            "depth '{}' of '{}' is not a number",
            depth_text, row.object
        ))
    })?;

    let (date, center) = parse_center(row.cell(CENTER_CELL)?, year)?;
    let begin = place_before(parse_edge(row.cell(BEGIN_CELL)?, date)?, &center);
    let end = place_after(parse_edge(row.cell(END_CELL)?, date)?, &center);

    let limit = TimeDelta::hours(MAX_HALF_DURATION_HOURS);
    if center.time - begin.time > limit || end.time - center.time > limit {
        return Err(PlannerError::NonChronological {
            object: row.object.clone(),
        });
    }

    TransitCandidate::new(row.object.clone(), magnitude_depth, begin, center, end)
}

/// A begin clock time later than the center's belongs to the previous day.
fn place_before(mut begin: Moment, center: &Moment) -> Moment {
    if begin.time_of_day() > center.time_of_day() {
        begin.time -= TimeDelta::days(1);
    }
    begin
}

/// An end clock time earlier than the center's belongs to the next day.
fn place_after(mut end: Moment, center: &Moment) -> Moment {
    if end.time_of_day() < center.time_of_day() {
        end.time += TimeDelta::days(1);
    }
    end
}

/// Parse the full transit page into candidates, in table order.
pub fn parse_transit_table(html: &str, year: i32) -> Result<Vec<TransitCandidate>> {
    let candidates = extract_rows(html)?
        .iter()
        .map(|row| build_candidate(row, year))
        .collect::<Result<Vec<_>>>()?;

    info!("Parsed {} transit candidates", candidates.len());
    Ok(candidates)
}
