//! Time/elevation cell parser
//!
//! The transit table encodes a sample as clock time immediately followed by
//! the signed elevation, e.g. `10:0310°,NE` (10:03, 10°). The center cell
//! also carries the date: `08.06. 11:0969°,NE` (8 June, 11:09, 69°).
//! Minute and elevation are only separable by the fixed two-digit minute.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::{Captures, Regex};

use super::types::Moment;
use crate::error::{PlannerError, Result};

static CENTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})\.([0-9]{2})\. ([0-9]{1,2}):([0-9]{2})(-?[0-9]{1,2})°")
        .expect("center pattern is a valid regex")
});

static EDGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})(-?[0-9]{1,2})°")
        .expect("begin/end pattern is a valid regex")
});

/// Parse a center cell. Returns the resolved row date along with the moment,
/// so begin and end can be placed on the same date.
pub fn parse_center(text: &str, year: i32) -> Result<(NaiveDate, Moment)> {
    let caps = CENTER_PATTERN
        .captures(text.trim_start())
        .ok_or_else(|| PlannerError::unparsable_time(text))?;

    let day = capture_u32(&caps, 1, text)?;
    let month = capture_u32(&caps, 2, text)?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| PlannerError::unparsable_time(text))?;

    let moment = build_moment(&caps, 3, date, text)?;
    Ok((date, moment))
}

/// Parse a begin or end cell on the given date.
pub fn parse_edge(text: &str, date: NaiveDate) -> Result<Moment> {
    let caps = EDGE_PATTERN
        .captures(text.trim_start())
        .ok_or_else(|| PlannerError::unparsable_time(text))?;

    build_moment(&caps, 1, date, text)
}

/// Hour, minute and elevation start at capture group `first`.
fn build_moment(caps: &Captures, first: usize, date: NaiveDate, text: &str) -> Result<Moment> {
    let hour = capture_u32(caps, first, text)?;
    let minute = capture_u32(caps, first + 1, text)?;
    let elevation: i32 = caps[first + 2]
        .parse()
        .map_err(|_| PlannerError::unparsable_time(text))?;

    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| PlannerError::unparsable_time(text))?;

    Ok(Moment::new(
        Utc.from_utc_datetime(&NaiveDateTime::new(date, time)),
        elevation,
    ))
}

fn capture_u32(caps: &Captures, index: usize, text: &str) -> Result<u32> {
    caps[index]
        .parse()
        .map_err(|_| PlannerError::unparsable_time(text))
}
