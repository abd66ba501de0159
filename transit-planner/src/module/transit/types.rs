//! Transit candidate data types

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::{PlannerError, Result};

/// A single timestamped observation point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    /// Time in the transit table's zone (UTC)
    pub time: DateTime<Utc>,
    /// Angle above the horizon; negative means below it
    pub elevation_degrees: i32,
}

impl Moment {
    pub fn new(time: DateTime<Utc>, elevation_degrees: i32) -> Self {
        Self {
            time,
            elevation_degrees,
        }
    }

    pub fn time_of_day(&self) -> NaiveTime {
        self.time.time()
    }
}

/// One observable transit event
#[derive(Debug, Clone, PartialEq)]
pub struct TransitCandidate {
    /// Star and planet, e.g. "KELT-4A b"
    pub object: String,
    /// Brightness drop during the transit (mag)
    pub magnitude_depth: f64,
    /// Prior observation datasets; `None` until enrichment
    pub sample_count: Option<u32>,
    pub begin: Moment,
    pub center: Moment,
    pub end: Moment,
}

impl TransitCandidate {
    /// Build a candidate, rejecting rows whose samples are out of order.
    pub fn new(
        object: impl Into<String>,
        magnitude_depth: f64,
        begin: Moment,
        center: Moment,
        end: Moment,
    ) -> Result<Self> {
        let object = object.into();
        if object.trim().is_empty() {
            return Err(PlannerError::upstream_format("transit row has an empty object name"));
        }
        if magnitude_depth.is_nan() || magnitude_depth < 0.0 {
            return Err(PlannerError::upstream_format(format!(
                "invalid magnitude depth {} for '{}'",
                magnitude_depth, object
            )));
        }
        if !(begin.time < center.time && center.time < end.time) {
            return Err(PlannerError::NonChronological { object });
        }

        Ok(Self {
            object,
            magnitude_depth,
            sample_count: None,
            begin,
            center,
            end,
        })
    }

    /// Attach the sample count. Set once; later calls keep the first value.
    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        if self.sample_count.is_none() {
            self.sample_count = Some(sample_count);
        }
        self
    }

    /// Elevations of begin, center and end, in that order
    pub fn elevations(&self) -> [i32; 3] {
        [
            self.begin.elevation_degrees,
            self.center.elevation_degrees,
            self.end.elevation_degrees,
        ]
    }
}
