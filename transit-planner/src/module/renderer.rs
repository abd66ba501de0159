//! Ranked transit renderer
//!
//! Two read-only views over the final list: a multi-line dump per transit
//! and a `;`-delimited table. Times are converted to the observer's fixed
//! UTC offset here and nowhere else.

use std::io::Write;

use chrono::FixedOffset;

use super::transit::{Moment, TransitCandidate};
use crate::error::{PlannerError, Result};

pub const CSV_HEADER: [&str; 9] = [
    "object",
    "mag_depth",
    "n_samples",
    "begin time",
    "begin elevation",
    "center time",
    "center elevation",
    "end time",
    "end elevation",
];

const TABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const TEXT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Multi-line dump per transit
    Text,
    /// One `;`-delimited row per transit
    Csv,
}

pub struct TransitRenderer {
    offset: FixedOffset,
}

impl TransitRenderer {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn render<W: Write>(
        &self,
        format: OutputFormat,
        transits: &[TransitCandidate],
        out: W,
    ) -> Result<()> {
        match format {
            OutputFormat::Text => self.render_text(transits, out),
            OutputFormat::Csv => self.render_csv(transits, out),
        }
    }

    fn local_time(&self, moment: &Moment, format: &str) -> String {
        moment.time.with_timezone(&self.offset).format(format).to_string()
    }

    pub fn render_text<W: Write>(&self, transits: &[TransitCandidate], mut out: W) -> Result<()> {
        for transit in transits {
            writeln!(out, "{}", transit.object).map_err(render_error)?;
            if let Some(count) = transit.sample_count {
                writeln!(out, "{}", count).map_err(render_error)?;
            }
            writeln!(out, "{}", transit.magnitude_depth).map_err(render_error)?;
            for moment in [&transit.begin, &transit.center, &transit.end] {
                writeln!(
                    out,
                    "{} @ {}°",
                    self.local_time(moment, TEXT_TIME_FORMAT),
                    moment.elevation_degrees
                )
                .map_err(render_error)?;
            }
            writeln!(out).map_err(render_error)?;
        }
        out.flush().map_err(render_error)
    }

    pub fn render_csv<W: Write>(&self, transits: &[TransitCandidate], out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

        writer.write_record(CSV_HEADER).map_err(render_error)?;
        for transit in transits {
            writer
                .write_record([
                    transit.object.clone(),
                    transit.magnitude_depth.to_string(),
                    transit
                        .sample_count
                        .map(|count| count.to_string())
                        .unwrap_or_default(),
                    self.local_time(&transit.begin, TABLE_TIME_FORMAT),
                    transit.begin.elevation_degrees.to_string(),
                    self.local_time(&transit.center, TABLE_TIME_FORMAT),
                    transit.center.elevation_degrees.to_string(),
                    self.local_time(&transit.end, TABLE_TIME_FORMAT),
                    transit.end.elevation_degrees.to_string(),
                ])
                .map_err(render_error)?;
        }

        writer.flush().map_err(render_error)
    }
}

fn render_error(e: impl std::fmt::Display) -> PlannerError {
    PlannerError::Render {
        message: e.to_string(),
    }
}
