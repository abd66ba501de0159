use chrono::{FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::module::transit::FilterThresholds;

/// Upper bound for `lookback_days` and `lookahead_days`
const MAX_QUERY_DAYS: u32 = 366;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitServiceConfig {
    pub base_url: String,
    /// Observer longitude in degrees, sent as the `cookiedelka` cookie
    pub longitude: f64,
    /// Observer latitude in degrees, sent as the `cookiesirka` cookie
    pub latitude: f64,
    #[serde(default)]
    pub lookback_days: u32,
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularityServiceConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub min_mag_depth: f64,
    pub elevation_threshold: i32,
    /// Time of day, "HH:MM" or "HH:MM:SS"
    pub min_start_time: String,
    pub max_end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Year assigned to the day/month in the transit table
    #[serde(default)]
    pub reference_year: Option<i32>,

    pub transit_service: TransitServiceConfig,
    pub popularity_service: PopularityServiceConfig,
    pub filters: FilterConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_lookahead_days() -> u32 {
    4
}

fn default_utc_offset_hours() -> i32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

fn parse_time_of_day(key: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            PlannerError::configuration(format!(
                "{} must be a time of day (HH:MM), got '{}'",
                key, value
            ))
        })
}

fn check_url(key: &str, value: &str) -> Result<()> {
    reqwest::Url::parse(value)
        .map(|_| ())
        .map_err(|e| PlannerError::configuration(format!("{} '{}' is not a URL: {}", key, value, e)))
}

impl PlannerConfig {
    /// Read, parse and validate a TOML configuration file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlannerError::configuration(format!("Failed to read config file '{}': {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: PlannerConfig = toml::from_str(content)
            .map_err(|e| PlannerError::configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_url("transit_service.base_url", &self.transit_service.base_url)?;
        check_url("popularity_service.base_url", &self.popularity_service.base_url)?;

        let longitude = self.transit_service.longitude;
        let latitude = self.transit_service.latitude;
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PlannerError::configuration(format!(
                "longitude {} is out of range",
                longitude
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PlannerError::configuration(format!(
                "latitude {} is out of range",
                latitude
            )));
        }

        for (key, days) in [
            ("lookback_days", self.transit_service.lookback_days),
            ("lookahead_days", self.transit_service.lookahead_days),
        ] {
            if days > MAX_QUERY_DAYS {
                return Err(PlannerError::configuration(format!(
                    "{} must be at most {}, got {}",
                    key, MAX_QUERY_DAYS, days
                )));
            }
        }

        self.filter_thresholds()?;
        self.output_offset()?;
        Ok(())
    }

    pub fn filter_thresholds(&self) -> Result<FilterThresholds> {
        let filters = &self.filters;
        if filters.min_mag_depth.is_nan() || filters.min_mag_depth < 0.0 {
            return Err(PlannerError::configuration(format!(
                "min_mag_depth must be non-negative, got {}",
                filters.min_mag_depth
            )));
        }

        Ok(FilterThresholds {
            min_magnitude_depth: filters.min_mag_depth,
            elevation_threshold_degrees: filters.elevation_threshold,
            min_start_time: parse_time_of_day("min_start_time", &filters.min_start_time)?,
            max_end_time: parse_time_of_day("max_end_time", &filters.max_end_time)?,
        })
    }

    /// Offset the renderer converts times to
    pub fn output_offset(&self) -> Result<FixedOffset> {
        let hours = self.output.utc_offset_hours;
        if !(-14..=14).contains(&hours) {
            return Err(PlannerError::configuration(format!(
                "utc_offset_hours {} is out of range",
                hours
            )));
        }
        FixedOffset::east_opt(hours * 3600).ok_or_else(|| {
            PlannerError::configuration(format!("utc_offset_hours {} is out of range", hours))
        })
    }
}
