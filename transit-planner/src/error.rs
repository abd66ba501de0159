//! Error taxonomy for a planning run
//!
//! Every variant aborts the run. Rows that are not transit entries are
//! skipped by the parser and never surface here.

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(thiserror::Error, Debug)]
pub enum PlannerError {
    /// Missing or invalid setting, detected before any network activity
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The transit table could not be fetched
    #[error("Transit table unavailable: {message}")]
    TransitTableUnavailable { message: String },

    /// The transit table no longer has the expected shape
    #[error("Upstream format error: {message}")]
    UpstreamFormat { message: String },

    /// A time/elevation cell did not match the expected pattern
    #[error("Could not parse time text '{fragment}'")]
    UnparsableTimeText { fragment: String },

    /// Begin, center and end of a row are not in chronological order
    #[error("Transit times of '{object}' are not in chronological order")]
    NonChronological { object: String },

    /// The object identifier does not end in a single planet letter
    #[error("Cannot split '{object}' into star and planet: expected '<star> <letter>'")]
    InvalidDesignation { object: String },

    /// The sample count of a surviving candidate could not be obtained
    #[error("Sample count unavailable for '{object}': {message}")]
    EnrichmentUnavailable { object: String, message: String },

    /// Writing the ranked output failed
    #[error("Render error: {message}")]
    Render { message: String },
}

impl PlannerError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn upstream_format(message: impl Into<String>) -> Self {
        Self::UpstreamFormat {
            message: message.into(),
        }
    }

    pub fn unparsable_time(fragment: impl Into<String>) -> Self {
        Self::UnparsableTimeText {
            fragment: fragment.into(),
        }
    }

    pub fn enrichment(object: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EnrichmentUnavailable {
            object: object.into(),
            message: message.into(),
        }
    }
}
