//! Transit observation planner
//!
//! Reads the predicted exoplanet transits for an observing site, drops the
//! ones that cannot be observed well, and ranks the rest so the
//! least-observed planets come first.

pub mod config;
pub mod error;
pub mod logging;
pub mod module;
pub mod pipeline;

pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use pipeline::TransitPlanner;
