///! Popularity module
///!
///! Looks up how often a planet has already been observed, which drives the
///! ranking of the surviving transits.

pub mod designation;
pub mod parser;
pub mod client;
pub mod enricher;

pub use designation::Designation;
pub use client::{PlanetPageSource, PopularityClient};
pub use enricher::enrich_candidates;
