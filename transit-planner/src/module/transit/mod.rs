///! Transit table module
///!
///! Fetches the predicted transit table, parses it into candidates and
///! filters out the ones that cannot be observed.

pub mod types;
pub mod time_parser;
pub mod parser;
pub mod filter;
pub mod client;

pub use types::{Moment, TransitCandidate};
pub use filter::{FilterThresholds, TransitFilter, apply_filters};
pub use client::{TransitTableClient, TransitTableSource};
