//! FARS Data Analysis
//!
//! A Rust library for working with yearly FARS (Fatality Analysis Reporting
//! System) traffic-fatality records: loading bzip2-compressed CSV files,
//! summarizing accident counts by month and year, and rendering accident
//! locations for a single state to a PNG map.

mod config;
mod data;
mod map;
mod summary;

pub use config::{ConfigError, DataSource, Year, YearParseError};
pub use data::{read_accident_file, read_years, LoaderError, YearRead};
pub use map::{map_state, sanitize_coordinates, state_name, MapError, MapOutcome};
pub use summary::{summarize_years, SummaryError};
