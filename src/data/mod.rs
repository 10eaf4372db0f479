//! Data module - accident file loading and multi-year reading

mod loader;
mod reader;

pub use loader::{read_accident_file, LoaderError};
pub use reader::{read_years, YearRead};
