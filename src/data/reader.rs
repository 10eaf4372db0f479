//! Multi-Year Reader Module
//! Reads a batch of yearly accident files, one result per requested year.

use super::loader::{read_accident_file, LoaderError};
use crate::config::{DataSource, Year};
use polars::prelude::*;
use tracing::warn;

/// The outcome of reading one requested year.
///
/// A failed year keeps its slot so that output order matches input order and
/// the caller decides whether to log, collect, or abort.
#[derive(Debug)]
pub struct YearRead {
    pub year: Year,
    pub table: Result<DataFrame, LoaderError>,
}

impl YearRead {
    pub fn is_ok(&self) -> bool {
        self.table.is_ok()
    }

    pub fn ok(&self) -> Option<&DataFrame> {
        self.table.as_ref().ok()
    }
}

/// Read several years of accident data, projected to (MONTH, year) columns.
///
/// Each year is processed independently: a missing or unreadable file is
/// logged as `invalid year: <year>` and recorded in that year's slot without
/// aborting the rest of the batch.
pub fn read_years(source: &DataSource, years: &[Year]) -> Vec<YearRead> {
    years
        .iter()
        .map(|&year| YearRead {
            year,
            table: read_one_year(source, year).inspect_err(|err| {
                warn!("invalid year: {year} ({err})");
            }),
        })
        .collect()
}

fn read_one_year(source: &DataSource, year: Year) -> Result<DataFrame, LoaderError> {
    let df = read_accident_file(&source.accident_path(year))?;

    let month = df.column("MONTH")?.cast(&DataType::Int64)?;
    let year_col = Column::new("year".into(), vec![year.get(); month.len()]);
    let projected = DataFrame::new(vec![month, year_col])?;
    Ok(projected)
}
