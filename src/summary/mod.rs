//! Summary module - month-by-year accident counts.

use crate::config::{DataSource, Year};
use crate::data::read_years;
use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("no data loaded for any requested year")]
    NoData,
}

/// Count accidents per (month, year) and pivot years into columns.
///
/// Output columns: MONTH (ascending), then one UInt32 count column per
/// successfully-read year in ascending year order. Months absent from a year
/// count as zero. Years that fail to load contribute no rows; if every year
/// fails the result is [`SummaryError::NoData`].
pub fn summarize_years(source: &DataSource, years: &[Year]) -> Result<DataFrame, SummaryError> {
    let reads = read_years(source, years);

    // counts[month][year] = rows in that group
    let mut counts: BTreeMap<i64, BTreeMap<Year, u32>> = BTreeMap::new();
    let mut loaded_years: BTreeSet<Year> = BTreeSet::new();

    for read in &reads {
        let Some(df) = read.ok() else { continue };
        loaded_years.insert(read.year);

        let months = df.column("MONTH")?.i64()?;
        for month in months.into_iter().flatten() {
            *counts
                .entry(month)
                .or_default()
                .entry(read.year)
                .or_insert(0) += 1;
        }
    }

    if loaded_years.is_empty() {
        return Err(SummaryError::NoData);
    }

    let months: Vec<i64> = counts.keys().copied().collect();
    let mut columns = vec![Column::new("MONTH".into(), months.clone())];
    for &year in &loaded_years {
        let per_month: Vec<u32> = months
            .iter()
            .map(|month| counts[month].get(&year).copied().unwrap_or(0))
            .collect();
        columns.push(Column::new(year.to_string().into(), per_month));
    }

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::write_accident_file;
    use anyhow::Result;

    #[test]
    fn single_year_counts_match_file_contents() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let source = DataSource::new(dir.path());
        // 5 rows over 3 distinct months
        write_accident_file(
            &source,
            Year::new(2013),
            &[
                (1, 1, -86.1, 32.4),
                (1, 1, -86.2, 32.5),
                (1, 3, -87.0, 33.1),
                (6, 3, -120.5, 38.2),
                (6, 11, -121.0, 37.9),
            ],
        )?;

        let summary = summarize_years(&source, &[Year::new(2013)])?;
        assert_eq!(summary.height(), 3);

        let months = summary.column("MONTH")?.i64()?;
        let collected: Vec<i64> = months.into_iter().flatten().collect();
        assert_eq!(collected, vec![1, 3, 11]);

        let counts = summary.column("2013")?.u32()?;
        assert_eq!(counts.into_iter().flatten().sum::<u32>(), 5);
        Ok(())
    }

    #[test]
    fn failed_year_contributes_no_column() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let source = DataSource::new(dir.path());
        write_accident_file(&source, Year::new(2014), &[(1, 2, -86.1, 32.4)])?;
        write_accident_file(
            &source,
            Year::new(2015),
            &[(1, 2, -86.3, 32.6), (1, 4, -86.4, 32.7)],
        )?;

        let years: Vec<Year> = (2013..=2015).map(Year::new).collect();
        let summary = summarize_years(&source, &years)?;

        let names: Vec<String> = summary
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["MONTH", "2014", "2015"]);

        // month 4 appears only in 2015, so 2014 holds a zero there
        let months: Vec<i64> = summary.column("MONTH")?.i64()?.into_iter().flatten().collect();
        assert_eq!(months, vec![2, 4]);
        let counts_2014: Vec<u32> = summary.column("2014")?.u32()?.into_iter().flatten().collect();
        assert_eq!(counts_2014, vec![1, 0]);
        Ok(())
    }

    #[test]
    fn all_years_missing_is_no_data() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = DataSource::new(dir.path());
        let err = summarize_years(&source, &[Year::new(2012)]).unwrap_err();
        assert!(matches!(err, SummaryError::NoData));
    }
}
