//! State Map Plotter Module
//! Filters one year of accidents to a state and renders the locations to PNG.

use crate::config::{DataSource, Year};
use crate::data::{read_accident_file, LoaderError};
use crate::map::states::state_name;
use plotters::prelude::*;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("invalid STATE number: {state} (year {year})")]
    UnknownState { state: u32, year: Year },
    #[error("Failed to render map: {0}")]
    Render(String),
}

/// What `map_state` did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOutcome {
    /// A map was written; `points` accident locations were drawn.
    Rendered { points: usize },
    /// The state had no plottable locations; nothing was written.
    NothingToPlot,
}

/// Normalize one coordinate pair, dropping FARS sentinel values.
///
/// FARS records "location not recorded" as out-of-range magnitudes: any
/// LONGITUD above 900 or LATITUDE above 90 means the pair is missing.
pub fn sanitize_coordinates(lon: f64, lat: f64) -> Option<(f64, f64)> {
    if lon > 900.0 || lat > 90.0 {
        None
    } else {
        Some((lon, lat))
    }
}

/// Plot one state's accident locations for one year.
///
/// Fails if the state number never appears in that year's STATE column. When
/// every matching row has sentinel coordinates there is nothing to draw; the
/// output path is left untouched and [`MapOutcome::NothingToPlot`] is
/// returned.
pub fn map_state(
    source: &DataSource,
    state: u32,
    year: Year,
    output: &Path,
) -> Result<MapOutcome, MapError> {
    let df = read_accident_file(&source.accident_path(year))?;

    let states = df.column("STATE")?.cast(&DataType::Int64)?;
    let present = states
        .i64()?
        .into_iter()
        .flatten()
        .any(|code| code == i64::from(state));
    if !present {
        return Err(MapError::UnknownState { state, year });
    }

    let filtered = df
        .clone()
        .lazy()
        .filter(col("STATE").cast(DataType::Int64).eq(lit(i64::from(state))))
        .collect()?;

    let points = plot_points(&filtered)?;
    if points.is_empty() {
        info!(state, %year, "no accidents to plot");
        return Ok(MapOutcome::NothingToPlot);
    }

    let title = match state_name(state) {
        Some(name) => format!("{name} accidents, {year}"),
        None => format!("State {state} accidents, {year}"),
    };
    render_map(&points, &title, output)?;

    Ok(MapOutcome::Rendered {
        points: points.len(),
    })
}

/// Extract the sanitized (longitude, latitude) pairs from a filtered table.
fn plot_points(df: &DataFrame) -> Result<Vec<(f64, f64)>, PolarsError> {
    let lon = df.column("LONGITUD")?.cast(&DataType::Float64)?;
    let lat = df.column("LATITUDE")?.cast(&DataType::Float64)?;

    let points = lon
        .f64()?
        .into_iter()
        .zip(lat.f64()?)
        .filter_map(|(lon, lat)| sanitize_coordinates(lon?, lat?))
        .collect();
    Ok(points)
}

fn render_map(points: &[(f64, f64)], title: &str, output: &Path) -> Result<(), MapError> {
    let (lon_range, lat_range) = extent(points);

    let root = BitMapBackend::new(output, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| MapError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(lon_range, lat_range)
        .map_err(|e| MapError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .draw()
        .map_err(|e| MapError::Render(e.to_string()))?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(lon, lat)| Circle::new((lon, lat), 3, RED.filled())),
        )
        .map_err(|e| MapError::Render(e.to_string()))?;

    root.present().map_err(|e| MapError::Render(e.to_string()))
}

/// Padded longitude/latitude ranges covering every point.
fn extent(points: &[(f64, f64)]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let mut lon_min = f64::INFINITY;
    let mut lon_max = f64::NEG_INFINITY;
    let mut lat_min = f64::INFINITY;
    let mut lat_max = f64::NEG_INFINITY;

    for &(lon, lat) in points {
        lon_min = lon_min.min(lon);
        lon_max = lon_max.max(lon);
        lat_min = lat_min.min(lat);
        lat_max = lat_max.max(lat);
    }

    let lon_pad = ((lon_max - lon_min) * 0.05).max(0.1);
    let lat_pad = ((lat_max - lat_min) * 0.05).max(0.1);
    (
        lon_min - lon_pad..lon_max + lon_pad,
        lat_min - lat_pad..lat_max + lat_pad,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::write_accident_file;
    use anyhow::Result;

    #[test]
    fn sentinel_values_are_dropped() {
        assert_eq!(sanitize_coordinates(-86.1, 32.4), Some((-86.1, 32.4)));
        assert_eq!(sanitize_coordinates(999.0, 32.4), None);
        assert_eq!(sanitize_coordinates(-86.1, 99.0), None);
        // values at the bounds are real coordinates
        assert_eq!(sanitize_coordinates(900.0, 90.0), Some((900.0, 90.0)));
    }

    #[test]
    fn unknown_state_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let source = DataSource::new(dir.path());
        write_accident_file(&source, Year::new(2013), &[(1, 1, -86.1, 32.4)])?;

        let out = dir.path().join("map.png");
        let err = map_state(&source, 9, Year::new(2013), &out).unwrap_err();
        assert!(matches!(
            err,
            MapError::UnknownState { state: 9, .. }
        ));
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn all_sentinel_rows_plot_nothing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let source = DataSource::new(dir.path());
        write_accident_file(
            &source,
            Year::new(2013),
            &[(1, 1, 999.0, 32.4), (1, 2, -86.1, 99.9)],
        )?;

        let out = dir.path().join("map.png");
        let outcome = map_state(&source, 1, Year::new(2013), &out)?;
        assert_eq!(outcome, MapOutcome::NothingToPlot);
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn renders_only_in_bounds_points_for_the_state() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let source = DataSource::new(dir.path());
        write_accident_file(
            &source,
            Year::new(2014),
            &[
                (1, 1, -86.1, 32.4),
                (1, 2, -87.3, 33.2),
                (1, 3, 999.0, 32.9),  // longitude sentinel
                (1, 4, -86.5, 99.0),  // latitude sentinel
                (6, 1, -120.5, 38.2), // other state
            ],
        )?;

        let out = dir.path().join("map.png");
        let outcome = map_state(&source, 1, Year::new(2014), &out)?;
        assert_eq!(outcome, MapOutcome::Rendered { points: 2 });
        assert!(out.exists());
        assert!(std::fs::metadata(&out)?.len() > 0);
        Ok(())
    }
}
