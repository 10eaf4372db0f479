//! Accident File Loader Module
//! Reads a bzip2-compressed FARS CSV file into a Polars DataFrame.

use bzip2::read::MultiBzDecoder;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("file does not exist: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Load one yearly accident file.
///
/// The path must point at a bzip2-compressed CSV; the schema is inferred, not
/// validated. A missing file is a hard error carrying the attempted path.
pub fn read_accident_file(path: &Path) -> Result<DataFrame, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut decoder = MultiBzDecoder::new(BufReader::new(file));
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes)?;

    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    debug!(path = %path.display(), rows = df.height(), "loaded accident file");
    Ok(df)
}
