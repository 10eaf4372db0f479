//! Data Source Configuration Module
//! Locates yearly accident files under an explicitly configured directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
#[error("not a valid year: {input:?}")]
pub struct YearParseError {
    pub input: String,
}

/// A calendar year identifying one FARS accident file.
///
/// Built from an integer or a numeric string; `Year::new(2013)` and
/// `"2013".parse()` are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(i32);

impl Year {
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for Year {
    fn from(year: i32) -> Self {
        Self(year)
    }
}

impl FromStr for Year {
    type Err = YearParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(Year).map_err(|_| YearParseError {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where the yearly accident files live.
///
/// Passed explicitly to every operation instead of relying on a process-wide
/// bundled data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    data_dir: PathBuf,
}

impl DataSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load a data source from a JSON settings file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let source = serde_json::from_reader(BufReader::new(file))?;
        Ok(source)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Build the path of the accident file for one year:
    /// `<data_dir>/accident_<year>.csv.bz2`. Does not touch the filesystem.
    pub fn accident_path(&self, year: Year) -> PathBuf {
        self.data_dir.join(format!("accident_{year}.csv.bz2"))
    }
}
