//! Tabular input layer
//!
//! The reader module turns the two CSV inputs into typed, immutable values for
//! the rest of the pipeline.
//!
//! # Architecture
//!
//! All table sources implement the `Reader` trait, which yields a Polars
//! DataFrame. On top of that:
//! - [`reference`] builds the country lookup (name → code, code → priority)
//! - [`projects`] maps, sorts and filters the project roster
//!
//! # Example
//!
//! ```rust,ignore
//! use project_heatmap::reader::{CsvFileReader, CountryReference, NormalizedProjects};
//!
//! let reference = CountryReference::load(&CsvFileReader::new("countries.csv"), &columns)?;
//! let projects = NormalizedProjects::load(&CsvFileReader::new("projects_anon.csv"), &reference, &project_columns)?;
//! ```

use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::{HeatmapError, Result};

pub mod data;
pub mod projects;
pub mod reference;

pub use projects::{NormalizedProjects, COUNTRY_CODE};
pub use reference::CountryReference;

/// Trait for table sources
///
/// Readers produce the raw table. Column checks and typing happen in the
/// loaders so every source is validated the same way.
pub trait Reader {
    /// Read the whole table into a DataFrame
    fn read(&self) -> Result<DataFrame>;

    /// Human readable name used in error messages
    fn describe(&self) -> String;
}

/// Reads a CSV file with a header row
#[derive(Debug, Clone)]
pub struct CsvFileReader {
    path: PathBuf,
}

impl CsvFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reader for CsvFileReader {
    fn read(&self) -> Result<DataFrame> {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .and_then(|reader| reader.finish())
            .map_err(|e| {
                HeatmapError::ReaderError(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    e
                ))
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory frame is its own source
impl Reader for DataFrame {
    fn read(&self) -> Result<DataFrame> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        "<in-memory frame>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_csv_reader_reads_header_and_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "country,code,priority").unwrap();
        writeln!(file, "Kenya,KEN,1").unwrap();
        writeln!(file, "Nigeria,NGA,0").unwrap();
        file.flush().unwrap();

        let df = CsvFileReader::new(file.path()).read().unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("code").is_ok());
    }

    #[test]
    fn test_csv_reader_missing_file() {
        let result = CsvFileReader::new("/definitely/not/here.csv").read();
        assert!(matches!(result, Err(HeatmapError::ReaderError(_))));
    }

    #[test]
    fn test_dataframe_reader_clones() {
        let df = df! { "a" => [1i64, 2, 3] }.unwrap();
        let read = df.read().unwrap();
        assert!(read.equals(&df));
    }
}
