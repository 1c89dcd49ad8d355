//! Loading and saving the occupancy extract.

use crate::error::{ParkstatError, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Loader for the raw occupancy CSV.
///
/// Every column is read as a string so sentinel tokens (`-`) and typo
/// artifacts (`1,678`) survive intact for the repair stage. Nothing is
/// validated here; malformed cells surface as coercion errors later in
/// the pipeline.
#[derive(Debug, Clone)]
pub struct DataLoader {
    delimiter: u8,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    /// Create a loader with the default comma delimiter.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a delimited file with a header row into a DataFrame of
    /// string columns.
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ParkstatError::DataError(format!("{}: {e}", path.display())))?;

        let parse_opts = CsvParseOptions::default().with_separator(self.delimiter);

        // Schema inference length 0 forces every column to String.
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(parse_opts)
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| ParkstatError::DataError(e.to_string()))?;

        debug!(rows = df.height(), cols = df.width(), "loaded {}", path.display());
        Ok(df)
    }

    /// Probe a file without loading it fully: header labels and row count.
    pub fn file_info(&self, path: impl AsRef<Path>) -> Result<FileInfo> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header = lines.next().transpose()?.unwrap_or_default();
        let delimiter = self.delimiter as char;
        let columns: Vec<String> = header
            .split(delimiter)
            .map(|s| s.trim().to_string())
            .collect();

        let n_rows = lines.count();

        Ok(FileInfo {
            path: path.display().to_string(),
            file_size: metadata.len(),
            n_rows,
            n_cols: columns.len(),
            columns,
        })
    }
}

/// Cheap summary of a source file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: String,
    pub file_size: u64,
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<String>,
}

/// Writer for the cleaned table.
pub struct DataSaver;

impl DataSaver {
    /// Save a DataFrame to CSV.
    pub fn save_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path.as_ref())?;
        CsvWriter::new(&mut file)
            .finish(df)
            .map_err(|e| ParkstatError::DataError(e.to_string()))
    }
}
