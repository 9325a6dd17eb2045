//! CSV record source

use crate::error::{AnalyzerError, Result};
use crate::input::record::RawRecord;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use std::io::Read;
use std::path::Path;
use tokio::fs;

pub const DATE_COLUMN: &str = "date";
pub const TEXT_COLUMN: &str = "text";

/// Loads `(date, text)` rows from a CSV file with a header row
pub struct RecordLoader {
    date_column: String,
    text_column: String,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordLoader {
    pub fn new() -> Self {
        Self {
            date_column: DATE_COLUMN.to_string(),
            text_column: TEXT_COLUMN.to_string(),
        }
    }

    pub async fn load_path(&self, path: &Path) -> Result<Vec<RawRecord>> {
        if !path.exists() {
            return Err(AnalyzerError::Load(format!(
                "Input file does not exist: {}",
                path.display()
            )));
        }

        info!("Reading records from {}", path.display());
        let bytes = fs::read(path).await?;
        let records = self.load_reader(bytes.as_slice())?;
        info!("Loaded {} records from {}", records.len(), path.display());

        Ok(records)
    }

    /// Parse records from any CSV byte source
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<RawRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(AnalyzerError::Load("input has no header row".to_string()));
        }

        let date_idx = self.column_index(&headers, &self.date_column)?;
        let text_idx = self.column_index(&headers, &self.text_column)?;
        debug!("Using columns '{}'={} and '{}'={}", self.date_column, date_idx, self.text_column, text_idx);

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row?;
            let row_number = i + 1;

            let date = row
                .get(date_idx)
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .ok_or_else(|| self.missing_field(row_number, &self.date_column))?;
            let text = row
                .get(text_idx)
                .ok_or_else(|| self.missing_field(row_number, &self.text_column))?;

            records.push(RawRecord::new(date, text));
        }

        Ok(records)
    }

    fn column_index(&self, headers: &StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim().trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| AnalyzerError::Load(format!("missing required column '{}'", name)))
    }

    fn missing_field(&self, row: usize, field: &str) -> AnalyzerError {
        AnalyzerError::Load(format!("row {} is missing required field '{}'", row, field))
    }
}
