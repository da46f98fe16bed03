//! Dataset loading.
//!
//! Reads the delimited music metadata file into an in-memory table: the original rows, in file
//! order, as field-named value maps, plus a numeric-only feature matrix over the required
//! columns. Nothing here is mutated after load.

use crate::error::SoundscapeError;

use std::io::Read;
use std::path::Path;

use ndarray::Array2;
use serde_json::Value;

/// The numeric feature columns every dataset must provide, in the order used by the feature
/// matrix and by all derived artifacts.
pub const FEATURE_COLUMNS: [&str; 14] = [
    "release_year",
    "followers",
    "artist_popularity",
    "song_popularity",
    "duration_sec",
    "acousticness",
    "danceability",
    "energy",
    "instrumentalness",
    "liveness",
    "loudness",
    "speechiness",
    "valence",
    "tempo",
];

/// One dataset row as a field-named mapping, covering all original columns.
pub type Row = serde_json::Map<String, Value>;

/// An immutable, fully parsed dataset.
#[derive(Debug)]
pub struct Dataset {
    /// Column names in header order.
    columns: Vec<String>,

    /// All rows in file order, with cells in their literal textual or numeric form.
    rows: Vec<Row>,

    /// Numeric projection of all rows onto [FEATURE_COLUMNS], one row per record.
    features: Array2<f64>,
}

impl Dataset {
    /// Load a dataset from a CSV file with a header row.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SoundscapeError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path.as_ref())
            .map_err(|source| SoundscapeError::DatasetRead {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        Self::from_csv(reader)
    }

    /// Load a dataset from any reader producing CSV with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SoundscapeError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, SoundscapeError> {
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        // Resolve the position of each required feature column, reporting all absences at once.
        let mut feature_indices = Vec::with_capacity(FEATURE_COLUMNS.len());
        let mut missing = Vec::new();
        for name in FEATURE_COLUMNS {
            match columns.iter().position(|column| column == name) {
                Some(index) => feature_indices.push(index),
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(SoundscapeError::MissingColumns { columns: missing });
        }

        let mut rows = Vec::new();
        let mut feature_cells = Vec::new();
        for (row_index, record) in reader.records().enumerate() {
            let record = record?;
            let mut row = Row::new();
            for (column, cell) in columns.iter().zip(record.iter()) {
                row.insert(column.clone(), literal_value(cell));
            }
            for (&index, &column) in feature_indices.iter().zip(FEATURE_COLUMNS.iter()) {
                let cell = record.get(index).unwrap_or_default();
                let parsed: f64 = cell.trim().parse().map_err(|_| {
                    SoundscapeError::InvalidNumeric {
                        column: column.to_string(),
                        row: row_index,
                        value: cell.to_string(),
                    }
                })?;
                feature_cells.push(parsed);
            }
            rows.push(row);
        }
        if rows.is_empty() {
            return Err(SoundscapeError::EmptyDataset);
        }

        let mut features = Array2::zeros((rows.len(), FEATURE_COLUMNS.len()));
        for (i, cell) in feature_cells.into_iter().enumerate() {
            features[[i / FEATURE_COLUMNS.len(), i % FEATURE_COLUMNS.len()]] = cell;
        }

        Ok(Self {
            columns,
            rows,
            features,
        })
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset holds no rows. Never true for a loaded dataset.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The numeric feature matrix, one row per record, one column per entry of
    /// [FEATURE_COLUMNS].
    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }
}

/// Parse a cell into its literal JSON form: integer, then float, then string.
fn literal_value(cell: &str) -> Value {
    let trimmed = cell.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(cell.to_string())
}
