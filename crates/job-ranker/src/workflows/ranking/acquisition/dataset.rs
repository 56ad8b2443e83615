use super::{PostingSource, SourceError};
use crate::workflows::ranking::domain::SearchRequest;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Encoding of an exported scraper dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl DatasetFormat {
    /// Guess the format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Source that replays a dataset exported from the scraping provider.
#[derive(Debug, Clone)]
pub struct DatasetPostingSource {
    path: PathBuf,
    format: DatasetFormat,
}

impl DatasetPostingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DatasetFormat::from_path(&path);
        Self { path, format }
    }

    pub fn with_format(path: impl Into<PathBuf>, format: DatasetFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DatasetFormat {
        self.format
    }
}

impl PostingSource for DatasetPostingSource {
    fn fetch(&self, request: &SearchRequest) -> Result<Vec<Value>, SourceError> {
        let file = File::open(&self.path)?;
        let mut records = read_records(BufReader::new(file), self.format)?;
        records.truncate(request.rows as usize);
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "loaded posting dataset"
        );
        Ok(records)
    }
}

/// Decode a dataset export into raw records without interpreting them.
pub fn read_records<R: Read>(reader: R, format: DatasetFormat) -> Result<Vec<Value>, SourceError> {
    match format {
        DatasetFormat::Json => Ok(serde_json::from_reader::<_, Vec<Value>>(reader)?),
        DatasetFormat::Csv => read_csv_records(reader),
    }
}

fn read_csv_records<R: Read>(reader: R) -> Result<Vec<Value>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<BTreeMap<String, String>>() {
        let row = row?;
        let object: Map<String, Value> = row
            .into_iter()
            .filter(|(column, value)| !(is_optional_column(column) && value.is_empty()))
            .map(|(column, value)| (column, Value::String(value)))
            .collect();
        records.push(Value::Object(object));
    }

    Ok(records)
}

fn is_optional_column(column: &str) -> bool {
    matches!(column, "description" | "salary")
}
