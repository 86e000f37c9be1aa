//! Result sinks that persist extracted statement data.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::SinkError;
use crate::models::statement::{FieldName, FieldOutcome, StatementRecord};
use crate::pdf::RenderFormat;

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;

/// Name of the batch summary written by [`DirectorySink`].
pub const SUMMARY_FILE: &str = "summary.csv";

/// Separator between multiple values in one summary cell.
const VALUE_SEPARATOR: &str = " | ";

/// Destination for processed statements.
pub trait ResultSink {
    /// Persist one statement and its rendered content.
    fn write(&mut self, record: &StatementRecord, rendered: &str) -> Result<()>;

    /// Flush anything buffered for the whole batch.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes rendered text, JSON records and an optional summary into a directory.
pub struct DirectorySink {
    dir: PathBuf,
    encoding: &'static Encoding,
    write_text: bool,
    write_json: bool,
    summary: bool,
    records: Vec<StatementRecord>,
}

impl DirectorySink {
    /// Create a sink writing UTF-8 text and JSON records into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            encoding: encoding_rs::UTF_8,
            write_text: true,
            write_json: true,
            summary: false,
            records: Vec::new(),
        }
    }

    /// Set the encoding rendered text is written in.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_text(mut self, enabled: bool) -> Self {
        self.write_text = enabled;
        self
    }

    pub fn with_json(mut self, enabled: bool) -> Self {
        self.write_json = enabled;
        self
    }

    pub fn with_summary(mut self, enabled: bool) -> Self {
        self.summary = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_file(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, bytes).map_err(|source| SinkError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote output to {}", path.display());
        Ok(())
    }

    fn write_summary(&self) -> Result<()> {
        let path = self.dir.join(SUMMARY_FILE);
        let mut wtr = csv::Writer::from_path(&path)?;

        let mut header = vec!["filename", "pages", "characters"];
        header.extend(FieldName::ALL.iter().map(FieldName::as_str));
        wtr.write_record(&header)?;

        for record in &self.records {
            let mut row = vec![
                record.file_name.clone(),
                record.page_count.to_string(),
                record.char_count.to_string(),
            ];
            for field in FieldName::ALL {
                let cell = match record.fields.get(field) {
                    Some(FieldOutcome::Matches(values)) => values.join(VALUE_SEPARATOR),
                    Some(FieldOutcome::Pending) => "PENDING".to_string(),
                    None => String::new(),
                };
                row.push(cell);
            }
            wtr.write_record(&row)?;
        }

        wtr.flush().map_err(|source| SinkError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote summary of {} statements to {}", self.records.len(), path.display());
        Ok(())
    }
}

impl ResultSink for DirectorySink {
    fn write(&mut self, record: &StatementRecord, rendered: &str) -> Result<()> {
        let stem = record.stem();

        if self.write_text {
            let (bytes, _, _) = self.encoding.encode(rendered);
            self.write_file(&text_file_name(stem, record.format), &bytes)?;
        }

        if self.write_json {
            let json = serde_json::to_string_pretty(record)?;
            self.write_file(&format!("{}.json", stem), json.as_bytes())?;
        }

        if self.summary {
            self.records.push(record.clone());
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.summary {
            self.write_summary()?;
        }
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<StatementRecord>,
    pub rendered: Vec<String>,
    pub finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultSink for MemorySink {
    fn write(&mut self, record: &StatementRecord, rendered: &str) -> Result<()> {
        self.records.push(record.clone());
        self.rendered.push(rendered.to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// File name the rendered text of `stem` is written under.
pub fn text_file_name(stem: &str, format: RenderFormat) -> String {
    format!("{}.{}", stem, format.extension())
}
