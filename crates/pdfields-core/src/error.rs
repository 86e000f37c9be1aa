//! Error types for the pdfields-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the pdfields library.
#[derive(Error, Debug)]
pub enum PdfFieldsError {
    /// Wrong command-line usage.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Directory resolution error.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Result sink error.
    #[error("output error: {0}")]
    Sink(#[from] SinkError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// The program was invoked with the wrong number of positional arguments.
#[derive(Error, Debug)]
#[error("expected {expected} arguments, got {actual}: please restart the program with the correct arguments")]
pub struct UsageError {
    pub expected: usize,
    pub actual: usize,
}

/// Errors related to locating input and output directories.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The folder resolved neither as given nor relative to the working directory.
    #[error("directory {0} could not be found")]
    DirectoryNotFound(String),

    /// The path exists but is not a directory.
    #[error("{} exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The output directory could not be created.
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to PDF rendering.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Unknown rendering format selector.
    #[error("invalid format {0:?}: provide format, either text, html or xml")]
    InvalidFormat(String),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and the password did not open it.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Page number outside the document.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Page selection could not be parsed.
    #[error("invalid page range {0:?}")]
    InvalidPageRange(String),

    /// Character encoding label not recognized.
    #[error("unsupported character encoding: {0}")]
    UnsupportedEncoding(String),
}

/// Errors related to statement field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The pattern failed to compile.
    #[error("invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while persisting extraction results.
#[derive(Error, Debug)]
pub enum SinkError {
    /// JSON serialization failed.
    #[error("failed to serialize record: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV summary could not be written.
    #[error("failed to write summary: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying file write failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the pdfields library.
pub type Result<T> = std::result::Result<T, PdfFieldsError>;
