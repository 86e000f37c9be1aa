//! Batch driver: resolve the input folder, render every statement, extract
//! fields and hand the results to a sink.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{Result, UsageError};
use crate::models::config::PdfFieldsConfig;
use crate::models::statement::StatementRecord;
use crate::pdf::{ConvertOptions, PdfConverter, PdfRenderer};
use crate::scan::{ensure_dir, DirectoryScanner};
use crate::sink::ResultSink;
use crate::statement::{RuleStatementParser, StatementParser};

/// Number of positional arguments a run takes.
pub const POSITIONAL_ARGS: usize = 2;

/// Usage text printed when the positional arguments are wrong.
pub fn usage(program: &str) -> String {
    format!(
        "Usage : {} input output\n\
         input is the folder that contains the pdfs you want to convert\n\
         output is the folder that the output will be extracted to",
        program
    )
}

/// The input and output folders of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Folder holding the statements, as typed by the user.
    pub input: String,
    /// Folder results are written to.
    pub output: PathBuf,
}

impl Invocation {
    /// Build from positional arguments (program name excluded).
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> std::result::Result<Self, UsageError> {
        match args {
            [input, output] => Ok(Self {
                input: input.as_ref().to_string(),
                output: PathBuf::from(output.as_ref()),
            }),
            _ => Err(UsageError {
                expected: POSITIONAL_ARGS,
                actual: args.len(),
            }),
        }
    }
}

/// Progress notification sent after each statement.
#[derive(Debug, Clone, Copy)]
pub struct FileProgress<'a> {
    /// 1-based position in the batch.
    pub index: usize,
    pub total: usize,
    pub file_name: &'a str,
    pub ok: bool,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Directory the statements were read from.
    pub input_dir: PathBuf,
    /// PDFs found in the input directory.
    pub discovered: usize,
    /// Statements written to the sink.
    pub processed: usize,
    /// Skipped statements and their errors (continue-on-error only).
    pub failures: Vec<(String, String)>,
}

/// Sequential statement pipeline.
pub struct Pipeline<R = PdfConverter, P = RuleStatementParser> {
    renderer: R,
    parser: P,
    scanner: DirectoryScanner,
    options: ConvertOptions,
    continue_on_error: bool,
}

impl Pipeline {
    /// Pipeline with the default converter and rule parser, configured from `config`.
    pub fn from_config(config: &PdfFieldsConfig) -> Result<Self> {
        let options = config.pdf.convert_options()?;
        let parser = RuleStatementParser::new().with_skip_pending(config.extraction.skip_pending);
        Ok(Self::new(PdfConverter::new(), parser, options))
    }
}

impl<R: PdfRenderer, P: StatementParser> Pipeline<R, P> {
    pub fn new(renderer: R, parser: P, options: ConvertOptions) -> Self {
        Self {
            renderer,
            parser,
            scanner: DirectoryScanner::new(),
            options,
            continue_on_error: false,
        }
    }

    /// Replace the directory scanner.
    pub fn with_scanner(mut self, scanner: DirectoryScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Record failing statements and keep going instead of aborting.
    pub fn with_continue_on_error(mut self, enabled: bool) -> Self {
        self.continue_on_error = enabled;
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Render one statement and extract its fields.
    pub fn process_file(&self, path: &Path) -> Result<(StatementRecord, String)> {
        let start = Instant::now();
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("statement.pdf")
            .to_string();

        let rendered = self.renderer.render(path, &self.options)?;
        let fields = self.parser.parse(&rendered.text);

        let record = StatementRecord {
            file_name,
            path: path.to_path_buf(),
            page_count: rendered.page_count,
            pages: rendered.pages,
            format: self.options.format,
            char_count: rendered.content.chars().count(),
            fields,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };
        debug!(
            "{}: {} fields, {} matches in {}ms",
            record.file_name,
            record.fields.len(),
            record.fields.match_count(),
            record.processing_time_ms
        );
        Ok((record, rendered.content))
    }

    /// Run the whole batch.
    pub fn run<S: ResultSink + ?Sized>(&self, invocation: &Invocation, sink: &mut S) -> Result<BatchReport> {
        self.run_with_progress(invocation, sink, |_| {})
    }

    /// Run the whole batch, calling `on_file` after each statement.
    pub fn run_with_progress<S, F>(
        &self,
        invocation: &Invocation,
        sink: &mut S,
        mut on_file: F,
    ) -> Result<BatchReport>
    where
        S: ResultSink + ?Sized,
        F: FnMut(FileProgress<'_>),
    {
        let listing = self.scanner.scan(&invocation.input)?;
        ensure_dir(&invocation.output)?;

        info!(
            "Found {} PDF files in {}",
            listing.len(),
            listing.dir.display()
        );

        let mut report = BatchReport {
            input_dir: listing.dir.clone(),
            discovered: listing.len(),
            ..BatchReport::default()
        };

        for (i, (name, path)) in listing.names.iter().zip(listing.paths()).enumerate() {
            let outcome = self.process_file(&path);
            let ok = outcome.is_ok();

            match outcome {
                Ok((record, content)) => {
                    sink.write(&record, &content)?;
                    report.processed += 1;
                }
                Err(e) if self.continue_on_error => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    report.failures.push((name.clone(), e.to_string()));
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    return Err(e);
                }
            }

            on_file(FileProgress {
                index: i + 1,
                total: listing.len(),
                file_name: name,
                ok,
            });
        }

        sink.finish()?;
        info!(
            "Processed {}/{} statements ({} failed)",
            report.processed,
            report.discovered,
            report.failures.len()
        );
        Ok(report)
    }
}
