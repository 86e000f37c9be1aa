//! Input discovery and output directory handling.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ScanError;

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Suffix that marks a file as a statement to process.
pub const PDF_SUFFIX: &str = ".pdf";

/// PDF files found in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfListing {
    /// Directory the names are relative to.
    pub dir: PathBuf,
    /// File names ending in `.pdf`, sorted.
    pub names: Vec<String>,
}

impl PdfListing {
    /// Full paths of the listed files.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.names.iter().map(|name| self.dir.join(name))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// Resolves input folders and lists the PDFs inside them.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    working_dir: Option<PathBuf>,
}

impl DirectoryScanner {
    /// Create a scanner that falls back to the process working directory.
    pub fn new() -> Self {
        Self { working_dir: None }
    }

    /// Use `dir` instead of the process working directory for the fallback lookup.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// List `.pdf` entries of `folder`, trying the name as given and then
    /// relative to the working directory.
    pub fn scan(&self, folder: &str) -> Result<PdfListing> {
        let not_found = || ScanError::DirectoryNotFound(folder.to_string());

        match list_pdfs(Path::new(folder)) {
            Ok(names) => {
                return Ok(PdfListing {
                    dir: PathBuf::from(folder),
                    names,
                });
            }
            Err(e) => debug!("{} not readable as given: {}", folder, e),
        }

        let working_dir = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|_| not_found())?,
        };
        let dir = working_dir.join(folder);

        match list_pdfs(&dir) {
            Ok(names) => Ok(PdfListing { dir, names }),
            Err(e) => {
                debug!("{} not readable: {}", dir.display(), e);
                Err(not_found())
            }
        }
    }
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn list_pdfs(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!("Skipping non UTF-8 file name in {}", dir.display());
            continue;
        };
        if !name.ends_with(PDF_SUFFIX) {
            continue;
        }
        if entry.file_type()?.is_dir() {
            debug!("Skipping directory {}", name);
            continue;
        }
        names.push(name);
    }

    names.sort();
    debug!("Found {} PDF files in {}", names.len(), dir.display());
    Ok(names)
}

/// Create `path` and any missing parents. Existing directories are left untouched.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(ScanError::NotADirectory(path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|source| ScanError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Created output directory {}", path.display());
    Ok(())
}
