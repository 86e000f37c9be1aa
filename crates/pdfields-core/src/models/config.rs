//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::pdf::{ConvertOptions, PageRange, RenderFormat};

/// Main configuration for the pdfields pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfFieldsConfig {
    /// PDF rendering configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output sink configuration.
    pub output: OutputConfig,
}

/// PDF rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Rendering format: "text", "html" or "xml".
    pub format: String,

    /// Page selection such as "1-3,5" (None = all pages).
    pub page_range: Option<String>,

    /// Reuse the parsed document for every page.
    pub caching: bool,

    /// Password for encrypted statements.
    pub password: Option<String>,

    /// Encoding label for rendered text.
    pub character_encoding: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            page_range: None,
            caching: true,
            password: None,
            character_encoding: "utf-8".to_string(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Leave placeholder fields out of the result instead of reporting them as pending.
    pub skip_pending: bool,
}

/// Output sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write the rendered text of each statement.
    pub write_text: bool,

    /// Write a JSON record per statement.
    pub write_json: bool,

    /// Write summary.csv after the batch.
    pub summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_text: true,
            write_json: true,
            summary: false,
        }
    }
}

impl PdfConfig {
    /// Build converter options, validating format, page range and encoding.
    pub fn convert_options(&self) -> crate::Result<ConvertOptions> {
        let format: RenderFormat = self.format.parse()?;
        let page_range = self
            .page_range
            .as_deref()
            .map(str::parse::<PageRange>)
            .transpose()?;

        let options = ConvertOptions {
            format,
            page_range,
            caching: self.caching,
            password: self.password.clone(),
            character_encoding: self.character_encoding.clone(),
        };
        options.encoding()?;
        Ok(options)
    }
}

impl PdfFieldsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
