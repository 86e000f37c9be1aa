//! Configuration lookup and command-line overrides.

use std::path::{Path, PathBuf};

use tracing::debug;

use pdfields_core::models::config::PdfFieldsConfig;

use super::batch::BatchArgs;

/// `<config dir>/pdfields/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pdfields")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load(explicit: Option<&str>) -> anyhow::Result<PdfFieldsConfig> {
    if let Some(path) = explicit {
        return PdfFieldsConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using configuration from {}", path.display());
        Ok(PdfFieldsConfig::from_file(&path)?)
    } else {
        Ok(PdfFieldsConfig::default())
    }
}

/// Command-line flags take precedence over file values.
pub fn apply_overrides(config: &mut PdfFieldsConfig, args: &BatchArgs) {
    if let Some(format) = &args.format {
        config.pdf.format = format.clone();
    }
    if let Some(pages) = &args.pages {
        config.pdf.page_range = Some(pages.clone());
    }
    if let Some(password) = &args.password {
        config.pdf.password = Some(password.clone());
    }
    if let Some(encoding) = &args.encoding {
        config.pdf.character_encoding = encoding.clone();
    }
    if args.no_cache {
        config.pdf.caching = false;
    }
    if args.skip_pending {
        config.extraction.skip_pending = true;
    }
    if args.no_text {
        config.output.write_text = false;
    }
    if args.no_json {
        config.output.write_json = false;
    }
    if args.summary {
        config.output.summary = true;
    }
}
