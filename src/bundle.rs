use std::path::{Path, PathBuf};

use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};

use crate::config::SiteConfig;
use crate::error::SiteError;

/// Bundles an ordered list of CSS files into one minified blob.
///
/// Each source is minified on its own and the results are concatenated in
/// the configured order, so the cascade is preserved exactly. The operation
/// is idempotent: unchanged inputs produce byte-identical output.
pub struct Bundler {
    styles_dir: PathBuf,
    sources: Vec<String>,
}

impl Bundler {
    pub fn new(styles_dir: impl Into<PathBuf>, sources: Vec<String>) -> Self {
        Self {
            styles_dir: styles_dir.into(),
            sources,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.styles_dir.clone(), config.effective_sources())
    }

    /// Read, minify, and concatenate every source, in order.
    pub fn bundle(&self) -> Result<String, SiteError> {
        let mut bundled = String::new();
        for source in &self.sources {
            let path = self.styles_dir.join(source);
            let raw = std::fs::read_to_string(&path).map_err(|e| SiteError::MissingSource {
                path: path.clone(),
                source: e,
            })?;
            bundled.push_str(&minify(&path, &raw)?);
        }
        Ok(bundled)
    }

    /// Bundle and write the blob to `output`, returning the same text for
    /// in-memory use. The blob is assembled fully before the write, so a
    /// failing source never leaves a partial file behind.
    pub fn bundle_to(&self, output: &Path) -> Result<String, SiteError> {
        let bundled = self.bundle()?;
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output, &bundled)?;
        tracing::debug!("Wrote {} bytes of CSS to {}", bundled.len(), output.display());
        Ok(bundled)
    }
}

fn minify(path: &Path, raw: &str) -> Result<String, SiteError> {
    let invalid = |message: String| SiteError::InvalidSyntax {
        path: path.to_path_buf(),
        message,
    };

    let mut stylesheet =
        StyleSheet::parse(raw, ParserOptions::default()).map_err(|e| invalid(e.to_string()))?;
    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| invalid(e.to_string()))?;
    let output = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| invalid(e.to_string()))?;

    Ok(output.code)
}
