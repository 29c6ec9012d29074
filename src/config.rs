use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

/// Stylesheet appended to the bundle when `include_fonts` is set.
pub const FONT_STYLESHEET: &str = "fontawesome/all.min.css";

/// A single page of the site: an identifier and the template that renders
/// it. The identifier doubles as the exported filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    pub template: String,
}

impl Page {
    fn new(name: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
        }
    }
}

/// Static configuration for the whole pipeline, read once at startup.
///
/// The defaults match the conventional site layout (everything under
/// `site/`). A JSON file can override any subset of fields via
/// [`SiteConfig::from_file`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root directory the CSS source paths are resolved against.
    pub styles_dir: PathBuf,
    /// Ordered CSS source list, relative to `styles_dir`. Order matters:
    /// later rules override earlier ones, so no reordering is permitted.
    pub sources: Vec<String>,
    /// Where the bundled, minified CSS blob is written.
    pub bundle_output: PathBuf,
    /// Directory holding the page templates.
    pub templates_dir: PathBuf,
    /// Directory of blog post fragments, one file per post.
    pub posts_dir: PathBuf,
    /// Directory served under `/static`.
    pub assets_dir: PathBuf,
    /// Directory served under `/webfonts`.
    pub webfonts_dir: PathBuf,
    /// The fixed page set.
    pub pages: Vec<Page>,
    /// Render every page once at startup and serve the cached strings,
    /// rather than re-rendering per request.
    pub precompute_pages: bool,
    /// Append the icon-font stylesheet to the bundle.
    pub include_fonts: bool,
    /// `max-age` for the `Cache-Control` header on page routes, in seconds.
    /// `None` disables the header entirely.
    pub cache_control: Option<u64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            styles_dir: PathBuf::from("site/styles"),
            sources: vec![
                "base.css".to_string(),
                "blog.css".to_string(),
                "cv.css".to_string(),
                "navbar.css".to_string(),
                "portfolio.css".to_string(),
            ],
            bundle_output: PathBuf::from("site/styles/gen/packed.css"),
            templates_dir: PathBuf::from("site/templates"),
            posts_dir: PathBuf::from("site/blog"),
            assets_dir: PathBuf::from("site/static"),
            webfonts_dir: PathBuf::from("site/webfonts"),
            pages: vec![
                Page::new("index", "index.html"),
                Page::new("blog", "blog.html"),
                Page::new("portfolio", "portfolio.html"),
                Page::new("cv", "cv.html"),
            ],
            precompute_pages: true,
            include_fonts: false,
            cache_control: Some(3600),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a JSON file. Missing fields fall back to the
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// The CSS source list with the font stylesheet appended when enabled.
    pub fn effective_sources(&self) -> Vec<String> {
        let mut sources = self.sources.clone();
        if self.include_fonts {
            sources.push(FONT_STYLESHEET.to_string());
        }
        sources
    }

    /// Look up a page by name.
    pub fn page(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.name == name)
    }
}
