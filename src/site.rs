use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::bundle::Bundler;
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::render::Renderer;

/// Template used for individual blog posts.
const POST_TEMPLATE: &str = "blog_post.html";

/// The immutable "compute once, serve many" state of the site.
///
/// Built exactly once at startup (or per build invocation): the CSS bundle
/// is produced and written, templates are loaded and validated against the
/// configured page set, and blog posts are rendered. Nothing here mutates
/// afterwards, so the serving layer can share it freely across requests
/// without locking.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    css: String,
    renderer: Renderer,
    /// Rendered pages by name, when `precompute_pages` is set.
    pages: Option<HashMap<String, String>>,
    /// Rendered blog posts by slug. BTreeMap keeps export order stable.
    posts: BTreeMap<String, String>,
}

impl Site {
    /// Run the whole pipeline: bundle CSS, load templates, render posts,
    /// and (optionally) precompute every page.
    ///
    /// Any failure here is fatal: the process must not begin serving with
    /// an incomplete page set.
    pub fn build(config: SiteConfig) -> Result<Self, SiteError> {
        tracing::info!("Bundling {} stylesheets", config.effective_sources().len());
        let bundler = Bundler::from_config(&config);
        let css = bundler.bundle_to(&config.bundle_output)?;

        let renderer = Renderer::load(&config.templates_dir, &css)?;

        // Every configured page must resolve to a template before serving.
        for page in &config.pages {
            if !renderer.has_template(&page.template) {
                return Err(SiteError::TemplateNotFound {
                    name: page.template.clone(),
                });
            }
        }

        let posts = render_posts(&config, &renderer)?;

        let pages = if config.precompute_pages {
            let mut rendered = HashMap::new();
            for page in &config.pages {
                rendered.insert(page.name.clone(), renderer.render(&page.template)?);
            }
            tracing::info!("Precomputed {} pages", rendered.len());
            Some(rendered)
        } else {
            None
        };

        Ok(Self {
            config,
            css,
            renderer,
            pages,
            posts,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    /// The HTML for a named page: the precomputed string when available,
    /// otherwise a fresh render against the same immutable inputs. Both
    /// paths produce identical bytes.
    pub fn page(&self, name: &str) -> Result<String, SiteError> {
        let page = self
            .config
            .page(name)
            .ok_or_else(|| SiteError::TemplateNotFound {
                name: name.to_string(),
            })?;

        if let Some(pages) = &self.pages {
            // Validated at build time, so the entry is always present.
            if let Some(html) = pages.get(name) {
                return Ok(html.clone());
            }
        }
        self.renderer.render(&page.template)
    }

    /// The rendered HTML for a blog post, by slug.
    pub fn post(&self, slug: &str) -> Option<&str> {
        self.posts.get(slug).map(String::as_str)
    }

    /// Static export mode: write one extension-less file per page and one
    /// file per blog post under `posts/`. Deterministic: two runs over an
    /// unchanged source tree produce byte-identical files.
    pub fn export(&self, out: &Path) -> Result<(), SiteError> {
        std::fs::create_dir_all(out)?;

        for page in &self.config.pages {
            let html = self.page(&page.name)?;
            std::fs::write(out.join(&page.name), html)?;
        }

        if !self.posts.is_empty() {
            let posts_dir = out.join("posts");
            std::fs::create_dir_all(&posts_dir)?;
            for (slug, html) in &self.posts {
                std::fs::write(posts_dir.join(slug), html)?;
            }
        }

        tracing::info!(
            "Exported {} pages and {} posts to {}",
            self.config.pages.len(),
            self.posts.len(),
            out.display()
        );
        Ok(())
    }
}

/// Render every file in the posts directory through the post template.
/// A missing directory just means the site has no posts.
fn render_posts(config: &SiteConfig, renderer: &Renderer) -> Result<BTreeMap<String, String>, SiteError> {
    let mut posts = BTreeMap::new();
    if !config.posts_dir.is_dir() {
        return Ok(posts);
    }

    let mut paths: Vec<_> = std::fs::read_dir(&config.posts_dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Ok(posts);
    }
    if !renderer.has_template(POST_TEMPLATE) {
        return Err(SiteError::TemplateNotFound {
            name: POST_TEMPLATE.to_string(),
        });
    }

    for path in paths {
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = std::fs::read_to_string(&path).map_err(|e| SiteError::MissingSource {
            path: path.clone(),
            source: e,
        })?;
        posts.insert(slug.to_string(), renderer.render_post(POST_TEMPLATE, &content)?);
    }

    Ok(posts)
}
