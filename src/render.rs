use std::path::Path;

use tera::{Context, Tera};

use crate::error::SiteError;

/// Renders named templates against a fixed base context.
///
/// Templates are loaded from disk exactly once; every page shares the same
/// base context carrying the bundled CSS under the `css` key. Rendering is a
/// pure function of (template content, context), so repeated calls with the
/// same inputs produce byte-identical output.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
    base: Context,
}

impl Renderer {
    /// Load every template under `templates_dir` and fix the CSS context.
    pub fn load(templates_dir: &Path, css: &str) -> Result<Self, SiteError> {
        let glob = format!("{}/*.html", templates_dir.display());
        let tera = Tera::new(&glob).map_err(|e| SiteError::TemplateLoad(e.to_string()))?;
        let mut base = Context::new();
        base.insert("css", css);
        Ok(Self { tera, base })
    }

    /// Render a page template with the base context.
    pub fn render(&self, template: &str) -> Result<String, SiteError> {
        self.render_with(template, &self.base)
    }

    /// Render a blog post template: the base context plus the post body
    /// under the `post` key.
    pub fn render_post(&self, template: &str, post_html: &str) -> Result<String, SiteError> {
        let mut context = self.base.clone();
        context.insert("post", post_html);
        self.render_with(template, &context)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    fn render_with(&self, template: &str, context: &Context) -> Result<String, SiteError> {
        self.tera
            .render(template, context)
            .map_err(|e| map_tera_error(template, e))
    }
}

/// Fold tera's error type onto the pipeline taxonomy. A missing variable
/// only shows up in the error's source chain, so the chain is flattened
/// before classifying.
fn map_tera_error(template: &str, error: tera::Error) -> SiteError {
    if let tera::ErrorKind::TemplateNotFound(name) = &error.kind {
        return SiteError::TemplateNotFound { name: name.clone() };
    }

    let mut detail = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(inner) = source {
        detail.push_str(": ");
        detail.push_str(&inner.to_string());
        source = inner.source();
    }

    if detail.contains("not found in context") {
        SiteError::MissingContext {
            template: template.to_string(),
            detail,
        }
    } else {
        SiteError::Render {
            template: template.to_string(),
            detail,
        }
    }
}
