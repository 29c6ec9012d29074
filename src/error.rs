use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the build pipeline.
///
/// All of these are fatal at startup: the process must not begin serving
/// with an incomplete page set, so the binary exits non-zero on any of them.
/// Nothing here is reachable from a request handler.
#[derive(Debug, Error)]
pub enum SiteError {
    /// A configured CSS source or post file is absent or unreadable.
    #[error("missing source file {path}: {source}")]
    MissingSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The minifier rejected a stylesheet. Malformed CSS aborts the build
    /// rather than passing through unminified.
    #[error("invalid CSS in {path}: {message}")]
    InvalidSyntax { path: PathBuf, message: String },

    /// A page names a template that does not exist in the template root.
    #[error("template `{name}` not found")]
    TemplateNotFound { name: String },

    /// A template referenced a context key that was never supplied.
    #[error("template `{template}` referenced a missing context value: {detail}")]
    MissingContext { template: String, detail: String },

    /// Any other template-engine failure (syntax error in the template itself).
    #[error("failed to render `{template}`: {detail}")]
    Render { template: String, detail: String },

    /// The template root could not be loaded at all.
    #[error("failed to load templates: {0}")]
    TemplateLoad(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
