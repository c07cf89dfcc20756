//! Pluggable template rendering.
//!
//! Rendering is an opaque capability behind the [`Renderer`] trait: given a
//! source file path and a context, produce the rendered text or fail. The
//! rendered text is an explicit return value, so there is no ambient output
//! buffer to restore on error paths. The built-in [`FileRenderer`] reads the
//! source file and runs `{{ var }}` interpolation; callers with a real
//! template engine implement the trait themselves.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::template::{Template, TemplateContext, TemplateError};

/// Rendering errors.
#[derive(Debug, Error)]
pub enum RendererError {
    /// Template source could not be read.
    #[error("cannot read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Template failed to interpolate.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Render produced no output and the carry-over policy had nothing to
    /// reuse.
    #[error("template {path} produced no output")]
    NoOutput { path: PathBuf },
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, RendererError>;

/// Renders one template source file to text.
pub trait Renderer {
    /// Render the file at `source` with the given context.
    fn render(&self, source: &Path, context: &TemplateContext) -> Result<String>;
}

/// Built-in renderer: read the source file and interpolate placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRenderer;

impl FileRenderer {
    /// Create a new file renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for FileRenderer {
    fn render(&self, source: &Path, context: &TemplateContext) -> Result<String> {
        let body = fs::read_to_string(source).map_err(|e| RendererError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;

        let name = source
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();

        Ok(Template::new(name, body).render(context)?)
    }
}
