//! Render-to-static orchestration.
//!
//! The [`Publisher`] drives one render pass: for each identifier in its
//! [`TemplateSet`] it renders `<template_dir>/<id>.<ext>` and writes the
//! result to `<output_dir>/<name>.html`, collecting a typed per-page
//! report. A failed template never stops the templates after it.

use std::{fs, path::PathBuf, time::Instant};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    assets::{AssetError, AssetSync, SyncReport},
    renderer::{FileRenderer, Renderer, RendererError},
    template::{TemplateContext, TemplateSet},
};

/// Fatal publish errors.
///
/// Per-template render failures are reported through [`PageStatus::Failed`]
/// rather than raised here; this enum covers conditions that stop a pass
/// outright, such as an unwritable output directory.
#[derive(Debug, Error)]
pub enum PublishError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset sync error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Policy for a template whose render produces no output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyOutput {
    /// Write the empty content as-is.
    #[default]
    WriteEmpty,

    /// Reuse the previous template's output; the template is reported
    /// failed when no previous output exists. Compatibility mode for
    /// callers relying on the historical carry-over behavior.
    CarryOver,
}

/// Outcome of one template within a render pass.
#[derive(Debug)]
pub struct PageReport {
    /// Resolved template identifier.
    pub template: String,

    /// Source file the renderer was pointed at.
    pub source: PathBuf,

    /// What happened.
    pub status: PageStatus,
}

/// Per-template status.
#[derive(Debug)]
pub enum PageStatus {
    /// Output written.
    Written {
        /// Destination file.
        path: PathBuf,

        /// Size of the written content.
        bytes: usize,
    },

    /// Render failed; no file was written for this template.
    Failed(RendererError),
}

/// Report of one render pass.
#[derive(Debug, Default)]
pub struct RenderReport {
    /// One entry per template, in set order.
    pub pages: Vec<PageReport>,

    /// Pass duration in milliseconds.
    pub duration_ms: u64,
}

impl RenderReport {
    /// Number of templates written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| matches!(p.status, PageStatus::Written { .. }))
            .count()
    }

    /// Number of templates that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.pages.len() - self.written()
    }
}

/// Renders a template set to static HTML files and syncs asset directories.
pub struct Publisher {
    set: TemplateSet,
    template_dir: PathBuf,
    output_dir: PathBuf,
    extension: String,
    context: TemplateContext,
    renderer: Box<dyn Renderer>,
    empty_output: EmptyOutput,
}

impl Publisher {
    /// Create a publisher for `base` and its variations, with the built-in
    /// file renderer, templates looked up in the current directory, and
    /// output written under `html/`.
    pub fn new<I, S>(base: impl Into<String>, variations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            set: TemplateSet::new(base, variations),
            template_dir: PathBuf::from("."),
            output_dir: PathBuf::from("html"),
            extension: "tpl".to_string(),
            context: TemplateContext::new(),
            renderer: Box::new(FileRenderer::new()),
            empty_output: EmptyOutput::default(),
        }
    }

    /// Set the directory containing template source files.
    #[must_use]
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = dir.into();
        self
    }

    /// Set the directory rendered pages are written into.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the template file extension (without the dot).
    #[must_use]
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into();
        self
    }

    /// Set the render context handed to every template.
    #[must_use]
    pub fn with_context(mut self, context: TemplateContext) -> Self {
        self.context = context;
        self
    }

    /// Replace the built-in renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Set the empty-output policy.
    #[must_use]
    pub fn with_empty_output(mut self, policy: EmptyOutput) -> Self {
        self.empty_output = policy;
        self
    }

    /// Resolved template identifiers this publisher processes.
    #[must_use]
    pub fn templates(&self) -> &[String] {
        self.set.names()
    }

    /// Render every template to `<output_dir>/<identifier>.html`.
    pub fn render(&self) -> Result<RenderReport> {
        self.render_pass(None)
    }

    /// Render every template to the same `<output_dir>/<filename>.html`.
    ///
    /// With more than one template in the set, later templates overwrite
    /// earlier ones and only the last survives. Intended for single-template
    /// sets that need an output name differing from the identifier.
    pub fn render_as(&self, filename: &str) -> Result<RenderReport> {
        self.render_pass(Some(filename))
    }

    /// Run an asset sync job. Convenience wrapper over [`AssetSync::run`].
    pub fn sync_assets(&self, sync: &AssetSync) -> Result<SyncReport> {
        Ok(sync.run()?)
    }

    fn render_pass(&self, filename: Option<&str>) -> Result<RenderReport> {
        let start = Instant::now();
        let mut report = RenderReport::default();

        if self.set.is_empty() {
            return Ok(report);
        }

        fs::create_dir_all(&self.output_dir)?;

        // Holds the last successful render for the carry-over policy.
        let mut last_output: Option<String> = None;

        for template in self.set.names() {
            let source = self
                .template_dir
                .join(format!("{template}.{}", self.extension));

            let rendered = match self.renderer.render(&source, &self.context) {
                Ok(text) => text,
                Err(e) => {
                    warn!(template = %template, error = %e, "render failed");
                    report.pages.push(PageReport {
                        template: template.clone(),
                        source,
                        status: PageStatus::Failed(e),
                    });
                    continue;
                }
            };

            let html = if rendered.is_empty() && self.empty_output == EmptyOutput::CarryOver {
                match &last_output {
                    Some(previous) => previous.clone(),
                    None => {
                        warn!(template = %template, "no output and nothing to carry over");
                        report.pages.push(PageReport {
                            template: template.clone(),
                            source: source.clone(),
                            status: PageStatus::Failed(RendererError::NoOutput { path: source }),
                        });
                        continue;
                    }
                }
            } else {
                rendered
            };

            let name = filename.unwrap_or(template.as_str());
            let path = self.output_dir.join(format!("{name}.html"));
            fs::write(&path, &html)?;

            info!(template = %template, output = %path.display(), "page written");
            report.pages.push(PageReport {
                template: template.clone(),
                source,
                status: PageStatus::Written {
                    path,
                    bytes: html.len(),
                },
            });
            last_output = Some(html);
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use tempfile::TempDir;

    use super::*;
    use crate::renderer::Result as RendererResult;

    fn write_template(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(format!("{name}.tpl")), content).unwrap();
    }

    #[test]
    fn test_render_writes_one_file_per_template() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_template(templates.path(), "login-sweden", "<p>SE</p>");
        write_template(templates.path(), "login-norway", "<p>NO</p>");

        let report = Publisher::new("login", ["sweden", "norway"])
            .with_template_dir(templates.path())
            .with_output_dir(output.path())
            .render()
            .unwrap();

        assert_eq!(report.written(), 2);
        assert_eq!(report.failed(), 0);
        assert_eq!(
            fs::read_to_string(output.path().join("login-sweden.html")).unwrap(),
            "<p>SE</p>"
        );
        assert_eq!(
            fs::read_to_string(output.path().join("login-norway.html")).unwrap(),
            "<p>NO</p>"
        );
    }

    #[test]
    fn test_render_interpolates_context() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_template(templates.path(), "page", "<title>{{ title }}</title>");

        let report = Publisher::new("page", [""])
            .with_template_dir(templates.path())
            .with_output_dir(output.path())
            .with_context(TemplateContext::new().with_var("title", "Home"))
            .render()
            .unwrap();

        assert_eq!(report.written(), 1);
        assert_eq!(
            fs::read_to_string(output.path().join("page.html")).unwrap(),
            "<title>Home</title>"
        );
    }

    #[test]
    fn test_empty_set_renders_nothing() {
        let output = TempDir::new().unwrap();
        let out = output.path().join("html");

        let report = Publisher::new("login", Vec::<String>::new())
            .with_output_dir(&out)
            .render()
            .unwrap();

        assert!(report.pages.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_template_fails_without_stopping_the_pass() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_template(templates.path(), "login-norway", "<p>NO</p>");

        let report = Publisher::new("login", ["sweden", "norway"])
            .with_template_dir(templates.path())
            .with_output_dir(output.path())
            .render()
            .unwrap();

        assert_eq!(report.written(), 1);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            report.pages[0].status,
            PageStatus::Failed(RendererError::Read { .. })
        ));
        assert!(output.path().join("login-norway.html").exists());
        assert!(!output.path().join("login-sweden.html").exists());
    }

    #[test]
    fn test_filename_override_collapses_to_one_file() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_template(templates.path(), "login-sweden", "<p>SE</p>");
        write_template(templates.path(), "login-norway", "<p>NO</p>");

        let report = Publisher::new("login", ["sweden", "norway"])
            .with_template_dir(templates.path())
            .with_output_dir(output.path())
            .render_as("custom")
            .unwrap();

        // Both templates target custom.html; the second overwrites the first.
        assert_eq!(report.written(), 2);
        let entries: Vec<_> = fs::read_dir(output.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["custom.html"]);
        assert_eq!(
            fs::read_to_string(output.path().join("custom.html")).unwrap(),
            "<p>NO</p>"
        );
    }

    // Empty-output policy: the default writes the empty content, which is
    // the fixed behavior; CarryOver reproduces the historical reuse of the
    // previous template's output. Both are covered below.

    #[test]
    fn test_empty_output_written_as_empty_by_default() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_template(templates.path(), "page-a", "X");
        write_template(templates.path(), "page-b", "");

        let report = Publisher::new("page", ["a", "b"])
            .with_template_dir(templates.path())
            .with_output_dir(output.path())
            .render()
            .unwrap();

        assert_eq!(report.written(), 2);
        assert_eq!(
            fs::read_to_string(output.path().join("page-a.html")).unwrap(),
            "X"
        );
        assert_eq!(
            fs::read_to_string(output.path().join("page-b.html")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_empty_output_carry_over_reuses_previous() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_template(templates.path(), "page-a", "X");
        write_template(templates.path(), "page-b", "");

        let report = Publisher::new("page", ["a", "b"])
            .with_template_dir(templates.path())
            .with_output_dir(output.path())
            .with_empty_output(EmptyOutput::CarryOver)
            .render()
            .unwrap();

        assert_eq!(report.written(), 2);
        assert_eq!(
            fs::read_to_string(output.path().join("page-b.html")).unwrap(),
            "X"
        );
    }

    #[test]
    fn test_carry_over_with_no_previous_output_fails_the_template() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_template(templates.path(), "page-a", "");
        write_template(templates.path(), "page-b", "Y");

        let report = Publisher::new("page", ["a", "b"])
            .with_template_dir(templates.path())
            .with_output_dir(output.path())
            .with_empty_output(EmptyOutput::CarryOver)
            .render()
            .unwrap();

        assert_eq!(report.failed(), 1);
        assert!(matches!(
            report.pages[0].status,
            PageStatus::Failed(RendererError::NoOutput { .. })
        ));
        assert!(!output.path().join("page-a.html").exists());
        assert_eq!(
            fs::read_to_string(output.path().join("page-b.html")).unwrap(),
            "Y"
        );
    }

    struct CannedRenderer(&'static str);

    impl Renderer for CannedRenderer {
        fn render(&self, _source: &Path, _context: &TemplateContext) -> RendererResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_custom_renderer_is_used() {
        let output = TempDir::new().unwrap();

        let report = Publisher::new("page", [""])
            .with_output_dir(output.path())
            .with_renderer(CannedRenderer("<main>canned</main>"))
            .render()
            .unwrap();

        assert_eq!(report.written(), 1);
        assert_eq!(
            fs::read_to_string(output.path().join("page.html")).unwrap(),
            "<main>canned</main>"
        );
    }

    #[test]
    fn test_render_overwrites_existing_output() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_template(templates.path(), "page", "new");
        fs::write(output.path().join("page.html"), "old").unwrap();

        Publisher::new("page", [""])
            .with_template_dir(templates.path())
            .with_output_dir(output.path())
            .render()
            .unwrap();

        assert_eq!(
            fs::read_to_string(output.path().join("page.html")).unwrap(),
            "new"
        );
    }
}
