//! Pagepress
//!
//! Renders a fixed family of template files into static HTML pages and
//! copies asset directories alongside them. A family is named by a base
//! identifier plus variation suffixes (`login`, `login-sweden`,
//! `login-norway`); each resolved template is rendered and written to
//! `<output_dir>/<name>.html`.
//!
//! # Modules
//!
//! - [`template`] - template-name resolution and `{{ var }}` interpolation
//! - [`renderer`] - pluggable rendering behind the [`Renderer`] trait
//! - [`publish`] - render-to-static orchestration and per-page reporting
//! - [`assets`] - asset directory sync and recursive copy

pub mod assets;
pub mod publish;
pub mod renderer;
pub mod template;

pub use assets::{AssetSync, SyncReport, copy_dir_recursive};
pub use publish::{EmptyOutput, PageReport, PageStatus, Publisher, RenderReport};
pub use renderer::{FileRenderer, Renderer, RendererError};
pub use template::{Template, TemplateContext, TemplateSet};
