//! Template naming and lightweight interpolation.
//!
//! A [`TemplateSet`] resolves the base-plus-variation naming convention into
//! the ordered list of template identifiers to process. [`Template`] is the
//! interpolation engine behind the built-in file renderer: `{{ var }}`
//! placeholders are substituted from a [`TemplateContext`], and `{{ var? }}`
//! marks a variable as optional.

use std::collections::HashMap;

use thiserror::Error;

/// Template interpolation errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A placeholder referenced a variable the context does not define.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Malformed placeholder syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Ordered set of resolved template identifiers.
///
/// Built once from a base name and a list of variation suffixes, immutable
/// afterward. A non-empty variation `v` resolves to `base-v`; an empty
/// variation resolves to `base` itself.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    base: String,
    names: Vec<String>,
}

impl TemplateSet {
    /// Resolve a base name and variation suffixes into template identifiers.
    ///
    /// An empty variation list yields an empty set, which renders nothing.
    pub fn new<I, S>(base: impl Into<String>, variations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base = base.into();
        let names = variations
            .into_iter()
            .map(|variation| {
                let variation = variation.as_ref();
                if variation.is_empty() {
                    base.clone()
                } else {
                    format!("{base}-{variation}")
                }
            })
            .collect();

        Self { base, names }
    }

    /// The base name shared by every identifier in the set.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolved identifiers, in variation order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of templates in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set resolves to no templates at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Variables available to a template during rendering.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with an additional variable.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// A template body supporting `{{ var }}` interpolation.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    body: String,
}

impl Template {
    /// Create a new template with the given name and body.
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substitute every placeholder from `context`.
    ///
    /// A `{{ var? }}` placeholder expands to the empty string when the
    /// variable is absent; a plain `{{ var }}` placeholder errors instead.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut out = String::with_capacity(self.body.len());
        let mut rest = self.body.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                TemplateError::InvalidSyntax(format!("unclosed {{{{ in {}", self.name))
            })?;

            let raw = after[..end].trim();
            let (var, optional) = match raw.strip_suffix('?') {
                Some(stripped) => (stripped, true),
                None => (raw, false),
            };

            match context.get(var) {
                Some(value) => out.push_str(value),
                None if optional => {}
                None => return Err(TemplateError::MissingVariable(var.to_string())),
            }

            rest = &after[end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}
