//! Configuration value objects
//!
//! A [`Config`] describes one logical render job. Instances are never
//! mutated after construction; the expander derives new instances with
//! overridden fields instead. Relative paths stay relative until one of the
//! `resolved_*` accessors anchors them at `base_path`.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Output format of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Html,
    Markdown,
    Text,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Markdown => "markdown",
            Format::Text => "text",
        }
    }
}

/// A single declarative render job description.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path to the JSON data file.
    pub input: PathBuf,
    /// Path to the main template.
    pub template: PathBuf,
    /// Output file path; may contain `{placeholders}` before expansion.
    pub output: PathBuf,
    /// Output format, inferred from the template name when unset.
    pub format: Option<Format>,
    /// Additional template search paths, in search order.
    pub template_dirs: Vec<PathBuf>,
    /// Path to an external YAML context file.
    pub context_file: Option<PathBuf>,
    /// Inline context variables from the config.
    pub context: Option<IndexMap<String, Value>>,
    /// Anchor for resolving relative paths.
    pub base_path: Option<PathBuf>,
    /// Name of the per-record loop variable, when set.
    pub foreach: Option<String>,
}

impl Config {
    /// Resolves a path against `base_path` unless it is already absolute.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match &self.base_path {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }

    pub fn resolved_input(&self) -> PathBuf {
        self.resolve_path(&self.input)
    }

    pub fn resolved_template(&self) -> PathBuf {
        self.resolve_path(&self.template)
    }

    pub fn resolved_output(&self) -> PathBuf {
        self.resolve_path(&self.output)
    }

    pub fn resolved_context_file(&self) -> Option<PathBuf> {
        self.context_file.as_deref().map(|path| self.resolve_path(path))
    }

    pub fn resolved_template_dirs(&self) -> Vec<PathBuf> {
        self.template_dirs.iter().map(|path| self.resolve_path(path)).collect()
    }

    /// Effective output format, inferred from the template file stem when
    /// not set explicitly: `fauna_list.html.j2` renders as html,
    /// `notes.md.j2` as markdown, everything else as text.
    pub fn effective_format(&self) -> Format {
        if let Some(format) = self.format {
            return format;
        }
        let stem =
            self.template.file_stem().and_then(|stem| stem.to_str()).unwrap_or_default();
        if stem.ends_with(".html") {
            Format::Html
        } else if stem.ends_with(".md") {
            Format::Markdown
        } else {
            Format::Text
        }
    }
}

/// One entry in the `outputs` list.
///
/// All fields optional except `output`. When present, they override the
/// corresponding field in the base [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    /// Output path template; `{placeholders}` are allowed.
    pub output: String,
    pub input: Option<String>,
    pub template: Option<String>,
    pub format: Option<Format>,
    pub template_dirs: Option<Vec<String>>,
    pub context_file: Option<String>,
    pub context: Option<IndexMap<String, Value>>,
}

/// Wraps a [`Config`] with optional multi-output specs: one job description,
/// possibly fanned out.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub config: Config,
    pub outputs: Option<Vec<OutputSpec>>,
}
