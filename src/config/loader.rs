//! Configuration file loading and validation

use crate::config::types::{BatchConfig, Config, Format, OutputSpec};
use crate::constants::RESERVED_CONTEXT_NAMES;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Raw config shape as written in YAML, before cross-field validation.
///
/// Presence checks and the `output`/`outputs` exclusivity rule cannot be
/// expressed through serde alone, so every field is optional here and
/// [`parse_config`] enforces the rest.
#[derive(Debug, Deserialize)]
struct RawConfig {
    input: Option<String>,
    template: Option<String>,
    output: Option<String>,
    outputs: Option<Vec<RawOutputSpec>>,
    format: Option<String>,
    #[serde(default)]
    template_dirs: Vec<String>,
    context_file: Option<String>,
    context: Option<IndexMap<String, Value>>,
    foreach: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOutputSpec {
    output: Option<String>,
    input: Option<String>,
    template: Option<String>,
    format: Option<String>,
    template_dirs: Option<Vec<String>>,
    context_file: Option<String>,
    context: Option<IndexMap<String, Value>>,
}

/// Loads and validates a kiln config file.
///
/// Relative paths inside the config are anchored at the config file's
/// parent directory.
pub fn load_config(path: &Path) -> Result<BatchConfig> {
    if !path.exists() {
        return Err(Error::Config(format!("config file not found: {}", path.display())));
    }

    let content = std::fs::read_to_string(path).map_err(|err| {
        Error::Config(format!("cannot read config file {}: {err}", path.display()))
    })?;

    parse_config(&content, path.parent())
}

/// Parses config file contents into a validated [`BatchConfig`].
pub fn parse_config(content: &str, base_path: Option<&Path>) -> Result<BatchConfig> {
    let raw: RawConfig = serde_yaml::from_str(content)
        .map_err(|err| Error::Config(format!("invalid YAML in config file: {err}")))?;

    let input = raw
        .input
        .ok_or_else(|| Error::Config("config must have an 'input' field".into()))?;
    let template = raw
        .template
        .ok_or_else(|| Error::Config("config must have a 'template' field".into()))?;

    match (&raw.output, &raw.outputs) {
        (Some(_), Some(_)) => {
            return Err(Error::Config("'output' and 'outputs' are mutually exclusive".into()))
        }
        (None, None) => {
            return Err(Error::Config("config must have an 'output' or 'outputs' field".into()))
        }
        _ => {}
    }

    let format = raw.format.as_deref().map(parse_format).transpose()?;

    let foreach = raw.foreach.map(validate_foreach).transpose()?;

    let outputs = raw.outputs.map(parse_outputs).transpose()?;

    // With an `outputs` list the base output is a placeholder that every
    // spec overrides.
    let output = raw.output.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let config = Config {
        input: PathBuf::from(input),
        template: PathBuf::from(template),
        output,
        format,
        template_dirs: raw.template_dirs.into_iter().map(PathBuf::from).collect(),
        context_file: raw.context_file.map(PathBuf::from),
        context: raw.context,
        base_path: base_path.map(Path::to_path_buf),
        foreach,
    };

    Ok(BatchConfig { config, outputs })
}

fn parse_format(value: &str) -> Result<Format> {
    match value {
        "html" => Ok(Format::Html),
        "markdown" => Ok(Format::Markdown),
        "text" => Ok(Format::Text),
        other => Err(Error::Config(format!(
            "invalid format '{other}': must be html, markdown, or text"
        ))),
    }
}

fn validate_foreach(name: String) -> Result<String> {
    if name.is_empty() {
        return Err(Error::Config("'foreach' must be a non-empty string".into()));
    }
    if RESERVED_CONTEXT_NAMES.contains(&name.as_str()) {
        return Err(Error::Config(format!(
            "'foreach' variable name '{name}' is reserved; cannot use: {}",
            RESERVED_CONTEXT_NAMES.join(", ")
        )));
    }
    Ok(name)
}

fn parse_outputs(raw_outputs: Vec<RawOutputSpec>) -> Result<Vec<OutputSpec>> {
    raw_outputs
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let output = entry.output.ok_or_else(|| {
                Error::Config(format!("outputs[{i}] must have an 'output' field"))
            })?;
            let format = entry.format.as_deref().map(parse_format).transpose()?;
            Ok(OutputSpec {
                output,
                input: entry.input,
                template: entry.template,
                format,
                template_dirs: entry.template_dirs,
                context_file: entry.context_file,
                context: entry.context,
            })
        })
        .collect()
}
