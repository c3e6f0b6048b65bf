//! Config expansion for multi-output and foreach rendering
//!
//! One declarative config fans out along two independent axes: an explicit
//! `outputs` list and a per-record `foreach` loop. Expansion is computed
//! eagerly and fully before any rendering starts, so an expansion failure
//! never leaves partially written outputs behind.

use crate::config::types::{Config, OutputSpec};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use regex::Regex;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^}]+)\}").expect("placeholder pattern is valid"))
}

/// Resolves `{var.field.subfield}` placeholders in a path string.
///
/// Each placeholder is a dot-separated path walked through `variables` one
/// segment at a time; the leaf value is substituted verbatim. Strings
/// without placeholders pass through unchanged.
pub fn interpolate_path(path_str: &str, variables: &Value) -> Result<String> {
    let mut failure: Option<Error> = None;
    let result = placeholder_regex().replace_all(path_str, |caps: &regex::Captures| {
        match resolve_placeholder(&caps[1], variables) {
            Ok(resolved) => resolved,
            Err(err) => {
                failure.get_or_insert(err);
                String::new()
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(result.into_owned()),
    }
}

fn resolve_placeholder(expr: &str, variables: &Value) -> Result<String> {
    let mut current = variables;
    for part in expr.split('.') {
        let mapping = current.as_object().ok_or_else(|| {
            Error::Interpolation(format!(
                "cannot resolve '{expr}': '{part}' is not a key in a non-mapping value"
            ))
        })?;
        current = mapping.get(part).ok_or_else(|| {
            Error::Interpolation(format!("cannot resolve '{expr}': key '{part}' not found"))
        })?;
    }
    Ok(leaf_to_string(current))
}

/// Strings substitute their raw content; everything else keeps its JSON form.
fn leaf_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Expands a config into the ordered list of concrete single-output configs.
///
/// Handles four cases:
/// 1. No outputs and no foreach: returns `[config]` unchanged.
/// 2. Outputs only: one config per [`OutputSpec`], in spec order.
/// 3. Foreach only: one config per data record, in record order.
/// 4. Both: the Cartesian product, output-major (`spec0 x r0`, `spec0 x r1`,
///    `spec1 x r0`, ...). Callers rely on this order to map results back to
///    named outputs.
///
/// When `foreach` is set, `records` must be supplied; an empty record slice
/// expands to zero jobs, which is not an error.
pub fn expand_config(
    config: &Config,
    outputs: Option<&[OutputSpec]>,
    records: Option<&[Value]>,
) -> Result<Vec<Config>> {
    let has_outputs = outputs.is_some_and(|specs| !specs.is_empty());
    let has_foreach = config.foreach.is_some();

    if !has_outputs && !has_foreach {
        return Ok(vec![config.clone()]);
    }

    let base_configs: Vec<Config> = if has_outputs {
        outputs
            .unwrap_or_default()
            .iter()
            .map(|spec| apply_output_spec(config, spec))
            .collect()
    } else {
        vec![config.clone()]
    };

    let Some(foreach) = &config.foreach else {
        return Ok(base_configs);
    };

    let Some(records) = records else {
        return Err(Error::Config("foreach requires data but none was provided".into()));
    };

    let mut expanded = Vec::with_capacity(base_configs.len() * records.len());
    for base in &base_configs {
        for record in records {
            let mut variables = serde_json::Map::new();
            variables.insert(foreach.clone(), record.clone());
            let new_output =
                interpolate_path(base.output.to_str_checked()?, &Value::Object(variables))?;

            // The loop binding always wins over a same-named context key.
            let mut context = base.context.clone().unwrap_or_default();
            context.insert(foreach.clone(), record.clone());

            let mut derived = base.clone();
            derived.output = PathBuf::from(new_output);
            derived.context = Some(context);
            expanded.push(derived);
        }
    }

    Ok(expanded)
}

/// Derives a new config with a spec's overrides applied field by field.
/// Context is shallow-merged: base context plus spec context, spec wins.
fn apply_output_spec(config: &Config, spec: &OutputSpec) -> Config {
    let mut derived = config.clone();
    derived.output = PathBuf::from(&spec.output);

    if let Some(input) = &spec.input {
        derived.input = PathBuf::from(input);
    }
    if let Some(template) = &spec.template {
        derived.template = PathBuf::from(template);
    }
    if let Some(format) = spec.format {
        derived.format = Some(format);
    }
    if let Some(template_dirs) = &spec.template_dirs {
        derived.template_dirs = template_dirs.iter().map(PathBuf::from).collect();
    }
    if let Some(context_file) = &spec.context_file {
        derived.context_file = Some(PathBuf::from(context_file));
    }
    if let Some(extra) = &spec.context {
        let mut merged = config.context.clone().unwrap_or_default();
        for (key, value) in extra {
            merged.insert(key.clone(), value.clone());
        }
        derived.context = Some(merged);
    }

    derived
}
