//! Cooking orchestration: turn one declarative config into written documents.
//!
//! `cook` and `cook_from_config` drive the whole pipeline (load config, load
//! data, expand, render each job, write each output); `render` is the
//! file-free programmatic entry point. Every template sees three reserved
//! variables: `data` (the record list), `meta` (embedded metadata, `{}` when
//! absent), and `config` (input/output/format of the concrete job), with the
//! merged context overlaid on top.

use crate::config::{expand_config, load_config, Config, OutputSpec};
use crate::data::{load_data, LoadedData};
use crate::error::{Error, Result};
use crate::ioutils;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Cooks data according to a config file.
///
/// Loads the config and its data, expands the config into concrete jobs,
/// renders every job, and writes every output. Returns the written output
/// paths in expansion order.
pub fn cook(config_path: &Path) -> Result<Vec<PathBuf>> {
    let batch = load_config(config_path)?;
    cook_from_config(&batch.config, batch.outputs.as_deref(), None, None)
}

/// Cooks data using an in-memory config.
///
/// Call-site overrides are applied before data loading: `output` replaces
/// the config's output path, and `context` merges on top of the config's
/// inline context, override keys winning.
pub fn cook_from_config(
    config: &Config,
    outputs: Option<&[OutputSpec]>,
    context: Option<IndexMap<String, Value>>,
    output: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let mut config = config.clone();
    if let Some(output) = output {
        config.output = output;
    }
    if let Some(extra) = context {
        let mut merged = config.context.take().unwrap_or_default();
        merged.extend(extra);
        config.context = Some(merged);
    }

    // Data is loaded once and shared read-only by every expanded job.
    let loaded = load_data(&config.resolved_input())?;

    let expanded = expand_config(&config, outputs, Some(&loaded.records))?;
    debug!(
        "expanded {} into {} render job(s)",
        config.input.display(),
        expanded.len()
    );

    let mut written = Vec::with_capacity(expanded.len());
    for concrete in &expanded {
        written.push(cook_single(concrete, &loaded)?);
    }
    Ok(written)
}

/// Renders records through a template directly, without config or output
/// files. The template sees an empty `config` mapping.
pub fn render(
    records: &[Value],
    template: &Path,
    meta: Option<&IndexMap<String, Value>>,
    context: Option<&IndexMap<String, Value>>,
    template_dirs: &[PathBuf],
) -> Result<String> {
    let mut search_dirs = Vec::with_capacity(template_dirs.len() + 1);
    search_dirs.push(parent_dir(template));
    search_dirs.extend(template_dirs.iter().cloned());
    let renderer = MiniJinjaRenderer::new(search_dirs);

    let empty_meta = IndexMap::new();
    let variables = template_variables(
        records,
        meta.unwrap_or(&empty_meta),
        serde_json::Map::new(),
        context.unwrap_or(&IndexMap::new()),
    );
    renderer.render(&template_name(template)?, &variables)
}

/// Renders one concrete post-expansion config and writes its output file.
fn cook_single(config: &Config, loaded: &LoadedData) -> Result<PathBuf> {
    // Context precedence: context file first, inline context on top.
    let mut context = match config.resolved_context_file() {
        Some(path) => load_context_file(&path)?,
        None => IndexMap::new(),
    };
    if let Some(inline) = &config.context {
        for (key, value) in inline {
            context.insert(key.clone(), value.clone());
        }
    }

    // The template's own directory leads the search path.
    let template_path = config.resolved_template();
    let mut search_dirs = Vec::with_capacity(config.template_dirs.len() + 1);
    search_dirs.push(parent_dir(&template_path));
    search_dirs.extend(config.resolved_template_dirs());
    let renderer = MiniJinjaRenderer::new(search_dirs);

    let mut config_info = serde_json::Map::new();
    config_info.insert(
        "input".to_string(),
        Value::from(config.resolved_input().display().to_string()),
    );
    config_info.insert(
        "output".to_string(),
        Value::from(config.resolved_output().display().to_string()),
    );
    config_info.insert(
        "format".to_string(),
        Value::from(config.effective_format().as_str()),
    );

    let variables = template_variables(&loaded.records, &loaded.meta, config_info, &context);
    let rendered = renderer.render(&template_name(&template_path)?, &variables)?;

    let output_path = config.resolved_output();
    ioutils::write_file(&rendered, &output_path)?;
    debug!("wrote {}", output_path.display());
    Ok(output_path)
}

/// Assembles the reserved `data`/`meta`/`config` variables, then overlays
/// the merged context. Context keys may shadow the reserved names; the
/// config loader keeps `foreach` bindings from doing so.
fn template_variables(
    records: &[Value],
    meta: &IndexMap<String, Value>,
    config_info: serde_json::Map<String, Value>,
    context: &IndexMap<String, Value>,
) -> IndexMap<String, Value> {
    let mut variables = IndexMap::new();
    variables.insert("data".to_string(), Value::Array(records.to_vec()));
    variables.insert(
        "meta".to_string(),
        Value::Object(meta.iter().map(|(key, value)| (key.clone(), value.clone())).collect()),
    );
    variables.insert("config".to_string(), Value::Object(config_info));
    for (key, value) in context {
        variables.insert(key.clone(), value.clone());
    }
    variables
}

/// Loads template variables from a YAML context file. An empty file is an
/// empty mapping; a missing file is a configuration error.
fn load_context_file(path: &Path) -> Result<IndexMap<String, Value>> {
    if !path.exists() {
        return Err(Error::Config(format!("context file not found: {}", path.display())));
    }

    let content = std::fs::read_to_string(path).map_err(|err| {
        Error::Config(format!("cannot read context file {}: {err}", path.display()))
    })?;

    serde_yaml::from_str::<Option<IndexMap<String, Value>>>(&content)
        .map(Option::unwrap_or_default)
        .map_err(|err| {
            Error::Config(format!(
                "invalid YAML in context file {}: {err}",
                path.display()
            ))
        })
}

fn template_name(template_path: &Path) -> Result<String> {
    template_path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::Config(format!(
                "template path {} has no usable file name",
                template_path.display()
            ))
        })
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_context_file_missing() {
        let err = load_context_file(Path::new("/nonexistent/ctx.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("context file not found"), "{err}");
    }

    #[test]
    fn test_load_context_file_empty_is_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctx.yaml");
        std::fs::write(&path, "").unwrap();
        assert!(load_context_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_context_file_non_mapping_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctx.yaml");
        std::fs::write(&path, "- a\n- b\n").unwrap();
        assert!(matches!(load_context_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_context_file_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctx.yaml");
        std::fs::write(&path, "site: Fauna\nyear: 2024\n").unwrap();
        let context = load_context_file(&path).unwrap();
        assert_eq!(context["site"], json!("Fauna"));
        assert_eq!(context["year"], json!(2024));
    }

    #[test]
    fn test_template_variables_context_overlays_reserved() {
        let context: IndexMap<String, Value> =
            [("meta".to_string(), json!("shadowed"))].into_iter().collect();
        let variables =
            template_variables(&[json!(1)], &IndexMap::new(), serde_json::Map::new(), &context);
        assert_eq!(variables["data"], json!([1]));
        assert_eq!(variables["meta"], json!("shadowed"));
    }

    #[test]
    fn test_render_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("list.j2");
        std::fs::write(&template, "{% for row in data %}{{ row.name }} {% endfor %}")
            .unwrap();

        let records = vec![json!({"name": "Item 1"}), json!({"name": "Item 2"})];
        let result = render(&records, &template, None, None, &[]).unwrap();
        assert_eq!(result, "Item 1 Item 2 ");
    }

    #[test]
    fn test_render_exposes_meta_and_context() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("head.j2");
        std::fs::write(&template, "{{ meta.v }}/{{ title }}").unwrap();

        let meta: IndexMap<String, Value> =
            [("v".to_string(), json!(3))].into_iter().collect();
        let context: IndexMap<String, Value> =
            [("title".to_string(), json!("Owls"))].into_iter().collect();
        let result = render(&[], &template, Some(&meta), Some(&context), &[]).unwrap();
        assert_eq!(result, "3/Owls");
    }
}
