use crate::error::{Error, Result};
use crate::renderer::interface::TemplateRenderer;
use indexmap::IndexMap;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde_json::Value;
use std::path::PathBuf;

/// MiniJinja-based template rendering engine.
///
/// Templates are looked up by file name across an ordered list of search
/// directories. Undefined variables are strict failures so a template
/// referencing a missing variable surfaces as a render error instead of
/// silently producing empty output.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer searching `template_dirs` in order. An empty list
    /// falls back to the current directory.
    pub fn new(template_dirs: Vec<PathBuf>) -> Self {
        let search_dirs = if template_dirs.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            template_dirs
        };

        let mut env = Environment::new();
        env.set_loader(search_path_loader(search_dirs));
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        Self { env }
    }
}

/// Template loader that tries each directory in order and reads the first
/// file that exists, like a file-system search path.
fn search_path_loader(
    dirs: Vec<PathBuf>,
) -> impl Fn(&str) -> std::result::Result<Option<String>, minijinja::Error> + Send + Sync + 'static
{
    move |name| {
        for dir in &dirs {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return std::fs::read_to_string(&candidate).map(Some).map_err(|err| {
                    minijinja::Error::new(
                        ErrorKind::InvalidOperation,
                        format!("cannot read template {}", candidate.display()),
                    )
                    .with_source(err)
                });
            }
        }
        Ok(None)
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template_name: &str,
        variables: &IndexMap<String, Value>,
    ) -> Result<String> {
        let template = self.env.get_template(template_name).map_err(translate_error)?;
        template.render(variables).map_err(translate_error)
    }
}

/// Maps MiniJinja failures onto the render error taxonomy, keeping the three
/// distinguishable conditions apart in the message.
fn translate_error(err: minijinja::Error) -> Error {
    match err.kind() {
        ErrorKind::TemplateNotFound => Error::Render(format!(
            "template not found: {}",
            err.name().unwrap_or("<unnamed>")
        )),
        ErrorKind::SyntaxError => Error::Render(format!(
            "template syntax error in {}:{}: {err}",
            err.name().unwrap_or("<unnamed>"),
            err.line().unwrap_or(0),
        )),
        ErrorKind::UndefinedError => {
            Error::Render(format!("undefined variable in template: {err}"))
        }
        _ => Error::Render(format!("render failed: {err}")),
    }
}
