use crate::error::Result;
use indexmap::IndexMap;
use serde_json::Value;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Looks up a template by name across the engine's search path and
    /// renders it with the given variables.
    ///
    /// # Arguments
    /// * `template_name` - Name of the template to render
    /// * `variables` - Named variables exposed to the template
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(
        &self,
        template_name: &str,
        variables: &IndexMap<String, Value>,
    ) -> Result<String>;
}
