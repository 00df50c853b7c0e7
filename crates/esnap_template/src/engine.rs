use std::collections::HashMap;

use handlebars::{Handlebars, RenderError};
use serde_json::Value;

/// A template engine that substitutes `{{name}}` placeholders in request
/// path and body templates.
///
/// Runs in strict mode: a template that references a parameter absent from
/// the parameter set fails with a render error naming the variable, rather
/// than leaving the token in the output.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        // Values land in URLs and JSON bodies, never in HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars }
    }

    /// Renders a template with the provided parameters.
    ///
    /// # Errors
    /// Returns an error if the template is invalid or references a
    /// parameter that is not present in `params`.
    pub fn render(
        &self,
        template: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, RenderError> {
        // Convert HashMap to a JSON object for rendering
        let json_params: serde_json::Map<String, Value> = params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        self.handlebars
            .render_template(template, &Value::Object(json_params))
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
