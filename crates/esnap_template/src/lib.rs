mod engine;

pub use engine::TemplateEngine;
pub use handlebars::RenderError;
