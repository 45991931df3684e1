//! Template renderer adapters.

mod handlebars_renderer;
pub mod helpers;

pub use handlebars_renderer::HandlebarsRenderer;
