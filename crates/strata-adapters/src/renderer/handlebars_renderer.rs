//! Handlebars renderer.

use handlebars::Handlebars;
use strata_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::TemplateContext,
    error::StrataResult,
};
use tracing::{instrument, trace};

use super::helpers::register_helpers;

/// Renders template bodies with Handlebars.
///
/// Strict mode is on: a reference to a field the context does not have is
/// an error, not an empty string. Output is not HTML-escaped; templates
/// produce source code.
#[derive(Debug)]
pub struct HandlebarsRenderer {
    handlebars: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        register_helpers(&mut handlebars);
        Self { handlebars }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    #[instrument(skip(self, body, context))]
    fn render(
        &self,
        template_id: &str,
        body: &str,
        context: &TemplateContext,
    ) -> StrataResult<String> {
        let rendered = self
            .handlebars
            .render_template(body, context)
            .map_err(|e| ApplicationError::RenderingFailed {
                id: template_id.to_string(),
                reason: e.to_string(),
            })?;
        trace!(bytes = rendered.len(), "Rendered");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{
        domain::{EntityModel, ProjectSettings, parse_fields},
        error::StrataError,
    };

    fn context() -> TemplateContext {
        let entity = EntityModel::new("order", parse_fields("total:decimal,note:text?")).unwrap();
        TemplateContext::builder(ProjectSettings::new("shop").with_module_path("example.com/shop"))
            .entity(entity)
            .build()
            .unwrap()
    }

    #[test]
    fn renders_nested_context() {
        let out = HandlebarsRenderer::new()
            .render(
                "t",
                "module {{project.module_path}} ({{database.driver}}:{{database.port}})",
                &context(),
            )
            .unwrap();
        assert_eq!(out, "module example.com/shop (postgres:5432)");
    }

    #[test]
    fn iterates_fields() {
        let out = HandlebarsRenderer::new()
            .render(
                "t",
                "{{#each entity.fields}}{{pascal_name}} {{declared_type}};{{/each}}",
                &context(),
            )
            .unwrap();
        assert_eq!(out, "Total float64;Note *string;");
    }

    #[test]
    fn does_not_escape_html() {
        let out = HandlebarsRenderer::new()
            .render("t", "{{replace project.name \"shop\" \"<shop & co>\"}}", &context())
            .unwrap();
        assert_eq!(out, "<shop & co>");
    }

    #[test]
    fn missing_field_fails_in_strict_mode() {
        let err = HandlebarsRenderer::new()
            .render("docs/erd.md", "{{project.nope}}", &context())
            .unwrap_err();
        match err {
            StrataError::Application(ApplicationError::RenderingFailed { id, .. }) => {
                assert_eq!(id, "docs/erd.md");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn syntax_error_fails_without_output() {
        let result = HandlebarsRenderer::new().render("t", "{{#if project.name}}open", &context());
        assert!(result.is_err());
    }

    #[test]
    fn unknown_helper_fails() {
        let result = HandlebarsRenderer::new().render("t", "{{shout project.name}}", &context());
        assert!(result.is_err());
    }
}
