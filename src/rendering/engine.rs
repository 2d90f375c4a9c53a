//! Template engine over a fixed, embedded template set
//!
//! Templates are compiled into the binary and loaded into tera once at
//! construction. Template names are stable identifiers independent of the
//! file layout under `templates/`. Rendering is pure: identical
//! `(template, data)` input always yields byte-identical output.

use serde_json::Value as JsonValue;
use tera::Tera;

use crate::rendering::errors::RenderError;
use crate::rendering::helpers;

/// The versioned template set, one entry per artifact kind.
static TEMPLATES: &[(&str, &str)] = &[
    ("entity", include_str!("../../templates/entity.go.tera")),
    ("events", include_str!("../../templates/events.go.tera")),
    (
        "repository",
        include_str!("../../templates/repository.go.tera"),
    ),
    (
        "repository_impl",
        include_str!("../../templates/repository_impl.go.tera"),
    ),
    ("commands", include_str!("../../templates/commands.go.tera")),
    ("queries", include_str!("../../templates/queries.go.tera")),
    (
        "command_handlers",
        include_str!("../../templates/command_handlers.go.tera"),
    ),
    (
        "query_handlers",
        include_str!("../../templates/query_handlers.go.tera"),
    ),
    ("service", include_str!("../../templates/service.go.tera")),
    (
        "entity_test",
        include_str!("../../templates/entity_test.go.tera"),
    ),
    (
        "events_test",
        include_str!("../../templates/events_test.go.tera"),
    ),
    (
        "repository_test",
        include_str!("../../templates/repository_test.go.tera"),
    ),
    (
        "repository_impl_test",
        include_str!("../../templates/repository_impl_test.go.tera"),
    ),
    (
        "commands_test",
        include_str!("../../templates/commands_test.go.tera"),
    ),
    (
        "queries_test",
        include_str!("../../templates/queries_test.go.tera"),
    ),
    (
        "command_handlers_test",
        include_str!("../../templates/command_handlers_test.go.tera"),
    ),
    (
        "query_handlers_test",
        include_str!("../../templates/query_handlers_test.go.tera"),
    ),
    (
        "service_test",
        include_str!("../../templates/service_test.go.tera"),
    ),
    ("go_mod", include_str!("../../templates/go_mod.tera")),
    ("makefile", include_str!("../../templates/makefile.tera")),
    ("readme", include_str!("../../templates/readme.md.tera")),
    ("config", include_str!("../../templates/config.yaml.tera")),
    ("main", include_str!("../../templates/main.go.tera")),
];

/// Renders named templates against JSON data.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load the embedded template set and register the helper library.
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        helpers::register(&mut tera);
        for (name, source) in TEMPLATES {
            tera.add_raw_template(name, source)
                .map_err(|e| RenderError::Load {
                    template: (*name).to_string(),
                    source: e,
                })?;
        }
        Ok(Self { tera })
    }

    /// Render a template by name. Fails with the template name and the
    /// underlying cause; never produces partial output.
    pub fn render(&self, template: &str, data: &JsonValue) -> Result<String, RenderError> {
        if !self.has_template(template) {
            return Err(RenderError::UnknownTemplate(template.to_string()));
        }
        let context =
            tera::Context::from_value(data.clone()).map_err(|e| RenderError::InvalidContext {
                template: template.to_string(),
                source: e,
            })?;
        self.tera
            .render(template, &context)
            .map_err(|e| RenderError::Execution {
                template: template.to_string(),
                source: e,
            })
    }

    pub fn has_template(&self, name: &str) -> bool {
        TEMPLATES.iter().any(|(n, _)| *n == name)
    }

    /// Stable names of every template in the set.
    pub fn template_names(&self) -> Vec<&'static str> {
        TEMPLATES.iter().map(|(n, _)| *n).collect()
    }
}
