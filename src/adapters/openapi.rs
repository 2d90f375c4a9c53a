//! OpenAPI format adapter
//!
//! Walks the raw document as `serde_json::Value` and extracts one Entity per
//! schema explicitly marked as an aggregate via the `x-ddd-aggregate` vendor
//! extension. Non-marked object schemas are only ever visited as referenced
//! types while resolving properties - they never become entities themselves.
//! A document with zero marked schemas is a hard parse error by design.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::path::Path;
use tokio::fs;

use crate::adapters::{AdapterError, DomainParser, validate_extension_stage, validate_path_stage};
use crate::domain::{
    DomainModel, Entity, ModelMetadata, Property, Relation, RelationType, types,
};
use crate::rendering::helpers;

const FORMAT: &str = "openapi";
const EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Boolean vendor extension marking a schema as an aggregate root.
pub const AGGREGATE_MARKER: &str = "x-ddd-aggregate";

/// Adapter for OpenAPI 3.x documents in YAML or JSON.
pub struct OpenApiAdapter;

impl OpenApiAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Stages 1-3: path, extension, structural parse.
    async fn load(&self, path: &Path) -> Result<JsonValue, AdapterError> {
        validate_path_stage(path)?;
        validate_extension_stage(path, FORMAT, EXTENSIONS)?;

        let raw = fs::read_to_string(path).await?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let doc: JsonValue = if is_json {
            serde_json::from_str(&raw).map_err(|e| AdapterError::InvalidDocument {
                format: FORMAT,
                reason: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&raw).map_err(|e| AdapterError::InvalidDocument {
                format: FORMAT,
                reason: e.to_string(),
            })?
        };

        if doc
            .get("openapi")
            .or_else(|| doc.get("swagger"))
            .and_then(JsonValue::as_str)
            .is_none()
        {
            return Err(AdapterError::InvalidDocument {
                format: FORMAT,
                reason: "missing 'openapi' version field".to_string(),
            });
        }
        Ok(doc)
    }

    /// Component schemas carrying a literal `x-ddd-aggregate: true`.
    fn aggregate_schemas(doc: &JsonValue) -> Vec<(String, JsonValue)> {
        doc.pointer("/components/schemas")
            .and_then(JsonValue::as_object)
            .map(|schemas| {
                schemas
                    .iter()
                    .filter(|(_, schema)| {
                        schema.get(AGGREGATE_MARKER).and_then(JsonValue::as_bool) == Some(true)
                    })
                    .map(|(name, schema)| (name.clone(), schema.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Project name: document title lower-cased with spaces and underscores
    /// replaced by hyphens, falling back to the input filename stem.
    fn project_name(doc: &JsonValue, path: &Path) -> String {
        doc.pointer("/info/title")
            .and_then(JsonValue::as_str)
            .map(|title| title.to_lowercase().replace([' ', '_'], "-"))
            .unwrap_or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("generated")
                    .to_lowercase()
                    .replace([' ', '_'], "-")
            })
    }

    fn build_entity(
        &self,
        name: &str,
        schema: &JsonValue,
        relations: &mut Vec<Relation>,
    ) -> Entity {
        let mut entity = Entity::new(helpers::to_pascal_case(name));

        let required_names: Vec<&str> = schema
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|arr| arr.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default();

        if let Some(props) = schema.get("properties").and_then(JsonValue::as_object) {
            for (prop_name, prop_schema) in props {
                // Required-ness comes from the enclosing schema's `required`
                // array, not from the property schema itself
                let required = required_names.contains(&prop_name.as_str());
                entity.properties.push(self.build_property(
                    &entity.name,
                    prop_name,
                    prop_schema,
                    required,
                    relations,
                ));
            }
        }

        entity.metadata = Some(schema.clone());
        entity.ensure_identity();
        entity
    }

    fn build_property(
        &self,
        entity_name: &str,
        name: &str,
        schema: &JsonValue,
        required: bool,
        relations: &mut Vec<Relation>,
    ) -> Property {
        let ty = self.resolve_type(entity_name, name, schema, relations);

        let mut property = Property::new(name, ty);
        property.required = required;
        property.validation = derive_validation(schema);
        property.default = schema.get("default").map(render_default);
        property
            .tags
            .insert("json".to_string(), helpers::json_tag(name, required));
        property.metadata = Some(schema.clone());
        property
    }

    /// Resolve a property schema to a canonical type, emitting a Relation
    /// when the schema references another entity.
    fn resolve_type(
        &self,
        entity_name: &str,
        prop_name: &str,
        schema: &JsonValue,
        relations: &mut Vec<Relation>,
    ) -> String {
        if let Some(reference) = schema.get("$ref").and_then(JsonValue::as_str) {
            let to = ref_name(reference);
            relations.push(Relation::new(
                entity_name,
                &to,
                RelationType::OneToOne,
                prop_name,
                reference,
            ));
            return to;
        }

        let schema_type = schema.get("type").and_then(JsonValue::as_str);
        if schema_type == Some("array") {
            let items = schema.get("items").cloned().unwrap_or(JsonValue::Null);
            if let Some(reference) = items.get("$ref").and_then(JsonValue::as_str) {
                let to = ref_name(reference);
                relations.push(Relation::new(
                    entity_name,
                    &to,
                    RelationType::OneToMany,
                    prop_name,
                    reference,
                ));
                return types::slice_of(&to);
            }
            let element = map_scalar(
                items.get("type").and_then(JsonValue::as_str),
                items.get("format").and_then(JsonValue::as_str),
            );
            return types::slice_of(&element);
        }

        map_scalar(schema_type, schema.get("format").and_then(JsonValue::as_str))
    }
}

impl Default for OpenApiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainParser for OpenApiAdapter {
    fn format_name(&self) -> &'static str {
        FORMAT
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        EXTENSIONS
    }

    async fn validate(&self, path: &Path) -> Result<(), AdapterError> {
        let doc = self.load(path).await?;
        if Self::aggregate_schemas(&doc).is_empty() {
            return Err(AdapterError::NoEntities {
                format: FORMAT,
                detail: format!("schemas marked as aggregates ({AGGREGATE_MARKER}: true)"),
            });
        }
        Ok(())
    }

    async fn parse(&self, path: &Path) -> Result<DomainModel, AdapterError> {
        let doc = self.load(path).await?;
        let aggregates = Self::aggregate_schemas(&doc);
        if aggregates.is_empty() {
            return Err(AdapterError::NoEntities {
                format: FORMAT,
                detail: format!("schemas marked as aggregates ({AGGREGATE_MARKER}: true)"),
            });
        }

        let mut relations = Vec::new();
        let entities: Vec<Entity> = aggregates
            .iter()
            .map(|(name, schema)| self.build_entity(name, schema, &mut relations))
            .collect();

        tracing::debug!(
            entities = entities.len(),
            relations = relations.len(),
            "openapi document parsed"
        );

        Ok(DomainModel {
            project: Self::project_name(&doc, path),
            entities,
            relations,
            metadata: ModelMetadata {
                source_format: FORMAT.to_string(),
                source_path: path.display().to_string(),
                document_info: doc.get("info").cloned(),
            },
        })
    }
}

/// Last segment of a `$ref` pointer, as a PascalCase entity name.
fn ref_name(reference: &str) -> String {
    let last = reference.rsplit('/').next().unwrap_or(reference);
    helpers::to_pascal_case(last)
}

/// Fixed `(type, format)` lookup into the canonical type vocabulary.
fn map_scalar(schema_type: Option<&str>, format: Option<&str>) -> String {
    match (schema_type, format) {
        (Some("string"), Some("uuid")) => types::IDENTITY.to_string(),
        (Some("string"), Some("date-time")) | (Some("string"), Some("date")) => {
            types::TIME.to_string()
        }
        (Some("string"), Some("byte")) | (Some("string"), Some("binary")) => {
            types::BYTES.to_string()
        }
        (Some("string"), _) => "string".to_string(),
        (Some("integer"), Some("int32")) => "int32".to_string(),
        (Some("integer"), Some("int64")) => "int64".to_string(),
        (Some("integer"), _) => "int".to_string(),
        (Some("number"), Some("float")) => "float32".to_string(),
        (Some("number"), _) => "float64".to_string(),
        (Some("boolean"), _) => "bool".to_string(),
        (Some("object"), _) => types::MAP.to_string(),
        _ => "string".to_string(),
    }
}

/// Derive the validation-rule string from the source constraint set.
/// Emission order is fixed - length/range bounds, pattern, format token - so
/// re-deriving from the same schema always yields the same string.
fn derive_validation(schema: &JsonValue) -> Option<String> {
    let mut tokens = Vec::new();

    if let Some(min) = schema.get("minLength").and_then(JsonValue::as_u64) {
        tokens.push(format!("min={min}"));
    }
    if let Some(max) = schema.get("maxLength").and_then(JsonValue::as_u64) {
        tokens.push(format!("max={max}"));
    }
    if let Some(min) = schema.get("minimum").and_then(JsonValue::as_f64) {
        tokens.push(format!("min={}", render_number(min)));
    }
    if let Some(max) = schema.get("maximum").and_then(JsonValue::as_f64) {
        tokens.push(format!("max={}", render_number(max)));
    }
    if let Some(pattern) = schema.get("pattern").and_then(JsonValue::as_str) {
        tokens.push(format!("regexp={pattern}"));
    }
    match schema.get("format").and_then(JsonValue::as_str) {
        Some("email") => tokens.push("email".to_string()),
        Some("uri") => tokens.push("url".to_string()),
        _ => {}
    }

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(","))
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// String-encode a default value from the source document.
fn render_default(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
