//! Render-context assembly for the generation workflow

use serde::Serialize;
use serde_json::{Value as JsonValue, json};

use crate::domain::{DomainModel, Entity, Property, types};
use crate::generation::shapes;

/// Project-level metadata every template receives.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    pub name: String,
    /// Go module path written into go.mod and imports
    pub module: String,
    pub version: String,
    pub description: Option<String>,
}

impl ProjectInfo {
    pub fn new(name: impl Into<String>, module: Option<String>) -> Self {
        let name = name.into();
        let module = module.unwrap_or_else(|| name.clone());
        Self {
            name,
            module,
            version: "0.1.0".to_string(),
            description: None,
        }
    }

    pub fn from_model(model: &DomainModel, module: Option<String>) -> Self {
        Self::new(model.project.clone(), module)
    }
}

/// Directly comparable in the target language: not a slice, map or entity
/// reference. Drives which fields the generated tests assert zero values on.
fn is_scalar(ty: &str) -> bool {
    !ty.starts_with("[]") && !ty.starts_with("map[") && !types::is_entity_reference(ty)
}

fn property_json(p: &Property) -> JsonValue {
    json!({
        "name": p.name,
        "type": p.ty,
        "required": p.required,
        "default": p.default,
        "validation": p.validation,
        "tags": p.tags,
        "scalar": is_scalar(&p.ty),
        "nilable": p.ty.starts_with("[]") || p.ty.starts_with("map[") || p.ty.starts_with('*'),
    })
}

/// Context for the per-entity artifact sequence.
pub fn entity_context(project: &ProjectInfo, model: &DomainModel, entity: &Entity) -> JsonValue {
    let identity = entity.identity().cloned();
    let commands = shapes::derive_commands(entity);
    let queries = shapes::derive_queries(entity);

    let properties: Vec<JsonValue> = entity.properties.iter().map(property_json).collect();
    let create_fields: Vec<JsonValue> = commands[0].fields.iter().map(property_json).collect();
    let update_fields: Vec<JsonValue> = entity
        .properties
        .iter()
        .filter(|p| !p.is_identity())
        .map(property_json)
        .collect();

    json!({
        "project": project,
        "entity": {
            "name": entity.name,
            "properties": properties,
            "events": entity.events,
            "methods": entity.methods,
        },
        "identity": identity,
        "relations": model.relations_from(&entity.name),
        "commands": commands,
        "queries": queries,
        "create_fields": create_fields,
        "update_fields": update_fields,
        "imports": {
            // Anywhere in a type expression, including slices
            "time": entity.properties.iter().any(|p| p.ty.contains(types::TIME)),
            "uuid": entity.properties.iter().any(|p| p.ty.contains(types::IDENTITY)),
            "domain": entity
                .properties
                .iter()
                .any(|p| types::is_entity_reference(&p.ty)),
        },
        "test_imports": {
            // Only directly comparable fields appear in zero-value assertions
            "time": entity.properties.iter().any(|p| p.ty == types::TIME),
            "uuid": entity.properties.iter().any(|p| p.ty == types::IDENTITY),
        },
    })
}

/// Context for scaffold artifacts - project metadata only, no entities.
pub fn scaffold_context(project: &ProjectInfo) -> JsonValue {
    json!({ "project": project })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelMetadata;

    fn sample_model() -> DomainModel {
        let mut entity = Entity::new("User");
        entity.properties.push(Property::new("email", "string"));
        entity.properties.push(Property::new("orders", "[]Order"));
        entity.ensure_identity();
        DomainModel {
            project: "shop".to_string(),
            entities: vec![entity],
            relations: Vec::new(),
            metadata: ModelMetadata {
                source_format: "openapi".to_string(),
                source_path: "shop.yaml".to_string(),
                document_info: None,
            },
        }
    }

    #[test]
    fn test_module_defaults_to_project_name() {
        let project = ProjectInfo::new("shop", None);
        assert_eq!(project.module, "shop");

        let custom = ProjectInfo::new("shop", Some("github.com/acme/shop".to_string()));
        assert_eq!(custom.module, "github.com/acme/shop");
    }

    #[test]
    fn test_entity_context_shape() {
        let model = sample_model();
        let project = ProjectInfo::from_model(&model, None);
        let ctx = entity_context(&project, &model, &model.entities[0]);

        assert_eq!(ctx["entity"]["name"], "User");
        assert_eq!(ctx["identity"]["name"], "ID");
        assert_eq!(ctx["imports"]["uuid"], true);
        assert_eq!(ctx["imports"]["time"], false);
        assert_eq!(ctx["imports"]["domain"], true);
        assert_eq!(ctx["commands"].as_array().unwrap().len(), 3);
        assert_eq!(ctx["queries"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_scalar_flags() {
        let model = sample_model();
        let project = ProjectInfo::from_model(&model, None);
        let ctx = entity_context(&project, &model, &model.entities[0]);

        let props = ctx["entity"]["properties"].as_array().unwrap();
        let id = props.iter().find(|p| p["name"] == "ID").unwrap();
        assert_eq!(id["scalar"], true);
        let orders = props.iter().find(|p| p["name"] == "orders").unwrap();
        assert_eq!(orders["scalar"], false);
    }

    #[test]
    fn test_update_fields_exclude_identity() {
        let model = sample_model();
        let project = ProjectInfo::from_model(&model, None);
        let ctx = entity_context(&project, &model, &model.entities[0]);

        let update = ctx["update_fields"].as_array().unwrap();
        assert!(update.iter().all(|f| f["name"] != "ID"));
    }

    #[test]
    fn test_scaffold_context_carries_no_entities() {
        let project = ProjectInfo::new("shop", None);
        let ctx = scaffold_context(&project);
        assert_eq!(ctx["project"]["name"], "shop");
        assert!(ctx.get("entity").is_none());
    }
}
