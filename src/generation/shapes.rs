//! Deterministic command/query shape derivation
//!
//! Create takes all required non-identity properties, Update takes all
//! properties, Delete and Get take only the identity, List takes the fixed
//! pagination shape.

use serde::Serialize;

use crate::domain::{Entity, Property};
use crate::rendering::helpers;

/// Default page size for List queries.
pub const LIST_DEFAULT_LIMIT: i64 = 20;

/// Default offset for List queries.
pub const LIST_DEFAULT_OFFSET: i64 = 0;

/// A derived command or query struct shape.
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    pub name: String,
    /// Verb the shape implements: Create, Update, Delete, Get or List
    pub action: String,
    pub fields: Vec<Property>,
}

fn pagination_field(name: &str, default: i64) -> Property {
    let mut p = Property::new(name, "int");
    p.default = Some(default.to_string());
    p.tags.insert(
        "json".to_string(),
        helpers::json_tag(name, false),
    );
    p
}

/// The create/update/delete command shapes for an entity.
pub fn derive_commands(entity: &Entity) -> Vec<Shape> {
    let name = &entity.name;
    let identity: Vec<Property> = entity
        .properties
        .iter()
        .filter(|p| p.is_identity())
        .cloned()
        .collect();

    vec![
        Shape {
            name: format!("Create{name}Command"),
            action: "Create".to_string(),
            fields: entity
                .properties
                .iter()
                .filter(|p| p.required && !p.is_identity())
                .cloned()
                .collect(),
        },
        Shape {
            name: format!("Update{name}Command"),
            action: "Update".to_string(),
            fields: entity.properties.clone(),
        },
        Shape {
            name: format!("Delete{name}Command"),
            action: "Delete".to_string(),
            fields: identity,
        },
    ]
}

/// The get/list query shapes for an entity.
pub fn derive_queries(entity: &Entity) -> Vec<Shape> {
    let name = &entity.name;
    let plural = helpers::pluralize(name);

    vec![
        Shape {
            name: format!("Get{name}Query"),
            action: "Get".to_string(),
            fields: entity
                .properties
                .iter()
                .filter(|p| p.is_identity())
                .cloned()
                .collect(),
        },
        Shape {
            name: format!("List{plural}Query"),
            action: "List".to_string(),
            fields: vec![
                pagination_field("Limit", LIST_DEFAULT_LIMIT),
                pagination_field("Offset", LIST_DEFAULT_OFFSET),
            ],
        },
    ]
}
