//! Core data structures for the canonical domain model
//!
//! Adapters build a `DomainModel` from heterogeneous input documents; the
//! generation orchestrator consumes it exactly once. All structures here are
//! pure data - behavior lives in the adapters and the orchestrator.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::domain::types;

/// A named domain concept extracted from an input document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// PascalCase identifier, unique within a model
    pub name: String,
    /// Ordered list of properties; the identity field is always first when injected
    pub properties: Vec<Property>,
    /// Domain behaviors to stub; empty unless the source format declares them
    pub methods: Vec<Method>,
    /// Lifecycle event names, seeded at construction
    pub events: Vec<String>,
    /// Original schema fragment, kept for diagnostics only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

impl Entity {
    /// Create an entity with its lifecycle events seeded.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let events = vec![
            format!("{name}Created"),
            format!("{name}Updated"),
            format!("{name}Deleted"),
        ];
        Self {
            name,
            properties: Vec::new(),
            methods: Vec::new(),
            events,
            metadata: None,
        }
    }

    /// The property recognized as the identity field, if any.
    pub fn identity(&self) -> Option<&Property> {
        self.properties.iter().find(|p| p.is_identity())
    }

    /// Enforce the identity invariant: when no case-insensitive `id` property
    /// exists, inject the canonical identity property as the first property.
    pub fn ensure_identity(&mut self) {
        if self.identity().is_some() {
            return;
        }
        self.properties.insert(0, Property::identity());
    }
}

/// A single field on an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Canonical type string drawn from the bounded target-type vocabulary
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    /// String-encoded default value from the source document
    pub default: Option<String>,
    /// Comma-joined constraint tokens, order preserved as encountered
    pub validation: Option<String>,
    /// Serialization tags; carries at least a `json` key
    pub tags: BTreeMap<String, String>,
    /// Original property fragment, kept for diagnostics only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            required: false,
            default: None,
            validation: None,
            tags: BTreeMap::new(),
            metadata: None,
        }
    }

    /// The canonical identity property injected when a source omits one.
    pub fn identity() -> Self {
        let mut p = Self::new("ID", types::IDENTITY);
        p.required = true;
        p.tags.insert("json".to_string(), "id".to_string());
        p
    }

    /// Case-insensitive match on `id` marks the identity field.
    pub fn is_identity(&self) -> bool {
        self.name.eq_ignore_ascii_case("id")
    }
}

/// Stubbed domain behavior on an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub comment: Option<String>,
    pub params: Vec<MethodParam>,
    pub returns: Option<String>,
}

/// A named, typed method parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// How two entities relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationType {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationType {
    /// Human cardinality label.
    pub fn cardinality(&self) -> &'static str {
        match self {
            RelationType::OneToOne => "1:1",
            RelationType::OneToMany => "1:N",
            RelationType::ManyToMany => "N:M",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationType::OneToOne => write!(f, "one-to-one"),
            RelationType::OneToMany => write!(f, "one-to-many"),
            RelationType::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// A reference between two entities, produced by exactly one property on the
/// `from` entity whose type is the `to` entity name or a slice thereof.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    pub from: String,
    pub to: String,
    pub kind: RelationType,
    pub cardinality: String,
    /// Name of the property that produced this relation
    pub property: String,
    /// Original reference token from the source document
    pub reference: String,
}

impl Relation {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        kind: RelationType,
        property: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            cardinality: kind.cardinality().to_string(),
            property: property.into(),
            reference: reference.into(),
        }
    }
}

/// Source-document bookkeeping carried on a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Source format tag, e.g. `openapi` or `protobuf`
    pub source_format: String,
    pub source_path: String,
    /// Format-specific document info (title, version, package), diagnostics only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_info: Option<JsonValue>,
}

/// The canonical model one adapter invocation produces. Immutable after
/// construction; consumed exactly once by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainModel {
    pub project: String,
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
    pub metadata: ModelMetadata,
}

impl DomainModel {
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Relations originating from the named entity.
    pub fn relations_from(&self, entity: &str) -> Vec<&Relation> {
        self.relations.iter().filter(|r| r.from == entity).collect()
    }
}

/// One rendered artifact. Never mutated after creation; two files with the
/// same path are whole-file replaced or whole-file skipped, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the destination root
    pub path: PathBuf,
    pub content: String,
    /// Carries at least `kind` and, for entity artifacts, `entity`
    pub metadata: BTreeMap<String, String>,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_seeds_lifecycle_events() {
        let entity = Entity::new("User");
        assert_eq!(
            entity.events,
            vec!["UserCreated", "UserUpdated", "UserDeleted"]
        );
    }

    #[test]
    fn test_identity_injection_when_absent() {
        let mut entity = Entity::new("Order");
        entity.properties.push(Property::new("total", "float64"));
        entity.ensure_identity();

        assert_eq!(entity.properties.len(), 2);
        assert_eq!(entity.properties[0].name, "ID");
        assert_eq!(entity.properties[0].ty, "uuid.UUID");
        assert!(entity.properties[0].required);
    }

    #[test]
    fn test_identity_recognized_case_insensitively() {
        let mut entity = Entity::new("User");
        entity.properties.push(Property::new("id", "string"));
        entity.ensure_identity();

        // Existing identity is kept, nothing injected
        assert_eq!(entity.properties.len(), 1);
        assert_eq!(entity.identity().unwrap().name, "id");
        assert_eq!(entity.identity().unwrap().ty, "string");
    }

    #[test]
    fn test_exactly_one_identity_after_normalization() {
        let mut entity = Entity::new("Invoice");
        entity.properties.push(Property::new("amount", "int64"));
        entity.ensure_identity();
        entity.ensure_identity();

        let identities: Vec<_> = entity
            .properties
            .iter()
            .filter(|p| p.is_identity())
            .collect();
        assert_eq!(identities.len(), 1);
    }

    #[test]
    fn test_relation_cardinality_labels() {
        assert_eq!(RelationType::OneToOne.cardinality(), "1:1");
        assert_eq!(RelationType::OneToMany.cardinality(), "1:N");
        assert_eq!(RelationType::ManyToMany.cardinality(), "N:M");

        let rel = Relation::new(
            "User",
            "Order",
            RelationType::OneToMany,
            "orders",
            "#/components/schemas/Order",
        );
        assert_eq!(rel.cardinality, "1:N");
    }

    #[test]
    fn test_relation_type_display() {
        assert_eq!(RelationType::OneToOne.to_string(), "one-to-one");
        assert_eq!(RelationType::OneToMany.to_string(), "one-to-many");
        assert_eq!(RelationType::ManyToMany.to_string(), "many-to-many");
    }
}
