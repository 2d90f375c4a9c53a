//! Protocol Buffer format adapter
//!
//! Scans `.proto` text for top-level message definitions. Every message is a
//! parse candidate; messages whose names end in `Request`, `Response`, `Req`
//! or `Resp` are treated as RPC envelopes and excluded from entity
//! extraction. The suffix match is case-sensitive and purely name-based, so a
//! legitimate domain entity literally named `Request` is a known false
//! exclusion - kept for compatibility rather than fixed.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use std::path::Path;
use tokio::fs;

use crate::adapters::{AdapterError, DomainParser, validate_extension_stage, validate_path_stage};
use crate::domain::{
    DomainModel, Entity, ModelMetadata, Property, Relation, RelationType, types,
};
use crate::rendering::helpers;

const FORMAT: &str = "protobuf";
const EXTENSIONS: &[&str] = &["proto"];

static MESSAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"message\s+([A-Za-z_]\w*)\s*\{").unwrap());

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*(?:(repeated|optional|required)\s+)?(map<\s*[\w.]+\s*,\s*[\w.]+\s*>|[\w.]+)\s+([A-Za-z_]\w*)\s*=\s*(\d+)",
    )
    .unwrap()
});

static PACKAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"package\s+([\w.]+)\s*;").unwrap());

/// Request/response naming heuristic for RPC envelope messages.
pub fn is_request_response_name(name: &str) -> bool {
    name.ends_with("Request")
        || name.ends_with("Response")
        || name.ends_with("Req")
        || name.ends_with("Resp")
}

/// One top-level message block.
struct MessageBlock {
    name: String,
    body: String,
}

/// Adapter for Protocol Buffer definition files.
pub struct ProtoAdapter;

impl ProtoAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Stages 1-3: path, extension, structural scan.
    async fn load(&self, path: &Path) -> Result<Vec<MessageBlock>, AdapterError> {
        validate_path_stage(path)?;
        validate_extension_stage(path, FORMAT, EXTENSIONS)?;

        let raw = fs::read_to_string(path).await?;
        let source = strip_comments(&raw);
        let messages = collect_messages(&source)?;
        if messages.is_empty() {
            return Err(AdapterError::NoEntities {
                format: FORMAT,
                detail: "message definitions".to_string(),
            });
        }
        Ok(messages)
    }

    fn build_entity(&self, message: &MessageBlock, relations: &mut Vec<Relation>) -> Entity {
        let mut entity = Entity::new(message.name.clone());
        // Only top-level fields; nested message/enum/oneof blocks are skipped
        let flat_body = top_level_text(&message.body);

        for capture in FIELD_RE.captures_iter(&flat_body) {
            let label = capture.get(1).map(|m| m.as_str());
            let type_token = capture.get(2).map(|m| m.as_str()).unwrap_or_default();
            let field_name = capture.get(3).map(|m| m.as_str()).unwrap_or_default();
            let number: u32 = capture
                .get(4)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);

            let repeated = label == Some("repeated");
            let name = helpers::to_pascal_case(field_name);
            let ty = resolve_field_type(
                &entity.name,
                &name,
                type_token,
                repeated,
                relations,
            );

            let mut property = Property::new(&name, ty);
            // proto2 `required` is the only explicit required marker; proto3
            // fields are optional on the wire
            property.required = label == Some("required");
            property.tags.insert(
                "json".to_string(),
                helpers::json_tag(&name, property.required),
            );
            property.tags.insert(
                "protobuf".to_string(),
                format!("{field_name},{number}"),
            );
            property.metadata = Some(json!({
                "name": field_name,
                "number": number,
                "label": label,
                "type": type_token,
            }));
            entity.properties.push(property);
        }

        entity.metadata = Some(json!({ "message": message.name }));
        entity.ensure_identity();
        entity
    }
}

impl Default for ProtoAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainParser for ProtoAdapter {
    fn format_name(&self) -> &'static str {
        FORMAT
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        EXTENSIONS
    }

    async fn validate(&self, path: &Path) -> Result<(), AdapterError> {
        let messages = self.load(path).await?;
        let eligible = messages
            .iter()
            .filter(|m| !is_request_response_name(&m.name))
            .count();
        if eligible == 0 {
            return Err(AdapterError::OnlyRequestResponseMessages {
                count: messages.len(),
            });
        }
        Ok(())
    }

    async fn parse(&self, path: &Path) -> Result<DomainModel, AdapterError> {
        let messages = self.load(path).await?;
        let eligible: Vec<&MessageBlock> = messages
            .iter()
            .filter(|m| !is_request_response_name(&m.name))
            .collect();
        if eligible.is_empty() {
            // Distinct from "malformed document": the file parsed fine but
            // every message matched the envelope heuristic
            return Err(AdapterError::OnlyRequestResponseMessages {
                count: messages.len(),
            });
        }

        let raw = fs::read_to_string(path).await?;
        let package = PACKAGE_RE
            .captures(&strip_comments(&raw))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        let mut relations = Vec::new();
        let entities: Vec<Entity> = eligible
            .iter()
            .map(|m| self.build_entity(m, &mut relations))
            .collect();

        tracing::debug!(
            entities = entities.len(),
            excluded = messages.len() - entities.len(),
            "protobuf document parsed"
        );

        Ok(DomainModel {
            project: project_name(package.as_deref(), path),
            entities,
            relations,
            metadata: ModelMetadata {
                source_format: FORMAT.to_string(),
                source_path: path.display().to_string(),
                document_info: Some(json!({
                    "package": package,
                    "messages": messages.len(),
                })),
            },
        })
    }
}

/// Project name from the package statement's last segment, falling back to
/// the filename stem.
fn project_name(package: Option<&str>, path: &Path) -> String {
    let base = package
        .and_then(|p| p.rsplit('.').next())
        .map(str::to_string)
        .unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("generated")
                .to_string()
        });
    base.to_lowercase().replace([' ', '_'], "-")
}

/// Remove `//` line comments and `/* */` block comments.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '/' && chars.peek() == Some(&'/') {
            for c in chars.by_ref() {
                if c == '\n' {
                    out.push('\n');
                    break;
                }
            }
        } else if ch == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut prev = ' ';
            for c in chars.by_ref() {
                if prev == '*' && c == '/' {
                    break;
                }
                prev = c;
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Collect top-level message blocks with brace-balanced bodies.
fn collect_messages(source: &str) -> Result<Vec<MessageBlock>, AdapterError> {
    let mut messages = Vec::new();
    let mut cursor = 0;

    while let Some(capture) = MESSAGE_RE.captures(&source[cursor..]) {
        let whole = capture.get(0).unwrap();
        let name = capture.get(1).unwrap().as_str().to_string();
        let body_start = cursor + whole.end();

        let mut depth = 1usize;
        let mut body_end = None;
        for (offset, ch) in source[body_start..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        body_end = Some(body_start + offset);
                        break;
                    }
                }
                _ => {}
            }
        }

        let Some(body_end) = body_end else {
            return Err(AdapterError::InvalidDocument {
                format: FORMAT,
                reason: format!("unbalanced braces in message '{name}'"),
            });
        };

        messages.push(MessageBlock {
            name,
            body: source[body_start..body_end].to_string(),
        });
        cursor = body_end + 1;
    }

    Ok(messages)
}

/// Text of a message body with nested braced blocks removed, so the field
/// regex only sees the message's own fields.
fn top_level_text(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut depth = 0usize;
    for ch in body.chars() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Proto scalar table into the canonical vocabulary; anything else is a
/// message reference and produces a Relation.
fn resolve_field_type(
    entity_name: &str,
    prop_name: &str,
    type_token: &str,
    repeated: bool,
    relations: &mut Vec<Relation>,
) -> String {
    if type_token.starts_with("map<") {
        return types::MAP.to_string();
    }

    let base = match type_token {
        "double" => Some("float64"),
        "float" => Some("float32"),
        "int32" | "sint32" | "sfixed32" => Some("int32"),
        "int64" | "sint64" | "sfixed64" => Some("int64"),
        "uint32" | "fixed32" => Some("uint32"),
        "uint64" | "fixed64" => Some("uint64"),
        "bool" => Some("bool"),
        "string" => Some("string"),
        "bytes" => Some(types::BYTES),
        _ => None,
    };

    match base {
        Some(scalar) => {
            if repeated {
                types::slice_of(scalar)
            } else {
                scalar.to_string()
            }
        }
        None => {
            // Message-typed field: relation to the referenced message's
            // entity name (last segment of a qualified type)
            let to = helpers::to_pascal_case(type_token.rsplit('.').next().unwrap_or(type_token));
            let kind = if repeated {
                RelationType::OneToMany
            } else {
                RelationType::OneToOne
            };
            relations.push(Relation::new(entity_name, &to, kind, prop_name, type_token));
            if repeated {
                types::slice_of(&to)
            } else {
                to
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const USER_PROTO: &str = r#"
syntax = "proto3";

package shop.user;

// User aggregate
message User {
  string id = 1;
  string email = 2;
  int64 age = 3;
  repeated string roles = 4;
  Address address = 5;
  repeated Order orders = 6;
}

message Address {
  string street = 1;
  string city = 2;
}

message Order {
  string id = 1;
  double total = 2;
}

message GetUserRequest {
  string id = 1;
}

message GetUserResponse {
  User user = 1;
}

service UserService {
  rpc GetUser (GetUserRequest) returns (GetUserResponse);
}
"#;

    fn write_proto(content: &str, name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_request_response_heuristic() {
        assert!(is_request_response_name("GetUserRequest"));
        assert!(is_request_response_name("GetUserResponse"));
        assert!(is_request_response_name("LoginReq"));
        assert!(is_request_response_name("LoginResp"));
        assert!(!is_request_response_name("User"));
        // Case-sensitive: lowercase suffixes do not match
        assert!(!is_request_response_name("Userrequest"));
        // Known false exclusion, preserved for compatibility
        assert!(is_request_response_name("Request"));
        // Suffix-only match: interior occurrences are fine
        assert!(!is_request_response_name("ResetPasswordRequestLog"));
    }

    #[tokio::test]
    async fn test_parse_excludes_envelope_messages() {
        let (_dir, path) = write_proto(USER_PROTO, "user.proto");
        let model = ProtoAdapter::new().parse(&path).await.unwrap();

        let names: Vec<&str> = model.entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["User", "Address", "Order"]);
        assert!(!names.contains(&"GetUserRequest"));
        assert!(!names.contains(&"GetUserResponse"));
    }

    #[tokio::test]
    async fn test_repeated_scalar_becomes_slice() {
        let (_dir, path) = write_proto(USER_PROTO, "user.proto");
        let model = ProtoAdapter::new().parse(&path).await.unwrap();
        let user = model.entity("User").unwrap();

        let roles = user.properties.iter().find(|p| p.name == "Roles").unwrap();
        assert_eq!(roles.ty, "[]string");
    }

    #[tokio::test]
    async fn test_snake_case_field_names_become_pascal() {
        let proto = r#"
message Payment {
  string payment_id = 1;
  string a_b_c_d = 2;
  int64 user_id = 3;
}
"#;
        let (_dir, path) = write_proto(proto, "payment.proto");
        let model = ProtoAdapter::new().parse(&path).await.unwrap();
        let payment = model.entity("Payment").unwrap();

        let names: Vec<&str> = payment.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["PaymentId", "ABCD", "UserId"]);
    }

    #[tokio::test]
    async fn test_message_fields_become_relations() {
        let (_dir, path) = write_proto(USER_PROTO, "user.proto");
        let model = ProtoAdapter::new().parse(&path).await.unwrap();

        let address = model
            .relations
            .iter()
            .find(|r| r.from == "User" && r.to == "Address")
            .unwrap();
        assert_eq!(address.kind, RelationType::OneToOne);

        let orders = model
            .relations
            .iter()
            .find(|r| r.from == "User" && r.to == "Order")
            .unwrap();
        assert_eq!(orders.kind, RelationType::OneToMany);

        let user = model.entity("User").unwrap();
        let orders_prop = user.properties.iter().find(|p| p.name == "Orders").unwrap();
        assert_eq!(orders_prop.ty, "[]Order");
    }

    #[tokio::test]
    async fn test_properties_carry_json_and_protobuf_tags() {
        let (_dir, path) = write_proto(USER_PROTO, "user.proto");
        let model = ProtoAdapter::new().parse(&path).await.unwrap();
        let user = model.entity("User").unwrap();

        let email = user.properties.iter().find(|p| p.name == "Email").unwrap();
        assert_eq!(email.tags.get("json").unwrap(), "email,omitempty");
        assert_eq!(email.tags.get("protobuf").unwrap(), "email,2");
    }

    #[tokio::test]
    async fn test_identity_injected_when_missing() {
        let proto = r#"
message AuditEntry {
  string action = 1;
}
"#;
        let (_dir, path) = write_proto(proto, "audit.proto");
        let model = ProtoAdapter::new().parse(&path).await.unwrap();
        let entry = model.entity("AuditEntry").unwrap();

        assert_eq!(entry.properties[0].name, "ID");
        assert_eq!(entry.properties[0].ty, "uuid.UUID");
        assert_eq!(entry.properties.iter().filter(|p| p.is_identity()).count(), 1);
    }

    #[tokio::test]
    async fn test_all_envelopes_is_a_distinct_error() {
        let proto = r#"
message PingRequest {
  string id = 1;
}

message PingResponse {
  string id = 1;
}
"#;
        let (_dir, path) = write_proto(proto, "ping.proto");
        let err = ProtoAdapter::new().parse(&path).await.unwrap_err();
        assert!(matches!(
            err,
            AdapterError::OnlyRequestResponseMessages { count: 2 }
        ));
    }

    #[tokio::test]
    async fn test_file_without_messages() {
        let (_dir, path) = write_proto("syntax = \"proto3\";\n", "empty.proto");
        let err = ProtoAdapter::new().parse(&path).await.unwrap_err();
        assert!(matches!(err, AdapterError::NoEntities { .. }));
    }

    #[tokio::test]
    async fn test_unbalanced_braces_are_malformed() {
        let (_dir, path) = write_proto("message Broken {\n  string id = 1;\n", "broken.proto");
        let err = ProtoAdapter::new().parse(&path).await.unwrap_err();
        assert!(matches!(err, AdapterError::InvalidDocument { .. }));
    }

    #[tokio::test]
    async fn test_project_name_from_package() {
        let (_dir, path) = write_proto(USER_PROTO, "user.proto");
        let model = ProtoAdapter::new().parse(&path).await.unwrap();
        assert_eq!(model.project, "user");
    }

    #[test]
    fn test_comment_stripping() {
        let source = "// line\nmessage A { /* block */ string id = 1; }";
        let stripped = strip_comments(source);
        assert!(!stripped.contains("line"));
        assert!(!stripped.contains("block"));
        assert!(stripped.contains("string id = 1;"));
    }
}
