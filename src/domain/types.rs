//! Canonical target-type vocabulary shared by adapters and templates

/// Canonical identity type for generated aggregates.
pub const IDENTITY: &str = "uuid.UUID";

/// Canonical timestamp type.
pub const TIME: &str = "time.Time";

/// Canonical raw-bytes type.
pub const BYTES: &str = "[]byte";

/// Canonical free-form map type.
pub const MAP: &str = "map[string]interface{}";

/// Build the slice type for an element type.
pub fn slice_of(element: &str) -> String {
    format!("[]{element}")
}

/// Check whether a canonical type is a slice.
pub fn is_slice(ty: &str) -> bool {
    ty.starts_with("[]")
}

/// Element type of a slice, or the type itself if it is not a slice.
pub fn element_of(ty: &str) -> &str {
    ty.strip_prefix("[]").unwrap_or(ty)
}

/// Check whether a canonical type refers to another entity, either directly
/// or as a slice. Entity references are the only types starting with an
/// uppercase letter that are not in the builtin vocabulary.
pub fn is_entity_reference(ty: &str) -> bool {
    let base = element_of(ty);
    if base == IDENTITY || base == TIME {
        return false;
    }
    base.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
