//! Helper-function library exposed to templates
//!
//! Case converters, the naive English pluralizer, the Go zero-value table and
//! the struct-tag builders. Everything here is a pure function of its input;
//! the tera wrappers at the bottom only adapt signatures.

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tera::Tera;

use crate::domain::types;

/// snake_case: insert `_` before every interior uppercase letter, then
/// lower-case. The literal input `ID` is special-cased to `id`. Existing
/// separators (`-`, space) are normalized to `_`.
pub fn to_snake_case(s: &str) -> String {
    if s == "ID" {
        return "id".to_string();
    }
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.chars().enumerate() {
        if ch == '-' || ch == ' ' {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
        } else if ch.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// kebab-case: snake_case with `-` as the separator.
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

/// PascalCase: split on `_`, `-` and spaces, upper-case the first letter of
/// each segment, concatenate. Single-letter segments title-case to themselves,
/// so `a_b_c_d` becomes `ABCD`.
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-', ' '])
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let mut chars = seg.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect()
}

/// camelCase: PascalCase with the first letter lowered.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
    }
}

/// Naive English pluralizer: `y` -> `ies`, trailing `s`/`sh`/`ch` -> `+es`,
/// otherwise `+s`.
pub fn pluralize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    if let Some(stem) = s.strip_suffix('y') {
        return format!("{stem}ies");
    }
    if s.ends_with('s') || s.ends_with("sh") || s.ends_with("ch") {
        return format!("{s}es");
    }
    format!("{s}s")
}

/// Inverse of `pluralize`.
pub fn singularize(s: &str) -> String {
    if let Some(stem) = s.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = s.strip_suffix("es") {
        if stem.ends_with('s') || stem.ends_with("sh") || stem.ends_with("ch") {
            return stem.to_string();
        }
    }
    if let Some(stem) = s.strip_suffix('s') {
        return stem.to_string();
    }
    s.to_string()
}

/// Go zero-value literal for a canonical type.
pub fn zero_value(ty: &str) -> String {
    match ty {
        "string" => "\"\"".to_string(),
        "int" | "int32" | "int64" | "uint32" | "uint64" => "0".to_string(),
        "float32" | "float64" => "0.0".to_string(),
        "bool" => "false".to_string(),
        t if t == types::IDENTITY => "uuid.Nil".to_string(),
        t if t == types::TIME => "time.Time{}".to_string(),
        t if t.starts_with("[]") || t.starts_with("map[") || t.starts_with('*') => {
            "nil".to_string()
        }
        // Entity references and any remaining compound type zero to a
        // composite literal
        t => format!("{t}{{}}"),
    }
}

/// Qualify entity-reference types with the `domain` package for use from
/// other generated packages; builtin and already-qualified types pass through.
pub fn domain_type(ty: &str) -> String {
    let (prefix, base) = if let Some(base) = ty.strip_prefix("[]*") {
        ("[]*", base)
    } else if let Some(base) = ty.strip_prefix("[]") {
        ("[]", base)
    } else if let Some(base) = ty.strip_prefix('*') {
        ("*", base)
    } else {
        ("", ty)
    };
    if !types::is_entity_reference(base) || base.contains('.') {
        return ty.to_string();
    }
    format!("{prefix}domain.{base}")
}

/// JSON struct-tag value: snake_case name, `,omitempty` for optional fields.
pub fn json_tag(name: &str, required: bool) -> String {
    let tag = to_snake_case(name);
    if required {
        tag
    } else {
        format!("{tag},omitempty")
    }
}

/// Validation struct-tag value: `required` first when the field is required,
/// then the stored validation-rule string.
pub fn validation_tag(required: bool, rules: Option<&str>) -> String {
    let mut parts = Vec::new();
    if required {
        parts.push("required".to_string());
    }
    if let Some(rules) = rules {
        if !rules.is_empty() {
            parts.push(rules.to_string());
        }
    }
    parts.join(",")
}

fn string_arg(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn str_filter(
    f: fn(&str) -> String,
) -> impl tera::Filter {
    move |value: &JsonValue, _: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
        let input = value
            .as_str()
            .ok_or_else(|| tera::Error::msg("filter input must be a string"))?;
        Ok(JsonValue::String(f(input)))
    }
}

/// Register the helper library into a tera instance.
pub fn register(tera: &mut Tera) {
    tera.register_filter("snake_case", str_filter(to_snake_case));
    tera.register_filter("kebab_case", str_filter(to_kebab_case));
    tera.register_filter("pascal_case", str_filter(to_pascal_case));
    tera.register_filter("camel_case", str_filter(to_camel_case));
    tera.register_filter("plural", str_filter(pluralize));
    tera.register_filter("singular", str_filter(singularize));
    tera.register_filter("zero_value", str_filter(zero_value));
    tera.register_filter("domain_type", str_filter(domain_type));

    tera.register_function(
        "json_tag",
        |args: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
            let name = string_arg(args.get("name"));
            if name.is_empty() {
                return Err(tera::Error::msg("json_tag requires a 'name' argument"));
            }
            let required = args
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false);
            Ok(JsonValue::String(json_tag(&name, required)))
        },
    );

    tera.register_function(
        "validation_tag",
        |args: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
            let required = args
                .get("required")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false);
            let rules = match args.get("rules") {
                Some(JsonValue::String(s)) => Some(s.clone()),
                _ => None,
            };
            Ok(JsonValue::String(validation_tag(required, rules.as_deref())))
        },
    );
}
