//! Template JSON parsing and placeholder resolution

use crate::{Element, Result, Template, TemplateError};
use serde_json::{Map, Value};

/// Parse a template from JSON string
pub fn parse_template(json: &str) -> Result<Template> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| TemplateError::TemplateMalformed(e.to_string()))?;
    Template::from_value(value)
}

impl Template {
    /// Parse a template from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        parse_template(json)
    }

    /// Build a template from an already-parsed JSON value
    ///
    /// The value must be an object with an `elements` array (`objects` is
    /// accepted for templates saved by older authoring tools). Elements that
    /// cannot be decoded are logged and dropped; the rest keep their order.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(TemplateError::TemplateMalformed(
                "template must be a JSON object".to_string(),
            ));
        };

        let elements = match root.remove("elements").or_else(|| root.remove("objects")) {
            Some(Value::Array(elements)) => elements,
            Some(other) => {
                return Err(TemplateError::TemplateMalformed(format!(
                    "elements must be a list, found {}",
                    json_type_name(&other)
                )))
            }
            None => {
                return Err(TemplateError::TemplateMalformed(
                    "template has no elements list".to_string(),
                ))
            }
        };

        let elements = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| match serde_json::from_value::<Element>(element) {
                Ok(element) => Some(element),
                Err(e) => {
                    log::warn!("skipping element {index}: {e}");
                    None
                }
            })
            .collect();

        Ok(Template {
            id: root.remove("id").filter(|v| !v.is_null()),
            name: string_field(&root, "name"),
            description: string_field(&root, "description"),
            page_size: string_field(&root, "pageSize"),
            status: string_field(&root, "status"),
            author: string_field(&root, "author"),
            created_at: root.remove("createdAt").filter(|v| !v.is_null()),
            updated_at: root.remove("updatedAt").filter(|v| !v.is_null()),
            elements,
        })
    }
}

fn string_field(root: &Map<String, Value>, key: &str) -> Option<String> {
    root.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Replace `{{field}}` placeholders in text with values from a data record
///
/// - Whitespace inside the braces is ignored: `{{ name }}` == `{{name}}`
/// - `{{{field}}}` is accepted as a synonym
/// - Missing fields become empty strings
/// - Substituted values are never scanned again
/// - An unterminated `{{` is kept as literal text
pub fn resolve_placeholders(text: &str, data: &Value) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        // Triple braces only when the matching closer exists
        let (inner, closer) = match after.strip_prefix('{') {
            Some(inner) if inner.contains("}}}") => (inner, "}}}"),
            _ => (after, "}}"),
        };

        let Some(end) = inner.find(closer) else {
            output.push_str(&rest[start..]);
            return output;
        };

        let key = inner[..end].trim();
        if let Some(value) = lookup_field(data, key) {
            output.push_str(&value_to_string(value));
        }
        rest = &inner[end + closer.len()..];
    }

    output.push_str(rest);
    output
}

/// Look up a placeholder key in a data record
///
/// An exact top-level key always wins. Otherwise keys containing `.` or
/// `[` are walked as paths: `customer.name`, `items.0`, `items[0].name`.
pub fn lookup_field<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(key) {
        return Some(value);
    }
    if !data.is_object() || !(key.contains('.') || key.contains('[')) {
        return None;
    }
    resolve_path(key, data)
}

/// Walk a dotted path through nested objects and arrays
fn resolve_path<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
    let mut current = data;

    for segment in path.split('.') {
        let segment = segment.trim();
        // Check for array index
        if let Some(bracket_pos) = segment.find('[') {
            let field = &segment[..bracket_pos];
            let index_str = segment[bracket_pos + 1..].strip_suffix(']')?;
            let index: usize = index_str.trim().parse().ok()?;

            if !field.is_empty() {
                current = current.get(field)?;
            }
            current = current.get(index)?;
        } else if let Value::Array(items) = current {
            current = items.get(segment.parse::<usize>().ok()?)?;
        } else {
            current = current.get(segment)?;
        }
    }

    Some(current)
}

/// Convert a JSON value to string for rendering
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // 595000.0 prints as 595000
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_resolve_simple_placeholder() {
        let data = json!({ "name": "Ana" });
        assert_eq!(resolve_placeholders("Hello {{name}}", &data), "Hello Ana");
    }

    #[test]
    fn test_resolve_whitespace_inside_braces() {
        let data = json!({ "name": "Ana" });
        assert_eq!(resolve_placeholders("Hello {{ name }}", &data), "Hello Ana");
    }

    #[test]
    fn test_resolve_missing_field() {
        assert_eq!(resolve_placeholders("Hi {{x}}!", &json!({})), "Hi !");
    }

    #[test]
    fn test_resolve_multiple_and_repeated() {
        let data = json!({ "a": "1", "b": 2 });
        assert_eq!(
            resolve_placeholders("{{a}}-{{b}}-{{a}}", &data),
            "1-2-1"
        );
    }

    #[test]
    fn test_resolve_is_not_recursive() {
        let data = json!({ "a": "{{b}}", "b": "nope" });
        assert_eq!(resolve_placeholders("{{a}}", &data), "{{b}}");
    }

    #[test]
    fn test_resolve_triple_braces() {
        let data = json!({ "name": "Ana" });
        assert_eq!(resolve_placeholders("Hi {{{name}}}", &data), "Hi Ana");
    }

    #[test]
    fn test_resolve_unterminated() {
        let data = json!({ "name": "Ana" });
        assert_eq!(
            resolve_placeholders("Hi {{name}} and {{oops", &data),
            "Hi Ana and {{oops"
        );
        assert_eq!(resolve_placeholders("{ {name} }", &data), "{ {name} }");
    }

    #[test]
    fn test_resolve_without_placeholders() {
        assert_eq!(resolve_placeholders("Plain text", &json!({})), "Plain text");
        assert_eq!(resolve_placeholders("", &json!({})), "");
    }

    #[test]
    fn test_resolve_non_object_record() {
        assert_eq!(resolve_placeholders("[{{name}}]", &json!("Ana")), "[]");
        assert_eq!(resolve_placeholders("[{{name}}]", &Value::Null), "[]");
    }

    #[test]
    fn test_lookup_exact_key_wins() {
        let data = json!({
            "customer.name": "flat",
            "customer": { "name": "nested" }
        });
        assert_eq!(lookup_field(&data, "customer.name"), Some(&json!("flat")));
    }

    #[test]
    fn test_lookup_nested_paths() {
        let data = json!({
            "customer": { "name": "Jane" },
            "items": [{ "name": "Item 1" }, { "name": "Item 2" }]
        });
        assert_eq!(lookup_field(&data, "customer.name"), Some(&json!("Jane")));
        assert_eq!(lookup_field(&data, "items.1.name"), Some(&json!("Item 2")));
        assert_eq!(lookup_field(&data, "items[0].name"), Some(&json!("Item 1")));
        assert_eq!(lookup_field(&data, "items[9].name"), None);
        assert_eq!(lookup_field(&data, "customer.missing"), None);
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("hello")), "hello");
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(-7)), "-7");
        assert_eq!(value_to_string(&json!(595000.0)), "595000");
        assert_eq!(value_to_string(&json!(19.99)), "19.99");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(null)), "");
    }

    #[test]
    fn test_parse_template() {
        let json = r##"{
            "id": 42,
            "name": "invoice",
            "pageSize": "Letter",
            "elements": [
                { "type": "text", "content": "Hello {{name}}", "x": 60, "y": 55 },
                { "type": "rectangle", "x": 0, "y": 0, "width": 10, "height": 10, "color": "#FF0000" }
            ]
        }"##;

        let template = parse_template(json).unwrap();
        assert_eq!(template.id, Some(serde_json::json!(42)));
        assert_eq!(template.name.as_deref(), Some("invoice"));
        assert_eq!(template.page_size.as_deref(), Some("Letter"));
        assert_eq!(template.elements.len(), 2);
        assert_eq!(template.elements[0].kind(), "text");
        assert_eq!(template.elements[1].kind(), "rectangle");
    }

    #[test]
    fn test_parse_legacy_objects_key() {
        let template =
            parse_template(r#"{ "objects": [{ "type": "line", "x": 1, "y": 2, "width": 3 }] }"#)
                .unwrap();
        assert_eq!(template.elements.len(), 1);
    }

    #[test]
    fn test_parse_malformed_templates() {
        for json in [
            r#"{ "elements": {} }"#,
            r#"{ "elements": "none" }"#,
            r#"{ "name": "no elements" }"#,
            r#"[1, 2, 3]"#,
            r#"{ not json"#,
        ] {
            assert!(
                matches!(parse_template(json), Err(TemplateError::TemplateMalformed(_))),
                "expected TemplateMalformed for {json}"
            );
        }
    }

    #[test]
    fn test_undecodable_element_is_skipped() {
        let template = parse_template(
            r#"{ "elements": [
                { "type": "text", "content": "a", "x": "left" },
                { "type": "text", "content": "b", "x": 1, "y": 2 }
            ] }"#,
        )
        .unwrap();

        assert_eq!(template.elements.len(), 1);
        let Element::Text(text) = &template.elements[0] else {
            panic!("expected text element");
        };
        assert_eq!(text.content, "b");
    }
}
