//! Integration tests for template rendering

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};
use pretty_assertions::assert_eq;
use serde_json::json;
use template::{
    parse_template, render_json, render_template, RenderOptions, TemplateError, TemplateRenderer,
};

fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).unwrap()
}

fn number(obj: &Object) -> f64 {
    match obj {
        Object::Integer(i) => *i as f64,
        Object::Real(r) => *r as f64,
        other => panic!("not a number: {other:?}"),
    }
}

/// Decoded content operations of the single page
fn operations(bytes: &[u8]) -> Vec<Operation> {
    let doc = load(bytes);
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = *pages.values().next().unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    Content::decode(&content).unwrap().operations
}

/// Strings shown with `Tj`, in drawing order
fn shown_text(bytes: &[u8]) -> Vec<String> {
    operations(bytes)
        .iter()
        .filter(|op| op.operator == "Tj")
        .map(|op| String::from_utf8(op.operands[0].as_str().unwrap().to_vec()).unwrap())
        .collect()
}

fn operators(bytes: &[u8]) -> Vec<String> {
    operations(bytes).into_iter().map(|op| op.operator).collect()
}

fn render(template_json: &str, data: serde_json::Value) -> Vec<u8> {
    let template = parse_template(template_json).unwrap();
    render_template(&template, &data).unwrap()
}

#[test]
fn test_page_is_always_a4() {
    for page_size in ["A4", "Letter", "Legal"] {
        let template_json = format!(
            r#"{{ "name": "t", "pageSize": "{page_size}", "elements": [
                {{ "type": "rectangle", "x": 0, "y": 0, "width": 1000, "height": 2000 }}
            ] }}"#
        );
        let bytes = render(&template_json, json!({}));

        let doc = load(&bytes);
        let page_id = *doc.get_pages().values().next().unwrap();
        let media_box: Vec<f64> = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"MediaBox")
            .and_then(Object::as_array)
            .unwrap()
            .iter()
            .map(number)
            .collect();

        assert_eq!(media_box, vec![0.0, 0.0, 595.0, 842.0]);
    }
}

#[test]
fn test_placeholder_is_resolved() {
    let bytes = render(
        r#"{ "elements": [
            { "type": "text", "content": "Hello {{name}}", "x": 60, "y": 55 }
        ] }"#,
        json!({ "name": "Ana" }),
    );

    assert_eq!(shown_text(&bytes), vec!["Hello Ana".to_string()]);
}

#[test]
fn test_missing_field_resolves_to_empty() {
    let bytes = render(
        r#"{ "elements": [
            { "type": "text", "content": "Hi {{x}}!", "x": 60, "y": 55 }
        ] }"#,
        json!({}),
    );

    assert_eq!(shown_text(&bytes), vec!["Hi !".to_string()]);
}

#[test]
fn test_numbers_and_nested_fields() {
    let bytes = render(
        r#"{ "elements": [
            { "type": "text", "content": "{{ customer.name }} owes {{total}}", "x": 10, "y": 10 },
            { "type": "text", "content": "Qty {{qty}}", "x": 10, "y": 30 }
        ] }"#,
        json!({ "customer": { "name": "Jane" }, "total": 595000.0, "qty": 3 }),
    );

    assert_eq!(
        shown_text(&bytes),
        vec!["Jane owes 595000".to_string(), "Qty 3".to_string()]
    );
}

#[test]
fn test_elements_paint_in_list_order() {
    let bytes = render(
        r##"{ "elements": [
            { "type": "rectangle", "x": 100, "y": 100, "width": 200, "height": 200, "color": "#FF0000" },
            { "type": "rectangle", "x": 150, "y": 150, "width": 200, "height": 200, "color": "#0000FF" }
        ] }"##,
        json!({}),
    );

    let fills: Vec<Vec<f64>> = operations(&bytes)
        .iter()
        .filter(|op| op.operator == "rg")
        .map(|op| op.operands.iter().map(number).collect())
        .collect();

    // Blue is painted after red, so it covers the overlap
    assert_eq!(fills, vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]]);
}

#[test]
fn test_transparent_rectangle_draws_nothing() {
    let bytes = render(
        r#"{ "elements": [
            { "type": "rectangle", "x": 10, "y": 10, "width": 50, "height": 50, "color": "transparent" }
        ] }"#,
        json!({}),
    );

    assert!(operations(&bytes).is_empty());
}

#[test]
fn test_transparent_rectangle_with_border_is_stroked() {
    let bytes = render(
        r##"{ "elements": [
            { "type": "rectangle", "x": 10, "y": 10, "width": 50, "height": 50,
              "color": "transparent", "borderColor": "#000000", "borderWidth": 3 }
        ] }"##,
        json!({}),
    );

    assert_eq!(operators(&bytes), vec!["RG", "w", "re", "S"]);
}

#[test]
fn test_unknown_type_is_skipped() {
    let bytes = render(
        r##"{ "elements": [
            { "type": "star", "x": 10, "y": 10 },
            { "type": "image", "x": 10, "y": 10, "width": 50, "height": 50, "src": "logo.png" },
            { "type": "text", "content": "still here", "x": 10, "y": 10 },
            { "type": "circle", "x": 0, "y": 0, "width": 20, "height": 20, "color": "#00ff00" }
        ] }"##,
        json!({}),
    );

    assert_eq!(shown_text(&bytes), vec!["still here".to_string()]);
    assert_eq!(operators(&bytes).iter().filter(|op| *op == "c").count(), 4);
}

#[test]
fn test_bad_values_degrade() {
    let bytes = render(
        r#"{ "elements": [
            { "type": "text", "content": "fallback", "x": 10, "y": 10,
              "color": "not-a-color", "font": "Wingdings", "rotation": 45 },
            { "type": "rectangle", "x": -50, "y": 900, "width": 0, "height": 0 }
        ] }"#,
        json!({}),
    );

    let ops = operations(&bytes);
    let text_fill = ops.iter().find(|op| op.operator == "rg").unwrap();
    assert_eq!(
        text_fill.operands.iter().map(number).collect::<Vec<_>>(),
        vec![0.0, 0.0, 0.0]
    );
    assert!(ops.iter().any(|op| op.operator == "re"));
    // Rotation is stored but never applied
    assert!(!ops.iter().any(|op| op.operator == "cm"));
}

#[test]
fn test_huge_coordinates_stay_parseable() {
    let bytes = render(
        r##"{ "elements": [
            { "type": "rectangle", "x": 1e305, "y": -1e305, "width": 10, "height": 10, "color": "#FF0000" },
            { "type": "text", "content": "after", "x": 10, "y": 10 }
        ] }"##,
        json!({}),
    );

    let ops = operations(&bytes);
    let rect = ops.iter().find(|op| op.operator == "re").unwrap();
    assert_eq!(
        rect.operands.iter().map(number).collect::<Vec<_>>(),
        vec![32767.0, -32767.0, 10.0, 10.0]
    );
    assert!(!ops.iter().any(|op| op.operator.contains("inf")));
    assert_eq!(shown_text(&bytes), vec!["after"]);
}

#[test]
fn test_null_fields_use_defaults() {
    let template = parse_template(
        r##"{ "elements": [
            { "type": "text", "content": "sized", "x": 10, "y": 10, "fontSize": null },
            { "type": "rectangle", "x": null, "y": 20, "width": 30, "height": 30, "color": "#00FF00" },
            { "type": "line", "x": 0, "y": 0, "width": 40, "color": null },
            { "type": "text", "content": null, "x": 5, "y": 5 }
        ] }"##,
    )
    .unwrap();
    assert_eq!(template.elements.len(), 4);

    let bytes = render_template(&template, &json!({})).unwrap();
    let ops = operations(&bytes);
    let font = ops.iter().find(|op| op.operator == "Tf").unwrap();
    assert_eq!(number(&font.operands[1]), 12.0);
    assert_eq!(shown_text(&bytes), vec!["sized"]);
    assert_eq!(ops.iter().filter(|op| op.operator == "S").count(), 1);
}

#[test]
fn test_non_list_elements_is_malformed() {
    let result = render_json(r#"{ "elements": { "type": "text" } }"#, "{}");
    assert!(matches!(result, Err(TemplateError::TemplateMalformed(_))));

    let result = render_json(r#"{ "name": "empty" }"#, "{}");
    assert!(matches!(result, Err(TemplateError::TemplateMalformed(_))));
}

#[test]
fn test_empty_template_renders_blank_page() {
    let bytes = render_json(r#"{ "elements": [] }"#, "{}").unwrap();
    assert!(operations(&bytes).is_empty());
}

#[test]
fn test_render_is_idempotent() {
    let template = parse_template(
        r##"{ "elements": [
            { "type": "text", "content": "Hello {{name}}", "x": 60, "y": 55, "fontWeight": "bold" },
            { "type": "circle", "x": 100, "y": 100, "width": 40, "height": 20, "color": "#3B82F6", "opacity": 0.5 },
            { "type": "line", "x": 40, "y": 40, "width": 200 }
        ] }"##,
    )
    .unwrap();
    let data = json!({ "name": "Ana" });

    let first = render_template(&template, &data).unwrap();
    let second = render_template(&template, &data).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_render_options() {
    let template = parse_template(
        r#"{ "elements": [{ "type": "text", "content": "plain", "x": 1, "y": 1 }] }"#,
    )
    .unwrap();
    let options = RenderOptions {
        compress: false,
        producer: None,
    };

    let bytes = TemplateRenderer::new(&template)
        .with_options(options)
        .render(&json!({}))
        .unwrap();

    let needle = b"(plain)";
    let hex_needle = b"<706C61696E> Tj";
    assert!(!bytes.windows(needle.len()).any(|w| w == needle));
    assert!(bytes.windows(hex_needle.len()).any(|w| w == hex_needle));
    assert!(load(&bytes).trailer.get(b"Info").is_err());
}

#[test]
fn test_template_round_trip() {
    let original = parse_template(
        r##"{
            "id": "tpl-badge",
            "name": "badge",
            "description": "Conference badge",
            "pageSize": "A4",
            "createdAt": 1717000000000,
            "elements": [
                { "id": 1717000000001, "type": "text", "content": "{{name}}", "x": 100, "y": 700,
                  "fontSize": 32, "fontWeight": "bold", "font": "Helvetica" },
                { "id": "frame", "type": "rectangle", "x": 50, "y": 50, "width": 495, "height": 742,
                  "color": "transparent", "borderColor": "#111827", "borderWidth": 2, "rotation": 0 },
                { "type": "image", "x": 0, "y": 0, "width": 10, "height": 10, "src": "logo.png" }
            ]
        }"##,
    )
    .unwrap();

    let saved = serde_json::to_string(&original).unwrap();
    let reloaded = parse_template(&saved).unwrap();

    assert_eq!(original.id, Some(json!("tpl-badge")));
    assert_eq!(reloaded, original);
}
