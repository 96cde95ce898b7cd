//! Render a small invoice template to output/invoice.pdf
//! Run with: RUST_LOG=debug cargo run -p template --example render_invoice

use serde_json::json;
use std::fs;
use template::{render_json, Element, ElementBase, ShapeElement, Template, TextElement};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut invoice = Template::new("invoice");
    invoice.page_size = Some("A4".to_string());

    // Header band
    invoice.push(Element::Rectangle(ShapeElement::new(
        ElementBase::new(40.0, 742.0, 515.0, 60.0).with_color("#3B82F6"),
    )));

    let mut title = TextElement::new("INVOICE {{number}}", 60.0, 765.0);
    title.font_size = 24.0;
    title.font_weight = Some("bold".to_string());
    title.base.color = "#FFFFFF".to_string();
    invoice.push(Element::Text(title));

    invoice.push(Element::Text(TextElement::new(
        "Bill to: {{customer.name}}",
        60.0,
        700.0,
    )));
    invoice.push(Element::Text(TextElement::new(
        "Total: {{total}}",
        60.0,
        680.0,
    )));

    invoice.push(Element::Line(ShapeElement::new(ElementBase::new(
        40.0, 660.0, 515.0, 1.0,
    ))));

    // Paid stamp
    invoice.push(Element::Circle(ShapeElement::new(
        ElementBase::new(440.0, 560.0, 90.0, 90.0)
            .with_color("transparent")
            .with_border("#16A34A", 3.0)
            .with_opacity(0.6),
    )));

    let template_json = serde_json::to_string_pretty(&invoice)?;
    let data = json!({
        "number": "2024-0117",
        "customer": { "name": "Ana Souza" },
        "total": 595000.0
    });

    let pdf = render_json(&template_json, &data.to_string())?;

    fs::create_dir_all("output")?;
    fs::write("output/invoice.pdf", &pdf)?;
    println!("Wrote output/invoice.pdf ({} bytes)", pdf.len());

    Ok(())
}
