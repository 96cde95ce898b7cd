//! WASM bindings for pdfdraw
//!
//! This crate provides JavaScript-friendly API for:
//! - Loading page templates
//! - Rendering PDFs with data (used by the authoring UI for previews)
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { PdfTemplate, renderPdf } from 'pdfdraw-wasm';
//!
//! await init();
//!
//! // Load template once, render many times
//! const template = PdfTemplate.fromJson(templateJson);
//! const output = template.render({ name: "Ana" });
//!
//! // Or in one call
//! const bytes = renderPdf(templateJson, { name: "Ana" });
//! ```

use template::{RenderOptions, Template, TemplateRenderer};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js_error(e: template::TemplateError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parsed page template
#[wasm_bindgen]
pub struct PdfTemplate {
    template: Template,
    options: RenderOptions,
}

#[wasm_bindgen]
impl PdfTemplate {
    /// Create template from JSON
    ///
    /// @param json - Template JSON string (`{ elements: [...] }`)
    /// @returns PdfTemplate instance
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<PdfTemplate, JsValue> {
        let template = Template::from_json(json).map_err(to_js_error)?;
        Ok(PdfTemplate {
            template,
            options: RenderOptions::default(),
        })
    }

    /// Number of elements that will be considered for drawing
    #[wasm_bindgen(getter, js_name = elementCount)]
    pub fn element_count(&self) -> usize {
        self.template.elements.len()
    }

    /// Enable or disable content stream compression
    ///
    /// @param compress - false keeps content operators readable
    #[wasm_bindgen(js_name = setCompression)]
    pub fn set_compression(&mut self, compress: bool) {
        self.options.compress = compress;
    }

    /// Render PDF with data
    ///
    /// @param data - Data object for `{{field}}` placeholders
    /// @returns PDF bytes (Uint8Array)
    pub fn render(&self, data: JsValue) -> Result<Vec<u8>, JsValue> {
        let data_value: serde_json::Value = if data.is_undefined() || data.is_null() {
            serde_json::Value::Null
        } else {
            serde_wasm_bindgen::from_value(data)?
        };

        self.render_value(&data_value).map_err(to_js_error)
    }

    /// Render PDF with data given as a JSON string
    ///
    /// @param dataJson - Data record JSON
    /// @returns PDF bytes (Uint8Array)
    #[wasm_bindgen(js_name = renderJson)]
    pub fn render_json(&self, data_json: &str) -> Result<Vec<u8>, JsValue> {
        let data_value: serde_json::Value = serde_json::from_str(data_json)
            .map_err(|e| to_js_error(template::TemplateError::InvalidData(e.to_string())))?;

        self.render_value(&data_value).map_err(to_js_error)
    }
}

impl PdfTemplate {
    fn render_value(&self, data: &serde_json::Value) -> template::Result<Vec<u8>> {
        TemplateRenderer::new(&self.template)
            .with_options(self.options.clone())
            .render(data)
    }
}

/// Render a template JSON string with data in one call
///
/// @param templateJson - Template JSON string
/// @param data - Data object for `{{field}}` placeholders
/// @returns PDF bytes (Uint8Array)
#[wasm_bindgen(js_name = renderPdf)]
pub fn render_pdf(template_json: &str, data: JsValue) -> Result<Vec<u8>, JsValue> {
    PdfTemplate::from_json(template_json)?.render(data)
}
