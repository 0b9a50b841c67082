//! WebAssembly bindings for erdraft
//!
//! Browser-friendly wrappers around the pipeline. Every export returns a
//! `Result` so failures surface as JavaScript exceptions instead of panics.

use wasm_bindgen::prelude::*;

use crate::core::logging::init_logging;
use crate::core::CharacterSet;
use crate::plugins::er::{self, Graph};
use crate::plugins::orchestrator::Orchestrator;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    // Logs go to the browser console
    let _ = init_logging(Some("info"), None);
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Render Mermaid ER text to an SVG document
#[wasm_bindgen]
pub fn render_svg(input: &str) -> Result<String, JsValue> {
    Orchestrator::new().process_svg(input).map_err(to_js_error)
}

/// Render Mermaid ER text as a terminal preview
///
/// # Arguments
/// * `input` - Mermaid ER syntax
/// * `style` - Character set style ("ascii" or "unicode")
#[wasm_bindgen]
pub fn render_ascii(input: &str, style: &str) -> Result<String, JsValue> {
    let style: CharacterSet = style.parse().map_err(to_js_error)?;
    Orchestrator::terminal()
        .process_ascii(input, style)
        .map_err(to_js_error)
}

/// Check that the text is non-empty ER content
///
/// Resolves to `undefined` when the diagram can be rendered and throws the
/// reason otherwise.
#[wasm_bindgen]
pub fn validate(input: &str) -> Result<(), JsValue> {
    er::validate(input).map_err(to_js_error)
}

/// Validate the block structure and entity references as well
#[wasm_bindgen]
pub fn validate_strict(input: &str) -> Result<(), JsValue> {
    er::validate_strict(input).map_err(to_js_error)
}

/// Parse Mermaid ER text and return a JSON summary of the graph
#[wasm_bindgen]
pub fn parse_json(input: &str) -> Result<String, JsValue> {
    let graph = crate::parse(input).map_err(to_js_error)?;
    serde_json::to_string(&summary(&graph)).map_err(to_js_error)
}

fn summary(graph: &Graph) -> serde_json::Value {
    let entities: Vec<_> = graph
        .entities
        .iter()
        .map(|entity| {
            let fields: Vec<_> = entity
                .fields
                .iter()
                .map(|field| {
                    serde_json::json!({
                        "name": field.name,
                        "type": field.ty,
                        "size": field.size,
                        "primaryKey": field.is_primary_key,
                        "foreignKey": field.is_foreign_key,
                        "constraints": field
                            .constraints
                            .iter()
                            .map(|c| c.keyword())
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            serde_json::json!({ "name": entity.name, "fields": fields })
        })
        .collect();

    let relations: Vec<_> = graph
        .relations
        .iter()
        .map(|relation| {
            serde_json::json!({
                "from": relation.from,
                "to": relation.to,
                "cardinality": relation.cardinality.notation(),
                "label": relation.label,
            })
        })
        .collect();

    serde_json::json!({
        "entityCount": graph.entity_count(),
        "relationCount": graph.relation_count(),
        "entities": entities,
        "relations": relations,
    })
}
