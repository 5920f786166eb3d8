//! Stateless helpers for block rendering: variant matching and bindings

use serde_json::Value;
use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, serialize};
use crate::models::binding::DataBinding;
use crate::models::variant::{Product, Selection};

/// Variant for a complete selection, or `null`
#[wasm_bindgen(js_name = matchVariant)]
pub fn match_variant(product_js: JsValue, selection_js: JsValue) -> Result<JsValue, JsValue> {
    let product: Product = deserialize(product_js, "Product deserialization error")?;
    let selection: Selection = deserialize(selection_js, "Selection deserialization error")?;
    serialize(&product.match_variant(&selection), "Variant serialization error")
}

/// Whether `value` for `attribute` can still reach an in-stock variant
#[wasm_bindgen(js_name = isValueAvailable)]
pub fn is_value_available(product_js: JsValue, selection_js: JsValue, attribute: &str, value: &str) -> Result<bool, JsValue> {
    let product: Product = deserialize(product_js, "Product deserialization error")?;
    let selection: Selection = deserialize(selection_js, "Selection deserialization error")?;
    Ok(product.is_value_available(&selection, attribute, value))
}

/// Resolve a binding against a source record; `undefined` for static bindings
#[wasm_bindgen(js_name = resolveBinding)]
pub fn resolve_binding(binding_js: JsValue, source_js: JsValue) -> Result<JsValue, JsValue> {
    let binding: DataBinding = deserialize(binding_js, "Binding deserialization error")?;
    let source: Value = deserialize(source_js, "Source deserialization error")?;
    match binding.resolve(&source) {
        Some(value) => serialize(&value, "Binding serialization error"),
        None => Ok(JsValue::UNDEFINED),
    }
}
