//! Data-binding descriptors for dynamic block content
//!
//! A binding links a block to a field of an external record (product,
//! category, collection, customer). Resolution is pure: the caller supplies
//! the record as JSON and gets back the projected value, a rendered template,
//! or the fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a bound block pulls its data from
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    #[default]
    Static,
    Product,
    Category,
    Collection,
    Customer,
}

/// Binding descriptor carried by text, image, video, gallery, button and
/// product-list content
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DataBinding {
    pub source_type: SourceType,

    /// Dot-separated path into the source record (e.g. `images.0.url`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_path: Option<String>,

    /// Mustache template with `{{field}}` placeholders (text/button only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_string: Option<String>,

    /// Value or list used when the bound field is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_value: Option<Value>,
}

impl DataBinding {
    /// A static (unbound) descriptor
    pub fn static_binding() -> Self {
        Self::default()
    }

    /// A static descriptor whose fallback is a list (media galleries)
    pub fn static_list_binding() -> Self {
        Self {
            fallback_value: Some(Value::Array(Vec::new())),
            ..Self::default()
        }
    }

    pub fn is_static(&self) -> bool {
        self.source_type == SourceType::Static
    }

    /// Bound descriptors need a field path before they can resolve
    pub fn is_complete(&self) -> bool {
        self.is_static() || self.field_path.as_deref().is_some_and(|p| !p.trim().is_empty())
    }

    /// Switch the source type.
    ///
    /// Crossing the static/bound boundary clears field path, template and
    /// fallback; switching between two bound sources clears only the field path.
    pub fn set_source_type(&mut self, next: SourceType) {
        if next == self.source_type {
            return;
        }

        let crosses_static = self.is_static() != (next == SourceType::Static);
        self.source_type = next;
        self.field_path = None;

        if crosses_static {
            self.template_string = None;
            self.fallback_value = None;
        }
    }

    /// Resolve against a source record.
    ///
    /// Returns `None` for static bindings (the block's own content applies).
    pub fn resolve(&self, source: &Value) -> Option<Value> {
        if self.is_static() {
            return None;
        }

        let field = self
            .field_path
            .as_deref()
            .and_then(|path| lookup_field(source, path))
            .filter(|v| !v.is_null());

        match (field, self.template_string.as_deref()) {
            (Some(_), Some(template)) => match render_template(template, source) {
                Ok(rendered) => Some(Value::String(rendered)),
                Err(e) => {
                    log::warn!("Template render failed ({}), using fallback", e);
                    self.fallback_value.clone()
                }
            },
            (Some(value), None) => Some(value.clone()),
            (None, _) => self.fallback_value.clone(),
        }
    }
}

/// Walk a dot-separated path; numeric segments index into arrays
pub fn lookup_field<'a>(source: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(source, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Render `{{field}}` placeholders against the source record
pub fn render_template(template: &str, source: &Value) -> Result<String, mustache::Error> {
    let compiled = mustache::compile_str(template)?;
    compiled.render_to_string(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product() -> Value {
        json!({
            "name": "Trail Shoe",
            "price": 89,
            "images": [{ "url": "https://cdn.example/shoe.jpg" }]
        })
    }

    #[test]
    fn test_static_to_bound_resets_binding_fields() {
        let mut binding = DataBinding {
            source_type: SourceType::Static,
            field_path: Some("stale".into()),
            template_string: Some("{{stale}}".into()),
            fallback_value: Some(json!("old")),
        };

        binding.set_source_type(SourceType::Product);

        assert_eq!(binding.source_type, SourceType::Product);
        assert_eq!(binding.field_path, None);
        assert_eq!(binding.template_string, None);
        assert_eq!(binding.fallback_value, None);
    }

    #[test]
    fn test_switching_bound_source_resets_only_field_path() {
        let mut binding = DataBinding {
            source_type: SourceType::Product,
            field_path: Some("name".into()),
            template_string: Some("Buy {{name}}".into()),
            fallback_value: Some(json!("Product")),
        };

        binding.set_source_type(SourceType::Collection);

        assert_eq!(binding.field_path, None);
        assert_eq!(binding.template_string.as_deref(), Some("Buy {{name}}"));
        assert_eq!(binding.fallback_value, Some(json!("Product")));
    }

    #[test]
    fn test_same_source_type_is_noop() {
        let mut binding = DataBinding {
            source_type: SourceType::Product,
            field_path: Some("name".into()),
            ..DataBinding::default()
        };
        binding.set_source_type(SourceType::Product);
        assert_eq!(binding.field_path.as_deref(), Some("name"));
    }

    #[test]
    fn test_resolve_field_path_with_array_index() {
        let binding = DataBinding {
            source_type: SourceType::Product,
            field_path: Some("images.0.url".into()),
            ..DataBinding::default()
        };
        assert_eq!(binding.resolve(&product()), Some(json!("https://cdn.example/shoe.jpg")));
    }

    #[test]
    fn test_resolve_template() {
        let binding = DataBinding {
            source_type: SourceType::Product,
            field_path: Some("name".into()),
            template_string: Some("Buy {{name}} for ${{price}}".into()),
            ..DataBinding::default()
        };
        assert_eq!(binding.resolve(&product()), Some(json!("Buy Trail Shoe for $89")));
    }

    #[test]
    fn test_missing_field_uses_fallback() {
        let binding = DataBinding {
            source_type: SourceType::Product,
            field_path: Some("subtitle".into()),
            fallback_value: Some(json!("No subtitle")),
            ..DataBinding::default()
        };
        assert_eq!(binding.resolve(&product()), Some(json!("No subtitle")));
    }

    #[test]
    fn test_static_resolves_to_none() {
        assert_eq!(DataBinding::static_binding().resolve(&product()), None);
        assert!(DataBinding::static_binding().is_complete());
    }

    #[test]
    fn test_bound_without_field_is_incomplete() {
        let binding = DataBinding {
            source_type: SourceType::Customer,
            ..DataBinding::default()
        };
        assert!(!binding.is_complete());
    }
}
