//! Variant matching for the product attribute selector
//!
//! The selector block renders one control per product attribute. A variant is
//! matched only once the selection is complete: every selected attribute must
//! equal the variant's value and the variant's combination must have exactly as
//! many entries as the selection. Partial selections never guess.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute name → chosen value
pub type Selection = BTreeMap<String, String>;

/// One selectable attribute and its possible values
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttribute {
    pub name: String,
    pub values: Vec<String>,
}

/// A purchasable variant and the attribute combination it represents
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub attribute_combination: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductVariant {
    /// Unknown stock counts as available
    pub fn in_stock(&self) -> bool {
        self.stock.map_or(true, |s| s > 0)
    }

    fn agrees_with(&self, selection: &Selection) -> bool {
        selection
            .iter()
            .all(|(name, value)| self.attribute_combination.get(name) == Some(value))
    }
}

/// Product data supplied externally to the selector
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub attributes: Vec<ProductAttribute>,
    pub variants: Vec<ProductVariant>,
}

/// Find the variant for a complete selection; `None` for partial selections
pub fn match_variant<'a>(selection: &Selection, variants: &'a [ProductVariant]) -> Option<&'a ProductVariant> {
    if selection.is_empty() {
        return None;
    }

    variants.iter().find(|variant| {
        variant.attribute_combination.len() == selection.len() && variant.agrees_with(selection)
    })
}

impl Product {
    pub fn match_variant(&self, selection: &Selection) -> Option<&ProductVariant> {
        match_variant(selection, &self.variants)
    }

    /// Whether choosing `value` for `attribute` (keeping the rest of the
    /// selection) can still reach an in-stock variant
    pub fn is_value_available(&self, selection: &Selection, attribute: &str, value: &str) -> bool {
        let mut candidate = selection.clone();
        candidate.insert(attribute.to_string(), value.to_string());

        self.variants
            .iter()
            .any(|variant| variant.in_stock() && variant.agrees_with(&candidate))
    }

    /// True when every attribute has a selected value
    pub fn selection_complete(&self, selection: &Selection) -> bool {
        self.attributes.iter().all(|attr| selection.contains_key(&attr.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: &str, color: &str, size: &str, stock: i64) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            attribute_combination: BTreeMap::from([
                ("Color".to_string(), color.to_string()),
                ("Size".to_string(), size.to_string()),
            ]),
            price: Some(20.0),
            stock: Some(stock),
        }
    }

    fn tee() -> Product {
        Product {
            attributes: vec![
                ProductAttribute { name: "Color".into(), values: vec!["Black".into(), "White".into()] },
                ProductAttribute { name: "Size".into(), values: vec!["S".into(), "M".into()] },
            ],
            variants: vec![
                variant("bs", "Black", "S", 3),
                variant("bm", "Black", "M", 0),
                variant("ws", "White", "S", 1),
                variant("wm", "White", "M", 5),
            ],
        }
    }

    fn select(pairs: &[(&str, &str)]) -> Selection {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_partial_selection_matches_nothing() {
        assert_eq!(tee().match_variant(&select(&[("Color", "Black")])), None);
    }

    #[test]
    fn test_complete_selection_matches_exact_variant() {
        let product = tee();
        let found = product.match_variant(&select(&[("Color", "Black"), ("Size", "S")]));
        assert_eq!(found.map(|v| v.id.as_str()), Some("bs"));
    }

    #[test]
    fn test_unknown_value_matches_nothing() {
        assert_eq!(tee().match_variant(&select(&[("Color", "Red"), ("Size", "S")])), None);
    }

    #[test]
    fn test_empty_selection_matches_nothing() {
        assert_eq!(tee().match_variant(&Selection::new()), None);
    }

    #[test]
    fn test_value_availability_respects_stock() {
        let product = tee();
        let selection = select(&[("Color", "Black")]);
        assert!(product.is_value_available(&selection, "Size", "S"));
        assert!(!product.is_value_available(&selection, "Size", "M"));
    }

    #[test]
    fn test_selection_complete() {
        let product = tee();
        assert!(!product.selection_complete(&select(&[("Color", "Black")])));
        assert!(product.selection_complete(&select(&[("Color", "Black"), ("Size", "M")])));
    }
}
