// Attribute selector variant matching against wire-shaped product data

use page_builder_wasm::{Product, Selection};

fn product() -> Product {
    serde_json::from_value(serde_json::json!({
        "attributes": [
            { "name": "Color", "values": ["Red", "Blue"] },
            { "name": "Size", "values": ["M", "L"] }
        ],
        "variants": [
            { "id": "v1", "attributeCombination": { "Color": "Red", "Size": "M" }, "price": 10.0, "stock": 2 },
            { "id": "v2", "attributeCombination": { "Color": "Red", "Size": "L" }, "stock": 0 },
            { "id": "v3", "attributeCombination": { "Color": "Blue", "Size": "M" } }
        ]
    }))
    .unwrap()
}

fn select(pairs: &[(&str, &str)]) -> Selection {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_partial_selection_never_matches() {
    let product = product();
    assert!(product.match_variant(&select(&[("Color", "Red")])).is_none());
    assert!(product.match_variant(&select(&[("Size", "M")])).is_none());
}

#[test]
fn test_full_selection_matches() {
    let product = product();
    let found = product.match_variant(&select(&[("Color", "Blue"), ("Size", "M")])).unwrap();
    assert_eq!(found.id, "v3");
    assert!(found.in_stock());
}

#[test]
fn test_missing_combination_matches_nothing() {
    let product = product();
    assert!(product.match_variant(&select(&[("Color", "Blue"), ("Size", "L")])).is_none());
}

#[test]
fn test_availability_greys_out_sold_out_values() {
    let product = product();
    let red = select(&[("Color", "Red")]);
    assert!(product.is_value_available(&red, "Size", "M"));
    assert!(!product.is_value_available(&red, "Size", "L"));
    assert!(!product.is_value_available(&select(&[("Color", "Blue")]), "Size", "L"));
}
