//! Generator output over the shared fixtures

use std::thread;

use yaif::generator::jsonschema::JsonSchemaGenerator;
use yaif::{parse, Generator, Target};

fn shop() -> yaif::Schema {
    parse(include_str!("fixtures/shop.yaif")).unwrap()
}

#[test]
fn test_json_schema_is_valid_draft7() {
    let schema = shop();
    let doc = JsonSchemaGenerator.document(&schema.interfaces, &schema.enums, &schema.config);

    let compiled = jsonschema::JSONSchema::options()
        .with_draft(jsonschema::Draft::Draft7)
        .compile(&doc)
        .expect("generated document should be a valid schema");

    // a document carrying the definitions can be used to validate instances
    let mut product_schema = doc.clone();
    product_schema["$ref"] = serde_json::json!("#/definitions/Product");
    let product = jsonschema::JSONSchema::options()
        .with_draft(jsonschema::Draft::Draft7)
        .compile(&product_schema)
        .unwrap();

    let good = serde_json::json!({
        "id": 1,
        "name": "Mug",
        "status": "draft",
        "reviews": [{ "id": 2, "rating": 5, "attrs": {} }]
    });
    assert!(product.is_valid(&good));

    let bad = serde_json::json!({ "id": 1, "name": "Mug", "status": "gone", "reviews": [] });
    assert!(!product.is_valid(&bad));

    assert!(compiled.is_valid(&serde_json::json!({})));
}

#[test]
fn test_json_schema_text_matches_document() {
    let schema = shop();
    let text = Target::Jsonschema.generator().render(&schema);
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed,
        JsonSchemaGenerator.document(&schema.interfaces, &schema.enums, &schema.config)
    );
    assert_eq!(parsed["description"], "Models for the corner shop.\nPrices are in cents.");
}

#[test]
fn test_typescript_forward_references() {
    let out = Target::Typescript.generator().render(&shop());
    assert!(out.contains("export interface Product extends Entity {"));
    assert!(out.contains("  related?: Product[] | null;"));
    assert!(out.contains("  reviews: Review[];"));
    assert!(out.contains("  attrs: Record<string, Record<string, number>>;"));
}

#[test]
fn test_python_reorders_defaults() {
    let out = Target::Python.generator().render(&shop());
    assert!(out.starts_with("\"\"\"Models for the corner shop.\nPrices are in cents.\"\"\""));
    assert!(out.contains(
        "class Product(Entity):\n    name: str\n    related: Optional[list[Product]]\n    \
         reviews: list[Review]\n    price: int = 0\n"
    ));
    assert!(out.contains("    status: Status = draft\n"));
}

#[test]
fn test_generators_share_one_model_across_threads() {
    let schema = shop();
    let outputs: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = Target::ALL
            .iter()
            .map(|&target| {
                let schema = &schema;
                s.spawn(move || target.generator().render(schema))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (target, out) in Target::ALL.iter().zip(&outputs) {
        assert_eq!(out, &target.generator().render(&schema));
    }
}
