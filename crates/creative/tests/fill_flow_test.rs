//! End-to-end flow: model reply -> brand facts -> catalog template -> filled creative.

use adcraft_core::{BrandFacts, FactKey};
use adcraft_creative::{
    fill, is_canonical, normalize_hex, CreativeEngine, TemplateCatalog, TemplateLayout,
};
use serde_json::Value;

const MODEL_REPLY: &str = r##"Here is the analysis you asked for:

```json
{
  "brand_name": "Northwind Coffee",
  "brand_description": "Small-batch roasts delivered fresh",
  "brand_primary": "#6F4E37",
  "brand_secondary": "FC0",
  "brand_accent": "rgb(0,0,0)",
  "brand_tagline": "Wake up to better",
  "brand_tone": "Warm",
  "brand_product_category": "Coffee",
  "product_benefits": "Fresh roasted, Ethically sourced, Free shipping"
}
```
"##;

/// Every string stored under a color-typed key.
fn color_fields(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                match (key.as_str(), v) {
                    ("color", Value::String(s)) => out.push(s.clone()),
                    ("colors", Value::Object(palette)) => out.extend(
                        palette
                            .values()
                            .filter_map(Value::as_str)
                            .map(str::to_string),
                    ),
                    _ => color_fields(v, out),
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|v| color_fields(v, out)),
        _ => {}
    }
}

#[test]
fn test_model_reply_to_filled_creative() {
    let facts = BrandFacts::from_model_response(MODEL_REPLY).unwrap();
    assert_eq!(facts.get(FactKey::BrandPrimary), Some("#6f4e37"));
    assert_eq!(facts.get(FactKey::BrandSecondary), Some("#ffcc00"));
    assert_eq!(facts.get(FactKey::BrandAccent), Some("#000000"));

    let engine = CreativeEngine::default();
    let filled = engine.fill_template("health-supplement", &facts).unwrap();
    let ad = &filled.template["ad_config"];

    assert_eq!(ad["subject"]["details"]["branding"], "Northwind Coffee");
    assert_eq!(ad["background"]["color"], "#6f4e37");
    assert_eq!(ad["text_overlay"]["headline"]["text"], "Wake up to better");
    assert_eq!(ad["text_overlay"]["headline"]["color"], "#ffcc00");
    assert_eq!(ad["text_overlay"]["benefits"][1]["text"], "Ethically sourced");
    assert_eq!(ad["text_overlay"]["benefits"][2]["description"], "Description 3");
    assert_eq!(ad["text_overlay"]["cta"]["text"], "Shop Now");
    assert_eq!(ad["additional_instructions"]["mood"], "Warm");
}

#[test]
fn test_every_builtin_template_fills_cleanly() {
    let engine = CreativeEngine::default();
    let facts_sets = [
        BrandFacts::default(),
        BrandFacts::fallback(),
        BrandFacts::from_model_response(MODEL_REPLY).unwrap(),
        BrandFacts {
            brand_primary: Some("GHIJKL".to_string()),
            brand_secondary: Some("12345".to_string()),
            brand_accent: Some("#1234567".to_string()),
            ..Default::default()
        },
    ];

    for template in engine.catalog().list() {
        let before = template.json_template.clone();
        for facts in &facts_sets {
            let filled = engine.fill_template(&template.id, facts).unwrap();
            assert!(filled.report.is_clean(), "{}: {:?}", template.id, filled.report.mismatched);
            assert_eq!(filled.layout, template.layout);

            if template.layout != TemplateLayout::Tokens {
                let mut colors = Vec::new();
                color_fields(&filled.template, &mut colors);
                for color in colors {
                    assert!(is_canonical(&color), "{}: {color} is not canonical", template.id);
                }

                let rendered = filled.template.to_string();
                assert!(
                    !rendered.contains("_COLOR]") && !rendered.contains("_COLOR}}"),
                    "{}: color placeholder left unfilled",
                    template.id
                );
            }
        }
        assert_eq!(template.json_template, before, "{} was mutated", template.id);
    }
}

#[test]
fn test_cta_colors_are_filled() {
    let engine = CreativeEngine::default();
    let facts = BrandFacts::from_model_response(MODEL_REPLY).unwrap();
    let filled = engine.fill_template("daily-greens", &facts).unwrap();
    let cta = &filled.template["ad_config"]["text_overlay"]["cta"];
    assert_eq!(cta["text"], "Shop Now");
    assert_eq!(cta["color"], "#000000");
    assert_eq!(cta["background"], "#000000");
}

#[test]
fn test_tokens_template_from_catalog() {
    let engine = CreativeEngine::default();
    let filled = engine
        .fill_template("brand-story", &BrandFacts::fallback())
        .unwrap();
    assert_eq!(filled.template["caption"], "Example Brand: Innovation for everyone");
    assert_eq!(filled.template["palette"]["background"], "#4f46e5");
    assert_eq!(filled.template["palette"]["accent"], "#000000");
    assert_eq!(filled.template["highlight"], "");
}

#[test]
fn test_external_catalog_entries_fill_like_builtins() {
    let catalog = TemplateCatalog::new();
    catalog
        .load_json(
            r#"[{
                "id": "summer-sale",
                "name": "Summer Sale",
                "jsonTemplate": {
                    "style": "bold",
                    "colors": { "primary": "[USER_BACKGROUND_COLOR]" },
                    "elements": { "headline": "{{headline}}", "cta": "{{cta}}" }
                }
            }]"#,
        )
        .unwrap();

    let engine = CreativeEngine::new(Default::default(), catalog);
    let facts = BrandFacts {
        brand_tagline: Some("Hot deals".to_string()),
        ..Default::default()
    };
    let filled = engine.fill_template("summer-sale", &facts).unwrap();
    assert_eq!(filled.layout, TemplateLayout::Elements);
    assert_eq!(filled.template["colors"]["primary"], "#000000");
    assert_eq!(filled.template["elements"]["headline"], "Hot deals");
    assert_eq!(filled.template["style"], "bold");
}

#[test]
fn test_normalizer_properties() {
    let samples = [
        None,
        Some(""),
        Some("ABC"),
        Some("#f0c"),
        Some("#FFAA00"),
        Some("123456"),
        Some("GHIJKL"),
        Some("12345"),
        Some("1234567"),
        Some("not-a-hex"),
    ];
    for sample in samples {
        let once = normalize_hex(sample);
        assert!(is_canonical(&once));
        assert_eq!(normalize_hex(Some(&once)), once);
    }
    assert_eq!(normalize_hex(Some("123456")), normalize_hex(Some("#123456")));
}

#[test]
fn test_flat_fill_examples() {
    let facts = BrandFacts {
        brand_name: Some("Acme".to_string()),
        ..Default::default()
    };
    assert_eq!(fill(Some("{{USER_BRAND_NAME}} says hi"), &facts), "Acme says hi");
    assert_eq!(fill(Some("Hello {{USER_BRAND_NAME}}"), &BrandFacts::default()), "Hello ");
    assert_eq!(fill(None, &facts), "");
    assert_eq!(fill(Some(""), &facts), "");
}
