//! Templates shipped with the binary.

use serde_json::json;

use crate::catalog::{AdFormat, AdTemplate};
use crate::structured::TemplateLayout;

fn template(
    id: &str,
    name: &str,
    description: &str,
    format: AdFormat,
    layout: TemplateLayout,
    json_template: serde_json::Value,
) -> AdTemplate {
    AdTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        preview_url: Some(format!("/{id}-ad.png")),
        format,
        layout,
        json_template,
    }
}

/// Every built-in template. Layouts are declared here, not inferred.
pub fn templates() -> Vec<AdTemplate> {
    vec![
        template(
            "skincare-product",
            "Skincare Solution",
            "Professional skincare product with ingredient highlights",
            AdFormat::Static,
            TemplateLayout::Elements,
            json!({
                "style": "ingredient-focused",
                "layout": "vertical",
                "colors": { "primary": "#0047AB", "secondary": "#FFFFFF", "text": "#FFFFFF" },
                "elements": {
                    "headline": "{{headline}}",
                    "productName": "{{productName}}",
                    "ingredients": [
                        { "name": "Tretinoin", "benefit": "Increases collagen production" },
                        { "name": "Tranexamic Acid", "benefit": "Helps lighten dark spots" },
                        { "name": "Niacinamide", "benefit": "Repairs & defends against skin damage" }
                    ],
                    "cta": "{{cta}}"
                }
            }),
        ),
        template(
            "hair-product",
            "Hair Care Product",
            "Highlight your hair product benefits with a clean design",
            AdFormat::Static,
            TemplateLayout::AdConfig,
            json!({
                "ad_config": {
                    "image_specs": {
                        "style": "photorealistic",
                        "resolution": "4K",
                        "aspect_ratio": "1:1",
                        "orientation": "square",
                        "file_format": "PNG"
                    },
                    "subject": {
                        "type": "product",
                        "description": "[USER_PRODUCT_DESCRIPTION]",
                        "position": "centered",
                        "details": { "size": "[USER_PRODUCT_SIZE]", "branding": "[USER_BRAND_NAME]" }
                    },
                    "background": {
                        "setting": "solid pastel color",
                        "color": "[USER_BACKGROUND_COLOR]",
                        "elements": [{
                            "type": "decorative",
                            "items": ["subtle wavy lines"],
                            "position": "top-left and bottom-right corners",
                            "color": "[USER_ACCENT_COLOR]"
                        }]
                    },
                    "text_overlay": {
                        "headline": {
                            "text": "[USER_HEADLINE]",
                            "font": "bold sans-serif",
                            "size": "36pt",
                            "color": "[USER_TEXT_COLOR]",
                            "position": "top-center",
                            "alignment": "center"
                        },
                        "benefits": [
                            {
                                "text": "[USER_BENEFIT_1]",
                                "font": "sans-serif",
                                "size": "18pt",
                                "color": "[USER_TEXT_COLOR]",
                                "background": "white box with rounded edges",
                                "position": "left of the product"
                            },
                            {
                                "text": "[USER_BENEFIT_2]",
                                "font": "sans-serif",
                                "size": "18pt",
                                "color": "[USER_TEXT_COLOR]",
                                "background": "white box with rounded edges",
                                "position": "right of the product"
                            },
                            {
                                "text": "[USER_BENEFIT_3]",
                                "font": "sans-serif",
                                "size": "18pt",
                                "color": "[USER_TEXT_COLOR]",
                                "background": "white box with rounded edges",
                                "position": "bottom-left of the product"
                            }
                        ],
                        "social_proof": {
                            "text": "5 Stars",
                            "icon": "five yellow stars",
                            "background": "white box",
                            "position": "top-right, near headline"
                        }
                    },
                    "lighting": {
                        "primary": "soft natural light from above",
                        "effects": ["subtle shadows for depth"]
                    },
                    "additional_instructions": {
                        "mood": "playful, approachable, benefit-focused",
                        "reference": "use the user-uploaded product images to ensure accuracy"
                    }
                }
            }),
        ),
        template(
            "daily-greens",
            "Daily Nutrition",
            "Minimalist design highlighting nutritional benefits",
            AdFormat::Static,
            TemplateLayout::AdConfig,
            json!({
                "ad_config": {
                    "image_specs": { "style": "photorealistic", "aspect_ratio": "1:1" },
                    "subject": {
                        "type": "product",
                        "description": "[USER_PRODUCT_DESCRIPTION]",
                        "position": "center-right",
                        "details": { "size": "[USER_PRODUCT_SIZE]", "branding": "[USER_BRAND_NAME]" }
                    },
                    "background": { "setting": "solid color", "color": "[USER_BACKGROUND_COLOR]" },
                    "text_overlay": {
                        "headline": {
                            "text": "[USER_HEADLINE]",
                            "font": "bold sans-serif",
                            "color": "[USER_TEXT_COLOR]",
                            "position": "top-center"
                        },
                        "benefits": [
                            { "icon": "[USER_BENEFIT_1_ICON]", "text": "[USER_BENEFIT_1]", "color": "[USER_TEXT_COLOR]", "position": "left side, top" },
                            { "icon": "[USER_BENEFIT_2_ICON]", "text": "[USER_BENEFIT_2]", "color": "[USER_TEXT_COLOR]", "position": "left side, second from top" },
                            { "icon": "[USER_BENEFIT_3_ICON]", "text": "[USER_BENEFIT_3]", "color": "[USER_TEXT_COLOR]", "position": "left side, third from top" },
                            { "icon": "[USER_BENEFIT_4_ICON]", "text": "[USER_BENEFIT_4]", "color": "[USER_TEXT_COLOR]", "position": "left side, bottom" }
                        ],
                        "cta": {
                            "text": "[USER_CTA]",
                            "font": "sans-serif",
                            "size": "18pt",
                            "color": "[USER_CTA_TEXT_COLOR]",
                            "background": "[USER_CTA_BACKGROUND_COLOR]",
                            "position": "bottom-center"
                        }
                    },
                    "additional_instructions": {
                        "mood": "clean, minimal, benefit-focused",
                        "reference": "use the user-uploaded product images to ensure accuracy"
                    }
                }
            }),
        ),
        template(
            "health-supplement",
            "Health Supplement",
            "Showcase health benefits with vibrant green background",
            AdFormat::Static,
            TemplateLayout::AdConfig,
            json!({
                "ad_config": {
                    "subject": {
                        "type": "product",
                        "description": "[USER_PRODUCT_DESCRIPTION]",
                        "details": { "branding": "[USER_BRAND_NAME]" }
                    },
                    "background": { "setting": "vibrant gradient", "color": "[USER_BACKGROUND_COLOR]" },
                    "text_overlay": {
                        "headline": { "text": "[USER_HEADLINE]", "color": "[USER_TEXT_COLOR]" },
                        "benefits": [
                            { "text": "[USER_BENEFIT_1]", "description": "[USER_BENEFIT_1_DESCRIPTION]", "color": "[USER_TEXT_COLOR]" },
                            { "text": "[USER_BENEFIT_2]", "description": "[USER_BENEFIT_2_DESCRIPTION]", "color": "[USER_TEXT_COLOR]" },
                            { "text": "[USER_BENEFIT_3]", "description": "[USER_BENEFIT_3_DESCRIPTION]", "color": "[USER_TEXT_COLOR]" }
                        ],
                        "disclaimer": { "text": "[USER_DISCLAIMER]", "size": "10pt" },
                        "cta": { "text": "[USER_CTA]", "color": "[USER_ACCENT_COLOR]" }
                    },
                    "additional_instructions": {
                        "mood": "energetic, healthy, trustworthy",
                        "reference": "use the user-uploaded product images to ensure accuracy"
                    }
                }
            }),
        ),
        template(
            "food-bar",
            "Food Bar",
            "Showcase eco-friendly food products with key benefits",
            AdFormat::Static,
            TemplateLayout::Elements,
            json!({
                "style": "eco-friendly",
                "layout": "vertical",
                "colors": { "primary": "#F9A826", "secondary": "#FFFFFF", "text": "#FFFFFF" },
                "elements": {
                    "headline": "{{headline}}",
                    "subheadline": "{{subheadline}}",
                    "features": [
                        { "feature": "Home compostable wrapper" },
                        { "feature": "65% less sugar" },
                        { "feature": "You buy a bar. We plant a tree." }
                    ],
                    "cta": "{{cta}}"
                }
            }),
        ),
        template(
            "longevity-supplement",
            "Longevity Supplement",
            "Elegant supplement with anti-aging benefits",
            AdFormat::Static,
            TemplateLayout::Elements,
            json!({
                "style": "elegant-minimal",
                "layout": "vertical",
                "colors": { "primary": "#E6E6FA", "secondary": "#483D8B", "text": "#191970" },
                "elements": {
                    "headline": "{{headline}}",
                    "subheadline": "{{subheadline}}",
                    "productName": "{{productName}}",
                    "description": "{{description}}"
                }
            }),
        ),
        template(
            "mushroom-coffee",
            "Mushroom Coffee",
            "Highlight the benefits of alternative coffee products",
            AdFormat::Static,
            TemplateLayout::Elements,
            json!({
                "style": "benefit-focused",
                "layout": "central",
                "colors": { "primary": "#FFFFFF", "secondary": "#000000", "text": "#000000" },
                "elements": {
                    "headline": "{{headline}}",
                    "productName": "{{productName}}",
                    "benefits": [
                        { "feature": "Low acidity" },
                        { "feature": "No jitters" },
                        { "feature": "Less caffeine" },
                        { "feature": "Balanced digestion" },
                        { "feature": "No brain fog" }
                    ],
                    "cta": "{{cta}}"
                }
            }),
        ),
        template(
            "brand-story",
            "Brand Story",
            "Social caption card built straight from brand facts",
            AdFormat::Social,
            TemplateLayout::Tokens,
            json!({
                "caption": "{{USER_BRAND_NAME}}: {{USER_TAGLINE}}",
                "body": "{{USER_BRAND_DESCRIPTION}} Made for {{USER_TARGET_AUDIENCE}}.",
                "highlight": "{{USER_USP}}",
                "palette": {
                    "background": "{{USER_BACKGROUND_COLOR}}",
                    "accent": "{{USER_ACCENT_COLOR}}",
                    "text": "{{USER_TEXT_COLOR}}"
                },
                "aspect_ratio": "4:5"
            }),
        ),
    ]
}
