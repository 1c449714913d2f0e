//! Structured template filling.
//!
//! Unlike the flat token filler, structured templates are filled by direct
//! assignment at known paths. Which paths apply depends on the
//! [`TemplateLayout`], decided once when the catalog entry is loaded.
//!
//! The input template is only ever borrowed; every write lands on a fresh
//! copy. Missing paths are skipped, and a path whose value has the wrong
//! JSON type is recorded as a shape mismatch and logged, never raised.

use adcraft_core::color::{normalize_hex, HexColor};
use adcraft_core::config::FillConfig;
use adcraft_core::{BrandFacts, FactKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::filler::fill_tree;
use crate::placeholders::PlaceholderMap;

type Object = Map<String, Value>;

/// The shape of a catalog template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateLayout {
    /// Leaf strings embed `{{TOKEN}}` placeholders.
    Tokens,
    /// Top-level `style`, `colors` and `elements`.
    Elements,
    /// Everything nested under `ad_config`.
    AdConfig,
}

impl TemplateLayout {
    /// Guess the layout of an undeclared template by probing its top-level keys.
    pub fn infer(template: &Value) -> Self {
        if template.get("ad_config").is_some() {
            TemplateLayout::AdConfig
        } else if template.get("colors").is_some() || template.get("elements").is_some() {
            TemplateLayout::Elements
        } else {
            TemplateLayout::Tokens
        }
    }
}

/// What a structured fill did, path by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    /// Paths written from facts or configured literals.
    pub filled: Vec<String>,
    /// Paths present in the template but kept because the fact was unknown.
    pub kept: Vec<String>,
    /// Optional paths this template does not have.
    pub absent: Vec<String>,
    /// Paths present with a JSON type the filler cannot work with.
    pub mismatched: Vec<String>,
}

impl FillReport {
    /// True when no shape mismatch was seen.
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty()
    }

    fn record_filled(&mut self, path: impl Into<String>) {
        self.filled.push(path.into());
    }

    fn record_kept(&mut self, path: impl Into<String>) {
        self.kept.push(path.into());
    }

    fn record_absent(&mut self, path: impl Into<String>) {
        self.absent.push(path.into());
    }

    fn record_mismatch(&mut self, path: impl Into<String>) {
        self.mismatched.push(path.into());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredFill {
    pub template: Value,
    pub report: FillReport,
}

/// Fills structured templates using the literals from a [`FillConfig`].
#[derive(Debug, Clone, Default)]
pub struct StructuredFiller {
    config: FillConfig,
}

impl StructuredFiller {
    pub fn new(config: FillConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Fill a copy of `template` from `facts`. Never fails: whatever could
    /// not be filled is left as the template had it and noted in the report.
    pub fn fill(&self, layout: TemplateLayout, template: &Value, facts: &BrandFacts) -> StructuredFill {
        let mut report = FillReport::default();
        let tokens = PlaceholderMap::from_facts(facts);

        let template = match layout {
            TemplateLayout::Tokens => {
                report.record_filled("$");
                fill_tree(template, facts)
            }
            TemplateLayout::Elements => {
                let mut copy = template.clone();
                self.fill_elements(&mut copy, facts, &tokens, &mut report);
                sweep_colors(&mut copy, "", false, &tokens, &mut report);
                copy
            }
            TemplateLayout::AdConfig => {
                let mut copy = template.clone();
                self.fill_ad_config(&mut copy, facts, &tokens, &mut report);
                sweep_colors(&mut copy, "", false, &tokens, &mut report);
                copy
            }
        };

        for path in &report.mismatched {
            warn!(%path, ?layout, "template shape mismatch, field left unfilled");
        }
        debug!(
            ?layout,
            filled = report.filled.len(),
            kept = report.kept.len(),
            absent = report.absent.len(),
            "structured fill complete"
        );

        StructuredFill { template, report }
    }

    /// Labels for repeatable benefit/feature slots: the facts' own list when
    /// it has one, the configured defaults otherwise.
    fn benefit_labels(&self, facts: &BrandFacts) -> Vec<String> {
        let from_facts = facts.benefit_list();
        if from_facts.is_empty() {
            self.config.default_benefits.clone()
        } else {
            from_facts
        }
    }

    fn fill_ad_config(
        &self,
        root: &mut Value,
        facts: &BrandFacts,
        tokens: &PlaceholderMap,
        report: &mut FillReport,
    ) {
        let Some(root) = root_object(root, report) else {
            return;
        };
        let ad = match root.get_mut("ad_config") {
            Some(Value::Object(ad)) => ad,
            _ => {
                report.record_mismatch("ad_config");
                return;
            }
        };

        let cfg = &self.config;
        let name = facts.get(FactKey::BrandName);
        let category = facts.get(FactKey::BrandProductCategory);

        if let Some(subject) = child(ad, "subject", "ad_config.subject", report) {
            let has_details = match child(subject, "details", "ad_config.subject.details", report) {
                Some(details) => {
                    set_text(
                        details,
                        "branding",
                        name.unwrap_or(cfg.brand_name_fallback.as_str()),
                        "ad_config.subject.details.branding",
                        report,
                    );
                    true
                }
                None => false,
            };
            if has_details {
                set_text(
                    subject,
                    "description",
                    category.unwrap_or(cfg.category_fallback.as_str()),
                    "ad_config.subject.description",
                    report,
                );
            }
        }

        if let Some(background) = child(ad, "background", "ad_config.background", report) {
            write_color(
                background,
                "color",
                facts.get(FactKey::BrandPrimary),
                tokens,
                "ad_config.background.color",
                report,
            );
        }

        if let Some(overlay) = child(ad, "text_overlay", "ad_config.text_overlay", report) {
            if let Some(headline) = child(overlay, "headline", "ad_config.text_overlay.headline", report) {
                set_text(
                    headline,
                    "text",
                    facts.get(FactKey::BrandTagline).unwrap_or(cfg.headline_fallback.as_str()),
                    "ad_config.text_overlay.headline.text",
                    report,
                );
                refresh_color(
                    headline,
                    "color",
                    facts.get(FactKey::BrandSecondary),
                    tokens,
                    "ad_config.text_overlay.headline.color",
                    report,
                );
            }

            if let Some(benefits) =
                child_array(overlay, "benefits", "ad_config.text_overlay.benefits", report)
            {
                let labels = self.benefit_labels(facts);
                let accent = facts.get(FactKey::BrandAccent);
                for (i, item) in benefits.iter_mut().enumerate() {
                    let path = format!("ad_config.text_overlay.benefits[{i}]");
                    let Value::Object(benefit) = item else {
                        report.record_mismatch(path);
                        continue;
                    };
                    let label = labels
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| format!("Benefit {}", i + 1));
                    set_text(benefit, "text", label, format!("{path}.text"), report);
                    if benefit.contains_key("description") {
                        set_text(
                            benefit,
                            "description",
                            format!("Description {}", i + 1),
                            format!("{path}.description"),
                            report,
                        );
                    }
                    refresh_color(benefit, "color", accent, tokens, format!("{path}.color"), report);
                }
            }

            if let Some(disclaimer) =
                child(overlay, "disclaimer", "ad_config.text_overlay.disclaimer", report)
            {
                set_text(
                    disclaimer,
                    "text",
                    cfg.disclaimer_text.as_str(),
                    "ad_config.text_overlay.disclaimer.text",
                    report,
                );
            }

            if let Some(cta) = child(overlay, "cta", "ad_config.text_overlay.cta", report) {
                set_text(cta, "text", cfg.cta_text.as_str(), "ad_config.text_overlay.cta.text", report);
            }
        }

        if let Some(extra) = child(
            ad,
            "additional_instructions",
            "ad_config.additional_instructions",
            report,
        ) {
            match facts.get(FactKey::BrandTone) {
                Some(tone) => set_text(extra, "mood", tone, "ad_config.additional_instructions.mood", report),
                None => report.record_kept("ad_config.additional_instructions.mood"),
            }
            set_text(
                extra,
                "reference",
                format!(
                    "Create a professional ad for {} ({})",
                    name.unwrap_or("Brand"),
                    category.unwrap_or("")
                ),
                "ad_config.additional_instructions.reference",
                report,
            );
        }
    }

    fn fill_elements(
        &self,
        root: &mut Value,
        facts: &BrandFacts,
        tokens: &PlaceholderMap,
        report: &mut FillReport,
    ) {
        let Some(root) = root_object(root, report) else {
            return;
        };
        if !root.contains_key("colors") && !root.contains_key("elements") {
            report.record_mismatch("elements");
        }

        let description = facts.get(FactKey::BrandDescription);

        if let Some(colors) = child(root, "colors", "colors", report) {
            refresh_color(
                colors,
                "primary",
                facts.get(FactKey::BrandPrimary),
                tokens,
                "colors.primary",
                report,
            );
            refresh_color(
                colors,
                "secondary",
                facts.get(FactKey::BrandSecondary),
                tokens,
                "colors.secondary",
                report,
            );
            if colors.contains_key("text") {
                write_color(colors, "text", facts.get(FactKey::BrandAccent), tokens, "colors.text", report);
            } else {
                report.record_absent("colors.text");
            }
        }

        if let Some(elements) = child(root, "elements", "elements", report) {
            replace_populated(
                elements,
                "headline",
                facts.get(FactKey::BrandTagline),
                "elements.headline",
                report,
            );
            replace_populated(elements, "subheadline", description, "elements.subheadline", report);
            replace_populated(
                elements,
                "productName",
                facts.get(FactKey::BrandProductCategory),
                "elements.productName",
                report,
            );
            replace_populated(elements, "description", description, "elements.description", report);
            replace_populated(
                elements,
                "cta",
                Some(self.config.cta_text.as_str()),
                "elements.cta",
                report,
            );

            let labels = self.benefit_labels(facts);
            for key in ["features", "benefits"] {
                let path = format!("elements.{key}");
                if let Some(items) = child_array(elements, key, &path, report) {
                    fill_feature_list(items, &labels, &path, report);
                }
            }
        }

        if is_populated(root.get("style")) {
            match facts.get(FactKey::BrandTone) {
                Some(tone) => {
                    root.insert("style".to_string(), Value::String(tone.to_lowercase()));
                    report.record_filled("style");
                }
                None => report.record_kept("style"),
            }
        } else {
            report.record_absent("style");
        }
    }
}

/// Fill a copy of `template` with the default [`FillConfig`].
pub fn fill_structured(layout: TemplateLayout, template: &Value, facts: &BrandFacts) -> Value {
    StructuredFiller::default().fill(layout, template, facts).template
}

/// Feature entries are either plain strings or `{ "feature": ... }` objects.
/// Slots beyond the label list keep their template text.
fn fill_feature_list(items: &mut [Value], labels: &[String], path: &str, report: &mut FillReport) {
    for (i, item) in items.iter_mut().enumerate() {
        let item_path = format!("{path}[{i}]");
        let label = labels.get(i);
        match item {
            Value::String(text) => match label {
                Some(label) => {
                    *text = label.clone();
                    report.record_filled(item_path);
                }
                None => report.record_kept(item_path),
            },
            Value::Object(entry) if entry.contains_key("feature") => match label {
                Some(label) => set_text(entry, "feature", label, format!("{item_path}.feature"), report),
                None => report.record_kept(format!("{item_path}.feature")),
            },
            _ => report.record_mismatch(item_path),
        }
    }
}

/// Canonicalize every color field the path-based pass did not reach: any
/// `color` key, any string in a `colors` palette, and any value that is a
/// bare `..._COLOR` placeholder. Placeholders resolve through the token
/// table first; unknown ones become black.
fn sweep_colors(
    value: &mut Value,
    path: &str,
    in_palette: bool,
    tokens: &PlaceholderMap,
    report: &mut FillReport,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match child {
                    Value::String(raw) if in_palette || key == "color" || is_color_token(raw) => {
                        let canonical = resolve_color(raw, tokens);
                        if canonical != *raw {
                            *raw = canonical;
                            report.record_filled(child_path);
                        }
                    }
                    _ => sweep_colors(child, &child_path, key == "colors", tokens, report),
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter_mut().enumerate() {
                sweep_colors(item, &format!("{path}[{i}]"), false, tokens, report);
            }
        }
        _ => {}
    }
}

/// The token name inside a bare `[TOKEN]` or `{{TOKEN}}` value.
fn bare_token(raw: &str) -> Option<&str> {
    raw.strip_prefix("{{")
        .and_then(|r| r.strip_suffix("}}"))
        .or_else(|| raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')))
}

fn is_color_token(raw: &str) -> bool {
    bare_token(raw).is_some_and(|token| token.ends_with("_COLOR"))
}

fn resolve_color(raw: &str, tokens: &PlaceholderMap) -> String {
    let resolved = bare_token(raw).and_then(|token| tokens.get(token));
    HexColor::normalize(Some(resolved.unwrap_or(raw))).into()
}

fn root_object<'v>(root: &'v mut Value, report: &mut FillReport) -> Option<&'v mut Object> {
    match root {
        Value::Object(map) => Some(map),
        _ => {
            report.record_mismatch("$");
            None
        }
    }
}

/// The object stored under `key`. Missing or null is an expected gap; any
/// other non-object value is a shape mismatch.
fn child<'m>(parent: &'m mut Object, key: &str, path: &str, report: &mut FillReport) -> Option<&'m mut Object> {
    match parent.get_mut(key) {
        Some(Value::Object(map)) => Some(map),
        None | Some(Value::Null) => {
            report.record_absent(path);
            None
        }
        Some(_) => {
            report.record_mismatch(path);
            None
        }
    }
}

fn child_array<'m>(
    parent: &'m mut Object,
    key: &str,
    path: &str,
    report: &mut FillReport,
) -> Option<&'m mut Vec<Value>> {
    match parent.get_mut(key) {
        Some(Value::Array(items)) => Some(items),
        None | Some(Value::Null) => {
            report.record_absent(path);
            None
        }
        Some(_) => {
            report.record_mismatch(path);
            None
        }
    }
}

fn set_text(
    map: &mut Object,
    key: &str,
    value: impl Into<String>,
    path: impl Into<String>,
    report: &mut FillReport,
) {
    map.insert(key.to_string(), Value::String(value.into()));
    report.record_filled(path);
}

/// Write a canonical color from the fact, else from the template's current
/// value (placeholders resolved through the token table), else black.
fn write_color(
    map: &mut Object,
    key: &str,
    fact: Option<&str>,
    tokens: &PlaceholderMap,
    path: impl Into<String>,
    report: &mut FillReport,
) {
    let hex = match (fact, map.get(key).and_then(Value::as_str)) {
        (Some(fact), _) => normalize_hex(Some(fact)),
        (None, Some(raw)) => resolve_color(raw, tokens),
        (None, None) => normalize_hex(None),
    };
    map.insert(key.to_string(), Value::String(hex));
    report.record_filled(path);
}

/// Like [`write_color`], but skipped when neither the fact nor the template
/// field exists.
fn refresh_color(
    map: &mut Object,
    key: &str,
    fact: Option<&str>,
    tokens: &PlaceholderMap,
    path: impl Into<String>,
    report: &mut FillReport,
) {
    let present = !matches!(map.get(key), None | Some(Value::Null));
    if fact.is_some() || present {
        write_color(map, key, fact, tokens, path, report);
    } else {
        report.record_absent(path);
    }
}

/// Overwrite a field the template already populates, keeping the template
/// text when the fact is unknown.
fn replace_populated(
    map: &mut Object,
    key: &str,
    fact: Option<&str>,
    path: &str,
    report: &mut FillReport,
) {
    if !is_populated(map.get(key)) {
        report.record_absent(path);
        return;
    }
    match fact {
        Some(value) => set_text(map, key, value, path, report),
        None => report.record_kept(path),
    }
}

fn is_populated(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adcraft_core::color::is_canonical;
    use serde_json::json;

    fn hair_product() -> Value {
        json!({
            "ad_config": {
                "subject": {
                    "type": "product",
                    "description": "[USER_PRODUCT_DESCRIPTION]",
                    "details": { "size": "[USER_PRODUCT_SIZE]", "branding": "[USER_BRAND_NAME]" }
                },
                "background": { "setting": "solid pastel color", "color": "[USER_BACKGROUND_COLOR]" },
                "text_overlay": {
                    "headline": { "text": "[USER_HEADLINE]", "color": "[USER_TEXT_COLOR]" },
                    "benefits": [
                        { "text": "[USER_BENEFIT_1]", "color": "[USER_TEXT_COLOR]" },
                        { "text": "[USER_BENEFIT_2]", "color": "[USER_TEXT_COLOR]", "description": "" },
                        { "text": "[USER_BENEFIT_3]", "color": "[USER_TEXT_COLOR]" }
                    ],
                    "disclaimer": { "text": "[USER_DISCLAIMER]" },
                    "cta": { "text": "[USER_CTA]" }
                },
                "additional_instructions": {
                    "mood": "playful, approachable, benefit-focused",
                    "reference": "use the user-uploaded product images"
                }
            }
        })
    }

    fn food_bar() -> Value {
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
                    "You buy a bar. We plant a tree."
                ],
                "cta": "{{cta}}"
            }
        })
    }

    fn facts() -> BrandFacts {
        BrandFacts {
            brand_name: Some("Lumen".to_string()),
            brand_description: Some("Clean haircare".to_string()),
            brand_primary: Some("#0047AB".to_string()),
            brand_secondary: Some("FFF".to_string()),
            brand_accent: Some("not a color".to_string()),
            brand_tagline: Some("Shine on".to_string()),
            brand_tone: Some("Playful".to_string()),
            brand_product_category: Some("Shampoo".to_string()),
            ..Default::default()
        }
    }

    fn collect_colors(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    match (k.as_str(), v) {
                        ("color" | "primary" | "secondary" | "text", Value::String(s))
                            if s.starts_with('#') || s.starts_with('[') =>
                        {
                            out.push(s.clone())
                        }
                        _ => collect_colors(v, out),
                    }
                }
            }
            Value::Array(items) => items.iter().for_each(|v| collect_colors(v, out)),
            _ => {}
        }
    }

    #[test]
    fn test_infer_layout() {
        assert_eq!(TemplateLayout::infer(&hair_product()), TemplateLayout::AdConfig);
        assert_eq!(TemplateLayout::infer(&food_bar()), TemplateLayout::Elements);
        assert_eq!(TemplateLayout::infer(&json!({"title": "{{USER_BRAND_NAME}}"})), TemplateLayout::Tokens);
        assert_eq!(TemplateLayout::infer(&json!("just text")), TemplateLayout::Tokens);
    }

    #[test]
    fn test_ad_config_fill() {
        let template = hair_product();
        let out = StructuredFiller::default().fill(TemplateLayout::AdConfig, &template, &facts());
        let ad = &out.template["ad_config"];

        assert_eq!(ad["subject"]["details"]["branding"], "Lumen");
        assert_eq!(ad["subject"]["details"]["size"], "[USER_PRODUCT_SIZE]");
        assert_eq!(ad["subject"]["description"], "Shampoo");
        assert_eq!(ad["background"]["color"], "#0047ab");
        assert_eq!(ad["text_overlay"]["headline"]["text"], "Shine on");
        assert_eq!(ad["text_overlay"]["headline"]["color"], "#ffffff");
        assert_eq!(ad["text_overlay"]["benefits"][0]["text"], "Quality");
        assert_eq!(ad["text_overlay"]["benefits"][1]["description"], "Description 2");
        assert!(ad["text_overlay"]["benefits"][0].get("description").is_none());
        assert_eq!(ad["text_overlay"]["benefits"][2]["color"], "#000000");
        assert_eq!(ad["text_overlay"]["disclaimer"]["text"], "Terms and conditions apply");
        assert_eq!(ad["text_overlay"]["cta"]["text"], "Shop Now");
        assert_eq!(ad["additional_instructions"]["mood"], "Playful");
        assert_eq!(
            ad["additional_instructions"]["reference"],
            "Create a professional ad for Lumen (Shampoo)"
        );
        assert!(out.report.is_clean());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let template = hair_product();
        let snapshot = template.clone();
        let filled = fill_structured(TemplateLayout::AdConfig, &template, &facts());
        assert_eq!(template, snapshot);
        assert_ne!(filled, snapshot);

        let template = food_bar();
        let snapshot = template.clone();
        let _ = fill_structured(TemplateLayout::Elements, &template, &facts());
        assert_eq!(template, snapshot);
    }

    #[test]
    fn test_ad_config_fallbacks_with_empty_facts() {
        let out = fill_structured(TemplateLayout::AdConfig, &hair_product(), &BrandFacts::default());
        let ad = &out["ad_config"];
        assert_eq!(ad["subject"]["details"]["branding"], "Brand Name");
        assert_eq!(ad["subject"]["description"], "Product");
        assert_eq!(ad["text_overlay"]["headline"]["text"], "Headline");
        assert_eq!(ad["additional_instructions"]["mood"], "playful, approachable, benefit-focused");
        assert_eq!(ad["additional_instructions"]["reference"], "Create a professional ad for Brand ()");
    }

    #[test]
    fn test_colors_always_canonical() {
        for facts in [facts(), BrandFacts::default()] {
            for (layout, template) in [
                (TemplateLayout::AdConfig, hair_product()),
                (TemplateLayout::Elements, food_bar()),
            ] {
                let out = fill_structured(layout, &template, &facts);
                let mut colors = Vec::new();
                collect_colors(&out, &mut colors);
                assert!(!colors.is_empty());
                for color in colors {
                    assert!(is_canonical(&color), "{color} is not canonical");
                }
            }
        }
    }

    #[test]
    fn test_benefits_use_fact_list_then_numbered_labels() {
        let facts = BrandFacts {
            product_benefits: Some("Softer hair, Less frizz".to_string()),
            ..Default::default()
        };
        let out = fill_structured(TemplateLayout::AdConfig, &hair_product(), &facts);
        let benefits = &out["ad_config"]["text_overlay"]["benefits"];
        assert_eq!(benefits[0]["text"], "Softer hair");
        assert_eq!(benefits[1]["text"], "Less frizz");
        assert_eq!(benefits[2]["text"], "Benefit 3");
    }

    #[test]
    fn test_default_benefits_run_out() {
        let mut template = hair_product();
        let extra = template["ad_config"]["text_overlay"]["benefits"][0].clone();
        if let Some(items) = template["ad_config"]["text_overlay"]["benefits"].as_array_mut() {
            items.push(extra.clone());
            items.push(extra);
        }
        let out = fill_structured(TemplateLayout::AdConfig, &template, &BrandFacts::default());
        let benefits = &out["ad_config"]["text_overlay"]["benefits"];
        assert_eq!(benefits[3]["text"], "Service");
        assert_eq!(benefits[4]["text"], "Benefit 5");
    }

    #[test]
    fn test_missing_paths_are_skipped() {
        let template = json!({
            "ad_config": {
                "background": { "setting": "gradient" },
                "text_overlay": { "cta": { "text": "[USER_CTA]" } }
            }
        });
        let out = StructuredFiller::default().fill(TemplateLayout::AdConfig, &template, &facts());
        let ad = &out.template["ad_config"];
        assert_eq!(ad["background"]["color"], "#0047ab");
        assert_eq!(ad["text_overlay"]["cta"]["text"], "Shop Now");
        assert!(ad.get("subject").is_none());
        assert!(out.report.is_clean());
        assert!(out.report.absent.contains(&"ad_config.subject".to_string()));
        assert!(out.report.absent.contains(&"ad_config.text_overlay.headline".to_string()));
    }

    #[test]
    fn test_shape_mismatch_is_reported_not_raised() {
        let template = json!({
            "ad_config": {
                "background": "blue",
                "text_overlay": {
                    "headline": { "text": "[USER_HEADLINE]" },
                    "benefits": ["not an object", { "text": "[USER_BENEFIT_2]" }]
                }
            }
        });
        let out = StructuredFiller::default().fill(TemplateLayout::AdConfig, &template, &facts());
        let ad = &out.template["ad_config"];
        assert_eq!(ad["background"], "blue");
        assert_eq!(ad["text_overlay"]["headline"]["text"], "Shine on");
        assert_eq!(ad["text_overlay"]["benefits"][0], "not an object");
        assert_eq!(ad["text_overlay"]["benefits"][1]["text"], "Value");
        assert_eq!(
            out.report.mismatched,
            vec![
                "ad_config.background".to_string(),
                "ad_config.text_overlay.benefits[0]".to_string()
            ]
        );
    }

    #[test]
    fn test_declared_layout_missing_root() {
        let template = json!({ "colors": { "primary": "#FFF" } });
        let out = StructuredFiller::default().fill(TemplateLayout::AdConfig, &template, &facts());
        assert_eq!(out.template, template);
        assert_eq!(out.report.mismatched, vec!["ad_config".to_string()]);

        let out = StructuredFiller::default().fill(TemplateLayout::Elements, &json!([1, 2]), &facts());
        assert_eq!(out.template, json!([1, 2]));
        assert_eq!(out.report.mismatched, vec!["$".to_string()]);
    }

    #[test]
    fn test_elements_fill() {
        let out = fill_structured(TemplateLayout::Elements, &food_bar(), &facts());
        assert_eq!(out["style"], "playful");
        assert_eq!(out["layout"], "vertical");
        assert_eq!(out["colors"]["primary"], "#0047ab");
        assert_eq!(out["colors"]["secondary"], "#ffffff");
        assert_eq!(out["colors"]["text"], "#000000");
        assert_eq!(out["elements"]["headline"], "Shine on");
        assert_eq!(out["elements"]["subheadline"], "Clean haircare");
        assert_eq!(out["elements"]["cta"], "Shop Now");
        assert_eq!(out["elements"]["features"][0]["feature"], "Quality");
        assert_eq!(out["elements"]["features"][2], "Innovation");
        assert!(out["elements"].get("productName").is_none());
    }

    #[test]
    fn test_elements_keep_template_values_without_facts() {
        let out = fill_structured(TemplateLayout::Elements, &food_bar(), &BrandFacts::default());
        assert_eq!(out["style"], "eco-friendly");
        assert_eq!(out["colors"]["primary"], "#f9a826");
        assert_eq!(out["elements"]["headline"], "{{headline}}");
        assert_eq!(out["elements"]["cta"], "Shop Now");
    }

    #[test]
    fn test_feature_slots_beyond_labels_keep_text() {
        let template = json!({
            "elements": {
                "benefits": [
                    { "feature": "Low acidity" },
                    { "feature": "No jitters" },
                    { "feature": "Less caffeine" }
                ]
            }
        });
        let facts = BrandFacts {
            product_benefits: Some("Focus".to_string()),
            ..Default::default()
        };
        let out = fill_structured(TemplateLayout::Elements, &template, &facts);
        assert_eq!(out["elements"]["benefits"][0]["feature"], "Focus");
        assert_eq!(out["elements"]["benefits"][1]["feature"], "No jitters");
        assert_eq!(out["elements"]["benefits"][2]["feature"], "Less caffeine");
    }

    #[test]
    fn test_tokens_layout_substitutes_leaves() {
        let template = json!({ "caption": "{{USER_BRAND_NAME}}: {{USER_TAGLINE}}", "bg": "{{USER_BACKGROUND_COLOR}}" });
        let out = fill_structured(TemplateLayout::Tokens, &template, &facts());
        assert_eq!(out, json!({ "caption": "Lumen: Shine on", "bg": "#0047ab" }));
    }

    #[test]
    fn test_unmapped_color_fields_are_swept() {
        let template = json!({
            "ad_config": {
                "background": {
                    "color": "[USER_BACKGROUND_COLOR]",
                    "elements": [{ "type": "decorative", "color": "[USER_ACCENT_COLOR]" }]
                },
                "text_overlay": {
                    "cta": { "text": "[USER_CTA]", "color": "{{USER_TEXT_COLOR}}" },
                    "badge": { "color": "#ABC" }
                }
            }
        });
        let facts = BrandFacts {
            brand_secondary: Some("#00FF00".to_string()),
            brand_accent: Some("123".to_string()),
            ..Default::default()
        };
        let out = StructuredFiller::default().fill(TemplateLayout::AdConfig, &template, &facts);
        let ad = &out.template["ad_config"];
        assert_eq!(ad["background"]["color"], "#000000");
        assert_eq!(ad["background"]["elements"][0]["color"], "#00ff00");
        assert_eq!(ad["text_overlay"]["cta"]["color"], "#112233");
        assert_eq!(ad["text_overlay"]["badge"]["color"], "#aabbcc");
        assert!(out
            .report
            .filled
            .contains(&"ad_config.background.elements[0].color".to_string()));
    }

    #[test]
    fn test_every_palette_entry_is_canonical() {
        let template = json!({
            "colors": {
                "primary": "#FFF",
                "accent": "#ABC",
                "background": "[USER_BACKGROUND_COLOR]",
                "highlight": "{{USER_ACCENT_COLOR}}"
            },
            "elements": { "headline": "{{headline}}" }
        });
        let facts = BrandFacts {
            brand_primary: Some("0047AB".to_string()),
            ..Default::default()
        };
        let out = StructuredFiller::default().fill(TemplateLayout::Elements, &template, &facts);
        let colors = &out.template["colors"];
        assert_eq!(colors["primary"], "#0047ab");
        assert_eq!(colors["accent"], "#aabbcc");
        assert_eq!(colors["background"], "#0047ab");
        assert_eq!(colors["highlight"], "#000000");
        assert!(out.report.filled.contains(&"colors.accent".to_string()));
        assert!(out.report.is_clean());
    }

    #[test]
    fn test_color_tokens_under_any_key_are_swept() {
        let template = json!({
            "ad_config": {
                "text_overlay": {
                    "cta": {
                        "text": "[USER_CTA]",
                        "color": "[USER_CTA_TEXT_COLOR]",
                        "background": "[USER_CTA_BACKGROUND_COLOR]"
                    },
                    "badge": { "fill": "{{USER_BACKGROUND_COLOR}}", "background": "white box" }
                }
            }
        });
        let out = fill_structured(TemplateLayout::AdConfig, &template, &facts());
        let overlay = &out["ad_config"]["text_overlay"];
        assert_eq!(overlay["cta"]["text"], "Shop Now");
        assert_eq!(overlay["cta"]["color"], "#000000");
        assert_eq!(overlay["cta"]["background"], "#000000");
        assert_eq!(overlay["badge"]["fill"], "#0047ab");
        assert_eq!(overlay["badge"]["background"], "white box");
    }

    #[test]
    fn test_known_color_paths_resolve_template_tokens() {
        let template = json!({
            "ad_config": {
                "background": { "color": "[USER_TEXT_COLOR]" },
                "text_overlay": {
                    "headline": { "text": "[USER_HEADLINE]", "color": "[USER_TEXT_COLOR]" },
                    "cta": { "text": "[USER_CTA]", "color": "[USER_TEXT_COLOR]" }
                }
            }
        });
        let facts = BrandFacts {
            brand_accent: Some("123".to_string()),
            ..Default::default()
        };
        let out = fill_structured(TemplateLayout::AdConfig, &template, &facts);
        let ad = &out["ad_config"];
        assert_eq!(ad["text_overlay"]["headline"]["color"], "#112233");
        assert_eq!(ad["text_overlay"]["cta"]["color"], "#112233");
        assert_eq!(ad["background"]["color"], "#112233");

        let template = json!({ "colors": { "secondary": "{{USER_TEXT_COLOR}}", "text": "[USER_BACKGROUND_COLOR]" } });
        let out = fill_structured(TemplateLayout::Elements, &template, &facts);
        assert_eq!(out["colors"]["secondary"], "#112233");
        assert_eq!(out["colors"]["text"], "#112233");
    }

    #[test]
    fn test_custom_literals() {
        let filler = StructuredFiller::new(FillConfig {
            cta_text: "Buy Today".to_string(),
            ..Default::default()
        });
        let out = filler.fill(TemplateLayout::Elements, &food_bar(), &BrandFacts::default());
        assert_eq!(out.template["elements"]["cta"], "Buy Today");
        assert_eq!(filler.config().cta_text, "Buy Today");
    }
}
