use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::color::normalize_hex;
use crate::error::{CoreError, CoreResult};

/// The fixed set of semantic keys a brand analysis may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKey {
    BrandName,
    BrandDescription,
    BrandPrimary,
    BrandSecondary,
    BrandAccent,
    BrandTagline,
    BrandTone,
    BrandUniqueSellingPoint,
    BrandTargetAudience,
    BrandProductCategory,
    BrandValues,
    ProductName,
    ProductDescription,
    ProductBenefits,
    ProductFeatures,
    ProductPrice,
}

impl FactKey {
    pub const ALL: [FactKey; 16] = [
        FactKey::BrandName,
        FactKey::BrandDescription,
        FactKey::BrandPrimary,
        FactKey::BrandSecondary,
        FactKey::BrandAccent,
        FactKey::BrandTagline,
        FactKey::BrandTone,
        FactKey::BrandUniqueSellingPoint,
        FactKey::BrandTargetAudience,
        FactKey::BrandProductCategory,
        FactKey::BrandValues,
        FactKey::ProductName,
        FactKey::ProductDescription,
        FactKey::ProductBenefits,
        FactKey::ProductFeatures,
        FactKey::ProductPrice,
    ];

    /// Wire name used by the analysis service.
    pub fn as_str(self) -> &'static str {
        match self {
            FactKey::BrandName => "brand_name",
            FactKey::BrandDescription => "brand_description",
            FactKey::BrandPrimary => "brand_primary",
            FactKey::BrandSecondary => "brand_secondary",
            FactKey::BrandAccent => "brand_accent",
            FactKey::BrandTagline => "brand_tagline",
            FactKey::BrandTone => "brand_tone",
            FactKey::BrandUniqueSellingPoint => "brand_unique_selling_point",
            FactKey::BrandTargetAudience => "brand_target_audience",
            FactKey::BrandProductCategory => "brand_product_category",
            FactKey::BrandValues => "brand_values",
            FactKey::ProductName => "product_name",
            FactKey::ProductDescription => "product_description",
            FactKey::ProductBenefits => "product_benefits",
            FactKey::ProductFeatures => "product_features",
            FactKey::ProductPrice => "product_price",
        }
    }

    pub fn is_color(self) -> bool {
        matches!(
            self,
            FactKey::BrandPrimary | FactKey::BrandSecondary | FactKey::BrandAccent
        )
    }
}

/// Brand and product attributes extracted from a website.
///
/// Produced by an external analysis service, so every field is optional and
/// untrusted. `null`, missing, and `""` all mean "unknown"; color fields may
/// hold anything until [`BrandFacts::sanitize_colors`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandFacts {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brand_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brand_primary: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brand_secondary: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brand_accent: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brand_tagline: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brand_tone: Option<String>,
    #[serde(
        default,
        alias = "brand_usp",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand_unique_selling_point: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brand_target_audience: Option<String>,
    #[serde(
        default,
        alias = "product_category",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand_product_category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub brand_values: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub product_benefits: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub product_features: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub product_price: Option<String>,
}

impl BrandFacts {
    /// Look up a fact. Empty strings count as absent.
    pub fn get(&self, key: FactKey) -> Option<&str> {
        let value = match key {
            FactKey::BrandName => &self.brand_name,
            FactKey::BrandDescription => &self.brand_description,
            FactKey::BrandPrimary => &self.brand_primary,
            FactKey::BrandSecondary => &self.brand_secondary,
            FactKey::BrandAccent => &self.brand_accent,
            FactKey::BrandTagline => &self.brand_tagline,
            FactKey::BrandTone => &self.brand_tone,
            FactKey::BrandUniqueSellingPoint => &self.brand_unique_selling_point,
            FactKey::BrandTargetAudience => &self.brand_target_audience,
            FactKey::BrandProductCategory => &self.brand_product_category,
            FactKey::BrandValues => &self.brand_values,
            FactKey::ProductName => &self.product_name,
            FactKey::ProductDescription => &self.product_description,
            FactKey::ProductBenefits => &self.product_benefits,
            FactKey::ProductFeatures => &self.product_features,
            FactKey::ProductPrice => &self.product_price,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Number of keys carrying a non-empty value.
    pub fn known_count(&self) -> usize {
        FactKey::ALL.iter().filter(|k| self.get(**k).is_some()).count()
    }

    /// Canonicalize the color fields. The primary color is always set
    /// (black when unknown); secondary and accent are normalized only when
    /// present.
    pub fn sanitize_colors(mut self) -> Self {
        self.brand_primary = Some(normalize_hex(self.get(FactKey::BrandPrimary)));
        if let Some(secondary) = self.get(FactKey::BrandSecondary) {
            self.brand_secondary = Some(normalize_hex(Some(secondary)));
        }
        if let Some(accent) = self.get(FactKey::BrandAccent) {
            self.brand_accent = Some(normalize_hex(Some(accent)));
        }
        self
    }

    /// Parse the facts object out of a language-model reply.
    ///
    /// Looks for a fenced ```` ```json ```` block first, then the outermost
    /// `{...}` span, then falls back to the whole text. Colors are sanitized
    /// on success.
    pub fn from_model_response(text: &str) -> CoreResult<Self> {
        let json = extract_json_object(text);
        let facts: BrandFacts = serde_json::from_str(json.trim())
            .map_err(|e| CoreError::FactsParse(e.to_string()))?;
        debug!(known = facts.known_count(), "parsed brand facts");
        Ok(facts.sanitize_colors())
    }

    /// Facts used when website analysis fails outright.
    pub fn fallback() -> Self {
        Self {
            brand_name: Some("Example Brand".to_string()),
            brand_description: Some("A sample brand description".to_string()),
            brand_primary: Some("#4F46E5".to_string()),
            brand_tagline: Some("Innovation for everyone".to_string()),
            ..Default::default()
        }
        .sanitize_colors()
    }

    /// Split `product_benefits` into individual benefit labels.
    pub fn benefit_list(&self) -> Vec<String> {
        self.get(FactKey::ProductBenefits)
            .map(|raw| {
                raw.split([',', ';', '\n'])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn extract_json_object(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        if let Some(end) = body.find("```") {
            return &body[..end];
        }
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Accept strings, numbers and booleans; anything else becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
