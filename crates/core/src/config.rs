use std::path::Path;

use serde::Deserialize;

use crate::error::CoreResult;

/// Root application configuration. Loaded from environment variables
/// with the prefix `ADCRAFT__` and an optional TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fill: FillConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Literals written into structured templates when no brand fact covers a field.
#[derive(Debug, Clone, Deserialize)]
pub struct FillConfig {
    #[serde(default = "default_cta_text")]
    pub cta_text: String,
    #[serde(default = "default_disclaimer_text")]
    pub disclaimer_text: String,
    /// Used for benefit/feature slots when the facts carry no benefits list.
    #[serde(default = "default_benefits")]
    pub default_benefits: Vec<String>,
    #[serde(default = "default_brand_name_fallback")]
    pub brand_name_fallback: String,
    #[serde(default = "default_category_fallback")]
    pub category_fallback: String,
    #[serde(default = "default_headline_fallback")]
    pub headline_fallback: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// JSON file with additional template entries.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,
}

fn default_cta_text() -> String {
    "Shop Now".to_string()
}
fn default_disclaimer_text() -> String {
    "Terms and conditions apply".to_string()
}
fn default_benefits() -> Vec<String> {
    ["Quality", "Value", "Innovation", "Service"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_brand_name_fallback() -> String {
    "Brand Name".to_string()
}
fn default_category_fallback() -> String {
    "Product".to_string()
}
fn default_headline_fallback() -> String {
    "Headline".to_string()
}
fn default_include_builtin() -> bool {
    true
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            cta_text: default_cta_text(),
            disclaimer_text: default_disclaimer_text(),
            default_benefits: default_benefits(),
            brand_name_fallback: default_brand_name_fallback(),
            category_fallback: default_category_fallback(),
            headline_fallback: default_headline_fallback(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_builtin: default_include_builtin(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then environment
    /// variables (which take precedence).
    pub fn load_from(file: Option<&Path>) -> CoreResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let builder = builder.add_source(
            config::Environment::with_prefix("ADCRAFT")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("fill.default_benefits"),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
