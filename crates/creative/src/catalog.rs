//! Thread-safe store of ad layout templates.
//!
//! Templates are registered once and shared behind [`Arc`]; filling always
//! works on a copy, so one entry can serve any number of concurrent fills.

use std::path::Path;
use std::sync::Arc;

use adcraft_core::{CoreError, CoreResult};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::structured::TemplateLayout;

/// Where the finished ad is meant to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdFormat {
    #[default]
    Static,
    Video,
    Social,
}

/// A catalog entry: display metadata plus the layout template itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub preview_url: Option<String>,
    #[serde(rename = "type")]
    pub format: AdFormat,
    pub layout: TemplateLayout,
    pub json_template: Value,
}

/// On-disk form of an entry. `layout` may be omitted and is then inferred
/// from the template's top-level keys.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    preview_url: Option<String>,
    #[serde(rename = "type", default)]
    format: AdFormat,
    #[serde(default)]
    layout: Option<TemplateLayout>,
    json_template: Value,
}

impl From<CatalogEntry> for AdTemplate {
    fn from(entry: CatalogEntry) -> Self {
        let layout = entry
            .layout
            .unwrap_or_else(|| TemplateLayout::infer(&entry.json_template));
        Self {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            preview_url: entry.preview_url,
            format: entry.format,
            layout,
            json_template: entry.json_template,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Arc<DashMap<String, Arc<AdTemplate>>>,
}

impl TemplateCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the built-in templates.
    pub fn builtin() -> Self {
        let catalog = Self::new();
        for template in crate::builtin::templates() {
            catalog.register(template);
        }
        catalog
    }

    /// Register (or overwrite) a template. Returns its id.
    pub fn register(&self, template: AdTemplate) -> String {
        let id = template.id.clone();
        info!(%id, layout = ?template.layout, "registering ad template");
        self.templates.insert(id.clone(), Arc::new(template));
        id
    }

    pub fn get(&self, id: &str) -> Option<Arc<AdTemplate>> {
        self.templates.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// All templates, ordered by id.
    pub fn list(&self) -> Vec<Arc<AdTemplate>> {
        let mut all: Vec<_> = self
            .templates
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Register every entry of a JSON array of templates. Returns how many
    /// were loaded. Nothing is registered if any entry is invalid.
    pub fn load_json(&self, json: &str) -> CoreResult<usize> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|e| CoreError::CatalogLoad(e.to_string()))?;

        if let Some(entry) = entries.iter().find(|e| e.id.trim().is_empty()) {
            return Err(CoreError::CatalogLoad(format!(
                "template {:?} has an empty id",
                entry.name
            )));
        }

        let count = entries.len();
        for entry in entries {
            self.register(entry.into());
        }
        Ok(count)
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> CoreResult<usize> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let count = self.load_json(&json)?;
        info!(path = %path.display(), count, "loaded template catalog file");
        Ok(count)
    }
}
