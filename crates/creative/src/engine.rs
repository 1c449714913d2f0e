use std::time::Instant;

use adcraft_core::config::FillConfig;
use adcraft_core::{AppConfig, BrandFacts, CoreError};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::catalog::TemplateCatalog;
use crate::filler::fill;
use crate::structured::{FillReport, StructuredFill, StructuredFiller, TemplateLayout};

/// A catalog template filled for one ad-generation request.
#[derive(Debug, Clone, Serialize)]
pub struct FilledCreative {
    pub id: Uuid,
    pub template_id: String,
    pub layout: TemplateLayout,
    pub template: Value,
    pub report: FillReport,
    pub fill_latency_us: u64,
    pub filled_at: DateTime<Utc>,
}

/// Looks up catalog templates and fills them from brand facts.
#[derive(Debug, Clone)]
pub struct CreativeEngine {
    catalog: TemplateCatalog,
    filler: StructuredFiller,
}

impl CreativeEngine {
    pub fn new(config: FillConfig, catalog: TemplateCatalog) -> Self {
        Self {
            catalog,
            filler: StructuredFiller::new(config),
        }
    }

    /// Build the catalog described by `config`: the built-in templates
    /// (unless disabled) plus an optional JSON catalog file.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog = if config.catalog.include_builtin {
            TemplateCatalog::builtin()
        } else {
            TemplateCatalog::new()
        };

        if let Some(path) = &config.catalog.path {
            catalog
                .load_file(path)
                .with_context(|| format!("failed to load template catalog {path}"))?;
        }

        info!(templates = catalog.len(), "creative engine ready");
        Ok(Self::new(config.fill.clone(), catalog))
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Fill the catalog template `template_id`. Only an unknown id fails;
    /// problems inside the template end up in the returned report.
    pub fn fill_template(&self, template_id: &str, facts: &BrandFacts) -> Result<FilledCreative> {
        let start = Instant::now();

        let entry = self
            .catalog
            .get(template_id)
            .ok_or_else(|| CoreError::TemplateNotFound(template_id.to_string()))?;

        let StructuredFill { template, report } =
            self.filler.fill(entry.layout, &entry.json_template, facts);

        let latency = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        info!(
            template_id,
            layout = ?entry.layout,
            filled = report.filled.len(),
            mismatched = report.mismatched.len(),
            known_facts = facts.known_count(),
            latency_us = latency,
            "filled ad template"
        );

        Ok(FilledCreative {
            id: Uuid::new_v4(),
            template_id: entry.id.clone(),
            layout: entry.layout,
            template,
            report,
            fill_latency_us: latency,
            filled_at: Utc::now(),
        })
    }

    /// Substitute `{{TOKEN}}` placeholders in free text.
    pub fn fill_text(&self, text: &str, facts: &BrandFacts) -> String {
        fill(Some(text), facts)
    }
}

impl Default for CreativeEngine {
    fn default() -> Self {
        Self::new(FillConfig::default(), TemplateCatalog::builtin())
    }
}
