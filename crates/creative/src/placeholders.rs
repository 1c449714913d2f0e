//! The token table driving flat template substitution.
//!
//! Adding a token is a table edit: each [`Placeholder`] names the fact it
//! reads, whether that fact is a color, and the text used when it is absent.

use std::collections::HashMap;

use adcraft_core::color::HexColor;
use adcraft_core::{BrandFacts, FactKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Substituted verbatim, or `fallback` when the fact is absent.
    Plain,
    /// Passed through the color normalizer; absent or malformed becomes black.
    Color,
}

#[derive(Debug, Clone, Copy)]
pub struct Placeholder {
    pub token: &'static str,
    pub fact: FactKey,
    pub kind: PlaceholderKind,
    pub fallback: &'static str,
}

impl Placeholder {
    const fn plain(token: &'static str, fact: FactKey) -> Self {
        Self {
            token,
            fact,
            kind: PlaceholderKind::Plain,
            fallback: "",
        }
    }

    const fn color(token: &'static str, fact: FactKey) -> Self {
        Self {
            token,
            fact,
            kind: PlaceholderKind::Color,
            fallback: "",
        }
    }

    /// Resolve this placeholder against one set of facts.
    pub fn resolve(&self, facts: &BrandFacts) -> String {
        match self.kind {
            PlaceholderKind::Plain => facts.get(self.fact).unwrap_or(self.fallback).to_string(),
            PlaceholderKind::Color => HexColor::normalize(facts.get(self.fact)).into(),
        }
    }
}

pub const PLACEHOLDERS: &[Placeholder] = &[
    Placeholder::plain("USER_BRAND_NAME", FactKey::BrandName),
    Placeholder::plain("USER_BRAND_DESCRIPTION", FactKey::BrandDescription),
    Placeholder::color("USER_BACKGROUND_COLOR", FactKey::BrandPrimary),
    Placeholder::color("USER_ACCENT_COLOR", FactKey::BrandSecondary),
    Placeholder::color("USER_TEXT_COLOR", FactKey::BrandAccent),
    Placeholder::plain("USER_TAGLINE", FactKey::BrandTagline),
    Placeholder::plain("USER_USP", FactKey::BrandUniqueSellingPoint),
    Placeholder::plain("USER_TARGET_AUDIENCE", FactKey::BrandTargetAudience),
    Placeholder::plain("USER_TONE", FactKey::BrandTone),
    Placeholder::plain("USER_VALUES", FactKey::BrandValues),
    Placeholder::plain("USER_PRODUCT_NAME", FactKey::ProductName),
    Placeholder::plain("USER_PRODUCT_DESCRIPTION", FactKey::ProductDescription),
    Placeholder::plain("USER_PRODUCT_BENEFITS", FactKey::ProductBenefits),
    Placeholder::plain("USER_PRODUCT_FEATURES", FactKey::ProductFeatures),
    Placeholder::plain("USER_PRODUCT_PRICE", FactKey::ProductPrice),
    Placeholder::plain("USER_PRODUCT_CATEGORY", FactKey::BrandProductCategory),
];

/// Token name to resolved value for a single fill.
#[derive(Debug, Clone)]
pub struct PlaceholderMap {
    values: HashMap<&'static str, String>,
}

impl PlaceholderMap {
    pub fn from_facts(facts: &BrandFacts) -> Self {
        Self::from_table(PLACEHOLDERS, facts)
    }

    pub fn from_table(table: &[Placeholder], facts: &BrandFacts) -> Self {
        let values = table
            .iter()
            .map(|p| (p.token, p.resolve(facts)))
            .collect();
        Self { values }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
