//! Shared building blocks for adcraft: brand facts, hex color
//! normalization, configuration and the error taxonomy.

pub mod color;
pub mod config;
pub mod error;
pub mod types;

pub use color::{normalize_hex, HexColor, DEFAULT_HEX};
pub use config::AppConfig;
pub use error::{CoreError, CoreResult};
pub use types::{BrandFacts, FactKey};
