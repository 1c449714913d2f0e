//! Ad creative filling: substitutes brand facts into ad layout templates
//! drawn from a catalog, normalizing every color on the way through.

pub mod builtin;
pub mod catalog;
pub mod engine;
pub mod filler;
pub mod placeholders;
pub mod structured;

pub use adcraft_core::color::{is_canonical, normalize_hex, HexColor};
pub use catalog::{AdFormat, AdTemplate, TemplateCatalog};
pub use engine::{CreativeEngine, FilledCreative};
pub use filler::{fill, fill_tree};
pub use placeholders::{Placeholder, PlaceholderKind, PlaceholderMap, PLACEHOLDERS};
pub use structured::{fill_structured, FillReport, StructuredFill, StructuredFiller, TemplateLayout};
