//! Hex color normalization.
//!
//! Every color that leaves this workspace, whether written into a filled
//! template or handed to the image generator, goes through
//! [`normalize_hex`] first. The function is total: malformed input maps to
//! [`DEFAULT_HEX`] instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical black, returned for every input that is not a valid hex color.
pub const DEFAULT_HEX: &str = "#000000";

/// Normalize a hex color into canonical `#rrggbb` form.
///
/// Accepts `RGB` and `RRGGBB` (either case), each with an optional single
/// leading `#`. Three-digit input is expanded by doubling each digit. No
/// trimming is performed: surrounding whitespace makes the input invalid.
pub fn normalize_hex(input: Option<&str>) -> String {
    let Some(raw) = input else {
        return DEFAULT_HEX.to_string();
    };

    let digits = raw.strip_prefix('#').unwrap_or(raw);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return DEFAULT_HEX.to_string();
    }

    let mut out = String::with_capacity(7);
    out.push('#');
    match digits.len() {
        3 => {
            for b in digits.bytes() {
                let c = char::from(b.to_ascii_lowercase());
                out.push(c);
                out.push(c);
            }
        }
        6 => out.extend(digits.bytes().map(|b| char::from(b.to_ascii_lowercase()))),
        _ => return DEFAULT_HEX.to_string(),
    }
    out
}

/// True when `s` is already in canonical `#rrggbb` form.
pub fn is_canonical(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// A color guaranteed to be in canonical `#rrggbb` form.
///
/// Deserializing never fails on malformed or missing strings; they become
/// black, the same as [`normalize_hex`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "Option<String>")]
pub struct HexColor(String);

impl HexColor {
    pub fn normalize(input: Option<&str>) -> Self {
        Self(normalize_hex(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(DEFAULT_HEX.to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Option<String>> for HexColor {
    fn from(value: Option<String>) -> Self {
        Self::normalize(value.as_deref())
    }
}

impl From<&str> for HexColor {
    fn from(value: &str) -> Self {
        Self::normalize(Some(value))
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
