//! Flat `{{TOKEN}}` substitution over strings and JSON trees.

use adcraft_core::BrandFacts;
use serde_json::Value;

use crate::placeholders::PlaceholderMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replace every known `{{TOKEN}}` in `template` with its fact value.
///
/// A missing or empty template yields an empty string. Unknown tokens are
/// left as written.
pub fn fill(template: Option<&str>, facts: &BrandFacts) -> String {
    match template {
        Some(t) if !t.is_empty() => substitute(t, &PlaceholderMap::from_facts(facts)),
        _ => String::new(),
    }
}

/// Apply [`fill`] to every string leaf of a JSON tree, returning a new tree.
pub fn fill_tree(template: &Value, facts: &BrandFacts) -> Value {
    let map = PlaceholderMap::from_facts(facts);
    substitute_tree(template, &map)
}

/// Single left-to-right pass: substituted values are copied to the output
/// and never scanned again.
pub fn substitute(template: &str, map: &PlaceholderMap) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            out.push_str(&rest[start..]);
            return out;
        };
        if let Some(value) = map.get(&after[..end]) {
            out.push_str(value);
            rest = &after[end + CLOSE.len()..];
        } else {
            // Retry one brace later so `{{{TOKEN}}}` still matches.
            out.push('{');
            rest = &rest[start + 1..];
        }
    }

    out.push_str(rest);
    out
}

fn substitute_tree(value: &Value, map: &PlaceholderMap) -> Value {
    match value {
        Value::String(s) => Value::String(substitute(s, map)),
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute_tree(v, map)).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), substitute_tree(v, map)))
                .collect(),
        ),
        other => other.clone(),
    }
}
