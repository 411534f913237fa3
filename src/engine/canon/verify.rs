use serde_json::Value;

use crate::domain::report::{CheckMismatch, CheckReport};
use crate::engine::canon::Formatter;

/// Report which values are not already in canonical key order.
///
/// Each mismatch records the path of the first object (depth-first) whose
/// key order diverges from the canonical form, so reports stay small and
/// deterministic across runs.
pub fn verify_values(formatter: &Formatter, values: &[Value]) -> CheckReport {
    let mut mismatches = Vec::new();
    for (index, value) in values.iter().enumerate() {
        let canonical = formatter.format(value);
        if let Some(path) = first_divergence(value, &canonical, &format!("$[{index}]")) {
            mismatches.push(CheckMismatch {
                path,
                reason: "key_order_mismatch".to_string(),
            });
        }
    }
    CheckReport {
        canonical: mismatches.is_empty(),
        mismatch_count: mismatches.len(),
        mismatches,
    }
}

fn first_divergence(original: &Value, canonical: &Value, path: &str) -> Option<String> {
    match (original, canonical) {
        (Value::Object(original), Value::Object(canonical)) => {
            let original_keys: Vec<&String> = original.keys().collect();
            let canonical_keys: Vec<&String> = canonical.keys().collect();
            if original_keys != canonical_keys {
                return Some(path.to_string());
            }
            for (key, child) in original {
                let canonical_child = canonical.get(key)?;
                let child_path = format!("{path}.{key}");
                if let Some(found) = first_divergence(child, canonical_child, &child_path) {
                    return Some(found);
                }
            }
            None
        }
        (Value::Array(original), Value::Array(canonical)) => {
            for (index, (child, canonical_child)) in original.iter().zip(canonical).enumerate() {
                let child_path = format!("{path}[{index}]");
                if let Some(found) = first_divergence(child, canonical_child, &child_path) {
                    return Some(found);
                }
            }
            None
        }
        _ => None,
    }
}
