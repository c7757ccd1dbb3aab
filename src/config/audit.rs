//! Detecting values a load would not carry through to the next write.

use super::file::ConfigFormat;
use super::ConfigSnapshot;
use crate::error::{OnboardError, Result};
use serde_json::Value;
use std::path::Path;

/// A loaded config along with the values lost while loading it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigAudit {
    pub snapshot: ConfigSnapshot,
    /// Dotted paths of values the snapshot does not hold.
    pub discarded: Vec<String>,
}

impl ConfigAudit {
    pub fn is_lossless(&self) -> bool {
        self.discarded.is_empty()
    }
}

/// Load an existing config file and list what its next write would drop.
pub fn audit_config(path: &Path) -> Result<ConfigAudit> {
    if !path.exists() {
        return Err(OnboardError::ConfigNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(ConfigAudit {
            snapshot: ConfigSnapshot::default(),
            discarded: Vec::new(),
        });
    }

    let format = ConfigFormat::from_path(path);
    let raw: Value = format.parse(&contents)?;
    let snapshot: ConfigSnapshot = format.parse(&contents)?;
    let kept = serde_json::to_value(&snapshot)?;

    let discarded = discarded_paths(&raw, &kept);
    for path in &discarded {
        tracing::debug!(path = %path, "value dropped on load");
    }

    Ok(ConfigAudit { snapshot, discarded })
}

/// Paths present in `raw` whose value `kept` does not reproduce. Keys only
/// `kept` has (defaults) are ignored, as are `null` values in `raw`.
pub fn discarded_paths(raw: &Value, kept: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    collect_discarded(String::new(), raw, Some(kept), &mut paths);
    paths
}

fn collect_discarded(path: String, raw: &Value, kept: Option<&Value>, out: &mut Vec<String>) {
    match (raw, kept) {
        (Value::Null, _) => {}
        (Value::Object(fields), Some(Value::Object(kept))) => {
            for (key, value) in fields {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                collect_discarded(child, value, kept.get(key), out);
            }
        }
        (Value::Array(items), Some(Value::Array(kept))) if items.len() == kept.len() => {
            for (index, (item, kept)) in items.iter().zip(kept).enumerate() {
                collect_discarded(format!("{}[{}]", path, index), item, Some(kept), out);
            }
        }
        (raw, Some(kept)) if raw == kept => {}
        _ if path.is_empty() => out.push("(root)".to_string()),
        _ => out.push(path),
    }
}
