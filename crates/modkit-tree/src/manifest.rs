use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deserialized `package.json` descriptor for one installed module.
///
/// Descriptors are arbitrary objects, so every typed field is optional and
/// unrecognized keys are retained verbatim under `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Inline plugin configuration embedded in the descriptor. When set,
    /// it takes precedence over any `.modkitrc` marker file on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modkit: Option<Value>,

    /// Remaining descriptor keys, kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl PackageManifest {
    /// Human-readable `name@version` label, tolerating missing fields.
    pub fn display_name(&self) -> String {
        match (self.name.as_deref(), self.version.as_deref()) {
            (Some(name), Some(version)) => format!("{name}@{version}"),
            (Some(name), None) => name.to_string(),
            (None, _) => "(unnamed)".to_string(),
        }
    }
}
