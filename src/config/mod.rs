use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::otb::{OtbError, Result};

fn default_xml_indent() -> usize {
    2
}

/// Export settings. Version overrides replace the catalog's values in the
/// emitted header without touching the catalog itself.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    pub major_version: Option<u32>,
    pub minor_version: Option<u32>,
    pub client_version: Option<u32>,
    #[serde(default = "default_xml_indent")]
    pub xml_indent: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            major_version: None,
            minor_version: None,
            client_version: None,
            xml_indent: default_xml_indent(),
        }
    }
}

impl ExportConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&json)
            .map_err(|e| OtbError::InvalidInput(format!("config JSON: {}", e)))
    }

    /// Values set in `other` take precedence.
    pub fn merged(mut self, other: &ExportConfig) -> Self {
        if other.major_version.is_some() {
            self.major_version = other.major_version;
        }
        if other.minor_version.is_some() {
            self.minor_version = other.minor_version;
        }
        if other.client_version.is_some() {
            self.client_version = other.client_version;
        }
        self
    }
}
