//! Loading of item catalogs from JSON.
//!
//! Catalog layout:
//!
//! ```json
//! {
//!   "major_version": 3,
//!   "minor_version": 57,
//!   "build_number": 10,
//!   "client_version": 1098,
//!   "items": [ { "id": 100, "type": "Ground", "client_id": 200, ... } ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use super::ServerItemList;
use crate::otb::{OtbError, Result};

impl ServerItemList {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let list: ServerItemList = serde_json::from_str(json)
            .map_err(|e| OtbError::InvalidInput(format!("catalog JSON: {}", e)))?;
        list.validate()?;
        Ok(list)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let list = Self::from_json_str(&json)?;
        debug!(path = %path.display(), items = list.count(), "loaded item catalog");
        Ok(list)
    }

    /// Reject catalogs whose server ids are not unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(OtbError::InvalidInput(format!(
                    "duplicate server id {}",
                    item.id
                )));
            }
        }
        Ok(())
    }
}
