// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rig-wide configuration consumed by the graph engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration for one rig-editing session.
///
/// Passed explicitly to the operations that need it; there is no
/// process-wide config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigConfig {
    /// Location tag -> mirrored location tag, used by mirrored paste
    pub mirror_map: IndexMap<String, String>,
}

impl Default for RigConfig {
    fn default() -> Self {
        let mut mirror_map = IndexMap::new();
        mirror_map.insert("L".to_string(), "R".to_string());
        mirror_map.insert("R".to_string(), "L".to_string());
        Self { mirror_map }
    }
}

impl RigConfig {
    /// Build a config from an explicit mirror map.
    pub fn new(mirror_map: IndexMap<String, String>) -> Self {
        Self { mirror_map }
    }

    /// The mirrored counterpart of `location`.
    ///
    /// Unmapped tags mirror to themselves, so center components keep
    /// their location.
    pub fn mirror_location(&self, location: &str) -> String {
        self.mirror_map
            .get(location)
            .cloned()
            .unwrap_or_else(|| location.to_string())
    }
}
