// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Registry configuration documents.
//!
//! A config document lists custom variants on top of the presets:
//!
//! ```json
//! {
//!   "default_variant": "tiny",
//!   "variants": [
//!     { "name": "tiny", "digits": 12, "ordered": 4, "base": 32 }
//!   ]
//! }
//! ```
//!
//! Reading the bytes is the caller's concern; this module only decodes,
//! validates, and builds a [`VariantRegistry`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigurationError;
use crate::registry::VariantRegistry;
use crate::variant::{Variant, VariantSpec};

/// Serializable registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Variant used when callers do not name one. Falls back to the
    /// `default` preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_variant: Option<String>,
    /// Custom variants registered after the presets, in order.
    #[serde(default)]
    pub variants: Vec<VariantSpec>,
}

impl RegistryConfig {
    /// Decode a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Parse`] if the bytes are not a valid document.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigurationError> {
        serde_json::from_slice(bytes).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Parse`] if serialization fails.
    pub fn to_json_vec(&self) -> Result<Vec<u8>, ConfigurationError> {
        serde_json::to_vec_pretty(self).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    /// Build a registry holding the presets plus every configured variant.
    ///
    /// # Errors
    ///
    /// The first [`ConfigurationError`] raised by validation or registration,
    /// or [`ConfigurationError::UnknownVariant`] if `default_variant` names
    /// nothing registered.
    pub fn build(&self) -> Result<(VariantRegistry, Arc<Variant>), ConfigurationError> {
        let mut registry = VariantRegistry::with_presets();
        for spec in &self.variants {
            registry.register_spec(spec)?;
        }
        let default = registry.get(self.default_variant.as_deref().unwrap_or("default"))?;
        info!(
            variants = registry.len(),
            default = default.name(),
            "variant registry configured"
        );
        Ok((registry, default))
    }
}
