// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named variant lookup.
//!
//! A registry is an ordinary value. [`VariantRegistry::register`] takes
//! `&mut self`, so registration is sequenced before any shared lookups; callers
//! that need runtime registration across threads wrap the registry in a lock
//! of their choosing. [`VariantRegistry::builtin`] is a read-only registry of
//! the presets, initialized once per process.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::error::ConfigurationError;
use crate::variant::{Variant, VariantSpec};

/// Variants keyed by name.
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    variants: BTreeMap<String, Arc<Variant>>,
}

impl VariantRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `narrow`, `default` and `wide`.
    pub fn with_presets() -> Self {
        let variants = Variant::presets()
            .into_iter()
            .map(|v| (v.name().to_owned(), v))
            .collect();
        Self { variants }
    }

    /// Shared read-only preset registry.
    pub fn builtin() -> &'static VariantRegistry {
        static BUILTIN: OnceLock<VariantRegistry> = OnceLock::new();
        BUILTIN.get_or_init(Self::with_presets)
    }

    /// Register `variant` under its name.
    ///
    /// Re-registering identical parameters is a no-op that returns the
    /// existing handle.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Conflict`] if the name is taken by a variant with
    /// different parameters.
    pub fn register(&mut self, variant: Variant) -> Result<Arc<Variant>, ConfigurationError> {
        if let Some(existing) = self.variants.get(variant.name()) {
            if **existing == variant {
                warn!(variant = variant.name(), "identical variant already registered");
                return Ok(Arc::clone(existing));
            }
            return Err(ConfigurationError::Conflict(variant.name().to_owned()));
        }
        debug!(
            variant = variant.name(),
            digits = variant.digits(),
            ordered = variant.ordered_digits(),
            base = variant.base(),
            "registered variant"
        );
        let handle = Arc::new(variant);
        self.variants
            .insert(handle.name().to_owned(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Validate `spec` and register the resulting variant.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Invalid`] for bad parameters,
    /// [`ConfigurationError::Conflict`] for a name clash.
    pub fn register_spec(
        &mut self,
        spec: &VariantSpec,
    ) -> Result<Arc<Variant>, ConfigurationError> {
        self.register(Variant::custom(spec)?)
    }

    /// Look up a variant by name.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnknownVariant`] if nothing is registered under
    /// `name`.
    pub fn get(&self, name: &str) -> Result<Arc<Variant>, ConfigurationError> {
        self.variants
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownVariant(name.to_owned()))
    }

    /// First variant (by name) whose rendered string has `len` characters.
    pub fn by_rendered_len(&self, len: usize) -> Option<Arc<Variant>> {
        self.variants
            .values()
            .find(|v| v.rendered_len() == len)
            .cloned()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether no variants are registered.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
