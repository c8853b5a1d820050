// src/compose/compositor.rs

use tracing::{debug, info};

use crate::compose::catalog::CatalogEntry;
use crate::descriptor::DescriptorBuilder;
use crate::errors::Result;
use crate::settings::SettingsProvider;
use crate::types::ValueOrigin;

/// Outcome of resolving one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub origin: ValueOrigin,
}

/// Chooses between a user override and a computed default.
///
/// An override only wins when it is present *and* non-empty: an empty string
/// in the settings behaves exactly like an unset key.
#[derive(Debug, Clone, Copy)]
pub struct Compositor<'a> {
    settings: &'a dyn SettingsProvider,
}

impl<'a> Compositor<'a> {
    pub fn new(settings: &'a dyn SettingsProvider) -> Self {
        Self { settings }
    }

    pub fn resolve(&self, key: &str, computed_default: String) -> Result<Resolved> {
        match self.settings.get_value(key)? {
            Some(value) if !value.is_empty() => {
                info!(
                    key,
                    value = %value,
                    "using custom deployment setting"
                );
                Ok(Resolved {
                    value,
                    origin: ValueOrigin::UserOverride,
                })
            }
            _ => {
                debug!(key, value = %computed_default, "using default");
                Ok(Resolved {
                    value: computed_default,
                    origin: ValueOrigin::Default,
                })
            }
        }
    }

    /// Resolve every entry of `catalog` against `inputs` into `builder`,
    /// in catalog order.
    pub fn apply<I>(
        &self,
        builder: &mut DescriptorBuilder,
        catalog: &[CatalogEntry<I>],
        inputs: &I,
    ) -> Result<()> {
        for entry in catalog {
            let resolved = self.resolve(entry.key, (entry.default)(inputs))?;
            builder.resolved(entry.key, resolved.value, resolved.origin);
        }
        Ok(())
    }
}
