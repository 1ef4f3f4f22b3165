//! String-keyed overrides for scope and stage.
//!
//! Properties come from `-P key=value` arguments; each key also has an
//! environment equivalent (`release.scope` -> `RELEASE_SCOPE`). An explicit
//! property beats the environment, and empty values count as absent.

use crate::domain::{Hint, Scope};
use crate::error::{ReckonError, Result};
use std::collections::BTreeMap;

pub const SCOPE_PROPERTY: &str = "release.scope";
pub const STAGE_PROPERTY: &str = "release.stage";

/// Ordered property set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` assignments; later assignments replace earlier ones.
    ///
    /// # Errors
    /// `ReckonError::Config` for an item without `=` or with an empty key.
    pub fn parse_assignments<I, S>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut properties = Properties::new();

        for item in items {
            let item = item.as_ref();
            let (key, value) = item.split_once('=').ok_or_else(|| {
                ReckonError::config(format!("Expected key=value property, got '{}'", item))
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(ReckonError::config(format!(
                    "Property '{}' has an empty key",
                    item
                )));
            }
            properties.set(key, value.trim());
        }

        Ok(properties)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Non-empty explicit value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Explicit value, falling back to the environment equivalent via `env`
    pub fn lookup_with<F>(&self, key: &str, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.get(key).map(str::to_string).or_else(|| {
            env(&env_key(key))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
    }

    /// Build a hint from these properties and the process environment.
    ///
    /// # Errors
    /// `ReckonError::Config` when the scope value is not major, minor or patch.
    pub fn hint(&self) -> Result<Hint> {
        self.hint_with(|key| std::env::var(key).ok())
    }

    /// Build a hint using `env` for environment lookups.
    ///
    /// # Errors
    /// See [`Properties::hint`].
    pub fn hint_with<F>(&self, env: F) -> Result<Hint>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scope = self
            .lookup_with(SCOPE_PROPERTY, &env)
            .map(|value| value.parse::<Scope>())
            .transpose()?;
        let stage = self.lookup_with(STAGE_PROPERTY, &env);

        Ok(Hint::new(scope, stage))
    }
}

/// Environment variable name for a property key
pub fn env_key(property: &str) -> String {
    property.to_uppercase().replace(['.', '-'], "_")
}
