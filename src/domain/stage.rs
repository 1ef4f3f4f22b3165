//! Release stages and the configured policy that bounds them
//!
//! A stage is either a named pre-release channel (`beta`, `rc`, ...) that ends
//! up as the first pre-release identifier of the version, or `final`, which
//! means no pre-release suffix at all.

use crate::domain::Scope;
use crate::error::{ReckonError, Result};
use std::fmt;

/// Name of the terminal stage
pub const FINAL_STAGE: &str = "final";

/// A resolved release stage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Named pre-release channel
    PreRelease(String),
    /// Terminal stage, rendered without a suffix
    Final,
}

impl Stage {
    pub fn is_final(&self) -> bool {
        matches!(self, Stage::Final)
    }

    /// The pre-release channel name, `None` for the final stage
    pub fn name(&self) -> Option<&str> {
        match self {
            Stage::PreRelease(name) => Some(name),
            Stage::Final => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PreRelease(name) => write!(f, "{}", name),
            Stage::Final => write!(f, "{}", FINAL_STAGE),
        }
    }
}

/// Ordered set of allowed stages plus the fallback scope.
///
/// The first non-final entry is the "least final" stage: dirty trees and
/// snapshot builds always land there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StagePolicy {
    allowed: Vec<String>,
    default_scope: Scope,
}

impl StagePolicy {
    /// Build a policy from the configured stage names.
    ///
    /// # Errors
    /// `ReckonError::Config` when a name is not a valid pre-release identifier
    /// (alphanumerics and `-` only, not purely numeric), is duplicated, or when no non-final stage
    /// is configured.
    pub fn new<I, S>(allowed: I, default_scope: Scope) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();

        for stage in allowed {
            let name = stage.into().trim().to_lowercase();
            // numeric identifiers would compare as numbers and may not carry leading zeros
            if name.is_empty()
                || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                || name.chars().all(|c| c.is_ascii_digit())
            {
                return Err(ReckonError::config(format!(
                    "Invalid stage name: '{}'",
                    name
                )));
            }
            if names.contains(&name) {
                return Err(ReckonError::config(format!(
                    "Stage '{}' is listed more than once",
                    name
                )));
            }
            names.push(name);
        }

        if !names.iter().any(|name| name != FINAL_STAGE) {
            return Err(ReckonError::config(
                "At least one non-final stage must be allowed",
            ));
        }

        Ok(StagePolicy {
            allowed: names,
            default_scope,
        })
    }

    /// Configured stage names, in configuration order
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Scope used when there are no commits to scan
    pub fn default_scope(&self) -> Scope {
        self.default_scope
    }

    /// The stage used for dirty and snapshot builds
    pub fn least_final(&self) -> Stage {
        self.allowed
            .iter()
            .find(|name| name.as_str() != FINAL_STAGE)
            .map(|name| Stage::PreRelease(name.clone()))
            // new() guarantees a non-final entry; final is unreachable in practice
            .unwrap_or(Stage::Final)
    }

    /// Validate an explicit stage request against the allowed list.
    ///
    /// # Errors
    /// `ReckonError::Config` when the stage is not allowed.
    pub fn stage(&self, requested: &str) -> Result<Stage> {
        let name = requested.trim().to_lowercase();
        if !self.allowed.contains(&name) {
            return Err(ReckonError::config(format!(
                "Stage '{}' is not one of the allowed stages [{}]",
                requested,
                self.allowed.join(", ")
            )));
        }

        if name == FINAL_STAGE {
            Ok(Stage::Final)
        } else {
            Ok(Stage::PreRelease(name))
        }
    }
}

impl Default for StagePolicy {
    fn default() -> Self {
        StagePolicy {
            allowed: vec!["beta".to_string(), FINAL_STAGE.to_string()],
            default_scope: Scope::Patch,
        }
    }
}
