use crate::config::PublishingConfig;
use crate::domain::ResolvedVersion;
use crate::error::{ReckonError, Result};
use crate::properties::Properties;
use serde::Serialize;
use tracing::debug;

pub const RELEASES_REPOSITORY: &str = "CentralReleases";
pub const SNAPSHOTS_REPOSITORY: &str = "CentralSnapshots";

/// Repository an artifact is published to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishTarget {
    pub name: String,
    pub url: String,
}

/// Whether signing is required and whether key material was supplied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningDecision {
    pub required: bool,
    pub key_available: bool,
}

/// Everything a publishing step needs to know about a resolved version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPlan {
    pub version: String,
    pub stage: String,
    pub target: PublishTarget,
    pub signing: SigningDecision,
    pub credentials_configured: bool,
    pub ci: bool,
}

impl PublishPlan {
    /// Plan publication using the process environment.
    pub fn from_env(
        resolved: &ResolvedVersion,
        config: &PublishingConfig,
        properties: &Properties,
    ) -> Self {
        Self::new(resolved, config, properties, |key| std::env::var(key).ok())
    }

    /// Plan publication; `env` looks up environment variables.
    ///
    /// Final versions go to the release repository, everything else to
    /// snapshots. Signing is required only for final versions built in CI.
    pub fn new<F>(
        resolved: &ResolvedVersion,
        config: &PublishingConfig,
        properties: &Properties,
        env: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ci = is_ci(env(&config.ci_env).as_deref());

        let target = if resolved.is_final() {
            PublishTarget {
                name: RELEASES_REPOSITORY.to_string(),
                url: config.releases_url.clone(),
            }
        } else {
            PublishTarget {
                name: SNAPSHOTS_REPOSITORY.to_string(),
                url: config.snapshots_url.clone(),
            }
        };

        let key_available = properties
            .lookup_with(&config.signing_key_property, &env)
            .is_some()
            && properties
                .lookup_with(&config.signing_passphrase_property, &env)
                .is_some();

        let credentials_configured = [&config.username_env, &config.password_env]
            .iter()
            .all(|key| env(key).is_some_and(|value| !value.is_empty()));

        let plan = PublishPlan {
            version: resolved.to_string(),
            stage: resolved.stage.to_string(),
            target,
            signing: SigningDecision {
                required: resolved.is_final() && ci,
                key_available,
            },
            credentials_configured,
            ci,
        };

        debug!(
            version = %plan.version,
            target = %plan.target.name,
            signing = plan.signing.required,
            "planned publication"
        );
        plan
    }

    /// Check that a required signature can actually be produced.
    ///
    /// # Errors
    /// `ReckonError::Config` when signing is required but no key was supplied.
    pub fn validate(&self) -> Result<()> {
        if self.signing.required && !self.signing.key_available {
            return Err(ReckonError::config(format!(
                "Signing is required for {} but no signing key and passphrase were provided",
                self.version
            )));
        }
        Ok(())
    }
}

/// Interpret the CI flag value
pub fn is_ci(value: Option<&str>) -> bool {
    value
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1"))
        .unwrap_or(false)
}
