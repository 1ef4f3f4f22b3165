//! Command workflows behind the `git-reckon` binary
//!
//! Kept separate from argument parsing so the workflows can be driven
//! programmatically (and tested) without clap.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{load_project_config, Config};
use crate::conventions::{bundle_for, BuildDescriptor};
use crate::domain::ResolvedVersion;
use crate::git::{Git2Repository, Inspection, RepoInspector};
use crate::properties::{Properties, SCOPE_PROPERTY, STAGE_PROPERTY};
use crate::publish::PublishPlan;
use crate::resolver::VersionResolver;

/// Inputs shared by `resolve` and `plan`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolveArgs {
    /// Directory inside the repository to inspect
    pub path: PathBuf,
    /// Path to custom config file
    pub config_path: Option<String>,
    /// Raw `key=value` properties
    pub properties: Vec<String>,
    /// Shorthand for `release.scope`
    pub scope: Option<String>,
    /// Shorthand for `release.stage`
    pub stage: Option<String>,
}

impl ResolveArgs {
    /// Property set with the shorthand flags applied on top
    pub fn properties(&self) -> crate::Result<Properties> {
        let mut properties = Properties::parse_assignments(&self.properties)?;
        if let Some(scope) = &self.scope {
            properties.set(SCOPE_PROPERTY, scope.as_str());
        }
        if let Some(stage) = &self.stage {
            properties.set(STAGE_PROPERTY, stage.as_str());
        }
        Ok(properties)
    }
}

/// Outcome of a resolution run
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub inspection: Inspection,
    pub resolved: ResolvedVersion,
    pub properties: Properties,
    pub config: Config,
}

/// Resolve against any inspector with already-loaded configuration
pub fn resolve_with<R: RepoInspector>(
    repo: &R,
    config: &Config,
    properties: &Properties,
) -> Result<(Inspection, ResolvedVersion)> {
    let resolver = VersionResolver::new(config.stages.policy()?);
    let hint = properties.hint()?;
    let inspection = repo.inspect()?;
    let resolved = resolver.resolve(&inspection.state, &hint)?;
    Ok((inspection, resolved))
}

/// Load configuration, open the repository and resolve its version
pub fn run_resolve(args: &ResolveArgs) -> Result<Resolution> {
    let config = load_project_config(args.config_path.as_deref(), Some(&args.path))
        .context("loading configuration")?;
    let properties = args.properties()?;
    let repo = Git2Repository::open(&args.path)
        .with_context(|| format!("opening repository at {}", args.path.display()))?;

    let (inspection, resolved) = resolve_with(&repo, &config, &properties)?;

    Ok(Resolution {
        inspection,
        resolved,
        properties,
        config,
    })
}

/// Resolve and decide where and how the result would be published
pub fn run_plan(args: &ResolveArgs) -> Result<(Resolution, PublishPlan)> {
    let resolution = run_resolve(args)?;
    let plan = PublishPlan::from_env(
        &resolution.resolved,
        &resolution.config.publishing,
        &resolution.properties,
    );
    Ok((resolution, plan))
}

/// Merge the named convention bundles into a fresh descriptor
pub fn build_descriptor(
    bundle_ids: &[String],
    config: &Config,
    project_name: &str,
    write_locks: bool,
) -> Result<BuildDescriptor> {
    let mut descriptor = BuildDescriptor::new(project_name);
    descriptor.group = config.project.group.clone();

    for id in bundle_ids {
        let bundle = bundle_for(id, config, project_name, write_locks)?;
        descriptor.apply(bundle.as_ref());
    }

    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    #[test]
    fn test_shorthand_flags_override_properties() {
        let args = ResolveArgs {
            properties: vec!["release.stage=beta".to_string()],
            stage: Some("final".to_string()),
            ..ResolveArgs::default()
        };
        let properties = args.properties().unwrap();
        assert_eq!(properties.get(STAGE_PROPERTY), Some("final"));
    }

    #[test]
    fn test_resolve_with_mock() {
        let repo = MockRepository::new()
            .with_tag("v1.4.0")
            .add_commit("fix: a")
            .add_commit("feat: b");
        let properties = Properties::parse_assignments(["release.scope=minor"]).unwrap();

        let (inspection, resolved) =
            resolve_with(&repo, &Config::default(), &properties).unwrap();
        assert_eq!(inspection.state.commits_since_tag, 2);
        assert_eq!(resolved.to_string(), "1.5.0-beta.2");
    }

    #[test]
    fn test_resolve_with_bad_stage() {
        let repo = MockRepository::new();
        let properties = Properties::parse_assignments(["release.stage=rc"]).unwrap();
        let err = resolve_with(&repo, &Config::default(), &properties).unwrap_err();
        assert!(err.to_string().contains("rc"));
    }

    #[test]
    fn test_build_descriptor() {
        let mut config = Config::default();
        config.project.group = Some("org.example".to_string());

        let descriptor =
            build_descriptor(&["java-library".to_string()], &config, "widgets", true).unwrap();
        assert_eq!(descriptor.group.as_deref(), Some("org.example"));
        assert!(descriptor.tasks.iter().any(|task| task.write_locks));
    }

    #[test]
    fn test_build_descriptor_unknown_bundle() {
        assert!(build_descriptor(&["nope".to_string()], &Config::default(), "w", false).is_err());
    }
}
