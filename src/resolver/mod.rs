//! Build-identity resolution: repository state + hints -> version and stage

pub mod scope;
pub mod stage;

pub use scope::{analyze_subjects, infer_scope};
pub use stage::infer_stage;

use crate::domain::{Hint, RepoState, ResolvedVersion, Stage, StagePolicy, Version, FINAL_STAGE};
use crate::error::Result;
use tracing::debug;

/// Resolves versions under a fixed stage policy
#[derive(Debug, Clone, Default)]
pub struct VersionResolver {
    policy: StagePolicy,
}

impl VersionResolver {
    pub fn new(policy: StagePolicy) -> Self {
        VersionResolver { policy }
    }

    pub fn policy(&self) -> &StagePolicy {
        &self.policy
    }

    /// Resolve the build identity for a repository snapshot.
    ///
    /// Pure: identical inputs always give identical output.
    ///
    /// # Errors
    /// `ReckonError::Config` when `hint.stage` is not an allowed stage. Nothing
    /// else fails; missing tags and odd commit subjects fall back to defaults.
    pub fn resolve(&self, state: &RepoState, hint: &Hint) -> Result<ResolvedVersion> {
        let stage = infer_stage(state, hint, &self.policy)?;
        let scope = infer_scope(state, hint, self.policy.default_scope());

        let normal = state.latest_normal_tag.as_ref().map(Version::from);
        let significant = state.latest_significant_tag.as_ref().map(Version::from);
        let head_is_normal_tag = state.latest_significant_tag.is_none()
            || state.latest_significant_tag == state.latest_normal_tag;

        let base = match normal {
            // rebuilding an existing release reuses its number
            Some(tagged) if stage.is_final() && state.is_on_tag() && head_is_normal_tag => tagged,
            _ => {
                let bumped = normal.unwrap_or_default().bump(scope);
                // keep an in-flight pre-release line from moving backwards
                match significant {
                    Some(pending) if pending > bumped => pending,
                    _ => bumped,
                }
            }
        };

        let distance = Some(state.commits_since_tag).filter(|n| *n > 0 && !stage.is_final());

        let mut resolved = ResolvedVersion {
            base,
            stage,
            distance,
            dirty: state.uncommitted_changes,
            scope,
        };

        if let Some(pending) = state
            .latest_significant_tag
            .as_ref()
            .filter(|tag| !tag.pre.is_empty())
        {
            if !sorts_above(&resolved, pending) {
                resolved = self.continue_line(resolved, pending, hint.stage.is_some());
            }
        }

        debug!(version = %resolved, branch = %state.branch, "resolved build identity");
        Ok(resolved)
    }

    /// Move `resolved` above the pre-release tag `pending`.
    ///
    /// An inferred stage switches to the tag's own stage when allowed, or to
    /// the first allowed stage sorting after it. Otherwise the base is bumped
    /// past the tag.
    fn continue_line(
        &self,
        resolved: ResolvedVersion,
        pending: &semver::Version,
        explicit_stage: bool,
    ) -> ResolvedVersion {
        if !explicit_stage {
            let tag_stage = pending.pre.as_str().split('.').next().unwrap_or_default();
            let allowed = self.policy.allowed();
            let candidates = allowed
                .iter()
                .filter(|name| name.as_str() == tag_stage)
                .chain(allowed.iter().filter(|name| {
                    name.as_str() != FINAL_STAGE && name.as_str() > tag_stage
                }));

            for name in candidates {
                let candidate = ResolvedVersion {
                    stage: Stage::PreRelease(name.clone()),
                    ..resolved.clone()
                };
                if sorts_above(&candidate, pending) {
                    debug!(stage = %name, tag = %pending, "continuing pre-release line");
                    return candidate;
                }
            }
        }

        debug!(tag = %pending, "bumping past pre-release tag");
        ResolvedVersion {
            base: Version::from(pending).bump(resolved.scope),
            ..resolved
        }
    }
}

/// Whether `resolved` has SemVer precedence over `tag`
fn sorts_above(resolved: &ResolvedVersion, tag: &semver::Version) -> bool {
    semver::Version::parse(&resolved.to_string())
        .map(|version| version > *tag)
        .unwrap_or(false)
}

/// One-shot form of [`VersionResolver::resolve`].
///
/// # Errors
/// See [`VersionResolver::resolve`].
pub fn resolve(state: &RepoState, hint: &Hint, policy: &StagePolicy) -> Result<ResolvedVersion> {
    VersionResolver::new(policy.clone()).resolve(state, hint)
}
