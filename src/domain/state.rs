use crate::domain::Scope;

/// Snapshot of the repository facts version resolution depends on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RepoState {
    /// Most recent reachable tag without pre-release identifiers
    pub latest_normal_tag: Option<semver::Version>,
    /// Most recent reachable tag of any kind, pre-releases included
    pub latest_significant_tag: Option<semver::Version>,
    /// Commits between the latest significant tag and HEAD
    pub commits_since_tag: u64,
    /// Current branch, `"HEAD"` when detached
    pub branch: String,
    /// Tracked files differ from HEAD
    pub uncommitted_changes: bool,
    /// Subject lines of the commits since the tag, newest first
    pub subjects: Vec<String>,
}

impl RepoState {
    /// Clean tree sitting exactly on a tag (or on no commits at all)
    pub fn is_on_tag(&self) -> bool {
        self.commits_since_tag == 0 && !self.uncommitted_changes
    }
}

/// Caller-supplied overrides, typically from `release.scope` / `release.stage`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Hint {
    pub scope: Option<Scope>,
    pub stage: Option<String>,
}

impl Hint {
    pub fn new(scope: Option<Scope>, stage: Option<String>) -> Self {
        Hint {
            scope,
            stage: stage.filter(|s| !s.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_on_tag() {
        let state = RepoState::default();
        assert!(state.is_on_tag());
        assert!(state.latest_normal_tag.is_none());
    }

    #[test]
    fn test_dirty_state_not_on_tag() {
        let state = RepoState {
            uncommitted_changes: true,
            ..RepoState::default()
        };
        assert!(!state.is_on_tag());
    }

    #[test]
    fn test_hint_blank_stage_is_absent() {
        assert_eq!(Hint::new(None, Some("  ".to_string())).stage, None);
        assert_eq!(
            Hint::new(Some(Scope::Minor), Some("rc".to_string())),
            Hint {
                scope: Some(Scope::Minor),
                stage: Some("rc".to_string())
            }
        );
    }
}
