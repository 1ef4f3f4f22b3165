use crate::boundary::BoundaryWarning;
use crate::domain::{RepoState, Version};
use crate::error::Result;
use crate::git::{Inspection, RepoInspector};

/// Mock repository returning a fixed snapshot, for testing without git
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    state: RepoState,
    warnings: Vec<BoundaryWarning>,
}

impl MockRepository {
    /// Create a new empty mock repository on branch `main`
    pub fn new() -> Self {
        MockRepository {
            state: RepoState {
                branch: "main".to_string(),
                ..RepoState::default()
            },
            warnings: Vec::new(),
        }
    }

    /// Set both the normal and the significant tag; unparsable names clear them
    pub fn with_tag(mut self, tag: &str) -> Self {
        let version = Version::parse_tag(tag).ok();
        self.state.latest_normal_tag = version.clone();
        self.state.latest_significant_tag = version;
        self
    }

    /// Set a pre-release tag as the nearest significant tag
    pub fn with_prerelease_tag(mut self, tag: &str) -> Self {
        self.state.latest_significant_tag = Version::parse_tag(tag).ok();
        self
    }

    /// Add a commit on top of the current history
    pub fn add_commit(mut self, subject: impl Into<String>) -> Self {
        self.state.subjects.insert(0, subject.into());
        self.state.commits_since_tag += 1;
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.state.branch = branch.into();
        self
    }

    pub fn dirty(mut self) -> Self {
        self.state.uncommitted_changes = true;
        self
    }

    pub fn with_warning(mut self, warning: BoundaryWarning) -> Self {
        self.warnings.push(warning);
        self
    }
}

impl RepoInspector for MockRepository {
    fn inspect(&self) -> Result<Inspection> {
        Ok(Inspection {
            state: self.state.clone(),
            warnings: self.warnings.clone(),
        })
    }
}
