//! Repository inspection abstraction layer
//!
//! Version resolution never talks to git directly. It consumes a
//! [`RepoState`] snapshot produced by a [`RepoInspector`]:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: a fixed snapshot for testing
//!
//! ```rust
//! # use git_reckon::git::{Inspection, RepoInspector};
//! # fn example<R: RepoInspector>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let Inspection { state, warnings } = repo.inspect()?;
//! println!("{} commits since tag, {} warnings", state.commits_since_tag, warnings.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::boundary::BoundaryWarning;
use crate::domain::RepoState;
use crate::error::Result;

/// Branch name reported when HEAD is detached
pub const DETACHED_BRANCH: &str = "HEAD";

/// Result of inspecting a repository
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Inspection {
    pub state: RepoState,
    /// Degradations that were absorbed into defaults
    pub warnings: Vec<BoundaryWarning>,
}

/// Source of repository snapshots.
///
/// Implementations map low-level failures to [crate::error::ReckonError::Git]
/// and absorb irregular history (no tags, detached or unborn HEAD, shallow
/// clones) into the snapshot plus [`BoundaryWarning`]s instead of failing.
pub trait RepoInspector {
    /// Collect the current repository state.
    ///
    /// # Errors
    /// Only when the repository itself cannot be read.
    fn inspect(&self) -> Result<Inspection>;
}
