use std::fmt;

/// Irregularities found while inspecting a repository.
/// These never stop resolution; they are reported so the user knows which defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// HEAD is not on a branch
    DetachedHead { commit_hash: String },
    /// Repository has no commits yet
    UnbornHead,
    /// History walk stopped early, typically a shallow clone
    TruncatedHistory { reason: String },
    /// No version tag is reachable from HEAD
    NoVersionTags,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Ignoring tag '{}': {}", tag, reason)
            }
            BoundaryWarning::DetachedHead { commit_hash } => {
                let short_hash = commit_hash.get(..7).unwrap_or(commit_hash);
                write!(f, "HEAD is detached at {}", short_hash)
            }
            BoundaryWarning::UnbornHead => {
                write!(f, "Repository has no commits yet")
            }
            BoundaryWarning::TruncatedHistory { reason } => {
                write!(
                    f,
                    "History is incomplete, counting only reachable commits: {}",
                    reason
                )
            }
            BoundaryWarning::NoVersionTags => {
                write!(f, "No version tags reachable from HEAD, starting from 0.0.0")
            }
        }
    }
}
