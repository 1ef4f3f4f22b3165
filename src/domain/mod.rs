//! Domain logic - pure value types independent of git operations

pub mod commit;
pub mod resolved;
pub mod stage;
pub mod state;
pub mod version;

pub use commit::ParsedCommit;
pub use resolved::{ResolvedVersion, ResolvedVersionReport};
pub use stage::{Stage, StagePolicy, FINAL_STAGE};
pub use state::{Hint, RepoState};
pub use version::{Scope, Version};
