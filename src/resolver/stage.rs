use crate::domain::{Hint, RepoState, Stage, StagePolicy};
use crate::error::Result;
use tracing::{debug, warn};

/// Decide the release stage.
///
/// Precedence: explicit hint, then dirty tree, then commits since tag, then
/// final. A dirty tree never resolves to final, even when final was requested.
///
/// # Errors
/// `ReckonError::Config` when the hinted stage is not allowed by `policy`.
pub fn infer_stage(state: &RepoState, hint: &Hint, policy: &StagePolicy) -> Result<Stage> {
    if let Some(requested) = hint.stage.as_deref() {
        let stage = policy.stage(requested)?;

        if stage.is_final() && state.uncommitted_changes {
            let fallback = policy.least_final();
            warn!(
                stage = %fallback,
                "final stage requested with uncommitted changes; building a pre-release instead"
            );
            return Ok(fallback);
        }

        debug!(%stage, "stage taken from explicit hint");
        return Ok(stage);
    }

    let stage = if state.uncommitted_changes || state.commits_since_tag > 0 {
        policy.least_final()
    } else {
        Stage::Final
    };

    debug!(
        %stage,
        dirty = state.uncommitted_changes,
        commits = state.commits_since_tag,
        "stage inferred from repository state"
    );
    Ok(stage)
}
