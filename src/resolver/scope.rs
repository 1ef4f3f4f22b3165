use crate::domain::{Hint, ParsedCommit, RepoState, Scope};
use tracing::debug;

/// Decide which version component to bump.
///
/// An explicit hint wins. Otherwise subjects are scanned newest to oldest and
/// the most severe marker found is used; a breaking change stops the scan.
/// With nothing to scan, `default_scope` applies.
pub fn infer_scope(state: &RepoState, hint: &Hint, default_scope: Scope) -> Scope {
    if let Some(scope) = hint.scope {
        debug!(%scope, "scope taken from explicit hint");
        return scope;
    }

    if state.subjects.is_empty() {
        debug!(scope = %default_scope, "no commits to scan, using default scope");
        return default_scope;
    }

    let scope = analyze_subjects(&state.subjects);
    debug!(%scope, scanned = state.subjects.len(), "scope inferred from commit subjects");
    scope
}

/// Maximum severity across the given subjects
pub fn analyze_subjects(subjects: &[String]) -> Scope {
    let mut scope = Scope::Patch;

    for subject in subjects {
        let parsed = ParsedCommit::parse(subject);

        if parsed.is_breaking_change() {
            return Scope::Major;
        }

        scope = scope.max(parsed.scope);
    }

    scope
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(subjects: &[&str]) -> RepoState {
        RepoState {
            commits_since_tag: subjects.len() as u64,
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            ..RepoState::default()
        }
    }

    #[test]
    fn test_hint_wins() {
        let state = state_with(&["feat!: everything changed"]);
        let hint = Hint::new(Some(Scope::Patch), None);
        assert_eq!(infer_scope(&state, &hint, Scope::Patch), Scope::Patch);
    }

    #[test]
    fn test_empty_uses_default() {
        let state = state_with(&[]);
        assert_eq!(
            infer_scope(&state, &Hint::default(), Scope::Minor),
            Scope::Minor
        );
        assert_eq!(
            infer_scope(&state, &Hint::default(), Scope::Patch),
            Scope::Patch
        );
    }

    #[test]
    fn test_default_ignored_when_commits_present() {
        let state = state_with(&["chore: tidy"]);
        assert_eq!(
            infer_scope(&state, &Hint::default(), Scope::Minor),
            Scope::Patch
        );
    }

    #[test]
    fn test_analyze_major() {
        let subjects = vec![
            "feat: new feature".to_string(),
            "fix(api)!: breaking change".to_string(),
        ];
        assert_eq!(analyze_subjects(&subjects), Scope::Major);
    }

    #[test]
    fn test_analyze_minor() {
        let subjects = vec!["fix: bug fix".to_string(), "feat: new feature".to_string()];
        assert_eq!(analyze_subjects(&subjects), Scope::Minor);
    }

    #[test]
    fn test_analyze_patch() {
        let subjects = vec![
            "fix: bug fix".to_string(),
            "refactor: code cleanup".to_string(),
        ];
        assert_eq!(analyze_subjects(&subjects), Scope::Patch);
    }

    #[test]
    fn test_analyze_breaking_text_any_position() {
        let subjects = vec![
            "feat: one".to_string(),
            "docs: two".to_string(),
            "chore: drop old api, BREAKING CHANGE".to_string(),
        ];
        assert_eq!(analyze_subjects(&subjects), Scope::Major);

        let reversed: Vec<String> = subjects.into_iter().rev().collect();
        assert_eq!(analyze_subjects(&reversed), Scope::Major);
    }

    #[test]
    fn test_analyze_non_conventional_commits() {
        let subjects = vec![
            "Updated stuff".to_string(),
            "Fixed things".to_string(),
            "".to_string(),
        ];
        assert_eq!(analyze_subjects(&subjects), Scope::Patch);
    }

    #[test]
    fn test_analyze_real_release_cycle() {
        let subjects = vec![
            "docs: update api docs".to_string(),
            "fix(ui): modal alignment".to_string(),
            "feat(auth): add role-based access".to_string(),
            "feat(api): add user list endpoint".to_string(),
        ];
        assert_eq!(analyze_subjects(&subjects), Scope::Minor);
    }
}
