//! Pure formatting functions for UI output.
//!
//! Everything here builds strings; printing happens in the parent module.

use crate::boundary::BoundaryWarning;
use crate::domain::{RepoState, ResolvedVersion};
use crate::publish::PublishPlan;
use console::style;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Multi-line summary of how a version was reached.
///
/// Shows the tag it was based on, up to 10 scanned commit subjects, and the
/// inferred scope and stage.
pub fn format_resolution(state: &RepoState, resolved: &ResolvedVersion) -> String {
    let mut out = String::new();

    let base_tag = state
        .latest_normal_tag
        .as_ref()
        .map(|tag| tag.to_string())
        .unwrap_or_else(|| "none".to_string());

    out.push_str(&format!(
        "{} {}\n",
        style("Branch:").bold(),
        state.branch
    ));
    out.push_str(&format!("{} {}\n", style("Last release:").bold(), base_tag));
    out.push_str(&format!(
        "{} {}\n",
        style("Commits since tag:").bold(),
        state.commits_since_tag
    ));

    for (i, subject) in state.subjects.iter().take(10).enumerate() {
        let short: String = subject.chars().take(60).collect();
        out.push_str(&format!("  {}. {}\n", i + 1, short));
    }
    if state.subjects.len() > 10 {
        out.push_str(&format!(
            "  ... and {} more commits\n",
            state.subjects.len() - 10
        ));
    }

    out.push_str(&format!("{} {}\n", style("Scope:").bold(), resolved.scope));
    out.push_str(&format!("{} {}\n", style("Stage:").bold(), resolved.stage));
    if resolved.dirty {
        out.push_str(&format!(
            "{}\n",
            style("Working tree has uncommitted changes").yellow()
        ));
    }
    out.push_str(&format!(
        "{} {}",
        style("Version:").bold(),
        style(resolved.to_string()).green()
    ));

    out
}

pub fn format_plan(plan: &PublishPlan) -> String {
    let signing = match (plan.signing.required, plan.signing.key_available) {
        (true, true) => "required",
        (true, false) => "required (no key provided)",
        (false, _) => "not required",
    };

    format!(
        "{} {}\n{} {}\n{} {} ({})\n{} {}\n{} {}",
        style("Version:").bold(),
        style(&plan.version).green(),
        style("Stage:").bold(),
        plan.stage,
        style("Repository:").bold(),
        plan.target.name,
        plan.target.url,
        style("Signing:").bold(),
        signing,
        style("Credentials:").bold(),
        if plan.credentials_configured {
            "configured"
        } else {
            "missing"
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Scope, Stage, Version};
    use crate::publish::{PublishTarget, SigningDecision};

    fn plain(s: String) -> String {
        console::strip_ansi_codes(&s).to_string()
    }

    #[test]
    fn test_format_resolution() {
        let state = RepoState {
            latest_normal_tag: Some(semver::Version::new(1, 4, 0)),
            latest_significant_tag: Some(semver::Version::new(1, 4, 0)),
            commits_since_tag: 2,
            branch: "main".to_string(),
            uncommitted_changes: false,
            subjects: vec!["feat: b".to_string(), "fix: a".to_string()],
        };
        let resolved = ResolvedVersion {
            base: Version::new(1, 5, 0),
            stage: Stage::PreRelease("beta".to_string()),
            distance: Some(2),
            dirty: false,
            scope: Scope::Minor,
        };

        let text = plain(format_resolution(&state, &resolved));
        assert!(text.contains("Last release: 1.4.0"));
        assert!(text.contains("  1. feat: b"));
        assert!(text.contains("Scope: minor"));
        assert!(text.ends_with("Version: 1.5.0-beta.2"));
    }

    #[test]
    fn test_format_resolution_truncates_commit_list() {
        let state = RepoState {
            commits_since_tag: 12,
            subjects: (0..12).map(|i| format!("fix: {}", i)).collect(),
            ..RepoState::default()
        };
        let resolved = ResolvedVersion {
            base: Version::new(0, 0, 1),
            stage: Stage::PreRelease("beta".to_string()),
            distance: Some(12),
            dirty: true,
            scope: Scope::Patch,
        };

        let text = plain(format_resolution(&state, &resolved));
        assert!(text.contains("Last release: none"));
        assert!(text.contains("... and 2 more commits"));
        assert!(text.contains("uncommitted changes"));
    }

    #[test]
    fn test_format_plan() {
        let plan = PublishPlan {
            version: "2.0.0".to_string(),
            stage: "final".to_string(),
            target: PublishTarget {
                name: "CentralReleases".to_string(),
                url: "https://example.com/releases".to_string(),
            },
            signing: SigningDecision {
                required: true,
                key_available: false,
            },
            credentials_configured: false,
            ci: true,
        };

        let text = plain(format_plan(&plan));
        assert!(text.contains("Repository: CentralReleases (https://example.com/releases)"));
        assert!(text.contains("Signing: required (no key provided)"));
        assert!(text.contains("Credentials: missing"));
    }

    #[test]
    fn test_format_warning() {
        let text = plain(format_boundary_warning(&BoundaryWarning::UnbornHead));
        assert!(text.starts_with("⚠ WARNING:"));
    }
}
