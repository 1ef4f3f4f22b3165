use crate::domain::Scope;
use regex::Regex;
use std::sync::LazyLock;

static BREAKING_SUBJECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\w+(\(.+\))?!:").ok());

static FEATURE_SUBJECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^feat(\(.+\))?:").ok());

const BREAKING_MARKER: &str = "BREAKING CHANGE";

/// Severity signalled by a single commit subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub subject: String,
    pub scope: Scope,
}

impl ParsedCommit {
    /// Classify a commit subject line by its conventional-commit markers.
    ///
    /// - `type!:` / `type(scope)!:` or any `BREAKING CHANGE` text -> major
    /// - `feat:` / `feat(scope):` -> minor
    /// - anything else, including non-conventional text -> patch
    pub fn parse(subject: &str) -> Self {
        ParsedCommit {
            subject: subject.to_string(),
            scope: classify(subject),
        }
    }

    pub fn is_breaking_change(&self) -> bool {
        self.scope == Scope::Major
    }
}

fn classify(subject: &str) -> Scope {
    if subject.contains(BREAKING_MARKER) || is_match(&BREAKING_SUBJECT, subject) {
        Scope::Major
    } else if is_match(&FEATURE_SUBJECT, subject) {
        Scope::Minor
    } else {
        Scope::Patch
    }
}

fn is_match(re: &Option<Regex>, subject: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(subject))
}
