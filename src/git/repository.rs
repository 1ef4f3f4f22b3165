use crate::boundary::BoundaryWarning;
use crate::domain::{RepoState, Version};
use crate::error::Result;
use crate::git::{Inspection, RepoInspector, DETACHED_BRANCH};
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort, Status, StatusOptions};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const SHALLOW_REASON: &str = "repository is a shallow clone";

/// Wrapper around git2::Repository implementing [`RepoInspector`]
pub struct Git2Repository {
    repo: Git2Repo,
}

/// Closest tags reachable from HEAD
#[derive(Debug, Default)]
struct NearestTags {
    normal: Option<semver::Version>,
    significant: Option<(Oid, semver::Version)>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Version tags keyed by the commit they point at
    fn version_tags(
        &self,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<HashMap<Oid, Vec<semver::Version>>> {
        let mut tags: HashMap<Oid, Vec<semver::Version>> = HashMap::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let version = match Version::parse_tag(name) {
                Ok(version) => version,
                Err(e) => {
                    push_warning(
                        warnings,
                        BoundaryWarning::UnparsableTag {
                            tag: name.to_string(),
                            reason: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            let target = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .and_then(|reference| reference.peel_to_commit());

            match target {
                Ok(commit) => tags.entry(commit.id()).or_default().push(version),
                Err(e) => debug!(tag = name, error = %e, "tag does not point at a commit"),
            }
        }

        Ok(tags)
    }

    /// Walk back from HEAD until the nearest normal tag is found
    fn nearest_tags(
        &self,
        head: Oid,
        tags: &HashMap<Oid, Vec<semver::Version>>,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<NearestTags> {
        let mut nearest = NearestTags::default();
        if tags.is_empty() {
            return Ok(nearest);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;

        for oid_result in revwalk {
            let oid = match oid_result {
                Ok(oid) => oid,
                Err(e) => {
                    push_warning(warnings, truncated(&e));
                    break;
                }
            };

            let Some(versions) = tags.get(&oid) else {
                continue;
            };

            if nearest.significant.is_none() {
                nearest.significant = versions.iter().max().cloned().map(|v| (oid, v));
            }
            if nearest.normal.is_none() {
                nearest.normal = versions.iter().filter(|v| v.pre.is_empty()).max().cloned();
            }
            if nearest.normal.is_some() {
                break;
            }
        }

        Ok(nearest)
    }

    /// Subjects of commits reachable from HEAD but not from `tag`, newest first
    fn subjects_since(
        &self,
        head: Oid,
        tag: Option<Oid>,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<Vec<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head)?;
        if let Some(tag) = tag {
            revwalk.hide(tag)?;
        }

        let mut subjects = Vec::new();

        for oid_result in revwalk {
            let commit = match oid_result.and_then(|oid| self.repo.find_commit(oid)) {
                Ok(commit) => commit,
                Err(e) => {
                    push_warning(warnings, truncated(&e));
                    break;
                }
            };

            let subject = commit
                .message()
                .and_then(|message| message.lines().next())
                .unwrap_or_default()
                .trim()
                .to_string();
            subjects.push(subject);
        }

        Ok(subjects)
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        if self.repo.is_bare() {
            return Ok(false);
        }

        let mut options = StatusOptions::new();
        options
            .include_untracked(false)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses
            .iter()
            .any(|entry| entry.status() != Status::CURRENT))
    }

    fn unborn_branch_name(&self) -> String {
        self.repo
            .find_reference("HEAD")
            .ok()
            .and_then(|reference| {
                reference
                    .symbolic_target()
                    .map(|target| target.trim_start_matches("refs/heads/").to_string())
            })
            .unwrap_or_else(|| DETACHED_BRANCH.to_string())
    }
}

impl RepoInspector for Git2Repository {
    fn inspect(&self) -> Result<Inspection> {
        let mut warnings = Vec::new();

        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                push_warning(&mut warnings, BoundaryWarning::UnbornHead);
                let state = RepoState {
                    branch: self.unborn_branch_name(),
                    uncommitted_changes: self.has_uncommitted_changes()?,
                    ..RepoState::default()
                };
                return Ok(Inspection { state, warnings });
            }
            Err(e) => return Err(e.into()),
        };

        let head_oid = head.peel_to_commit()?.id();

        if self.repo.is_shallow() {
            push_warning(
                &mut warnings,
                BoundaryWarning::TruncatedHistory {
                    reason: SHALLOW_REASON.to_string(),
                },
            );
        }

        let branch = if self.repo.head_detached()? {
            push_warning(
                &mut warnings,
                BoundaryWarning::DetachedHead {
                    commit_hash: head_oid.to_string(),
                },
            );
            DETACHED_BRANCH.to_string()
        } else {
            head.shorthand().unwrap_or(DETACHED_BRANCH).to_string()
        };

        let tags = self.version_tags(&mut warnings)?;
        let nearest = self.nearest_tags(head_oid, &tags, &mut warnings)?;
        if nearest.significant.is_none() {
            push_warning(&mut warnings, BoundaryWarning::NoVersionTags);
        }

        let (tag_oid, latest_significant_tag) = match nearest.significant {
            Some((oid, version)) => (Some(oid), Some(version)),
            None => (None, None),
        };
        let subjects = self.subjects_since(head_oid, tag_oid, &mut warnings)?;

        let state = RepoState {
            latest_normal_tag: nearest.normal,
            latest_significant_tag,
            commits_since_tag: subjects.len() as u64,
            branch,
            uncommitted_changes: self.has_uncommitted_changes()?,
            subjects,
        };

        debug!(
            branch = %state.branch,
            commits = state.commits_since_tag,
            dirty = state.uncommitted_changes,
            "inspected repository"
        );
        Ok(Inspection { state, warnings })
    }
}

fn truncated(error: &git2::Error) -> BoundaryWarning {
    BoundaryWarning::TruncatedHistory {
        reason: error.message().to_string(),
    }
}

fn push_warning(warnings: &mut Vec<BoundaryWarning>, warning: BoundaryWarning) {
    if !warnings.contains(&warning) {
        // surfaced to the user by the caller
        debug!(%warning, "inspection degraded");
        warnings.push(warning);
    }
}
