use crate::domain::{Scope, Stage, Version};
use serde::Serialize;
use std::fmt;

/// Marker appended to versions built from a dirty working tree
pub const UNCOMMITTED_MARKER: &str = "uncommitted";

/// The build identity handed to packaging and publishing steps
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedVersion {
    pub base: Version,
    pub stage: Stage,
    /// Commits since tag, only carried for non-final stages and never zero
    pub distance: Option<u64>,
    pub dirty: bool,
    /// Scope that was applied to reach `base`
    pub scope: Scope,
}

impl ResolvedVersion {
    pub fn is_final(&self) -> bool {
        self.stage.is_final()
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if let Stage::PreRelease(name) = &self.stage {
            write!(f, "-{}", name)?;
            if let Some(distance) = self.distance {
                write!(f, ".{}", distance)?;
            }
            if self.dirty {
                write!(f, ".{}", UNCOMMITTED_MARKER)?;
            }
        }
        Ok(())
    }
}

/// Serializable view for `--json` output
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedVersionReport {
    pub version: String,
    pub base: String,
    pub stage: String,
    pub scope: String,
    pub distance: Option<u64>,
    pub dirty: bool,
}

impl From<&ResolvedVersion> for ResolvedVersionReport {
    fn from(resolved: &ResolvedVersion) -> Self {
        ResolvedVersionReport {
            version: resolved.to_string(),
            base: resolved.base.to_string(),
            stage: resolved.stage.to_string(),
            scope: resolved.scope.to_string(),
            distance: resolved.distance,
            dirty: resolved.dirty,
        }
    }
}
