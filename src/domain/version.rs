use crate::error::{ReckonError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normal (major.minor.patch) version, the base of every resolved version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a SemVer tag name (e.g., "v1.2.3", "1.3.0-rc.1") into a full semver version.
    ///
    /// A leading `v` or `V` is stripped. Build metadata and pre-release
    /// identifiers are kept so callers can tell normal tags from significant ones.
    pub fn parse_tag(tag: &str) -> Result<semver::Version> {
        let clean_tag = tag
            .strip_prefix('v')
            .or_else(|| tag.strip_prefix('V'))
            .unwrap_or(tag);

        semver::Version::parse(clean_tag)
            .map_err(|e| ReckonError::version(format!("Invalid version tag '{}': {}", tag, e)))
    }

    /// Bump version according to scope
    pub fn bump(&self, scope: Scope) -> Self {
        match scope {
            Scope::Major => Version::new(self.major.saturating_add(1), 0, 0),
            Scope::Minor => Version::new(self.major, self.minor.saturating_add(1), 0),
            Scope::Patch => Version::new(self.major, self.minor, self.patch.saturating_add(1)),
        }
    }
}

impl From<&semver::Version> for Version {
    fn from(v: &semver::Version) -> Self {
        Version::new(v.major, v.minor, v.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Semantic-versioning component to increment.
///
/// Ordered by severity so the maximum across a commit range is the bump to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Patch,
    Minor,
    Major,
}

impl FromStr for Scope {
    type Err = ReckonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(Scope::Major),
            "minor" => Ok(Scope::Minor),
            "patch" => Ok(Scope::Patch),
            other => Err(ReckonError::config(format!(
                "Invalid scope '{}': expected one of major, minor, patch",
                other
            ))),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Major => write!(f, "major"),
            Scope::Minor => write!(f, "minor"),
            Scope::Patch => write!(f, "patch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let v = Version::parse_tag("v1.2.3").unwrap();
        assert_eq!(Version::from(&v), Version::new(1, 2, 3));
        assert!(v.pre.is_empty());
    }

    #[test]
    fn test_parse_tag_uppercase_and_bare() {
        assert_eq!(
            Version::from(&Version::parse_tag("V0.4.0").unwrap()),
            Version::new(0, 4, 0)
        );
        assert_eq!(
            Version::from(&Version::parse_tag("10.0.1").unwrap()),
            Version::new(10, 0, 1)
        );
    }

    #[test]
    fn test_parse_tag_prerelease() {
        let v = Version::parse_tag("v2.0.0-rc.1").unwrap();
        assert_eq!(v.pre.as_str(), "rc.1");
        assert_eq!(Version::from(&v), Version::new(2, 0, 0));
    }

    #[test]
    fn test_parse_tag_invalid() {
        assert!(Version::parse_tag("1.2").is_err());
        assert!(Version::parse_tag("release-1").is_err());
        assert!(Version::parse_tag("").is_err());
    }

    #[test]
    fn test_bump_major() {
        assert_eq!(
            Version::new(1, 2, 3).bump(Scope::Major),
            Version::new(2, 0, 0)
        );
    }

    #[test]
    fn test_bump_minor() {
        assert_eq!(
            Version::new(1, 2, 3).bump(Scope::Minor),
            Version::new(1, 3, 0)
        );
    }

    #[test]
    fn test_bump_patch() {
        assert_eq!(
            Version::new(1, 2, 3).bump(Scope::Patch),
            Version::new(1, 2, 4)
        );
    }

    #[test]
    fn test_bump_always_increases() {
        let v = Version::new(3, 9, 9);
        for scope in [Scope::Patch, Scope::Minor, Scope::Major] {
            assert!(v.bump(scope) > v);
        }
    }

    #[test]
    fn test_scope_ordering() {
        assert!(Scope::Major > Scope::Minor);
        assert!(Scope::Minor > Scope::Patch);
        assert_eq!(
            [Scope::Patch, Scope::Major, Scope::Minor].iter().max(),
            Some(&Scope::Major)
        );
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!("MAJOR".parse::<Scope>().unwrap(), Scope::Major);
        assert_eq!(" minor ".parse::<Scope>().unwrap(), Scope::Minor);
        assert_eq!("patch".parse::<Scope>().unwrap(), Scope::Patch);
        let err = "huge".parse::<Scope>().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(Version::default().to_string(), "0.0.0");
    }
}
