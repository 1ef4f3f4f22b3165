use crate::domain::{Scope, StagePolicy, FINAL_STAGE};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "reckon.toml";

/// Represents the complete configuration for git-reckon.
///
/// Contains the stage policy, publishing conventions, Maven Central metadata
/// and project defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub stages: StagesConfig,

    #[serde(default)]
    pub publishing: PublishingConfig,

    #[serde(default)]
    pub maven_central: MavenCentralSettings,

    #[serde(default)]
    pub project: ProjectConfig,
}

fn default_allowed_stages() -> Vec<String> {
    vec!["beta".to_string(), FINAL_STAGE.to_string()]
}

fn default_scope() -> Scope {
    Scope::Patch
}

/// Allowed stages and the scope used when no commits are scanned.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StagesConfig {
    #[serde(default = "default_allowed_stages")]
    pub allowed: Vec<String>,

    #[serde(default = "default_scope")]
    pub default_scope: Scope,
}

impl StagesConfig {
    /// Validated stage policy
    ///
    /// # Errors
    /// `ReckonError::Config` when the stage list is unusable.
    pub fn policy(&self) -> Result<StagePolicy> {
        StagePolicy::new(self.allowed.iter().cloned(), self.default_scope)
    }
}

impl Default for StagesConfig {
    fn default() -> Self {
        StagesConfig {
            allowed: default_allowed_stages(),
            default_scope: default_scope(),
        }
    }
}

fn default_ci_env() -> String {
    "CI".to_string()
}

fn default_releases_url() -> String {
    "https://oss.sonatype.org/service/local/staging/deploy/maven2/".to_string()
}

fn default_snapshots_url() -> String {
    "https://oss.sonatype.org/content/repositories/snapshots/".to_string()
}

fn default_username_env() -> String {
    "OSSRH_USERNAME".to_string()
}

fn default_password_env() -> String {
    "OSSRH_PASSWORD".to_string()
}

fn default_signing_key_property() -> String {
    "signingKey".to_string()
}

fn default_signing_passphrase_property() -> String {
    "signingPassphrase".to_string()
}

/// Where artifacts go and when they must be signed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishingConfig {
    /// Environment variable that marks a continuous-integration run
    #[serde(default = "default_ci_env")]
    pub ci_env: String,

    #[serde(default = "default_releases_url")]
    pub releases_url: String,

    #[serde(default = "default_snapshots_url")]
    pub snapshots_url: String,

    #[serde(default = "default_username_env")]
    pub username_env: String,

    #[serde(default = "default_password_env")]
    pub password_env: String,

    #[serde(default = "default_signing_key_property")]
    pub signing_key_property: String,

    #[serde(default = "default_signing_passphrase_property")]
    pub signing_passphrase_property: String,
}

impl Default for PublishingConfig {
    fn default() -> Self {
        PublishingConfig {
            ci_env: default_ci_env(),
            releases_url: default_releases_url(),
            snapshots_url: default_snapshots_url(),
            username_env: default_username_env(),
            password_env: default_password_env(),
            signing_key_property: default_signing_key_property(),
            signing_passphrase_property: default_signing_passphrase_property(),
        }
    }
}

/// Developer and GitHub coordinates used for POM metadata.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct MavenCentralSettings {
    #[serde(default)]
    pub developer_name: Option<String>,

    #[serde(default)]
    pub developer_email: Option<String>,

    #[serde(default)]
    pub github_owner: Option<String>,

    #[serde(default)]
    pub github_repository: Option<String>,
}

impl MavenCentralSettings {
    /// Fill `format`'s two `{}` slots with owner and repository, when both are set
    pub fn map_github_url(&self, format: &str) -> Option<String> {
        let owner = self.github_owner.as_deref()?;
        let repository = self.github_repository.as_deref()?;
        Some(
            format
                .replacen("{}", owner, 1)
                .replacen("{}", repository, 1),
        )
    }
}

fn default_java_toolchain() -> u32 {
    11
}

/// Project-level defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default = "default_java_toolchain")]
    pub java_toolchain: u32,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            name: None,
            description: None,
            group: None,
            java_toolchain: default_java_toolchain(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `reckon.toml` in current directory
/// 3. `reckon.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Errors
/// If a file exists but cannot be read or parsed.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    load_project_config(config_path, None)
}

/// Like [`load_config`], but checks `project_dir/reckon.toml` right after
/// the custom path.
///
/// # Errors
/// If a file exists but cannot be read or parsed.
pub fn load_project_config(config_path: Option<&str>, project_dir: Option<&Path>) -> Result<Config> {
    let project_file = project_dir
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file());

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if let Some(path) = project_file {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
