use crate::conventions::ConventionBundle;
use crate::publish::PomMetadata;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Plugin that Java-aware conventions react to
pub const JAVA_BASE_PLUGIN: &str = "java-base";

/// Settings accumulated for one build unit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_toolchain: Option<u32>,
    /// Bundle ids in application order
    pub conventions: Vec<String>,
    pub plugins: BTreeSet<String>,
    /// Extra artifact classifiers published next to the main jar
    pub artifacts: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locking: Option<LockingSettings>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publishing: Option<PublishingSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing: Option<SigningSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<FormattingSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockingSettings {
    pub lock_all_configurations: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSettings {
    pub name: String,
    pub description: String,
    pub write_locks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySettings {
    pub name: String,
    pub url: String,
    pub username_env: String,
    pub password_env: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishingSettings {
    pub repositories: Vec<RepositorySettings>,
    /// Usage name -> where published dependency versions come from
    pub version_mapping: BTreeMap<String, String>,
    pub pom: PomMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningSettings {
    /// Signing is required when this environment flag is set
    pub required_in_ci_env: String,
    pub key_property: String,
    pub passphrase_property: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattingSettings {
    pub tool: String,
    pub java_import_order: Vec<String>,
    pub java_formatter_config: String,
}

impl BuildDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        BuildDescriptor {
            name: name.into(),
            ..BuildDescriptor::default()
        }
    }

    /// Apply a bundle unless it has been applied already
    pub fn apply(&mut self, bundle: &dyn ConventionBundle) {
        if self.has_convention(bundle.id()) {
            debug!(convention = bundle.id(), "convention already applied");
            return;
        }

        self.conventions.push(bundle.id().to_string());
        bundle.configure(self);
    }

    pub fn has_convention(&self, id: &str) -> bool {
        self.conventions.iter().any(|applied| applied == id)
    }

    /// Apply a plugin id along with the plugins it implies
    pub fn apply_plugin(&mut self, id: &str) {
        for implied in implied_plugins(id) {
            self.plugins.insert((*implied).to_string());
        }
        self.plugins.insert(id.to_string());
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.contains(id)
    }

    /// Register a task; a task with the same name is replaced
    pub fn register_task(&mut self, task: TaskSettings) {
        self.tasks.retain(|existing| existing.name != task.name);
        self.tasks.push(task);
    }
}

fn implied_plugins(id: &str) -> &'static [&'static str] {
    match id {
        "java" => &[JAVA_BASE_PLUGIN],
        "java-library" => &["java", JAVA_BASE_PLUGIN],
        "java-gradle-plugin" => &["java-library", "java", JAVA_BASE_PLUGIN],
        _ => &[],
    }
}
