use crate::config::{Config, PublishingConfig};
use crate::conventions::descriptor::{
    FormattingSettings, LockingSettings, PublishingSettings, RepositorySettings, SigningSettings,
    TaskSettings, JAVA_BASE_PLUGIN,
};
use crate::conventions::{BuildDescriptor, ConventionBundle};
use crate::error::{ReckonError, Result};
use crate::publish::routing::{RELEASES_REPOSITORY, SNAPSHOTS_REPOSITORY};
use crate::publish::PomMetadata;
use std::collections::BTreeMap;

/// Identifiers accepted by [`bundle_for`]
pub const BUNDLE_IDS: &[&str] = &[
    "locking",
    "maven-central",
    "spotless",
    "java-library",
    "gradle-plugin",
];

const ECLIPSE_FORMATTER_CONFIG: &str = "gradle/eclipse-java-formatter.xml";

/// Lock every configuration and register the `lock` task
#[derive(Debug, Clone, Default)]
pub struct LockingConvention {
    /// Whether the build was asked to write lock state
    pub write_locks: bool,
}

impl ConventionBundle for LockingConvention {
    fn id(&self) -> &str {
        "locking"
    }

    fn configure(&self, descriptor: &mut BuildDescriptor) {
        descriptor.locking = Some(LockingSettings {
            lock_all_configurations: true,
        });
        descriptor.register_task(TaskSettings {
            name: "lock".to_string(),
            description: "Resolves all resolvable configurations to write dependency locks"
                .to_string(),
            write_locks: self.write_locks,
        });
    }
}

/// Publishing repositories, POM metadata and signing for Maven Central
#[derive(Debug, Clone)]
pub struct MavenCentralConvention {
    publishing: PublishingConfig,
    pom: PomMetadata,
}

impl MavenCentralConvention {
    pub fn new(config: &Config, project_name: &str) -> Self {
        MavenCentralConvention {
            publishing: config.publishing.clone(),
            pom: PomMetadata::new(
                project_name,
                config.project.description.as_deref(),
                &config.maven_central,
            ),
        }
    }

    fn repository(&self, name: &str, url: &str) -> RepositorySettings {
        RepositorySettings {
            name: name.to_string(),
            url: url.to_string(),
            username_env: self.publishing.username_env.clone(),
            password_env: self.publishing.password_env.clone(),
        }
    }
}

impl ConventionBundle for MavenCentralConvention {
    fn id(&self) -> &str {
        "maven-central"
    }

    fn configure(&self, descriptor: &mut BuildDescriptor) {
        descriptor.apply_plugin("maven-publish");
        descriptor.apply_plugin("signing");

        let java = descriptor.has_plugin(JAVA_BASE_PLUGIN);

        let mut version_mapping = BTreeMap::new();
        if java {
            version_mapping.insert("java-api".to_string(), "runtimeClasspath".to_string());
            version_mapping.insert("java-runtime".to_string(), "resolution-result".to_string());
        }

        descriptor.publishing = Some(PublishingSettings {
            repositories: vec![
                self.repository(RELEASES_REPOSITORY, &self.publishing.releases_url),
                self.repository(SNAPSHOTS_REPOSITORY, &self.publishing.snapshots_url),
            ],
            version_mapping,
            pom: self.pom.clone(),
        });

        descriptor.signing = Some(SigningSettings {
            required_in_ci_env: self.publishing.ci_env.clone(),
            key_property: self.publishing.signing_key_property.clone(),
            passphrase_property: self.publishing.signing_passphrase_property.clone(),
        });

        if java {
            descriptor.artifacts.insert("sources".to_string());
            descriptor.artifacts.insert("javadoc".to_string());
        }
    }
}

/// Spotless formatting; Java rules only when the Java plugin is present
#[derive(Debug, Clone, Default)]
pub struct SpotlessConvention;

impl ConventionBundle for SpotlessConvention {
    fn id(&self) -> &str {
        "spotless"
    }

    fn configure(&self, descriptor: &mut BuildDescriptor) {
        descriptor.apply_plugin("com.diffplug.spotless");

        if descriptor.has_plugin(JAVA_BASE_PLUGIN) {
            descriptor.formatting = Some(FormattingSettings {
                tool: "spotless".to_string(),
                java_import_order: vec!["java".to_string(), "javax".to_string(), String::new()],
                java_formatter_config: ECLIPSE_FORMATTER_CONFIG.to_string(),
            });
        }
    }
}

/// Java library: locking, Maven Central and Spotless on top of `java-library`
pub struct JavaLibraryConvention {
    java_toolchain: u32,
    parts: Vec<Box<dyn ConventionBundle>>,
}

impl JavaLibraryConvention {
    pub fn new(config: &Config, project_name: &str, write_locks: bool) -> Self {
        JavaLibraryConvention {
            java_toolchain: config.project.java_toolchain,
            parts: vec![
                Box::new(LockingConvention { write_locks }),
                Box::new(MavenCentralConvention::new(config, project_name)),
                Box::new(SpotlessConvention),
            ],
        }
    }
}

impl ConventionBundle for JavaLibraryConvention {
    fn id(&self) -> &str {
        "java-library"
    }

    fn configure(&self, descriptor: &mut BuildDescriptor) {
        descriptor.apply_plugin("java-library");
        descriptor.java_toolchain.get_or_insert(self.java_toolchain);

        for part in &self.parts {
            descriptor.apply(part.as_ref());
        }
    }
}

/// Gradle plugin project: the Java library conventions plus `java-gradle-plugin`
pub struct GradlePluginConvention {
    library: JavaLibraryConvention,
}

impl GradlePluginConvention {
    pub fn new(config: &Config, project_name: &str, write_locks: bool) -> Self {
        GradlePluginConvention {
            library: JavaLibraryConvention::new(config, project_name, write_locks),
        }
    }
}

impl ConventionBundle for GradlePluginConvention {
    fn id(&self) -> &str {
        "gradle-plugin"
    }

    fn configure(&self, descriptor: &mut BuildDescriptor) {
        descriptor.apply_plugin("java-gradle-plugin");
        descriptor.apply(&self.library);
    }
}

/// Look up a bundle by id.
///
/// # Errors
/// `ReckonError::Config` for an unknown id.
pub fn bundle_for(
    id: &str,
    config: &Config,
    project_name: &str,
    write_locks: bool,
) -> Result<Box<dyn ConventionBundle>> {
    let bundle: Box<dyn ConventionBundle> = match id {
        "locking" => Box::new(LockingConvention { write_locks }),
        "maven-central" => Box::new(MavenCentralConvention::new(config, project_name)),
        "spotless" => Box::new(SpotlessConvention),
        "java-library" => Box::new(JavaLibraryConvention::new(config, project_name, write_locks)),
        "gradle-plugin" => Box::new(GradlePluginConvention::new(config, project_name, write_locks)),
        other => {
            return Err(ReckonError::config(format!(
                "Unknown convention '{}': expected one of {}",
                other,
                BUNDLE_IDS.join(", ")
            )))
        }
    };
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(ids: &[&str]) -> BuildDescriptor {
        let config = Config::default();
        let mut descriptor = BuildDescriptor::new("widgets");
        for id in ids {
            let bundle = bundle_for(id, &config, "widgets", false).unwrap();
            descriptor.apply(bundle.as_ref());
        }
        descriptor
    }

    #[test]
    fn test_locking() {
        let descriptor = apply(&["locking"]);
        assert_eq!(
            descriptor.locking,
            Some(LockingSettings {
                lock_all_configurations: true
            })
        );
        assert_eq!(descriptor.tasks[0].name, "lock");
    }

    #[test]
    fn test_maven_central_without_java() {
        let descriptor = apply(&["maven-central"]);
        assert!(descriptor.has_plugin("maven-publish"));
        assert!(descriptor.has_plugin("signing"));
        assert!(descriptor.artifacts.is_empty());

        let publishing = descriptor.publishing.unwrap();
        assert_eq!(publishing.repositories.len(), 2);
        assert_eq!(publishing.repositories[0].name, RELEASES_REPOSITORY);
        assert!(publishing.version_mapping.is_empty());
    }

    #[test]
    fn test_spotless_without_java_has_no_rules() {
        let descriptor = apply(&["spotless"]);
        assert!(descriptor.has_plugin("com.diffplug.spotless"));
        assert!(descriptor.formatting.is_none());
    }

    #[test]
    fn test_java_library_composite() {
        let descriptor = apply(&["java-library"]);

        assert_eq!(
            descriptor.conventions,
            vec!["java-library", "locking", "maven-central", "spotless"]
        );
        assert_eq!(descriptor.java_toolchain, Some(11));
        assert!(descriptor.artifacts.contains("sources"));
        assert!(descriptor.artifacts.contains("javadoc"));

        let formatting = descriptor.formatting.unwrap();
        assert_eq!(formatting.java_import_order, vec!["java", "javax", ""]);
        assert_eq!(formatting.java_formatter_config, ECLIPSE_FORMATTER_CONFIG);
        assert_eq!(
            descriptor.publishing.unwrap().version_mapping.len(),
            2
        );
    }

    #[test]
    fn test_gradle_plugin_includes_library() {
        let descriptor = apply(&["gradle-plugin"]);
        assert!(descriptor.has_plugin("java-gradle-plugin"));
        assert!(descriptor.has_plugin("java-library"));
        assert!(descriptor.has_convention("java-library"));
        assert!(descriptor.has_convention("spotless"));
    }

    #[test]
    fn test_repeated_bundles_apply_once() {
        let descriptor = apply(&["locking", "java-library", "locking"]);
        assert_eq!(
            descriptor
                .conventions
                .iter()
                .filter(|id| *id == "locking")
                .count(),
            1
        );
    }

    #[test]
    fn test_unknown_bundle() {
        let err = bundle_for("kotlin", &Config::default(), "widgets", false)
            .err()
            .unwrap();
        assert!(err.is_config());
    }
}
