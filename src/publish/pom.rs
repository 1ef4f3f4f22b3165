use crate::config::MavenCentralSettings;
use serde::Serialize;

const LICENSE_NAME: &str = "The Apache Software License, Version 2.0";
const LICENSE_URL: &str = "http://www.apache.org/licenses/LICENSE-2.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Developer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scm {
    pub url: String,
    pub connection: String,
    pub developer_connection: String,
}

/// Metadata Maven Central requires on every published POM
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PomMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub developers: Vec<Developer>,
    pub licenses: Vec<License>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm: Option<Scm>,
}

impl PomMetadata {
    /// Assemble POM metadata for a project.
    ///
    /// GitHub-derived URLs are only filled in when both owner and repository
    /// are configured; a developer entry only when a name or email is.
    pub fn new(name: &str, description: Option<&str>, settings: &MavenCentralSettings) -> Self {
        let developers = if settings.developer_name.is_some() || settings.developer_email.is_some()
        {
            vec![Developer {
                name: settings.developer_name.clone(),
                email: settings.developer_email.clone(),
            }]
        } else {
            Vec::new()
        };

        let scm = match (
            settings.map_github_url("https://github.com/{}/{}"),
            settings.map_github_url("scm:git:git@github.com:{}/{}.git"),
            settings.map_github_url("scm:git:ssh:git@github.com:{}/{}.git"),
        ) {
            (Some(url), Some(connection), Some(developer_connection)) => Some(Scm {
                url,
                connection,
                developer_connection,
            }),
            _ => None,
        };

        PomMetadata {
            name: name.to_string(),
            description: description.map(str::to_string),
            url: scm.as_ref().map(|scm| scm.url.clone()),
            developers,
            licenses: vec![License {
                name: LICENSE_NAME.to_string(),
                url: LICENSE_URL.to_string(),
            }],
            scm,
        }
    }
}
