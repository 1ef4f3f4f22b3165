//! Consumers of a resolved version: repository routing, signing policy and POM metadata

pub mod pom;
pub mod routing;

pub use pom::PomMetadata;
pub use routing::{is_ci, PublishPlan, PublishTarget, SigningDecision};
