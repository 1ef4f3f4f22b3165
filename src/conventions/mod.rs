//! Convention bundles: named sets of defaults merged into a build descriptor.
//!
//! A bundle is applied at most once per descriptor. Composite bundles apply
//! their parts in order, so a bundle that reacts to the Java plugin sees it
//! only if something earlier in the chain applied it.

pub mod bundles;
pub mod descriptor;

pub use bundles::{
    bundle_for, GradlePluginConvention, JavaLibraryConvention, LockingConvention,
    MavenCentralConvention, SpotlessConvention, BUNDLE_IDS,
};
pub use descriptor::BuildDescriptor;

/// A named set of default settings
pub trait ConventionBundle {
    /// Stable identifier, e.g. `maven-central`
    fn id(&self) -> &str;

    /// Merge this bundle's settings into `descriptor`.
    ///
    /// Called through [`BuildDescriptor::apply`], which skips repeats.
    fn configure(&self, descriptor: &mut BuildDescriptor);
}
