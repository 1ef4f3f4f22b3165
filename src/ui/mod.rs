//! User interface module - terminal output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing to stdout/stderr

pub mod formatter;

use crate::boundary::BoundaryWarning;
use crate::domain::{RepoState, ResolvedVersion};
use crate::publish::PublishPlan;

pub fn display_error(message: &str) {
    eprintln!("{}", formatter::format_error(message));
}

/// Warnings go to stderr so stdout stays machine-readable
pub fn display_boundary_warnings(warnings: &[BoundaryWarning]) {
    for warning in warnings {
        eprintln!("{}", formatter::format_boundary_warning(warning));
    }
}

pub fn display_resolution(state: &RepoState, resolved: &ResolvedVersion) {
    println!("{}", formatter::format_resolution(state, resolved));
}

pub fn display_plan(plan: &PublishPlan) {
    println!("{}", formatter::format_plan(plan));
}
