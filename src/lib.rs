pub mod boundary;
pub mod cli;
pub mod config;
pub mod conventions;
pub mod domain;
pub mod error;
pub mod git;
pub mod properties;
pub mod publish;
pub mod resolver;
pub mod ui;

pub use error::{ReckonError, Result};
pub use resolver::VersionResolver;
