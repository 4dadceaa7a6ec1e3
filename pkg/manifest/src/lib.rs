//! Manifest builder: turns a host [`Config`](pkg_types::config::Config) into
//! Ingress resources grouped by TLS requirement.

pub mod builder;
pub mod defaults;
pub mod error;
pub mod render;

pub use builder::build;
pub use defaults::{Overrides, apply_defaults, load_config};
pub use error::{BuildError, Result};
pub use render::{OutputFormat, render};
