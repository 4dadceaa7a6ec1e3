//! Centralized constants for ingress-template.
//!
//! Annotation keys, API versions and defaults live here so the builder and
//! the CLI agree on them.

pub mod annotations;
pub mod defaults;
pub mod schema;
