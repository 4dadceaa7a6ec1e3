//! Data types shared by the builder and the CLI: the user-facing host
//! configuration and the Kubernetes Ingress output schema.

pub mod config;
pub mod ingress;
pub mod validate;
