//! Kubernetes API versions and kinds emitted in the output.

pub const NETWORKING_V1: &str = "networking.k8s.io/v1";

pub const EXTENSIONS_V1BETA1: &str = "extensions/v1beta1";

/// `apiVersion` of the list wrapper.
pub const LIST_API_VERSION: &str = "v1";

pub const LIST_KIND: &str = "List";

pub const INGRESS_KIND: &str = "Ingress";
