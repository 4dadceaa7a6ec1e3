use pkg_constants::schema::{
    EXTENSIONS_V1BETA1, INGRESS_KIND, LIST_API_VERSION, LIST_KIND, NETWORKING_V1,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Ingress schema version to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    /// `networking.k8s.io/v1`
    #[default]
    NetworkingV1,
    /// `extensions/v1beta1`, removed in Kubernetes 1.22.
    ExtensionsV1beta1,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::NetworkingV1 => NETWORKING_V1,
            ApiVersion::ExtensionsV1beta1 => EXTENSIONS_V1BETA1,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            NETWORKING_V1 | "v1" => Ok(ApiVersion::NetworkingV1),
            EXTENSIONS_V1BETA1 | "v1beta1" => Ok(ApiVersion::ExtensionsV1beta1),
            other => Err(format!(
                "unsupported ingress apiVersion '{}' (expected {} or {})",
                other, NETWORKING_V1, EXTENSIONS_V1BETA1
            )),
        }
    }
}

/// Path matching type for Ingress rules. Every generated rule is a prefix match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PathType {
    Prefix,
}

/// `networking.k8s.io/v1` port reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBackendPort {
    pub number: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressServiceBackend {
    pub name: String,
    pub port: ServiceBackendPort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBackend {
    pub service: IngressServiceBackend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyServiceBackend {
    pub service_name: String,
    pub service_port: u16,
}

/// Backend service target for an Ingress path. The wire shape depends on
/// the schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IngressBackend {
    Service(ServiceBackend),
    Legacy(LegacyServiceBackend),
}

impl IngressBackend {
    pub fn new(version: ApiVersion, service_name: &str, service_port: u16) -> Self {
        match version {
            ApiVersion::NetworkingV1 => IngressBackend::Service(ServiceBackend {
                service: IngressServiceBackend {
                    name: service_name.to_string(),
                    port: ServiceBackendPort {
                        number: service_port,
                    },
                },
            }),
            ApiVersion::ExtensionsV1beta1 => IngressBackend::Legacy(LegacyServiceBackend {
                service_name: service_name.to_string(),
                service_port,
            }),
        }
    }

    pub fn service_name(&self) -> &str {
        match self {
            IngressBackend::Service(b) => &b.service.name,
            IngressBackend::Legacy(b) => &b.service_name,
        }
    }

    pub fn service_port(&self) -> u16 {
        match self {
            IngressBackend::Service(b) => b.service.port.number,
            IngressBackend::Legacy(b) => b.service_port,
        }
    }
}

/// A single path rule within an Ingress HTTP rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HTTPIngressPath {
    pub path: String,
    pub path_type: PathType,
    pub backend: IngressBackend,
}

/// HTTP rules for a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HTTPIngressRuleValue {
    pub paths: Vec<HTTPIngressPath>,
}

/// A single host-based Ingress rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressRule {
    pub host: String,
    pub http: HTTPIngressRuleValue,
}

/// TLS configuration for an Ingress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressTLS {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,
    pub secret_name: String,
}

/// Ingress specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_class_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tls: Vec<IngressTLS>,
    pub rules: Vec<IngressRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Ingress resource for external traffic routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingress {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: IngressSpec,
}

impl Ingress {
    pub fn new(version: ApiVersion, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: version.as_str().to_string(),
            kind: INGRESS_KIND.to_string(),
            metadata: ObjectMeta {
                name: name.into(),
                namespace: namespace.into(),
                annotations: BTreeMap::new(),
            },
            spec: IngressSpec::default(),
        }
    }
}

/// `kind: List` wrapper printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressList {
    pub api_version: String,
    pub kind: String,
    pub items: Vec<Ingress>,
}

impl IngressList {
    pub fn new(items: Vec<Ingress>) -> Self {
        Self {
            api_version: LIST_API_VERSION.to_string(),
            kind: LIST_KIND.to_string(),
            items,
        }
    }
}
