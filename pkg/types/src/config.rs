use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// What the decoder reports when a host entry is neither a string nor an object.
pub const HOST_ENTRY_EXPECTED: &str = "a hostname string or an object with a `host` field";

/// Whether a decoder message is a host entry shape error.
///
/// Only the text after the last `, expected ` is checked; values echoed
/// earlier in the message (quoted strings) cannot match.
pub fn is_host_entry_shape_error(message: &str) -> bool {
    message
        .rsplit_once(", expected ")
        .is_some_and(|(_, expected)| expected.starts_with(HOST_ENTRY_EXPECTED))
}

/// One logical site routed by an Ingress rule.
///
/// Accepts either a bare hostname or an object:
/// ```json
/// "www.example.com"
/// { "host": "api.example.com", "service-name": "api", "service-port": 8080 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEntry {
    pub host: String,
    pub service_name: Option<String>,
    pub service_port: Option<u16>,
}

impl HostEntry {
    /// A host that inherits the configuration's service name and port.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_service(mut self, name: impl Into<String>, port: u16) -> Self {
        self.service_name = Some(name.into());
        self.service_port = Some(port);
        self
    }
}

/// Object form of a host entry. Empty names and zero ports mean "unset".
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct HostEntrySpec {
    host: String,
    #[serde(default)]
    service_name: Option<String>,
    #[serde(default)]
    service_port: Option<u16>,
}

impl From<HostEntrySpec> for HostEntry {
    fn from(spec: HostEntrySpec) -> Self {
        Self {
            host: spec.host,
            service_name: spec.service_name.filter(|n| !n.is_empty()),
            service_port: spec.service_port.filter(|p| *p != 0),
        }
    }
}

impl<'de> Deserialize<'de> for HostEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HostEntryVisitor;

        impl<'de> Visitor<'de> for HostEntryVisitor {
            type Value = HostEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(HOST_ENTRY_EXPECTED)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<HostEntry, E> {
                Ok(HostEntry::new(v))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<HostEntry, A::Error> {
                let spec = HostEntrySpec::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(spec.into())
            }
        }

        deserializer.deserialize_any(HostEntryVisitor)
    }
}

pub type HostList = Vec<HostEntry>;

/// Group name → hosts sharing the `<group>-tls` secret. Ordered by group name.
pub type HostGroups = BTreeMap<String, HostList>;

/// The user-authored host mapping (`ingress-hosts.json`).
///
/// Example:
/// ```json
/// {
///   "name": "site",
///   "namespace": "web",
///   "service-name": "frontend",
///   "service-port": 8080,
///   "plain": ["status.example.com"],
///   "tls-optional": { "legacy": ["old.example.com"] },
///   "tls-required": { "www": ["example.com", "www.example.com"] },
///   "hsts-preload": true
/// }
/// ```
///
/// Missing keys and `null` values both mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub namespace: String,
    #[serde(deserialize_with = "null_default")]
    pub ingress_class: String,

    #[serde(deserialize_with = "null_default")]
    pub annotations: BTreeMap<String, String>,

    #[serde(deserialize_with = "null_default")]
    pub service_name: String,
    /// Zero means unset.
    #[serde(deserialize_with = "null_default")]
    pub service_port: u16,

    #[serde(deserialize_with = "null_default")]
    pub plain: HostList,
    #[serde(deserialize_with = "null_default")]
    pub tls_optional: HostGroups,
    #[serde(deserialize_with = "null_default")]
    pub tls_required: HostGroups,
    #[serde(deserialize_with = "null_default")]
    pub hsts_preload: bool,
}

fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Config {
    /// Decode a configuration document in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> anyhow::Result<Self> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(config)
    }
}

/// Serialized form of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml` / `.yml` files are YAML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}
