use pkg_constants::defaults::DEFAULT_SERVICE_PORT;
use pkg_types::config::{Config, ConfigFormat, is_host_entry_shape_error};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{BuildError, Result};

/// Invocation-time values that replace the corresponding config fields.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub ingress_class: Option<String>,
}

/// Read and decode the host configuration file.
///
/// The decoder is picked from the file extension (`.yaml`/`.yml` or JSON).
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| BuildError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;

    let format = ConfigFormat::from_path(path);
    debug!(path = %path.display(), ?format, "decoding config");

    Config::parse(&content, format).map_err(|e| {
        let message = e.to_string();
        if is_host_entry_shape_error(&message) {
            BuildError::HostEntryShape {
                path: path.to_path_buf(),
                message,
            }
        } else {
            BuildError::ParseConfig {
                path: path.to_path_buf(),
                message,
            }
        }
    })
}

/// Apply CLI overrides (when non-empty) and fill in the default service port.
pub fn apply_defaults(mut config: Config, overrides: &Overrides) -> Config {
    // Merge: CLI args > config file
    if let Some(name) = non_empty(&overrides.name) {
        info!(name, "overriding ingress name");
        config.name = name.to_string();
    }
    if let Some(namespace) = non_empty(&overrides.namespace) {
        info!(namespace, "overriding namespace");
        config.namespace = namespace.to_string();
    }
    if let Some(class) = non_empty(&overrides.ingress_class) {
        info!(ingress_class = class, "overriding ingress class");
        config.ingress_class = class.to_string();
    }

    if config.service_port == 0 {
        config.service_port = DEFAULT_SERVICE_PORT;
    }

    config
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn overrides_replace_non_empty_values() {
        let config = Config {
            name: "site".into(),
            namespace: "ns".into(),
            ingress_class: "nginx".into(),
            ..Default::default()
        };
        let overrides = Overrides {
            name: Some("other".into()),
            namespace: Some(String::new()),
            ingress_class: None,
        };

        let config = apply_defaults(config, &overrides);
        assert_eq!(config.name, "other");
        assert_eq!(config.namespace, "ns");
        assert_eq!(config.ingress_class, "nginx");
    }

    #[test]
    fn service_port_defaults_to_80() {
        let config = apply_defaults(Config::default(), &Overrides::default());
        assert_eq!(config.service_port, 80);

        let config = Config {
            service_port: 8080,
            ..Default::default()
        };
        assert_eq!(apply_defaults(config, &Overrides::default()).service_port, 8080);
    }

    #[test]
    fn load_json_config() {
        let file = write_temp(".json", r#"{"name":"site","plain":["a.com"]}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.name, "site");
        assert_eq!(config.plain.len(), 1);
    }

    #[test]
    fn load_yaml_config() {
        let file = write_temp(".yaml", "name: site\nplain:\n  - a.com\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.name, "site");
        assert_eq!(config.plain[0].host, "a.com");
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BuildError::ReadConfig { .. }), "{err}");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let file = write_temp(".json", r#"{"name": "#);
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, BuildError::ParseConfig { .. }), "{err}");
    }

    #[test]
    fn echoed_string_is_not_a_shape_error() {
        let file = write_temp(
            ".json",
            r#"{"service-port": "a hostname string or an object with a `host` field"}"#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, BuildError::ParseConfig { .. }), "{err}");
    }

    #[test]
    fn null_sections_load_as_empty() {
        let file = write_temp(
            ".json",
            r#"{
                "name": "site",
                "service-name": "svc",
                "plain": ["a.com"],
                "annotations": null,
                "tls-optional": null
            }"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.plain.len(), 1);
        assert!(config.annotations.is_empty());
        assert!(config.tls_optional.is_empty());
    }

    #[test]
    fn bad_host_shape_is_reported() {
        let file = write_temp(".json", r#"{"plain": [42]}"#);
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, BuildError::HostEntryShape { .. }), "{err}");
    }
}
