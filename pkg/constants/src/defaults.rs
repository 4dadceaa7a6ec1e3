//! Default values applied when the configuration leaves something unset.

/// Input file read when `-file` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "ingress-hosts.json";

/// Backend port used when neither the host entry nor the config names one.
pub const DEFAULT_SERVICE_PORT: u16 = 80;

/// Suffix appended to a group name to form its TLS secret name.
pub const TLS_SECRET_SUFFIX: &str = "-tls";

/// Suffix appended to the config name for the TLS-required Ingress.
pub const TLS_INGRESS_SUFFIX: &str = "-tls";

/// Every generated rule matches this path prefix.
pub const ROOT_PATH: &str = "/";
