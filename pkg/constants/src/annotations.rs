//! Ingress annotation keys and values.

// ─── Common ───────────────────────────────────────────────────────────────

/// Legacy ingress class annotation, used with `extensions/v1beta1`.
pub const INGRESS_CLASS: &str = "kubernetes.io/ingress.class";

/// Asks cert-manager / kube-lego to provision certificates via ACME.
pub const TLS_ACME: &str = "kubernetes.io/tls-acme";

// ─── Redirect / HSTS ──────────────────────────────────────────────────────

pub const SSL_REDIRECT: &str = "ingress.kubernetes.io/ssl-redirect";

pub const HSTS: &str = "haproxy-ingress.github.io/hsts";

pub const HSTS_INCLUDE_SUBDOMAINS: &str = "haproxy-ingress.github.io/hsts-include-subdomains";

pub const HSTS_PRELOAD: &str = "haproxy-ingress.github.io/hsts-preload";

pub const HSTS_MAX_AGE: &str = "haproxy-ingress.github.io/hsts-max-age";

/// Two years, the minimum accepted by the HSTS preload list.
pub const HSTS_PRELOAD_MAX_AGE_SECS: u64 = 63_072_000;

pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
