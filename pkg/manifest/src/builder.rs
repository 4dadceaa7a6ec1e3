use pkg_constants::annotations::{
    FALSE, HSTS, HSTS_INCLUDE_SUBDOMAINS, HSTS_MAX_AGE, HSTS_PRELOAD, HSTS_PRELOAD_MAX_AGE_SECS,
    INGRESS_CLASS, SSL_REDIRECT, TLS_ACME, TRUE,
};
use pkg_constants::defaults::{
    DEFAULT_SERVICE_PORT, ROOT_PATH, TLS_INGRESS_SUFFIX, TLS_SECRET_SUFFIX,
};
use pkg_types::config::{Config, HostEntry};
use pkg_types::ingress::{
    ApiVersion, HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressList,
    IngressRule, IngressTLS, PathType,
};
use pkg_types::validate::{validate_label, validate_subdomain};
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::{BuildError, Result};

/// Which of the two generated Ingress resources a host group lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngressGroup {
    /// Plain hosts and TLS-optional groups; no HTTPS redirect.
    TlsOptional,
    /// TLS-required groups; HTTPS redirect and HSTS enforced.
    TlsRequired,
}

impl IngressGroup {
    pub const ALL: [IngressGroup; 2] = [IngressGroup::TlsOptional, IngressGroup::TlsRequired];

    /// Resource name for this group: `<name>` or `<name>-tls`.
    pub fn ingress_name(&self, base: &str) -> String {
        match self {
            IngressGroup::TlsOptional => base.to_string(),
            IngressGroup::TlsRequired => format!("{}{}", base, TLS_INGRESS_SUFFIX),
        }
    }
}

impl fmt::Display for IngressGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngressGroup::TlsOptional => write!(f, "TLS-optional"),
            IngressGroup::TlsRequired => write!(f, "TLS-required"),
        }
    }
}

/// Secret holding the certificate for a TLS group.
pub fn tls_secret_name(group: &str) -> String {
    format!("{}{}", group, TLS_SECRET_SUFFIX)
}

/// Build the Ingress list for a defaulted config.
///
/// Groups and hosts are visited in ascending name order, so the same config
/// always yields the same output. Resources that end up with no rules are
/// left out.
pub fn build(config: &Config, version: ApiVersion) -> Result<IngressList> {
    let mut items = Vec::with_capacity(IngressGroup::ALL.len());

    for group in IngressGroup::ALL {
        let ingress = build_ingress(config, version, group)?;

        if ingress.spec.rules.is_empty() {
            debug!(name = %ingress.metadata.name, %group, "no rules, skipping ingress");
            continue;
        }

        warn_invalid_names(&ingress);
        info!(
            name = %ingress.metadata.name,
            rules = ingress.spec.rules.len(),
            tls = ingress.spec.tls.len(),
            "built ingress"
        );
        items.push(ingress);
    }

    Ok(IngressList::new(items))
}

fn build_ingress(config: &Config, version: ApiVersion, group: IngressGroup) -> Result<Ingress> {
    let mut ingress = Ingress::new(
        version,
        group.ingress_name(&config.name),
        config.namespace.clone(),
    );

    if !config.ingress_class.is_empty() {
        match version {
            ApiVersion::NetworkingV1 => {
                ingress.spec.ingress_class_name = Some(config.ingress_class.clone());
            }
            ApiVersion::ExtensionsV1beta1 => {
                annotate(&mut ingress, INGRESS_CLASS, &config.ingress_class);
            }
        }
    }
    annotate(&mut ingress, TLS_ACME, TRUE);

    match group {
        IngressGroup::TlsOptional => {
            annotate(&mut ingress, SSL_REDIRECT, FALSE);
            annotate(&mut ingress, HSTS, FALSE);

            add_hosts(&mut ingress, config, version, &config.plain, None)?;
            for (name, hosts) in &config.tls_optional {
                info!(group = %name, hosts = hosts.len(), "adding TLS-optional group");
                add_hosts(&mut ingress, config, version, hosts, Some(name.as_str()))?;
            }
        }
        IngressGroup::TlsRequired => {
            annotate(&mut ingress, SSL_REDIRECT, TRUE);
            annotate(&mut ingress, HSTS, TRUE);

            if config.hsts_preload {
                annotate(&mut ingress, HSTS_INCLUDE_SUBDOMAINS, TRUE);
                annotate(&mut ingress, HSTS_PRELOAD, TRUE);
                annotate(
                    &mut ingress,
                    HSTS_MAX_AGE,
                    &HSTS_PRELOAD_MAX_AGE_SECS.to_string(),
                );
            }

            for (name, hosts) in &config.tls_required {
                info!(group = %name, hosts = hosts.len(), "adding TLS-required group");
                add_hosts(&mut ingress, config, version, hosts, Some(name.as_str()))?;
            }
        }
    }

    // User annotations win over everything computed above.
    for (key, value) in &config.annotations {
        annotate(&mut ingress, key, value);
    }

    Ok(ingress)
}

fn annotate(ingress: &mut Ingress, key: &str, value: &str) {
    ingress
        .metadata
        .annotations
        .insert(key.to_string(), value.to_string());
}

/// Append one `/` rule per host and, when `tls_name` is set, one TLS block
/// covering all of them with secret `<tls_name>-tls`.
///
/// Hosts are processed in hostname order. Fails on the first host without an
/// effective service name; the ingress must then be discarded.
pub fn add_hosts(
    ingress: &mut Ingress,
    config: &Config,
    version: ApiVersion,
    hosts: &[HostEntry],
    tls_name: Option<&str>,
) -> Result<()> {
    let tls_name = tls_name.filter(|n| !n.is_empty());
    let mut tls = tls_name.map(|name| IngressTLS {
        hosts: Vec::with_capacity(hosts.len()),
        secret_name: tls_secret_name(name),
    });

    let mut sorted: Vec<&HostEntry> = hosts.iter().collect();
    sorted.sort_by(|a, b| a.host.cmp(&b.host));

    for entry in sorted {
        let service_name = resolve_service_name(entry, config).ok_or_else(|| {
            BuildError::MissingServiceName {
                host: entry.host.clone(),
                group: tls_name.map(str::to_string),
            }
        })?;
        let service_port = resolve_service_port(entry, config);

        if let Some(tls) = tls.as_mut() {
            tls.hosts.push(entry.host.clone());
        }

        ingress.spec.rules.push(IngressRule {
            host: entry.host.clone(),
            http: HTTPIngressRuleValue {
                paths: vec![HTTPIngressPath {
                    path: ROOT_PATH.to_string(),
                    path_type: PathType::Prefix,
                    backend: IngressBackend::new(version, service_name, service_port),
                }],
            },
        });
    }

    if let Some(tls) = tls {
        ingress.spec.tls.push(tls);
    }
    Ok(())
}

fn resolve_service_name<'a>(entry: &'a HostEntry, config: &'a Config) -> Option<&'a str> {
    entry
        .service_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .or_else(|| Some(config.service_name.as_str()).filter(|n| !n.is_empty()))
}

fn resolve_service_port(entry: &HostEntry, config: &Config) -> u16 {
    entry
        .service_port
        .filter(|p| *p != 0)
        .or_else(|| Some(config.service_port).filter(|p| *p != 0))
        .unwrap_or(DEFAULT_SERVICE_PORT)
}

/// Names the API server would reject are reported, not fatal.
fn warn_invalid_names(ingress: &Ingress) {
    let meta = &ingress.metadata;
    if let Err(e) = validate_subdomain(&meta.name) {
        warn!(name = %meta.name, "invalid ingress name: {}", e);
    }
    if !meta.namespace.is_empty() {
        if let Err(e) = validate_label(&meta.namespace) {
            warn!(namespace = %meta.namespace, "invalid namespace: {}", e);
        }
    }
    for tls in &ingress.spec.tls {
        if let Err(e) = validate_subdomain(&tls.secret_name) {
            warn!(secret = %tls.secret_name, "invalid TLS secret name: {}", e);
        }
    }
}
