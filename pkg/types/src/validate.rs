use anyhow::{Result, bail};

/// Check a namespace the generated Ingresses are placed in.
///
/// Namespaces are single DNS-1123 labels; the same rule applies to each
/// dot-separated part of a [`validate_subdomain`] name.
pub fn validate_label(label: &str) -> Result<()> {
    let Some(first) = label.chars().next() else {
        bail!("label must not be empty");
    };
    if label.len() > 63 {
        bail!("label '{}' is {} characters, limit is 63", label, label.len());
    }
    if let Some(bad) = label
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        bail!("label '{}' contains '{}', only [a-z0-9-] is allowed", label, bad);
    }
    if first == '-' || label.ends_with('-') {
        bail!("label '{}' must begin and end with [a-z0-9]", label);
    }
    Ok(())
}

/// Check an Ingress or TLS secret name (`<name>-tls`, `<group>-tls`).
///
/// Group names often carry a domain (`example.com`), so dots are allowed.
pub fn validate_subdomain(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if name.len() > 253 {
        bail!("name '{}' is {} characters, limit is 253", name, name.len());
    }
    for label in name.split('.') {
        if let Err(e) = validate_label(label) {
            bail!("name '{}' is not a valid subdomain: {}", name, e);
        }
    }
    Ok(())
}
