use pkg_manifest::{BuildError, OutputFormat, Overrides, apply_defaults, build, load_config, render};
use pkg_types::ingress::ApiVersion;
use serde_json::{Value, json};
use std::io::Write;

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run(content: &str, version: ApiVersion) -> Result<Value, BuildError> {
    let file = config_file(content);
    let config = apply_defaults(load_config(file.path())?, &Overrides::default());
    let list = build(&config, version)?;
    let out = render(&list, OutputFormat::Json)?;
    Ok(serde_json::from_str(&out).unwrap())
}

#[test]
fn plain_and_required_groups() {
    let out = run(
        r#"{
            "name": "site",
            "namespace": "ns",
            "service-name": "svc",
            "service-port": 8080,
            "plain": ["a.com"],
            "tls-required": {"grp": ["b.com"]}
        }"#,
        ApiVersion::NetworkingV1,
    )
    .unwrap();

    let rule = |host: &str| {
        json!({
            "host": host,
            "http": {"paths": [{
                "path": "/",
                "pathType": "Prefix",
                "backend": {"service": {"name": "svc", "port": {"number": 8080}}}
            }]}
        })
    };

    assert_eq!(
        out,
        json!({
            "apiVersion": "v1",
            "kind": "List",
            "items": [
                {
                    "apiVersion": "networking.k8s.io/v1",
                    "kind": "Ingress",
                    "metadata": {
                        "name": "site",
                        "namespace": "ns",
                        "annotations": {
                            "haproxy-ingress.github.io/hsts": "false",
                            "ingress.kubernetes.io/ssl-redirect": "false",
                            "kubernetes.io/tls-acme": "true"
                        }
                    },
                    "spec": {"rules": [rule("a.com")]}
                },
                {
                    "apiVersion": "networking.k8s.io/v1",
                    "kind": "Ingress",
                    "metadata": {
                        "name": "site-tls",
                        "namespace": "ns",
                        "annotations": {
                            "haproxy-ingress.github.io/hsts": "true",
                            "ingress.kubernetes.io/ssl-redirect": "true",
                            "kubernetes.io/tls-acme": "true"
                        }
                    },
                    "spec": {
                        "tls": [{"hosts": ["b.com"], "secretName": "grp-tls"}],
                        "rules": [rule("b.com")]
                    }
                }
            ]
        })
    );
}

#[test]
fn missing_service_name_produces_no_output() {
    let err = run(r#"{"name": "site", "plain": [{"host": "c.com"}]}"#, ApiVersion::NetworkingV1)
        .unwrap_err();
    match err {
        BuildError::MissingServiceName { host, group } => {
            assert_eq!(host, "c.com");
            assert_eq!(group, None);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn legacy_schema() {
    let out = run(
        r#"{
            "name": "site",
            "ingress-class": "haproxy",
            "service-name": "svc",
            "tls-optional": {"opt": ["a.com"]}
        }"#,
        ApiVersion::ExtensionsV1beta1,
    )
    .unwrap();

    let ingress = &out["items"][0];
    assert_eq!(ingress["apiVersion"], "extensions/v1beta1");
    assert_eq!(ingress["metadata"]["annotations"]["kubernetes.io/ingress.class"], "haproxy");
    assert!(ingress["spec"].get("ingressClassName").is_none());
    assert_eq!(
        ingress["spec"]["rules"][0]["http"]["paths"][0]["backend"],
        json!({"serviceName": "svc", "servicePort": 80})
    );
    assert_eq!(
        ingress["spec"]["tls"],
        json!([{"hosts": ["a.com"], "secretName": "opt-tls"}])
    );
}

#[test]
fn output_is_reproducible() {
    let content = r#"{
        "name": "site",
        "service-name": "svc",
        "plain": ["z.com", "m.com", "a.com"],
        "tls-optional": {"zeta": ["z.io"], "alpha": ["b.io", "a.io"]},
        "tls-required": {"shop": ["shop.io", "cart.io"], "api": ["api.io"]},
        "annotations": {"z": "1", "a": "2"}
    }"#;

    let render_once = || {
        let file = config_file(content);
        let config = apply_defaults(load_config(file.path()).unwrap(), &Overrides::default());
        render(&build(&config, ApiVersion::NetworkingV1).unwrap(), OutputFormat::Json).unwrap()
    };

    let first = render_once();
    for _ in 0..5 {
        assert_eq!(render_once(), first);
    }

    let out: Value = serde_json::from_str(&first).unwrap();
    let hosts: Vec<&str> = out["items"][0]["spec"]["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["host"].as_str().unwrap())
        .collect();
    assert_eq!(hosts, vec!["a.com", "m.com", "z.com", "a.io", "b.io", "z.io"]);

    let secrets: Vec<&str> = out["items"][1]["spec"]["tls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["secretName"].as_str().unwrap())
        .collect();
    assert_eq!(secrets, vec!["api-tls", "shop-tls"]);
}

#[test]
fn overrides_apply_before_build() {
    let file = config_file(
        r#"{"name": "site", "service-name": "svc", "tls-required": {"g": ["a.com"]}}"#,
    );
    let overrides = Overrides {
        name: Some("renamed".into()),
        namespace: Some("prod".into()),
        ingress_class: Some("nginx".into()),
    };
    let config = apply_defaults(load_config(file.path()).unwrap(), &overrides);
    let list = build(&config, ApiVersion::NetworkingV1).unwrap();

    let ingress = &list.items[0];
    assert_eq!(ingress.metadata.name, "renamed-tls");
    assert_eq!(ingress.metadata.namespace, "prod");
    assert_eq!(ingress.spec.ingress_class_name.as_deref(), Some("nginx"));
}

#[test]
fn no_hosts_yields_empty_list() {
    let out = run(r#"{"name": "site"}"#, ApiVersion::NetworkingV1).unwrap();
    assert_eq!(out, json!({"apiVersion": "v1", "kind": "List", "items": []}));
}
