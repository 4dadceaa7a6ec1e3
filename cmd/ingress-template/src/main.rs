use anyhow::Context;
use clap::Parser;
use pkg_constants::defaults::DEFAULT_CONFIG_FILE;
use pkg_manifest::{OutputFormat, Overrides, apply_defaults, build, load_config, render};
use pkg_types::ingress::ApiVersion;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod args;

#[derive(Parser, Debug)]
#[command(
    name = "ingress-template",
    about = "Generate Kubernetes Ingress manifests from a host/service mapping"
)]
struct Cli {
    /// Input file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    file: PathBuf,

    /// Override ingress name
    #[arg(long)]
    name: Option<String>,

    /// Override namespace
    #[arg(long)]
    namespace: Option<String>,

    /// Override ingress class
    #[arg(long)]
    ingress_class: Option<String>,

    /// Ingress schema version to emit
    #[arg(long, default_value_t = ApiVersion::NetworkingV1)]
    api_version: ApiVersion,

    /// Output format (json or yaml)
    #[arg(long, short, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the manifest; logs go to stderr.
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Config file: {}", cli.file.display());

    let config = load_config(&cli.file)?;
    let overrides = Overrides {
        name: cli.name,
        namespace: cli.namespace,
        ingress_class: cli.ingress_class,
    };
    let config = apply_defaults(config, &overrides);

    info!("Generating ingress manifests");
    info!("  Name:        {}", config.name);
    info!("  Namespace:   {}", config.namespace);
    info!("  API version: {}", cli.api_version);

    let list = build(&config, cli.api_version)?;
    let out = render(&list, cli.output)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(out.as_bytes())
        .context("could not write ingress list to stdout")?;
    stdout.flush().context("could not flush stdout")?;

    info!("Wrote {} ingress resource(s)", list.items.len());
    Ok(())
}

fn main() {
    let cli = Cli::parse_from(args::normalize_legacy_flags(std::env::args_os()));
    init_logging(cli.log_json);

    if let Err(e) = run(cli) {
        let message = failure_message(&e);
        error!(error = %message, "ingress generation failed");
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

/// Full cause chain on one line, e.g. `could not read config x: No such file`.
fn failure_message(e: &anyhow::Error) -> String {
    format!("{:#}", e)
}
