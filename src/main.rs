//! k8s-hello: a web server meant to be deployed inside a Kubernetes cluster.
//!
//! This is the application entry point. It parses command line flags, loads the
//! optional TOML configuration, initializes tracing and hands over to the server.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use k8s_hello::config::{parse_duration, AppConfig, ConfigOverrides};

/// k8s-hello: showcase Kubernetes health checks
///
/// Every flag can also be set through its environment variable, which makes it
/// easy to feed pod metadata in through the downward API.
#[derive(Parser, Debug)]
#[command(name = "k8s-hello", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "K8S_HELLO_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address [default: :80]
    #[arg(long, env = "HTTP_ADDR")]
    http: Option<String>,

    /// Time before reporting ready, e.g. "1ms", "5s" [default: 1ms]
    #[arg(long, env = "INIT_DELAY", value_parser = parse_init_delay)]
    init: Option<Duration>,

    /// Namespace inside which the server is deployed [default: unknown]
    #[arg(long, env = "K8S_NAMESPACE")]
    namespace: Option<String>,

    /// Name of node on which the server is running [default: unknown]
    #[arg(long, env = "K8S_NODE")]
    node: Option<String>,

    /// Name of pod in which the server is running [default: unknown]
    #[arg(long, env = "K8S_POD")]
    pod: Option<String>,

    /// Exit code returned when /kill is requested [default: 1]
    #[arg(long, env = "KILL_CODE", allow_negative_numbers = true)]
    killcode: Option<i32>,

    /// Log level filter (e.g., "k8s_hello=debug")
    #[arg(short, long, env = "RUST_LOG")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen: self.http.clone(),
            init_delay: self.init,
            namespace: self.namespace.clone(),
            node: self.node.clone(),
            pod: self.pod.clone(),
            kill_code: self.killcode,
            log_filter: self.log_level.clone(),
        }
    }
}

fn parse_init_delay(value: &str) -> Result<Duration, String> {
    parse_duration(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Priority: CLI/env > config file > defaults
    let config = AppConfig::resolve(args.config.as_deref(), args.overrides())?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_filter()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = &args.config {
        tracing::info!(path = %path.display(), "Loaded configuration file");
    }

    if let Err(e) = k8s_hello::run(config).await {
        tracing::error!(error = %e, "Server failed to start");
        return Err(e.into());
    }

    Ok(())
}
