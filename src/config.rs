//! Configuration loading and constants.
//!
//! Settings are resolved in three layers: built-in defaults, an optional TOML
//! file, then command-line flags (or their environment variables). `AppConfig`
//! is the root configuration struct containing all settings.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

// =============================================================================
// Defaults
// =============================================================================

/// Listen address used when none is configured (all interfaces, port 80)
pub const DEFAULT_LISTEN_ADDR: &str = ":80";

/// Delay before the server first reports itself ready
pub const DEFAULT_INIT_DELAY: Duration = Duration::from_millis(1);

/// Placeholder for deployment labels that were not supplied
pub const DEFAULT_LABEL: &str = "unknown";

/// Exit code used by the kill endpoint
pub const DEFAULT_KILL_CODE: i32 = 1;

/// Default log filter when neither the CLI, RUST_LOG nor the config file set one
pub const DEFAULT_LOG_FILTER: &str = "k8s_hello=info";

/// Host substituted for an empty host in `:port` style listen addresses
const UNSPECIFIED_HOST: &str = "0.0.0.0";

/// Cache-Control value for probe and control endpoints. Readiness answers must
/// never be served from an intermediate cache.
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Startup readiness behaviour
    #[serde(default)]
    pub readiness: ReadinessConfig,
    /// Deployment labels echoed by the index page
    #[serde(default)]
    pub kubernetes: KubernetesConfig,
    #[serde(default)]
    pub kill: KillConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Listen address: `host:port`, `:port` or `[v6]:port`
    #[serde(default = "HttpConfig::default_listen")]
    pub listen: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: Self::default_listen(),
        }
    }
}

impl HttpConfig {
    fn default_listen() -> String {
        DEFAULT_LISTEN_ADDR.to_string()
    }

    /// Resolve the listen address to a socket address.
    ///
    /// An empty host (`:8080`) binds every IPv4 interface. Hostnames go through
    /// the system resolver and the first result wins.
    pub async fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let listen = self.listen.trim();
        let candidate = match listen.strip_prefix(':') {
            Some(port) => format!("{UNSPECIFIED_HOST}:{port}"),
            None => listen.to_string(),
        };

        let invalid = |reason: String| ConfigError::InvalidListenAddr {
            addr: self.listen.clone(),
            reason,
        };

        if let Ok(addr) = candidate.parse::<SocketAddr>() {
            return Ok(addr);
        }

        tokio::net::lookup_host(candidate)
            .await
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no addresses resolved".to_string()))
    }
}

/// Readiness configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadinessConfig {
    /// Time between process start and the first "ready" report, e.g. "1ms" or "5s"
    #[serde(
        default = "ReadinessConfig::default_init_delay",
        deserialize_with = "deserialize_duration"
    )]
    pub init_delay: Duration,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            init_delay: Self::default_init_delay(),
        }
    }
}

impl ReadinessConfig {
    fn default_init_delay() -> Duration {
        DEFAULT_INIT_DELAY
    }
}

/// Static labels describing where the server is deployed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KubernetesConfig {
    #[serde(default = "KubernetesConfig::default_label")]
    pub namespace: String,
    #[serde(default = "KubernetesConfig::default_label")]
    pub node: String,
    #[serde(default = "KubernetesConfig::default_label")]
    pub pod: String,
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            namespace: Self::default_label(),
            node: Self::default_label(),
            pod: Self::default_label(),
        }
    }
}

impl KubernetesConfig {
    fn default_label() -> String {
        DEFAULT_LABEL.to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KillConfig {
    /// Process exit code returned when `/kill` is requested
    #[serde(default = "KillConfig::default_exit_code")]
    pub exit_code: i32,
}

impl Default for KillConfig {
    fn default() -> Self {
        Self {
            exit_code: Self::default_exit_code(),
        }
    }
}

impl KillConfig {
    fn default_exit_code() -> i32 {
        DEFAULT_KILL_CODE
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Tracing filter directive (e.g. "k8s_hello=debug")
    pub filter: Option<String>,
}

/// Values supplied on the command line or through the environment.
///
/// Every field that is `Some` replaces the corresponding file/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<String>,
    pub init_delay: Option<Duration>,
    pub namespace: Option<String>,
    pub node: Option<String>,
    pub pod: Option<String>,
    pub kill_code: Option<i32>,
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Build the effective configuration: defaults, then the optional file,
    /// then overrides.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(listen) = overrides.listen {
            self.http.listen = listen;
        }
        if let Some(delay) = overrides.init_delay {
            self.readiness.init_delay = delay;
        }
        if let Some(namespace) = overrides.namespace {
            self.kubernetes.namespace = namespace;
        }
        if let Some(node) = overrides.node {
            self.kubernetes.node = node;
        }
        if let Some(pod) = overrides.pod {
            self.kubernetes.pod = pod;
        }
        if let Some(code) = overrides.kill_code {
            self.kill.exit_code = code;
        }
        if let Some(filter) = overrides.log_filter {
            self.logging.filter = Some(filter);
        }
    }

    /// Effective tracing filter.
    pub fn log_filter(&self) -> &str {
        self.logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

/// Parse a human-readable duration such as "1ms", "5s" or "1m 30s".
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidDuration {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_duration(&value).map_err(serde::de::Error::custom)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },
    #[error("Invalid listen address '{addr}': {reason}")]
    InvalidListenAddr { addr: String, reason: String },
}
