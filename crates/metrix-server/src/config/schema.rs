use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::{Result, ServerError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub load: LoadSection,

    #[serde(default)]
    pub synthetic: SyntheticSection,

    #[serde(default)]
    pub buckets: BucketSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            app: AppSection::default(),
            load: LoadSection::default(),
            synthetic: SyntheticSection::default(),
            buckets: BucketSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ServerError::Config(format!("unsupported config version {}", self.version)));
        }
        self.server.validate()?;
        self.load.validate()?;
        self.synthetic.validate()?;
        self.buckets.validate()?;
        Ok(())
    }

    /// Apply `PORT`, `APP_VERSION`, and `APP_ENV` overrides from `lookup`.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|e| ServerError::Config(format!("PORT must be a valid port: {e}")))?;
            let mut addr = self.server.listen_addr()?;
            addr.set_port(port);
            self.server.listen = addr.to_string();
        }
        if let Some(v) = lookup("APP_VERSION") {
            self.app.version = v;
        }
        if let Some(env) = lookup("APP_ENV") {
            self.app.environment = env;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Uptime after which `/ready` reports ready.
    #[serde(default = "default_ready_after_secs")]
    pub ready_after_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            ready_after_secs: default_ready_after_secs(),
        }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| ServerError::Config(format!("server.listen must be a valid SocketAddr: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.ready_after_secs > 3600 {
            return Err(ServerError::Config(
                "server.ready_after_secs must be at most 3600".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_ready_after_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default = "default_app_version")]
    pub version: String,
    #[serde(default = "default_project")]
    pub project: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: default_app_version(),
            project: default_project(),
            environment: default_environment(),
        }
    }
}

fn default_app_version() -> String {
    "5.0.0".into()
}
fn default_project() -> String {
    "monitoring".into()
}
fn default_environment() -> String {
    "production".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadSection {
    #[serde(default = "default_max_intensity")]
    pub max_intensity: u32,
}

impl Default for LoadSection {
    fn default() -> Self {
        Self { max_intensity: default_max_intensity() }
    }
}

impl LoadSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1000).contains(&self.max_intensity) {
            return Err(ServerError::Config(
                "load.max_intensity must be between 1 and 1000".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_intensity() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyntheticSection {
    #[serde(default = "default_max_latency_ms")]
    pub max_latency_ms: u64,
}

impl Default for SyntheticSection {
    fn default() -> Self {
        Self { max_latency_ms: default_max_latency_ms() }
    }
}

impl SyntheticSection {
    pub fn validate(&self) -> Result<()> {
        if self.max_latency_ms > 10_000 {
            return Err(ServerError::Config(
                "synthetic.max_latency_ms must be at most 10000".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_latency_ms() -> u64 {
    40
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BucketSection {
    #[serde(default = "default_http_request_duration")]
    pub http_request_duration: Vec<f64>,
    #[serde(default = "default_load_test_duration")]
    pub load_test_duration: Vec<f64>,
}

impl Default for BucketSection {
    fn default() -> Self {
        Self {
            http_request_duration: default_http_request_duration(),
            load_test_duration: default_load_test_duration(),
        }
    }
}

impl BucketSection {
    pub fn validate(&self) -> Result<()> {
        for (field, bounds) in [
            ("http_request_duration", &self.http_request_duration),
            ("load_test_duration", &self.load_test_duration),
        ] {
            if bounds.iter().any(|b| !b.is_finite()) || bounds.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ServerError::Config(format!(
                    "buckets.{field} must be finite and strictly ascending"
                )));
            }
        }
        Ok(())
    }
}

fn default_http_request_duration() -> Vec<f64> {
    vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0]
}
fn default_load_test_duration() -> Vec<f64> {
    vec![0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0]
}
