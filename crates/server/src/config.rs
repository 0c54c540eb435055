use matchers::{ImageMatcherChoice, TargetRaterChoice};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind address for both APIs
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Management API port
    #[serde(default = "default_vws_port")]
    pub vws_port: u16,

    /// Query API port
    #[serde(default = "default_vwq_port")]
    pub vwq_port: u16,

    /// Seconds each new target version spends in the processing state.
    /// The real service is not deterministic about this.
    #[serde(default = "default_processing_time_seconds")]
    pub processing_time_seconds: f64,

    /// Seconds after a deletion during which the query API still reacts to
    /// the deleted target with its transient error.
    #[serde(default = "default_query_recognizes_deletion_seconds")]
    pub query_recognizes_deletion_seconds: f64,

    /// Matcher used by the duplicates endpoint
    #[serde(default)]
    pub duplicates_image_matcher: ImageMatcherChoice,

    /// Matcher used by the query endpoint
    #[serde(default = "default_query_image_matcher")]
    pub query_image_matcher: ImageMatcherChoice,

    /// Rater assigned to new target versions
    #[serde(default)]
    pub target_rater: TargetRaterChoice,

    /// Artificial response latency in seconds; zero disables it
    #[serde(default)]
    pub response_delay_seconds: f64,

    /// Deadline the caller under test is assumed to run with. When the
    /// configured delay exceeds it the emulator fails with a gateway
    /// timeout instead of answering late.
    #[serde(default)]
    pub client_timeout_seconds: Option<f64>,

    /// Log filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            vws_port: default_vws_port(),
            vwq_port: default_vwq_port(),
            processing_time_seconds: default_processing_time_seconds(),
            query_recognizes_deletion_seconds: default_query_recognizes_deletion_seconds(),
            duplicates_image_matcher: ImageMatcherChoice::default(),
            query_image_matcher: default_query_image_matcher(),
            target_rater: TargetRaterChoice::default(),
            response_delay_seconds: 0.0,
            client_timeout_seconds: None,
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional `vumock` file and `VUMOCK__`
    /// environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("vumock").required(false))
            .add_source(config::Environment::with_prefix("VUMOCK").separator("__"));
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn vws_socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.bind_addr, self.vws_port).parse()?)
    }

    pub fn vwq_socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.bind_addr, self.vwq_port).parse()?)
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_vws_port() -> u16 {
    5005
}

fn default_vwq_port() -> u16 {
    5006
}

fn default_processing_time_seconds() -> f64 {
    0.5
}

fn default_query_recognizes_deletion_seconds() -> f64 {
    0.2
}

fn default_query_image_matcher() -> ImageMatcherChoice {
    ImageMatcherChoice::Exact
}

fn default_log_level() -> String {
    "info".to_string()
}
