use llm::LlmConfig;
use quill::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// PEM private key; TLS is enabled only together with `tls_cert_path`
    #[serde(default)]
    pub tls_key_path: Option<PathBuf>,

    /// PEM certificate chain
    #[serde(default)]
    pub tls_cert_path: Option<PathBuf>,

    /// Maximum request body size in MB (documents arrive base64-encoded)
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Directory holding `{job id}.txt` translation results
    #[serde(default = "default_result_dir")]
    pub result_dir: PathBuf,

    /// JSON Lines file recording served suggestions
    #[serde(default = "default_suggestion_log")]
    pub suggestion_log: PathBuf,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls_key_path: None,
            tls_cert_path: None,
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            result_dir: default_result_dir(),
            suggestion_log: default_suggestion_log(),
            llm: LlmConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `quill.{toml,yaml,json}` file
    /// and `QUILL__*` environment variables
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(None)
    }

    /// Like [`ServerConfig::load`], but reads `path` instead of `quill.*`;
    /// the file must exist
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        // A missing .env is not an error
        let _ = dotenvy::dotenv();

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("quill").required(false),
        };
        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables
            .add_source(config::Environment::with_prefix("QUILL").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Load file and environment, then apply command-line overrides
    pub fn load_with_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = Self::load_from(cli.config.as_deref())?;
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Command-line flags win over every other source
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(key) = &cli.ssl_keyfile {
            self.tls_key_path = Some(key.clone());
        }
        if let Some(cert) = &cli.ssl_certfile {
            self.tls_cert_path = Some(cert.clone());
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_body_size_mb == 0 {
            anyhow::bail!("max_body_size_mb must be at least 1");
        }
        self.llm.validate()?;
        self.pipeline.validate()?;
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Key and certificate paths, only when both are set
    pub fn tls_paths(&self) -> Option<(&Path, &Path)> {
        match (&self.tls_key_path, &self.tls_cert_path) {
            (Some(key), Some(cert)) => Some((key.as_path(), cert.as_path())),
            _ => None,
        }
    }

    /// True when exactly one of the two TLS paths is set
    pub fn tls_incomplete(&self) -> bool {
        self.tls_key_path.is_some() != self.tls_cert_path.is_some()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8999
}

fn default_max_body_size_mb() -> usize {
    32
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_result_dir() -> PathBuf {
    PathBuf::from(store::DEFAULT_RESULT_DIR)
}

fn default_suggestion_log() -> PathBuf {
    PathBuf::from(store::DEFAULT_SUGGESTION_LOG)
}
