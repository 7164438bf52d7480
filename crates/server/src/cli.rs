use clap::Parser;
use std::path::PathBuf;

/// Command-line overrides for [`ServerConfig`](crate::ServerConfig).
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "quill-server")]
#[command(about = "Writing-assistant gateway: inline suggestions and document translation")]
#[command(version)]
pub struct Cli {
    /// Address to bind, e.g. 0.0.0.0 or 127.0.0.1.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(long)]
    pub port: Option<u16>,

    /// PEM private key. Serves HTTPS when given with --ssl-certfile.
    #[arg(long)]
    pub ssl_keyfile: Option<PathBuf>,

    /// PEM certificate chain. Serves HTTPS when given with --ssl-keyfile.
    #[arg(long)]
    pub ssl_certfile: Option<PathBuf>,

    /// Path to a config file. If omitted, uses ./quill.{toml,yaml,json} if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}
