//! AutoLot server binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use autolot_server::auth::AuthConfig;
use autolot_server::network::{NetworkConfig, TlsConfig};
use autolot_server::{AppConfig, NetworkModule};

#[derive(Debug, Parser)]
#[command(name = "autolot-server", about = "Multi-tenant dealership backend")]
struct Cli {
    /// Bind address.
    #[arg(long, env = "AUTOLOT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on (0 = OS-assigned).
    #[arg(long, env = "AUTOLOT_PORT", default_value_t = 8080)]
    port: u16,

    /// Symmetric JWT signing secret (min 32 bytes).
    #[arg(long, env = "AUTOLOT_JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Token lifetime in milliseconds.
    #[arg(long, env = "AUTOLOT_JWT_TTL_MS", default_value_t = 86_400_000)]
    jwt_ttl_ms: u64,

    /// Allowed CORS origins ("*" for any).
    #[arg(long, env = "AUTOLOT_CORS_ORIGIN", default_value = "*")]
    cors_origin: Vec<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "AUTOLOT_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// TLS certificate path (enables TLS together with --tls-key).
    #[arg(long, env = "AUTOLOT_TLS_CERT", requires = "tls_key")]
    tls_cert: Option<PathBuf>,

    /// TLS private key path.
    #[arg(long, env = "AUTOLOT_TLS_KEY", requires = "tls_cert")]
    tls_key: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        let tls = match (self.tls_cert, self.tls_key) {
            (Some(cert_path), Some(key_path)) => Some(TlsConfig {
                cert_path,
                key_path,
            }),
            _ => None,
        };

        AppConfig {
            network: NetworkConfig {
                host: self.host,
                port: self.port,
                tls,
                cors_origins: self.cors_origin,
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                ..NetworkConfig::default()
            },
            auth: AuthConfig {
                jwt_secret: self.jwt_secret,
                token_ttl_ms: self.jwt_ttl_ms,
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let mut module =
        NetworkModule::new(config).map_err(|e| anyhow::anyhow!("failed to initialize: {e}"))?;
    let port = module.start().await?;
    info!("AutoLot server listening on port {port}");

    module
        .serve(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
}
