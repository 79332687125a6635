use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use saucier::{OpenRouterGenerator, ProviderConfig};
use saucier_server::{app, AppState};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// The address and optionally port to bind to
    #[clap(long, default_value = "0.0.0.0:3000")]
    address: String,

    /// Whether to use HTTPS / TLS
    #[clap(long)]
    tls: bool,

    /// Path to the PEM certificate chain, used with --tls
    #[clap(long, default_value = "/etc/letsencrypt/live/saucier/fullchain.pem")]
    tls_cert: String,

    /// Path to the PEM private key, used with --tls
    #[clap(long, default_value = "/etc/letsencrypt/live/saucier/privkey.pem")]
    tls_key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    // initialize tracing
    let file_appender = tracing_appender::rolling::daily(
        if std::fs::exists("/app")? {
            "/app/data/logs".into()
        } else {
            std::env::current_dir()?
        },
        "access.log",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args = Args::parse();

    // Provider settings are read once and shared with every request
    let config = ProviderConfig::from_env().context("Loading provider configuration")?;
    if !config.has_api_key() {
        tracing::warn!("OPENROUTER_API_KEY is not set, recipe generation will fail until it is");
    }
    let generator = OpenRouterGenerator::new(&config).context("Building the provider client")?;

    // build our application with a route
    let app = app(AppState {
        config,
        generator: Arc::new(generator),
    });

    // In development, use HTTP. In production, use HTTPS.
    if args.tls {
        rustls::crypto::ring::default_provider()
            .install_default()
            .expect("Failed to install rustls crypto provider");
        let tls_config =
            axum_server::tls_rustls::RustlsConfig::from_pem_file(&args.tls_cert, &args.tls_key)
                .await
                .context("Loading TLS certificate")?;

        let addr = args.address.parse()?;
        tracing::info!("Listening on {}", addr);
        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .context("Starting TLS server")?;
    } else {
        let listener = tokio::net::TcpListener::bind(args.address).await?;
        axum::serve(listener, app).await?;
    }
    Ok(())
}
