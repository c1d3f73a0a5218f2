mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use ogre::config::Config;
use ogre::graph::GraphData;
use ogre::Ogre;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { config, port, bind } => {
            let mut cfg = Config::load(config.as_deref())?;
            if let Some(port) = port { cfg.port = port; }
            if let Some(bind) = bind { cfg.bind = bind; }
            serve(cfg).await
        }
        Commands::Extract { url, config, pretty } => {
            let cfg = Config::load(config.as_deref())?;
            let service = Ogre::from_config(&cfg)?;
            let data = service.extract(&url).await?;
            print_json(&data, pretty)
        }
        Commands::Parse { file, prefix, pretty } => {
            let html = match file.as_deref() {
                Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read {}", p.display()))?,
                _ => std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?,
            };
            print_json(&ogre::structure_html(&html, &prefix), pretty)
        }
    }
}

async fn serve(cfg: Config) -> Result<()> {
    info!("Starting ogre v{}", env!("CARGO_PKG_VERSION"));
    let service = Ogre::from_config(&cfg)?;
    let app = ogre::api::router(Arc::new(service));

    let addr = cfg.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("listening on http://{} (prefix `{}`)", addr, cfg.prefix);
    axum::serve(listener, app).await.context("server error")
}

fn print_json(data: &GraphData, pretty: bool) -> Result<()> {
    let out = if pretty { serde_json::to_string_pretty(data)? } else { serde_json::to_string(data)? };
    println!("{}", out);
    Ok(())
}
