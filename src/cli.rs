use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Extracts OpenGraph metadata from web pages
#[derive(Parser)]
#[command(name = "ogre")]
#[command(version, about = "Fetch pages and structure their OpenGraph metadata", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service (`GET /?url=<page>`)
    Serve {
        /// Config file (TOML); defaults to the per-user config if present
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Port to listen on (overrides PORT and the config file)
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind
        #[arg(long)]
        bind: Option<IpAddr>,
    },
    /// Fetch one page and print its document as JSON
    Extract {
        /// Page to fetch
        url: String,
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Structure HTML from a file (or stdin) without touching the network
    Parse {
        /// HTML file; reads stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Meta property namespace
        #[arg(long, default_value = ogre::meta::OPENGRAPH_PREFIX)]
        prefix: String,
        #[arg(long)]
        pretty: bool,
    },
}
