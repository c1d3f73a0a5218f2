use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::meta::OPENGRAPH_PREFIX;

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub bind: IpAddr,
    pub port: u16,
    /// Meta property namespace to extract (`og` for OpenGraph).
    pub prefix: String,
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_ms: u64,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            prefix: OPENGRAPH_PREFIX.to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_body_bytes: 5 * 1024 * 1024,
            user_agent: concat!("ogre/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then environment overrides.
    ///
    /// An explicit `path` must exist; otherwise the per-user config file is
    /// read only when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_path().filter(|p| p.is_file()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// Overrides from `PORT` and `OGRE_*` variables. Values that do not parse
    /// are logged and skipped.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from(&lookup, "PORT", &mut self.port);
        override_from(&lookup, "OGRE_BIND", &mut self.bind);
        override_from(&lookup, "OGRE_FETCH_TIMEOUT_MS", &mut self.fetch.timeout_ms);
        override_from(&lookup, "OGRE_MAX_BODY_BYTES", &mut self.fetch.max_body_bytes);
        if let Some(prefix) = lookup("OGRE_PREFIX").filter(|s| !s.trim().is_empty()) {
            self.prefix = prefix.trim().to_string();
        }
        if let Some(ua) = lookup("OGRE_USER_AGENT").filter(|s| !s.trim().is_empty()) {
            self.fetch.user_agent = ua;
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

fn override_from<T, F>(lookup: &F, key: &str, slot: &mut T)
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else { return; };
    let raw = raw.trim();
    if raw.is_empty() { return; }
    match raw.parse() {
        Ok(v) => *slot = v,
        Err(_) => warn!("ignoring {}={:?}: not a valid value", key, raw),
    }
}

/// Per-user config file location (`<config dir>/ogre/config.toml` on Linux).
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ogre").map(|d| d.config_dir().join("config.toml"))
}
