pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod meta;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::{Config, FetchConfig};
    pub use crate::error::Error;
    pub use crate::fetch::{HttpFetcher, PageFetcher};
    pub use crate::graph::{GraphData, Media, MediaKind};
    pub use crate::meta::MetaProperty;
    pub use crate::Ogre;
}

use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::graph::GraphData;

/// Async library entry point. Owns a page fetcher and the meta prefix to extract.
pub struct Ogre {
    fetcher: Arc<dyn PageFetcher>,
    prefix: String,
}

impl Ogre {
    /// Build with the HTTP fetcher described by `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self, Error> {
        let fetcher = HttpFetcher::new(&cfg.fetch)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), cfg.prefix.clone()))
    }

    /// Build around any fetcher (tests, caches, offline sources).
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, prefix: impl Into<String>) -> Self {
        Self { fetcher, prefix: prefix.into() }
    }

    /// Fetch `url` and structure its meta properties.
    pub async fn extract(&self, url: &str) -> Result<GraphData, Error> {
        let html = self.fetcher.fetch(url).await?;
        Ok(self.structure_html(&html))
    }

    /// Tokenize and reduce markup that is already in hand.
    pub fn structure_html(&self, html: &str) -> GraphData {
        structure_html(html, &self.prefix)
    }
}

/// Free-standing form of [`Ogre::structure_html`].
pub fn structure_html(html: &str, prefix: &str) -> GraphData {
    let props = meta::extract_prefix(html, prefix);
    debug!("found {} `{}` properties", props.len(), prefix);
    GraphData::reduce(props.into_iter().map(|m| (m.property, m.content)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_html_uses_the_configured_prefix() {
        let html = r#"<meta property="og:title" content="og title"><meta property="al:title" content="al title">"#;
        assert_eq!(structure_html(html, "og").title.as_deref(), Some("og title"));
        assert_eq!(structure_html(html, "al").title.as_deref(), Some("al title"));
        assert_eq!(structure_html(html, "twitter"), GraphData::default());
    }
}
