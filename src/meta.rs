//! Meta tag scanning - pulls `<meta property=... content=...>` pairs out of fetched markup

use regex::Regex;
use std::sync::OnceLock;

use crate::graph::KEY_SEPARATOR;

/// Default namespace for OpenGraph properties (`og:title`, `og:image:width`).
pub const OPENGRAPH_PREFIX: &str = "og";

/// One property from the page, with its namespace prefix already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaProperty {
    pub property: String,
    pub content: String,
}

fn meta_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Quoted values may contain `>`. An unmatched quote in an unquoted value
    // (`content=it's`) runs on to the next quote and merges the tags between.
    RE.get_or_init(|| Regex::new(r#"(?i)<meta\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#).expect("meta tag pattern"))
}

fn attribute_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)([a-z_][-a-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
            .expect("attribute pattern")
    })
}

/// Extracts every meta property under `prefix`, in document order.
///
/// The key comes from `property`, falling back to `name`. Tags without a
/// `content` attribute are skipped.
pub fn extract_prefix(html: &str, prefix: &str) -> Vec<MetaProperty> {
    let mut out = Vec::new();
    for tag in meta_tag_re().captures_iter(html) {
        let mut property = None;
        let mut name = None;
        let mut content = None;
        for attr in attribute_re().captures_iter(&tag[1]) {
            let value = attr.get(2).or_else(|| attr.get(3)).or_else(|| attr.get(4)).map(|m| m.as_str());
            let Some(value) = value else { continue; };
            match attr[1].to_ascii_lowercase().as_str() {
                "property" if property.is_none() => property = Some(value),
                "name" if name.is_none() => name = Some(value),
                "content" if content.is_none() => content = Some(value),
                _ => {}
            }
        }
        let (Some(key), Some(content)) = (property.or(name), content) else { continue; };
        if let Some(stripped) = strip_prefix(key.trim(), prefix) {
            out.push(MetaProperty { property: stripped.to_string(), content: html_escape::decode_html_entities(content).into_owned() });
        }
    }
    out
}

fn strip_prefix<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?.strip_prefix(KEY_SEPARATOR)
}
