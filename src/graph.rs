use serde::{Deserialize, Serialize};

/// Separator between a namespaced property's parent and child (`image:width`).
pub const KEY_SEPARATOR: char = ':';

/// One image or video descriptor assembled from `image:*` / `video:*` properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_url: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl Media {
    /// An entry is complete once all five attributes have been supplied.
    pub fn is_complete(&self) -> bool {
        self.height.is_some()
            && self.secure_url.is_some()
            && self.media_type.is_some()
            && self.url.is_some()
            && self.width.is_some()
    }

    pub fn set(&mut self, field: MediaField, content: String) {
        let slot = match field {
            MediaField::Url => &mut self.url,
            MediaField::SecureUrl => &mut self.secure_url,
            MediaField::Type => &mut self.media_type,
            MediaField::Width => &mut self.width,
            MediaField::Height => &mut self.height,
        };
        *slot = non_empty(content);
    }
}

/// Empty content is indistinguishable from an absent value.
fn non_empty(content: String) -> Option<String> {
    Some(content).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaField {
    Url,
    SecureUrl,
    Type,
    Width,
    Height,
}

impl MediaField {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "url" => Some(Self::Url),
            "secure_url" => Some(Self::SecureUrl),
            "type" => Some(Self::Type),
            "width" => Some(Self::Width),
            "height" => Some(Self::Height),
            _ => None,
        }
    }
}

/// Structured page document built from a flat OpenGraph property stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "url", skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Media>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Media>,
}

impl GraphData {
    /// Folds an ordered `(property, content)` stream into a document.
    ///
    /// Never fails: properties it does not recognise are dropped. Media
    /// sub-properties attach to the first entry of their kind that is still
    /// missing an attribute; once every entry is complete the next
    /// sub-property opens a new one.
    pub fn reduce<I, P, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<String>,
    {
        let mut data = Self::default();
        for (property, content) in pairs {
            data.apply(property.as_ref(), content.into());
        }
        data
    }

    /// Applies a single property to the document.
    pub fn apply(&mut self, property: &str, content: String) {
        match property {
            "site_name" => self.site_name = non_empty(content),
            "title" => self.title = non_empty(content),
            "type" => self.page_type = non_empty(content),
            "description" => self.description = non_empty(content),
            "url" => self.canonical_url = non_empty(content),
            "image" => self.incomplete_media(MediaKind::Image).set(MediaField::Url, content),
            _ => {
                let Some((parent, child)) = property.split_once(KEY_SEPARATOR) else { return; };
                let (Some(kind), Some(field)) = (MediaKind::parse(parent), MediaField::parse(child)) else { return; };
                self.incomplete_media(kind).set(field, content);
            }
        }
    }

    /// First incomplete entry of `kind`, appending a fresh one if none is left.
    fn incomplete_media(&mut self, kind: MediaKind) -> &mut Media {
        let list = match kind {
            MediaKind::Image => &mut self.images,
            MediaKind::Video => &mut self.videos,
        };
        let idx = match list.iter().position(|m| !m.is_complete()) {
            Some(i) => i,
            None => {
                list.push(Media::default());
                list.len() - 1
            }
        };
        &mut list[idx]
    }
}
