/// Data structures for Link Saver
use serde::{Deserialize, Serialize};

/// `rel` values that mark an anchor as a navigation-back reference
pub const BACKLINK_RELS: [&str; 2] = ["prev", "back"];

/// An anchor as reported by the injected page script, before any cleanup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawAnchor {
    pub href: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rel: String,
}

/// A link scraped from the active page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub href: String,
    pub text: String,
    pub is_backlink: bool,
}

impl Link {
    pub fn new(href: String, text: String, is_backlink: bool) -> Link {
        Link {
            href,
            text,
            is_backlink,
        }
    }

    /// Label shown to the user; falls back to the href when the anchor has no text
    pub fn label(&self) -> &str {
        if self.text.is_empty() {
            &self.href
        } else {
            &self.text
        }
    }

    pub fn kind(&self) -> &'static str {
        if self.is_backlink {
            "Backlink"
        } else {
            "Regular link"
        }
    }
}

impl From<RawAnchor> for Link {
    fn from(anchor: RawAnchor) -> Link {
        let is_backlink = is_backlink_rel(&anchor.rel);
        Link::new(anchor.href, anchor.text.trim().to_string(), is_backlink)
    }
}

/// Exact, case-sensitive match against the whole `rel` attribute
pub fn is_backlink_rel(rel: &str) -> bool {
    BACKLINK_RELS.contains(&rel)
}
