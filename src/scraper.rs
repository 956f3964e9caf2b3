/// Turns the anchor payload returned by the page script into links

use log::{info, warn};
use serde::Deserialize;

use crate::error::Result;
use crate::link_data::{Link, RawAnchor};

/// What the injected page script hands back for the active tab
#[derive(Debug, Deserialize)]
pub struct PagePayload {
    #[serde(default)]
    pub url: String,
    pub anchors: Vec<RawAnchor>,
}

/// Convert anchors to links, keeping document order and duplicates
pub fn links_from_anchors(anchors: Vec<RawAnchor>) -> Vec<Link> {
    anchors.into_iter().map(Link::from).collect()
}

/// Page URL and links for a scrape attempt.
///
/// A tab that could not be read (privileged page, injection refused) yields
/// no links; the caller shows the empty state and does not retry on its own.
pub fn links_from_payload(payload: Result<PagePayload>) -> (String, Vec<Link>) {
    match payload {
        Ok(payload) => {
            let links = links_from_anchors(payload.anchors);
            info!("Scraped {} links from {}", links.len(), payload.url);
            (payload.url, links)
        }
        Err(e) => {
            warn!("Could not scrape active tab: {}", e);
            (String::new(), Vec::new())
        }
    }
}
