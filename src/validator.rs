/// Dead-link checking: one existence probe per distinct href
use std::collections::HashMap;

use log::{debug, info};
use url::Url;

use crate::link_data::Link;

/// Something that can tell whether a URL currently answers successfully.
///
/// Implementations must fold every failure (network error, CORS rejection,
/// timeout, non-2xx status) into `false`.
#[allow(async_fn_in_trait)]
pub trait Prober {
    async fn probe(&self, href: &str) -> bool;
}

/// href -> alive/dead, rebuilt in full on every validation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LivenessMap {
    entries: HashMap<String, bool>,
}

impl LivenessMap {
    pub fn new() -> Self {
        LivenessMap {
            entries: HashMap::new(),
        }
    }

    pub fn record(&mut self, href: String, alive: bool) {
        self.entries.insert(href, alive);
    }

    /// `None` until the href has been probed
    pub fn is_alive(&self, href: &str) -> Option<bool> {
        self.entries.get(href).copied()
    }

    pub fn is_dead(&self, href: &str) -> bool {
        self.is_alive(href) == Some(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dead_count(&self) -> usize {
        self.entries.values().filter(|alive| !**alive).count()
    }
}

/// Only http(s) URLs are worth a network round trip
pub fn is_probeable(href: &str) -> bool {
    Url::parse(href)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Probe each distinct href once, sequentially, in first-appearance order.
///
/// Hrefs that cannot be fetched at all (`mailto:`, `javascript:`, garbage)
/// are recorded as dead without calling the prober. "Could not probe" and
/// "confirmed unreachable" are the same answer here.
pub async fn validate_links<P: Prober>(prober: &P, links: &[Link]) -> LivenessMap {
    let mut liveness = LivenessMap::new();

    for link in links {
        if liveness.is_alive(&link.href).is_some() {
            continue;
        }

        let alive = if is_probeable(&link.href) {
            prober.probe(&link.href).await
        } else {
            false
        };

        debug!("Probed {} -> {}", link.href, if alive { "alive" } else { "dead" });
        liveness.record(link.href.clone(), alive);
    }

    info!(
        "Checked {} distinct links, {} dead",
        liveness.len(),
        liveness.dead_count()
    );

    liveness
}
