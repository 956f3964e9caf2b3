/// Link filtering and search

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::link_data::Link;
use crate::validator::LivenessMap;

/// Which subset of the scraped links is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkFilter {
    #[default]
    All,
    Backlinks,
    Regular,
    Favorites,
    Dead,
}

impl LinkFilter {
    pub const ALL: [LinkFilter; 5] = [
        LinkFilter::All,
        LinkFilter::Backlinks,
        LinkFilter::Regular,
        LinkFilter::Favorites,
        LinkFilter::Dead,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LinkFilter::All => "All",
            LinkFilter::Backlinks => "Backlinks",
            LinkFilter::Regular => "Regular",
            LinkFilter::Favorites => "Favorites",
            LinkFilter::Dead => "Dead",
        }
    }

    pub fn matches(&self, link: &Link, favorites: &BTreeSet<String>, liveness: &LivenessMap) -> bool {
        match self {
            LinkFilter::All => true,
            LinkFilter::Backlinks => link.is_backlink,
            LinkFilter::Regular => !link.is_backlink,
            LinkFilter::Favorites => favorites.contains(&link.href),
            LinkFilter::Dead => liveness.is_dead(&link.href),
        }
    }
}

/// Case-insensitive substring match on text or href; empty term matches everything
pub fn matches_search(link: &Link, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let term = term.to_lowercase();
    link.text.to_lowercase().contains(&term) || link.href.to_lowercase().contains(&term)
}

/// Apply the filter, then the search term, keeping the original order
pub fn filter_links(
    links: &[Link],
    filter: LinkFilter,
    search: &str,
    favorites: &BTreeSet<String>,
    liveness: &LivenessMap,
) -> Vec<Link> {
    links
        .iter()
        .filter(|link| filter.matches(link, favorites, liveness))
        .filter(|link| matches_search(link, search))
        .cloned()
        .collect()
}

/// Per-filter totals for the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkCounts {
    pub total: usize,
    pub backlinks: usize,
    pub regular: usize,
    pub favorites: usize,
    pub dead: usize,
}

impl LinkCounts {
    pub fn of(links: &[Link], favorites: &BTreeSet<String>, liveness: &LivenessMap) -> LinkCounts {
        links.iter().fold(LinkCounts::default(), |mut counts, link| {
            counts.total += 1;
            if link.is_backlink {
                counts.backlinks += 1;
            } else {
                counts.regular += 1;
            }
            if favorites.contains(&link.href) {
                counts.favorites += 1;
            }
            if liveness.is_dead(&link.href) {
                counts.dead += 1;
            }
            counts
        })
    }

    pub fn for_filter(&self, filter: LinkFilter) -> usize {
        match filter {
            LinkFilter::All => self.total,
            LinkFilter::Backlinks => self.backlinks,
            LinkFilter::Regular => self.regular,
            LinkFilter::Favorites => self.favorites,
            LinkFilter::Dead => self.dead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_link(href: &str, text: &str, is_backlink: bool) -> Link {
        Link::new(href.to_string(), text.to_string(), is_backlink)
    }

    fn sample_links() -> Vec<Link> {
        vec![
            create_test_link("https://a.com/prev", "Previous page", true),
            create_test_link("https://b.com", "Rust Book", false),
            create_test_link("https://c.com/docs", "", false),
            create_test_link("https://b.com", "Rust Book again", false),
        ]
    }

    #[test]
    fn test_filter_all() {
        let links = sample_links();
        let filtered = filter_links(&links, LinkFilter::All, "", &BTreeSet::new(), &LivenessMap::new());
        assert_eq!(filtered, links);
    }

    #[test]
    fn test_filter_backlinks_and_regular() {
        let links = sample_links();
        let none = BTreeSet::new();
        let liveness = LivenessMap::new();

        let backlinks = filter_links(&links, LinkFilter::Backlinks, "", &none, &liveness);
        assert_eq!(backlinks.len(), 1);
        assert_eq!(backlinks[0].href, "https://a.com/prev");

        let regular = filter_links(&links, LinkFilter::Regular, "", &none, &liveness);
        assert_eq!(regular.len(), 3);
        assert!(regular.iter().all(|l| !l.is_backlink));
    }

    #[test]
    fn test_filter_favorites_matches_every_duplicate() {
        let links = sample_links();
        let favorites: BTreeSet<String> = ["https://b.com".to_string()].into_iter().collect();

        let filtered = filter_links(&links, LinkFilter::Favorites, "", &favorites, &LivenessMap::new());

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|l| l.href == "https://b.com"));
    }

    #[test]
    fn test_filter_dead_ignores_unchecked() {
        let links = sample_links();
        let mut liveness = LivenessMap::new();
        liveness.record("https://c.com/docs".to_string(), false);
        liveness.record("https://b.com".to_string(), true);

        let filtered = filter_links(&links, LinkFilter::Dead, "", &BTreeSet::new(), &liveness);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].href, "https://c.com/docs");
    }

    #[test]
    fn test_search_is_case_insensitive_on_text_and_href() {
        let links = sample_links();
        let none = BTreeSet::new();
        let liveness = LivenessMap::new();

        let by_text = filter_links(&links, LinkFilter::All, "RUST", &none, &liveness);
        assert_eq!(by_text.len(), 2);

        let by_href = filter_links(&links, LinkFilter::All, "C.COM/DOCS", &none, &liveness);
        assert_eq!(by_href.len(), 1);

        let nothing = filter_links(&links, LinkFilter::All, "python", &none, &liveness);
        assert!(nothing.is_empty());
    }

    #[test]
    fn test_filter_then_search() {
        let links = sample_links();
        let filtered = filter_links(
            &links,
            LinkFilter::Backlinks,
            "rust",
            &BTreeSet::new(),
            &LivenessMap::new(),
        );
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_empty_search_matches_all() {
        let link = create_test_link("https://a.com", "A", false);
        assert!(matches_search(&link, ""));
    }

    #[test]
    fn test_whitespace_search_is_literal() {
        let spaced = create_test_link("https://a.com", "Rust Book", false);
        let plain = create_test_link("https://b.com", "Rust", false);

        assert!(matches_search(&spaced, " "));
        assert!(!matches_search(&plain, " "));
    }

    #[test]
    fn test_link_counts() {
        let links = sample_links();
        let favorites: BTreeSet<String> = ["https://a.com/prev".to_string()].into_iter().collect();
        let mut liveness = LivenessMap::new();
        liveness.record("https://b.com".to_string(), false);

        let counts = LinkCounts::of(&links, &favorites, &liveness);

        assert_eq!(counts.total, 4);
        assert_eq!(counts.backlinks, 1);
        assert_eq!(counts.regular, 3);
        assert_eq!(counts.favorites, 1);
        assert_eq!(counts.dead, 2);
        assert_eq!(counts.for_filter(LinkFilter::Dead), 2);
    }

    #[test]
    fn test_filter_serializes_lowercase() {
        let json = serde_json::to_string(&LinkFilter::Backlinks).unwrap();
        assert_eq!(json, "\"backlinks\"");
    }
}
