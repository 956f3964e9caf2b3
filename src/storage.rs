/// Storage serialization utilities for chrome.storage.local

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::filter::LinkFilter;
use crate::link_data::Link;

/// Key under which `StorageData` lives in chrome.storage.local
pub const STORAGE_KEY: &str = "link_saver_data";

/// A saved copy of a link list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub page_url: String,
    pub timestamp: f64,
    pub links: Vec<Link>,
}

/// User settings that survive popup restarts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub check_links: bool,
    pub default_filter: LinkFilter,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            dark_mode: false,
            check_links: true,
            default_filter: LinkFilter::All,
        }
    }
}

/// Root storage structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageData {
    pub favorites: BTreeSet<String>,
    pub snapshots: Vec<LinkSnapshot>,
    pub preferences: Preferences,
}

impl StorageData {
    pub fn new() -> Self {
        StorageData {
            favorites: BTreeSet::new(),
            snapshots: Vec::new(),
            preferences: Preferences::default(),
        }
    }

    pub fn is_favorite(&self, href: &str) -> bool {
        self.favorites.contains(href)
    }

    /// Flip membership; returns whether the href is now a favorite
    pub fn toggle_favorite(&mut self, href: &str) -> bool {
        if self.favorites.remove(href) {
            false
        } else {
            self.favorites.insert(href.to_string());
            true
        }
    }

    pub fn add_snapshot(&mut self, snapshot: LinkSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn remove_snapshot(&mut self, snapshot_id: &str) -> bool {
        let original_len = self.snapshots.len();
        self.snapshots.retain(|s| s.id != snapshot_id);
        self.snapshots.len() < original_len
    }

    pub fn get_snapshot(&self, snapshot_id: &str) -> Option<&LinkSnapshot> {
        self.snapshots.iter().find(|s| s.id == snapshot_id)
    }

    pub fn rename_snapshot(&mut self, snapshot_id: &str, new_name: String) -> bool {
        self.snapshots
            .iter_mut()
            .find(|s| s.id == snapshot_id)
            .map(|snapshot| {
                snapshot.name = new_name;
            })
            .is_some()
    }
}

impl Default for StorageData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_snapshot(id: &str, name: &str) -> LinkSnapshot {
        LinkSnapshot {
            id: id.to_string(),
            name: name.to_string(),
            page_url: "https://example.com".to_string(),
            timestamp: 1698508200000.0,
            links: vec![Link::new(
                "https://google.com".to_string(),
                "Google".to_string(),
                false,
            )],
        }
    }

    #[test]
    fn test_storage_data_new() {
        let storage = StorageData::new();
        assert!(storage.favorites.is_empty());
        assert!(storage.snapshots.is_empty());
        assert!(storage.preferences.check_links);
    }

    #[test]
    fn test_toggle_favorite() {
        let mut storage = StorageData::new();

        assert!(storage.toggle_favorite("https://a.com"));
        assert!(storage.is_favorite("https://a.com"));

        assert!(!storage.toggle_favorite("https://a.com"));
        assert!(!storage.is_favorite("https://a.com"));
    }

    #[test]
    fn test_add_and_get_snapshot() {
        let mut storage = StorageData::new();
        storage.add_snapshot(create_test_snapshot("snap-1", "Test Snapshot"));

        let snapshot = storage.get_snapshot("snap-1");

        assert!(snapshot.is_some());
        assert_eq!(snapshot.unwrap().name, "Test Snapshot");
        assert!(storage.get_snapshot("snap-2").is_none());
    }

    #[test]
    fn test_remove_snapshot() {
        let mut storage = StorageData::new();
        storage.add_snapshot(create_test_snapshot("snap-1", "Snapshot 1"));
        storage.add_snapshot(create_test_snapshot("snap-2", "Snapshot 2"));

        assert!(storage.remove_snapshot("snap-1"));
        assert_eq!(storage.snapshots.len(), 1);
        assert_eq!(storage.snapshots[0].id, "snap-2");

        assert!(!storage.remove_snapshot("nonexistent"));
        assert_eq!(storage.snapshots.len(), 1);
    }

    #[test]
    fn test_rename_snapshot() {
        let mut storage = StorageData::new();
        storage.add_snapshot(create_test_snapshot("snap-1", "Old Name"));

        assert!(storage.rename_snapshot("snap-1", "New Name".to_string()));
        assert_eq!(storage.snapshots[0].name, "New Name");
        assert!(!storage.rename_snapshot("missing", "x".to_string()));
    }

    #[test]
    fn test_serialization() {
        let mut storage = StorageData::new();
        storage.toggle_favorite("https://a.com");
        storage.add_snapshot(create_test_snapshot("snap-1", "Test"));
        storage.preferences.dark_mode = true;

        let json = serde_json::to_string(&storage).unwrap();
        let deserialized: StorageData = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, storage);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let storage: StorageData = serde_json::from_str(r#"{"favorites":["https://a.com"]}"#).unwrap();

        assert!(storage.is_favorite("https://a.com"));
        assert!(storage.snapshots.is_empty());
        assert_eq!(storage.preferences, Preferences::default());
    }
}
