/// Popup state container.
///
/// All popup state lives in one `PopupState` value and every change goes
/// through `PopupAction`, so the UI renders from a single owned snapshot.

use std::rc::Rc;

use yew::prelude::*;

use crate::filter::{LinkCounts, LinkFilter, filter_links};
use crate::link_data::Link;
use crate::storage::{LinkSnapshot, StorageData};
use crate::validator::LivenessMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    /// Nothing to show: the page had no anchors or could not be scraped
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Links,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

pub enum PopupAction {
    LinksLoaded {
        generation: u32,
        page_url: String,
        links: Vec<Link>,
    },
    Retry,
    LivenessStarted {
        generation: u32,
    },
    LivenessComputed {
        generation: u32,
        liveness: LivenessMap,
    },
    SetFilter(LinkFilter),
    SetSearch(String),
    ToggleFavorite(String),
    StorageLoaded(StorageData),
    SaveSnapshot(LinkSnapshot),
    DeleteSnapshot(String),
    RenameSnapshot {
        id: String,
        name: String,
    },
    SetDefaultFilter(LinkFilter),
    ToggleDarkMode,
    ToggleCheckLinks,
    ShowView(View),
    Notify(Notice),
    DismissNotice,
}

impl PopupAction {
    /// Whether applying this action changes persisted data
    fn edits_storage(&self) -> bool {
        matches!(
            self,
            PopupAction::ToggleFavorite(_)
                | PopupAction::SaveSnapshot(_)
                | PopupAction::DeleteSnapshot(_)
                | PopupAction::RenameSnapshot { .. }
                | PopupAction::SetDefaultFilter(_)
                | PopupAction::ToggleDarkMode
                | PopupAction::ToggleCheckLinks
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub phase: LoadPhase,
    pub page_url: String,
    pub links: Vec<Link>,
    pub liveness: LivenessMap,
    pub checking: bool,
    /// Bumped on every (re)scrape; async results tagged with an older value are dropped
    pub generation: u32,
    pub filter: LinkFilter,
    pub search: String,
    pub storage: StorageData,
    /// Set once persisted data (or the defaults, on failure) is in place
    pub storage_ready: bool,
    /// Bumped whenever `storage` changes because of the user and needs saving
    pub storage_revision: u32,
    pub notice: Option<Notice>,
    pub view: View,
}

impl Default for PopupState {
    fn default() -> Self {
        PopupState {
            phase: LoadPhase::Loading,
            page_url: String::new(),
            links: Vec::new(),
            liveness: LivenessMap::new(),
            checking: false,
            generation: 0,
            filter: LinkFilter::All,
            search: String::new(),
            storage: StorageData::new(),
            storage_ready: false,
            storage_revision: 0,
            notice: None,
            view: View::Links,
        }
    }
}

impl PopupState {
    pub fn apply(&mut self, action: PopupAction) {
        match action {
            PopupAction::LinksLoaded {
                generation,
                page_url,
                links,
            } => {
                if generation != self.generation {
                    return;
                }
                self.phase = if links.is_empty() {
                    LoadPhase::Empty
                } else {
                    LoadPhase::Ready
                };
                self.page_url = page_url;
                self.links = links;
                self.liveness = LivenessMap::new();
                self.checking = false;
            }
            // One dead-link check at a time: the running one must finish first
            PopupAction::Retry if self.checking => {}
            PopupAction::Retry => {
                self.generation = self.generation.wrapping_add(1);
                self.phase = LoadPhase::Loading;
                self.page_url.clear();
                self.links.clear();
                self.liveness = LivenessMap::new();
                self.checking = false;
            }
            PopupAction::LivenessStarted { generation } => {
                if generation == self.generation {
                    self.checking = true;
                }
            }
            PopupAction::LivenessComputed {
                generation,
                liveness,
            } => {
                if generation == self.generation {
                    self.liveness = liveness;
                    self.checking = false;
                }
            }
            PopupAction::SetFilter(filter) => self.filter = filter,
            PopupAction::SetSearch(search) => self.search = search,
            PopupAction::StorageLoaded(storage) => {
                self.filter = storage.preferences.default_filter;
                self.storage = storage;
                self.storage_ready = true;
            }
            // Edits before the stored data arrives would be saved over it
            action if !self.storage_ready && action.edits_storage() => {}
            PopupAction::ToggleFavorite(href) => {
                self.storage.toggle_favorite(&href);
                self.mark_storage_dirty();
            }
            PopupAction::SaveSnapshot(snapshot) => {
                let name = snapshot.name.clone();
                self.storage.add_snapshot(snapshot);
                self.mark_storage_dirty();
                self.notice = Some(Notice::info(format!("Saved \"{}\"", name)));
            }
            PopupAction::DeleteSnapshot(id) => {
                if self.storage.remove_snapshot(&id) {
                    self.mark_storage_dirty();
                }
            }
            PopupAction::RenameSnapshot { id, name } => {
                let name = name.trim().to_string();
                if !name.is_empty() && self.storage.rename_snapshot(&id, name) {
                    self.mark_storage_dirty();
                }
            }
            PopupAction::SetDefaultFilter(filter) => {
                self.storage.preferences.default_filter = filter;
                self.filter = filter;
                self.mark_storage_dirty();
            }
            PopupAction::ToggleDarkMode => {
                self.storage.preferences.dark_mode = !self.storage.preferences.dark_mode;
                self.mark_storage_dirty();
            }
            PopupAction::ToggleCheckLinks if self.checking => {}
            PopupAction::ToggleCheckLinks => {
                self.storage.preferences.check_links = !self.storage.preferences.check_links;
                self.mark_storage_dirty();
            }
            PopupAction::ShowView(view) => self.view = view,
            PopupAction::Notify(notice) => self.notice = Some(notice),
            PopupAction::DismissNotice => self.notice = None,
        }
    }

    fn mark_storage_dirty(&mut self) {
        self.storage_revision = self.storage_revision.wrapping_add(1);
    }

    /// Links after the active filter and search term
    pub fn visible_links(&self) -> Vec<Link> {
        filter_links(
            &self.links,
            self.filter,
            &self.search,
            &self.storage.favorites,
            &self.liveness,
        )
    }

    pub fn counts(&self) -> LinkCounts {
        LinkCounts::of(&self.links, &self.storage.favorites, &self.liveness)
    }

    /// Whether the dead-link check should run for the current link list
    pub fn should_check_links(&self) -> bool {
        self.phase == LoadPhase::Ready && self.storage_ready && self.storage.preferences.check_links
    }

    /// Snapshot of what is currently on screen
    pub fn snapshot(&self, id: String, name: String, timestamp: f64) -> LinkSnapshot {
        LinkSnapshot {
            id,
            name,
            page_url: self.page_url.clone(),
            timestamp,
            links: self.visible_links(),
        }
    }
}

impl Reducible for PopupState {
    type Action = PopupAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
