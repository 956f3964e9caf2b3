/// Popup UI for Link Saver extension

use log::error;
use patternfly_yew::prelude::{Alert, AlertType, Button, ButtonVariant, Spinner};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::export::ExportFormat;
use crate::filter::LinkFilter;
use crate::state::{LoadPhase, Notice, NoticeKind, PopupAction, PopupState, View};
use crate::storage::LinkSnapshot;
use crate::ui::bridge::{
    ExtensionProber, download_export, load_storage, save_storage, scrape_active_tab,
};
use crate::ui::components::{EmptyState, FilterBar, LinkRow};
use crate::validator::validate_links;

const SAVE_FAILED: &str = "Could not save your changes.";
const LOAD_FAILED: &str = "Could not load your saved links and settings.";
const EMPTY_MESSAGE: &str =
    "This page has no links, or the browser does not allow extensions to read it.";

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(PopupState::default);
    let editing_snapshot = use_state(|| None::<String>); // snapshot ID being renamed
    let edit_input_value = use_state(String::new);

    // Load favorites, snapshots and preferences on mount
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_storage().await {
                    Ok(data) => state.dispatch(PopupAction::StorageLoaded(data)),
                    Err(e) => {
                        error!("Failed to load storage: {}", e);
                        state.dispatch(PopupAction::StorageLoaded(Default::default()));
                        state.dispatch(PopupAction::Notify(Notice::error(LOAD_FAILED)));
                    }
                }
            });
            || ()
        });
    }

    // Scrape the active tab; runs again whenever the user retries
    {
        let state = state.clone();
        use_effect_with(state.generation, move |generation| {
            let generation = *generation;
            spawn_local(async move {
                let (page_url, links) = scrape_active_tab().await;
                state.dispatch(PopupAction::LinksLoaded {
                    generation,
                    page_url,
                    links,
                });
            });
            || ()
        });
    }

    // Check every scraped link once the list and preferences are in
    {
        let dispatcher = state.dispatcher();
        let links = state.links.clone();
        let should_check = state.should_check_links();
        use_effect_with((state.generation, should_check), move |(generation, should_check)| {
            if *should_check {
                let generation = *generation;
                dispatcher.dispatch(PopupAction::LivenessStarted { generation });
                spawn_local(async move {
                    let liveness = validate_links(&ExtensionProber, &links).await;
                    dispatcher.dispatch(PopupAction::LivenessComputed {
                        generation,
                        liveness,
                    });
                });
            }
            || ()
        });
    }

    // Persist storage after user changes
    {
        let dispatcher = state.dispatcher();
        let storage = state.storage.clone();
        let storage_ready = state.storage_ready;
        use_effect_with(state.storage_revision, move |revision| {
            if *revision > 0 && storage_ready {
                spawn_local(async move {
                    if let Err(e) = save_storage(&storage).await {
                        error!("Failed to save storage: {}", e);
                        dispatcher.dispatch(PopupAction::Notify(Notice::error(SAVE_FAILED)));
                    }
                });
            }
            || ()
        });
    }

    let on_retry = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(PopupAction::Retry))
    };

    let on_search_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                state.dispatch(PopupAction::SetSearch(input.value()));
            }
        })
    };

    let on_filter = {
        let state = state.clone();
        Callback::from(move |filter: LinkFilter| state.dispatch(PopupAction::SetFilter(filter)))
    };

    let on_toggle_favorite = {
        let state = state.clone();
        Callback::from(move |href: String| state.dispatch(PopupAction::ToggleFavorite(href)))
    };

    // Unknown selectors do nothing
    let on_export = {
        let state = state.clone();
        move |selector: &'static str| {
            let state = state.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(format) = ExportFormat::from_selector(selector) {
                    download_export(format, &state.visible_links());
                }
            })
        }
    };

    let on_save_snapshot = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            let now = js_sys::Date::now();
            let date = js_sys::Date::new(&JsValue::from_f64(now));
            let name = format!("Links {}", format_date(&date));
            let snapshot = state.snapshot(Uuid::new_v4().to_string(), name, now);
            state.dispatch(PopupAction::SaveSnapshot(snapshot));
        })
    };

    let on_delete_snapshot = {
        let state = state.clone();
        move |id: String| {
            let state = state.clone();
            Callback::from(move |_: MouseEvent| {
                state.dispatch(PopupAction::DeleteSnapshot(id.clone()))
            })
        }
    };

    let on_export_snapshot = {
        let state = state.clone();
        move |id: String| {
            let state = state.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(snapshot) = state.storage.get_snapshot(&id) {
                    download_export(ExportFormat::Json, &snapshot.links);
                }
            })
        }
    };

    // Start renaming a snapshot
    let on_start_rename = {
        let editing_snapshot = editing_snapshot.clone();
        let edit_input_value = edit_input_value.clone();
        move |snapshot: &LinkSnapshot| {
            let editing_snapshot = editing_snapshot.clone();
            let edit_input_value = edit_input_value.clone();
            let id = snapshot.id.clone();
            let name = snapshot.name.clone();
            Callback::from(move |_: MouseEvent| {
                editing_snapshot.set(Some(id.clone()));
                edit_input_value.set(name.clone());
            })
        }
    };

    let on_rename_input = {
        let edit_input_value = edit_input_value.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                edit_input_value.set(input.value());
            }
        })
    };

    let on_save_rename = {
        let state = state.clone();
        let editing_snapshot = editing_snapshot.clone();
        let edit_input_value = edit_input_value.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(id) = (*editing_snapshot).clone() {
                state.dispatch(PopupAction::RenameSnapshot {
                    id,
                    name: (*edit_input_value).clone(),
                });
                editing_snapshot.set(None);
            }
        })
    };

    let on_cancel_rename = {
        let editing_snapshot = editing_snapshot.clone();
        Callback::from(move |_: MouseEvent| editing_snapshot.set(None))
    };

    let on_make_default_filter = {
        let state = state.clone();
        let filter = state.filter;
        Callback::from(move |_: MouseEvent| state.dispatch(PopupAction::SetDefaultFilter(filter)))
    };

    let on_toggle_dark = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(PopupAction::ToggleDarkMode))
    };

    let on_toggle_check_links = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(PopupAction::ToggleCheckLinks))
    };

    let on_dismiss_notice = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(PopupAction::DismissNotice))
    };

    let on_view_click = {
        let state = state.clone();
        move |view: View| {
            let state = state.clone();
            Callback::from(move |_: MouseEvent| state.dispatch(PopupAction::ShowView(view)))
        }
    };

    let dark_mode = state.storage.preferences.dark_mode;
    let default_filter = state.storage.preferences.default_filter;
    let check_links = state.storage.preferences.check_links;
    let visible_links = state.visible_links();
    let counts = state.counts();

    let tab_class = |view: View| {
        if state.view == view {
            "pf-v5-c-tabs__item pf-m-current"
        } else {
            "pf-v5-c-tabs__item"
        }
    };

    html! {
        <div class={if dark_mode { "popup dark" } else { "popup" }}>
            <div class="popup-header">
                <h1 class="popup-title">{"Link Saver"}</h1>
                <button class="theme-toggle" disabled={!state.storage_ready} onclick={on_toggle_dark}>
                    {if dark_mode { "🌞" } else { "🌙" }}
                </button>
            </div>

            if let Some(notice) = &state.notice {
                <div class="notice">
                    <Alert
                        r#type={if notice.kind == NoticeKind::Error { AlertType::Danger } else { AlertType::Info }}
                        title={notice.message.clone()}
                        inline={true}
                    >
                    </Alert>
                    <button class="notice-dismiss" onclick={on_dismiss_notice}>{"Dismiss"}</button>
                </div>
            }

            // View navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    <li class={tab_class(View::Links)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_view_click(View::Links)}>
                            <span class="pf-v5-c-tabs__item-text">{"Links"}</span>
                        </button>
                    </li>
                    <li class={tab_class(View::Saved)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_view_click(View::Saved)}>
                            <span class="pf-v5-c-tabs__item-text">
                                {format!("Saved ({})", state.storage.snapshots.len())}
                            </span>
                        </button>
                    </li>
                </ul>
            </div>

            {match state.view {
                View::Links => html! {
                    <div class="tab-pane-content">
                        <input
                            type="text"
                            class="search-input"
                            placeholder="Search links..."
                            value={state.search.clone()}
                            oninput={on_search_input}
                        />

                        <FilterBar active={state.filter} counts={counts} on_select={on_filter} />
                        if state.storage_ready && state.filter != default_filter {
                            <button class="make-default" onclick={on_make_default_filter}>
                                {format!("Always open on \"{}\"", state.filter.label())}
                            </button>
                        }

                        <div class="export-bar">
                            {for ExportFormat::ALL.iter().map(|format| html! {
                                <Button
                                    onclick={on_export(format.ext())}
                                    disabled={visible_links.is_empty()}
                                    variant={ButtonVariant::Secondary}
                                >
                                    {format!("Export {}", format.label())}
                                </Button>
                            })}
                            <Button
                                onclick={on_save_snapshot}
                                disabled={visible_links.is_empty()}
                                variant={ButtonVariant::Primary}
                            >
                                {"Save"}
                            </Button>
                        </div>

                        <div class="check-status">
                            <label class="check-toggle">
                                <input
                                    type="checkbox"
                                    checked={check_links}
                                    disabled={state.checking || !state.storage_ready}
                                    onclick={on_toggle_check_links}
                                />
                                {" Check for dead links"}
                            </label>
                            if state.checking {
                                <span class="check-progress">{"Checking links..."}</span>
                            } else if !state.liveness.is_empty() {
                                <span class="check-summary">
                                    {format!("{} of {} unreachable", state.liveness.dead_count(), state.liveness.len())}
                                </span>
                            }
                        </div>

                        {match state.phase {
                            LoadPhase::Loading => html! {
                                <div class="loading-text-center">
                                    <Spinner />
                                    <p class="loading-text">{"Scanning page..."}</p>
                                </div>
                            },
                            LoadPhase::Empty => html! {
                                <EmptyState message={EMPTY_MESSAGE} retry_disabled={state.checking} on_retry={on_retry} />
                            },
                            LoadPhase::Ready => html! {
                                <div class="links-panel">
                                    <h2 class="links-title">{format!("Found Links ({})", visible_links.len())}</h2>
                                    <div class="links-list">
                                        {for visible_links.iter().map(|link| html! {
                                            <LinkRow
                                                link={link.clone()}
                                                favorite={state.storage.is_favorite(&link.href)}
                                                liveness={state.liveness.is_alive(&link.href)}
                                                checking={state.checking}
                                                on_toggle_favorite={on_toggle_favorite.clone()}
                                            />
                                        })}
                                    </div>
                                </div>
                            },
                        }}
                    </div>
                },
                View::Saved => html! {
                    <div class="tab-pane-content">
                        if state.storage.snapshots.is_empty() {
                            <p class="empty-state-message">{"No saved links yet."}</p>
                        }
                        {for state.storage.snapshots.iter().rev().map(|snapshot| html! {
                            <div class="snapshot-row">
                                <div class="snapshot-info">
                                    if editing_snapshot.as_deref() == Some(snapshot.id.as_str()) {
                                        <div class="snapshot-rename">
                                            <input
                                                type="text"
                                                class="search-input"
                                                value={(*edit_input_value).clone()}
                                                oninput={on_rename_input.clone()}
                                            />
                                            <button onclick={on_save_rename.clone()}>{"Save"}</button>
                                            <button onclick={on_cancel_rename.clone()}>{"Cancel"}</button>
                                        </div>
                                    } else {
                                        <p class="snapshot-name" onclick={on_start_rename(snapshot)} title="Click to rename">
                                            {&snapshot.name}
                                        </p>
                                    }
                                    <p class="snapshot-meta">
                                        {format!("{} links · {}", snapshot.links.len(), snapshot.page_url)}
                                    </p>
                                </div>
                                <Button onclick={on_export_snapshot(snapshot.id.clone())} variant={ButtonVariant::Secondary}>
                                    {"Export"}
                                </Button>
                                <Button onclick={on_delete_snapshot(snapshot.id.clone())} variant={ButtonVariant::Danger}>
                                    {"Delete"}
                                </Button>
                            </div>
                        })}
                    </div>
                },
            }}

            <p class="footer-popup">
                {"Link Saver v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

fn format_date(date: &js_sys::Date) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        date.get_full_year(),
        date.get_month() + 1,
        date.get_date(),
        date.get_hours(),
        date.get_minutes()
    )
}
