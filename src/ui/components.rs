/// Reusable UI components

use yew::prelude::*;

use crate::filter::{LinkCounts, LinkFilter};
use crate::link_data::Link;

#[derive(Properties, PartialEq)]
pub struct LivenessBadgeProps {
    pub liveness: Option<bool>,
    #[prop_or(false)]
    pub checking: bool,
}

#[function_component(LivenessBadge)]
pub fn liveness_badge(props: &LivenessBadgeProps) -> Html {
    match (props.liveness, props.checking) {
        (Some(true), _) => html! { <span class="badge badge-alive" title="Responded to a HEAD request">{"Alive"}</span> },
        (Some(false), _) => html! { <span class="badge badge-dead" title="No successful response (may be blocked rather than gone)">{"Dead"}</span> },
        (None, true) => html! { <span class="badge badge-pending">{"…"}</span> },
        (None, false) => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct LinkRowProps {
    pub link: Link,
    pub favorite: bool,
    pub liveness: Option<bool>,
    #[prop_or(false)]
    pub checking: bool,
    pub on_toggle_favorite: Callback<String>,
}

#[function_component(LinkRow)]
pub fn link_row(props: &LinkRowProps) -> Html {
    let onclick = {
        let href = props.link.href.clone();
        let on_toggle_favorite = props.on_toggle_favorite.clone();
        Callback::from(move |_: MouseEvent| on_toggle_favorite.emit(href.clone()))
    };

    let row_class = if props.link.is_backlink {
        "link-row link-row-backlink"
    } else {
        "link-row"
    };

    html! {
        <div class={row_class}>
            <div class="link-row-header">
                <p class="link-text">
                    {if props.link.text.is_empty() { "(No text)" } else { props.link.text.as_str() }}
                </p>
                <button
                    class="favorite-toggle"
                    title={if props.favorite { "Remove from favorites" } else { "Add to favorites" }}
                    {onclick}
                >
                    {if props.favorite { "★" } else { "☆" }}
                </button>
            </div>
            <a
                class="link-href"
                href={props.link.href.clone()}
                target="_blank"
                rel="noopener noreferrer"
            >
                {&props.link.href}
            </a>
            if props.link.is_backlink {
                <span class="badge badge-backlink">{"Backlink"}</span>
            }
            <LivenessBadge liveness={props.liveness} checking={props.checking} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub active: LinkFilter,
    pub counts: LinkCounts,
    pub on_select: Callback<LinkFilter>,
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    html! {
        <div class="filter-bar">
            {for LinkFilter::ALL.iter().map(|filter| {
                let filter = *filter;
                let on_select = props.on_select.clone();
                let class = if filter == props.active { "filter-chip filter-chip-active" } else { "filter-chip" };
                html! {
                    <button {class} onclick={Callback::from(move |_: MouseEvent| on_select.emit(filter))}>
                        {format!("{} ({})", filter.label(), props.counts.for_filter(filter))}
                    </button>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub message: String,
    #[prop_or(false)]
    pub retry_disabled: bool,
    pub on_retry: Callback<MouseEvent>,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    html! {
        <div class="empty-state">
            <p class="empty-state-title">{"No links found"}</p>
            <p class="empty-state-message">{&props.message}</p>
            <button
                class="retry-button"
                disabled={props.retry_disabled}
                onclick={props.on_retry.clone()}
            >
                {"Retry"}
            </button>
        </div>
    }
}
