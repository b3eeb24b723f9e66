use leptos::prelude::*;

use trialmap::view::{FilterOption, PopupCard, ABSENT};

use super::TimelineRow;

#[component]
pub(super) fn Tile(header: Option<&'static str>, children: Children) -> impl IntoView {
    view! {
        <div class="tile">
            {header.map(|h| view! { <div class="tile-header">{h}</div> })}
            <div class="tile-content">{children()}</div>
        </div>
    }
}

/// Chip list acting as a multi-select dropdown. No chip selected means "all".
#[component]
pub(super) fn FilterDropdown(
    label: &'static str,
    options: Signal<Vec<FilterOption>>,
    on_toggle: Callback<String>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let any_selected = move || options.get().iter().any(|o| o.selected);

    view! {
        <div class="filter-dropdown">
            <div class="filter-label">{label}</div>
            <div class="filter-options">
                <button
                    class=move || if any_selected() { "chip" } else { "chip selected" }
                    on:click=move |_| on_clear.run(())
                >
                    "All"
                </button>
                <For
                    each=move || options.get()
                    key=|o| (o.value.clone(), o.selected)
                    children=move |o: FilterOption| {
                        let value = o.value.clone();
                        let class = if o.selected { "chip selected" } else { "chip" };
                        view! {
                            <button class=class on:click=move |_| on_toggle.run(value.clone())>
                                {o.value}
                            </button>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[component]
pub(super) fn TimelineList(rows: Signal<Vec<TimelineRow>>, on_select: Callback<String>) -> impl IntoView {
    view! {
        <Show
            when=move || !rows.get().is_empty()
            fallback=|| view! { <div class="subtle">"No trials match the current filters."</div> }
        >
            <ol class="timeline">
                <For
                    each=move || rows.get().into_iter().enumerate()
                    key=|(i, r)| (*i, r.id.clone(), r.selected)
                    children=move |(_, r): (usize, TimelineRow)| {
                        let id = r.id.clone();
                        let class = if r.selected { "timeline-row selected" } else { "timeline-row" };
                        view! {
                            <li class=class on:click=move |_| on_select.run(id.clone())>
                                <span class="timeline-phase">{r.phase}</span>
                                <span class="timeline-label">{r.label}</span>
                            </li>
                        }
                    }
                />
            </ol>
        </Show>
    }
}

fn field(label: &str, content: String) -> impl IntoView {
    let label = label.to_string();
    view! {
        <div class="display-field">
            <div class="field-label">{label}</div>
            <div class="field-content">{content}</div>
        </div>
    }
}

pub(super) fn registry_link(card: &PopupCard) -> AnyView {
    match card.registry_link.clone() {
        Some(href) => view! {
            <a href=href target="_blank" rel="noopener noreferrer">"Click Here"</a>
        }
        .into_any(),
        None => view! { <span>{ABSENT}</span> }.into_any(),
    }
}

/// Fields shared by the popup details view and the side panel.
pub(super) fn card_fields(card: &PopupCard) -> impl IntoView {
    let healthy = if card.accepts_healthy_volunteers {
        view! { <span class="success">"✔ Yes"</span> }.into_any()
    } else {
        view! { <span>"No"</span> }.into_any()
    };
    view! {
        {field(&card.sponsor_heading, card.sponsor_names.clone())}
        {field("Product", card.product.clone())}
        <hr class="divider" />
        {field("Phase", card.phase.clone())}
        <div class="display-field">
            <div class="field-label">"Accepts Healthy Volunteers?"</div>
            <div class="field-content">{healthy}</div>
        </div>
        <div class="display-field">
            <div class="field-label">"Trial Registry Link"</div>
            <div class="field-content">{registry_link(card)}</div>
        </div>
    }
}

#[component]
pub(super) fn DetailsPanel(card: Signal<Option<PopupCard>>) -> impl IntoView {
    view! {
        <div class="details">
            <h2>"Details"</h2>
            {move || match card.get() {
                Some(c) => view! {
                    <div class="details-body">
                        {card_fields(&c)}
                        {field("Status", c.status.clone())}
                        {field("Site", c.site.clone())}
                    </div>
                }
                .into_any(),
                None => view! {
                    <div class="subtle">"Select a pin or a timeline entry to see trial details."</div>
                }
                .into_any(),
            }}
        </div>
    }
}
