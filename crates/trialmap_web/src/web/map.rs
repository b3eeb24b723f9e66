use leptos::prelude::*;

use trialmap::dashboard::PopupView;
use trialmap::view::{ContactCard, Pin, ABSENT};

use super::panels::card_fields;
use crate::float_fmt::fmt_f64_fixed;
use crate::ui_model::MapProjection;

/// Pin map: an equirectangular SVG plot with a graticule, plus the popup overlay.
#[component]
pub(super) fn MapView(
    pins: Signal<Vec<Pin>>,
    popup: Signal<Option<PopupView>>,
    on_pin: Callback<Pin>,
    on_close: Callback<()>,
    on_learn_more: Callback<()>,
) -> impl IntoView {
    let proj = MapProjection::default();
    let w = fmt_f64_fixed(proj.width, 0);
    let h = fmt_f64_fixed(proj.height, 0);
    let view_box = format!("0 0 {w} {h}");

    // 30° graticule.
    let meridians = (-5..=5)
        .map(|i| {
            let (x, _) = proj.project(0.0, f64::from(i) * 30.0);
            let x = fmt_f64_fixed(x, 1);
            view! { <line class="graticule" x1=x.clone() y1="0" x2=x y2=h.clone() /> }
        })
        .collect_view();
    let parallels = (-2..=2)
        .map(|i| {
            let (_, y) = proj.project(f64::from(i) * 30.0, 0.0);
            let y = fmt_f64_fixed(y, 1);
            view! { <line class="graticule" x1="0" y1=y.clone() x2=w.clone() y2=y /> }
        })
        .collect_view();

    view! {
        <div class="map-wrap">
            <svg class="map" viewBox=view_box preserveAspectRatio="xMidYMid meet">
                <rect class="map-bg" x="0" y="0" width=w.clone() height=h.clone() />
                {meridians}
                {parallels}
                <For
                    each=move || pins.get().into_iter().enumerate()
                    key=|(i, p)| (*i, p.id.clone(), p.selected)
                    children=move |(_, p): (usize, Pin)| {
                        let (x, y) = proj.project_location(&p.location);
                        let clicked = p.clone();
                        let class = if p.selected { "pin selected" } else { "pin" };
                        let r = if p.selected { "7" } else { "5" };
                        view! {
                            <circle
                                class=class
                                cx=fmt_f64_fixed(x, 1)
                                cy=fmt_f64_fixed(y, 1)
                                r=r
                                on:click=move |_| on_pin.run(clicked.clone())
                            >
                                <title>{p.label}</title>
                            </circle>
                        }
                    }
                />
            </svg>
            {move || {
                popup
                    .get()
                    .map(|p| {
                        let (left, top) = proj.to_percent(p.lat, p.lng);
                        let style = format!(
                            "left: {}%; top: {}%;",
                            fmt_f64_fixed(left, 2),
                            fmt_f64_fixed(top, 2),
                        );
                        view! {
                            <div class="map-popup" style=style>
                                <button class="popup-close" on:click=move |_| on_close.run(())>
                                    "×"
                                </button>
                                <PopupBody popup=p on_learn_more=on_learn_more />
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn PopupBody(popup: PopupView, on_learn_more: Callback<()>) -> impl IntoView {
    match popup.contact {
        Some(contact) => view! {
            <div class="card">
                <ContactFields contact=contact />
                <div class="card-actions">
                    <button class="btn" on:click=move |_| on_learn_more.run(())>
                        "BACK TO DETAILS"
                    </button>
                </div>
            </div>
        }
        .into_any(),
        None => view! {
            <div class="card">
                {card_fields(&popup.details)}
                <div class="card-actions">
                    <button class="btn secondary" on:click=move |_| on_learn_more.run(())>
                        "HOW TO VOLUNTEER"
                    </button>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn ContactFields(contact: ContactCard) -> impl IntoView {
    let mailto = contact.mailto();
    let email = contact.email.clone();
    view! {
        {contact.name.clone().map(|n| view! {
            <div class="display-field">
                <div class="field-label">"Name"</div>
                <div class="field-content">{n}</div>
            </div>
        })}
        {contact.website.clone().map(|site| view! {
            <div class="display-field">
                <div class="field-label">"Website"</div>
                <div class="field-content">
                    <a href=site.clone() target="_blank" rel="noopener noreferrer">{site}</a>
                </div>
            </div>
        })}
        <hr class="divider" />
        <div class="display-field">
            <div class="field-label">"email"</div>
            <div class="field-content">
                {match mailto {
                    Some(href) => view! { <a class="break-word" href=href>{email}</a> }.into_any(),
                    None => view! { <span>{ABSENT}</span> }.into_any(),
                }}
            </div>
        </div>
        <div class="display-field">
            <div class="field-label">"Phone Number"</div>
            <div class="field-content">{contact.phone.clone()}</div>
        </div>
        <div class="display-field">
            <div class="field-label">"Notes"</div>
            <div class="field-content">{contact.notes.clone()}</div>
        </div>
    }
}
