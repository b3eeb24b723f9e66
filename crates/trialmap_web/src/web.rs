use leptos::prelude::*;

use trialmap::dashboard::{Dashboard, PopupView};
use trialmap::dataset::Dataset;
use trialmap::filter::FilterDimension;
use trialmap::view::{self, tally, ChartDimension, FilterOption, Pin, PopupCard};

use crate::ui_model::{DashboardTab, VOLUNTEER_STEPS};

mod analytics;
mod charts;
mod map;
mod panels;

use analytics::ConsoleSink;
use charts::BarChart;
use map::MapView;
use panels::{DetailsPanel, FilterDropdown, Tile, TimelineList};

/// Owned snapshot of a dashboard view, rebuilt whenever the dashboard changes.
#[derive(Clone, PartialEq)]
pub(crate) struct Frame {
    pub(crate) summary_header: &'static str,
    pub(crate) summary_value: String,
    pub(crate) matching: usize,
    pub(crate) sponsor_options: Vec<FilterOption>,
    pub(crate) name_options: Vec<FilterOption>,
    pub(crate) pins: Vec<Pin>,
    pub(crate) timeline: Vec<TimelineRow>,
    pub(crate) phase_tally: Vec<(String, usize)>,
    pub(crate) approach_tally: Vec<(String, usize)>,
    pub(crate) detail: Option<PopupCard>,
    pub(crate) popup: Option<PopupView>,
}

#[derive(Clone, PartialEq)]
pub(crate) struct TimelineRow {
    pub(crate) id: String,
    pub(crate) label: String,
    pub(crate) phase: String,
    pub(crate) selected: bool,
}

impl Frame {
    fn capture(d: &Dashboard) -> Self {
        let v = d.view();
        let selected_id = d.selection().selected_id();
        let timeline = view::timeline(&v.filtered)
            .into_iter()
            .map(|a| TimelineRow {
                id: a.id.clone(),
                label: a.label().to_string(),
                phase: a.phase.clone().unwrap_or_else(|| view::ABSENT.to_string()),
                selected: selected_id == Some(a.id.as_str()),
            })
            .collect();
        let phase_tally = tally(v.filtered.iter().copied(), ChartDimension::Phase);
        let approach_tally = tally(v.filtered.iter().copied(), ChartDimension::TherapeuticApproach);

        Self {
            summary_header: v.summary.header(),
            summary_value: v.summary.value(),
            matching: v.filtered.len(),
            sponsor_options: v.sponsor_options,
            name_options: v.name_options,
            pins: v.pins,
            timeline,
            phase_tally,
            approach_tally,
            detail: v.detail,
            popup: v.popup,
        }
    }
}

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let dashboard = StoredValue::new(Dashboard::with_sink(
        Dataset::builtin_sample().into_records(),
        Box::new(ConsoleSink),
    ));

    // Bumped after every dashboard mutation; the frame memo tracks it.
    let (version, set_version) = signal(0u64);
    let frame = Memo::new(move |_| {
        version.track();
        dashboard.with_value(Frame::capture)
    });

    let mutate = move |f: &dyn Fn(&mut Dashboard)| {
        dashboard.update_value(|d| f(d));
        set_version.update(|v| *v += 1);
    };

    let toggle_sponsor = Callback::new(move |value: String| {
        mutate(&|d| {
            d.toggle_filter(FilterDimension::Sponsor, &value);
        })
    });
    let toggle_name = Callback::new(move |value: String| {
        mutate(&|d| {
            d.toggle_filter(FilterDimension::Name, &value);
        })
    });
    let clear_sponsors = Callback::new(move |_: ()| {
        mutate(&|d| d.set_filter(FilterDimension::Sponsor, Vec::<String>::new()))
    });
    let clear_names = Callback::new(move |_: ()| {
        mutate(&|d| d.set_filter(FilterDimension::Name, Vec::<String>::new()))
    });
    let click_pin = Callback::new(move |pin: Pin| {
        mutate(&|d| {
            d.click_pin_at(&pin.id, &pin.location);
        })
    });
    let select_id = Callback::new(move |id: String| mutate(&|d| d.select(id.clone())));
    let close_popup = Callback::new(move |_: ()| mutate(&|d| d.close_popup()));
    let learn_more = Callback::new(move |_: ()| {
        mutate(&|d| {
            d.toggle_learn_more();
        })
    });

    let (tab, set_tab) = signal(DashboardTab::default());

    let sponsor_options = Signal::derive(move || frame.get().sponsor_options);
    let name_options = Signal::derive(move || frame.get().name_options);
    let pins = Signal::derive(move || frame.get().pins);
    let popup = Signal::derive(move || frame.get().popup);
    let timeline = Signal::derive(move || frame.get().timeline);
    let phase_tally = Signal::derive(move || frame.get().phase_tally);
    let approach_tally = Signal::derive(move || frame.get().approach_tally);
    let detail = Signal::derive(move || frame.get().detail);

    view! {
        <div class="app">
            <header class="app-header">
                <h1 class="brand">"COVID-19 Treatment & Vaccine Tracker"</h1>
                <span class="subtle">
                    {move || format!("{} matching", frame.get().matching)}
                </span>
            </header>
            <section class="flex1">
                <Tile header=Some(frame.get_untracked().summary_header)>
                    <span class="tile-data">{move || frame.get().summary_value}</span>
                </Tile>
                <Tile header=None>
                    <FilterDropdown
                        label="sponsor"
                        options=sponsor_options
                        on_toggle=toggle_sponsor
                        on_clear=clear_sponsors
                    />
                    <FilterDropdown
                        label="name"
                        options=name_options
                        on_toggle=toggle_name
                        on_clear=clear_names
                    />
                </Tile>
            </section>
            <section class="tabbed-section">
                <nav class="tabs">
                    {DashboardTab::all()
                        .iter()
                        .copied()
                        .map(|t| {
                            view! {
                                <button
                                    class=move || if tab.get() == t { "tab active" } else { "tab" }
                                    on:click=move |_| set_tab.set(t)
                                >
                                    {t.icon()}" "{t.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                {move || match tab.get() {
                    DashboardTab::VolunteerLocations => {
                        view! {
                            <Tile header=None>
                                <div class="instructions">
                                    <p>"Are you interested in potentially volunteering for a COVID-19 trial?"</p>
                                    <ol>
                                        {VOLUNTEER_STEPS
                                            .iter()
                                            .map(|s| view! { <li>{*s}</li> })
                                            .collect_view()}
                                    </ol>
                                </div>
                                <MapView
                                    pins=pins
                                    popup=popup
                                    on_pin=click_pin
                                    on_close=close_popup
                                    on_learn_more=learn_more
                                />
                            </Tile>
                        }
                            .into_any()
                    }
                    DashboardTab::Timeline => {
                        view! { <TimelineList rows=timeline on_select=select_id /> }.into_any()
                    }
                    DashboardTab::Charts => {
                        view! {
                            <div class="charts">
                                <BarChart title="Phase" rows=phase_tally />
                                <BarChart title="Therapeutic Approach" rows=approach_tally />
                            </div>
                        }
                            .into_any()
                    }
                }}
            </section>
            <aside class="right-column">
                <DetailsPanel card=detail />
            </aside>
        </div>
    }
}
