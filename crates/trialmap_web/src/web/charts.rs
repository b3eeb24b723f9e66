use leptos::prelude::*;

use crate::float_fmt::fmt_f64_fixed;
use crate::ui_model::bar_percent;

/// Horizontal bar chart of `(value, count)` rows.
#[component]
pub(super) fn BarChart(title: &'static str, rows: Signal<Vec<(String, usize)>>) -> impl IntoView {
    let max = Memo::new(move |_| rows.get().iter().map(|(_, n)| *n).max().unwrap_or(0));

    view! {
        <div class="chart">
            <h3 class="chart-title">{title}</h3>
            <Show
                when=move || !rows.get().is_empty()
                fallback=|| view! { <div class="subtle">"No data"</div> }
            >
                <For
                    each=move || rows.get()
                    key=|(value, n)| (value.clone(), *n)
                    children=move |(value, n): (String, usize)| {
                        let width = format!(
                            "width: {}%;",
                            fmt_f64_fixed(bar_percent(n, max.get_untracked()), 1)
                        );
                        view! {
                            <div class="chart-row">
                                <span class="chart-label">{value}</span>
                                <span class="chart-bar" style=width></span>
                                <span class="chart-count">{n}</span>
                            </div>
                        }
                    }
                />
            </Show>
        </div>
    }
}
