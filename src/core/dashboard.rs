//! Stateful controller for one dashboard instance.
//!
//! `Dashboard` owns the loaded records plus the transient filter, selection and
//! popup state. Its methods are the UI callbacks (dropdown change, pin click,
//! "how to volunteer"); every derived value comes from [`Dashboard::view`].

use crate::events::{EventSink, NullSink, UiEvent};
use crate::filter::{apply_filter, unique_values, FilterDimension, FilterState};
use crate::record::{AssetRecord, Location};
use crate::selection::{PopupState, SelectionState};
use crate::view::{self, ContactCard, FilterOption, Pin, PopupCard, SummaryTile};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub summary: SummaryTile,
    pub unique_names: Vec<String>,
    pub unique_sponsors: Vec<String>,
    pub sponsor_options: Vec<FilterOption>,
    pub name_options: Vec<FilterOption>,
    pub filtered: Vec<&'a AssetRecord>,
    pub pins: Vec<Pin>,
    pub selected: Option<&'a AssetRecord>,
    /// Detail panel for the selected asset.
    pub detail: Option<PopupCard>,
    pub popup: Option<PopupView>,
}

/// Open popup with whichever view is active.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub lat: f64,
    pub lng: f64,
    pub details: PopupCard,
    /// `Some` while the contact view is showing.
    pub contact: Option<ContactCard>,
}

pub struct Dashboard {
    assets: Vec<AssetRecord>,
    filter: FilterState,
    selection: SelectionState,
    popup: PopupState,
    sink: Box<dyn EventSink>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("assets", &self.assets.len())
            .field("filter", &self.filter)
            .field("selection", &self.selection)
            .field("popup", &self.popup)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(assets: Vec<AssetRecord>) -> Self {
        Self::with_sink(assets, Box::new(NullSink))
    }

    pub fn with_sink(assets: Vec<AssetRecord>, sink: Box<dyn EventSink>) -> Self {
        Self {
            assets,
            filter: FilterState::default(),
            selection: SelectionState::default(),
            popup: PopupState::default(),
            sink,
        }
    }

    /// Start with pre-selected filters (e.g. from the config file).
    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    /// Replace the records (e.g. after a reload). Filter and selection survive;
    /// a selection that no longer resolves simply shows nothing.
    pub fn set_assets(&mut self, assets: Vec<AssetRecord>) {
        self.assets = assets;
        if self.popup.resolve(&self.assets).is_none() {
            self.popup.close();
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn popup(&self) -> &PopupState {
        &self.popup
    }

    fn emit_filter(&self, dim: FilterDimension) {
        let selected = self.filter.selected(dim);
        self.sink.emit(&UiEvent::filter_changed(dim, &selected));
    }

    pub fn set_filter<I, S>(&mut self, dim: FilterDimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.set(dim, values);
        self.emit_filter(dim);
    }

    pub fn toggle_filter(&mut self, dim: FilterDimension, value: &str) -> bool {
        let now = self.filter.toggle(dim, value);
        self.emit_filter(dim);
        now
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear_all();
        for &dim in FilterDimension::all() {
            self.emit_filter(dim);
        }
    }

    /// Selection callback from the map, timeline or charts.
    pub fn select(&mut self, id: impl Into<String>) {
        self.selection.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Pin click by id alone: opens the popup at the first located record with `id`.
    ///
    /// Returns whether a popup is now open. Unknown ids and unlocated assets
    /// update the selection but leave the popup closed.
    pub fn click_pin(&mut self, id: &str) -> bool {
        let location = self
            .assets
            .iter()
            .filter(|a| a.id == id)
            .find_map(AssetRecord::pin_location)
            .cloned();
        self.open_pin(id, location)
    }

    /// Pin click on a specific site. Records can share an id across sites, so the
    /// popup opens at the clicked pin's own location when a record with `id` is there.
    pub fn click_pin_at(&mut self, id: &str, location: &Location) -> bool {
        let site = self
            .assets
            .iter()
            .filter(|a| a.id == id)
            .filter_map(AssetRecord::pin_location)
            .find(|l| l.same_point(location))
            .cloned();
        self.open_pin(id, site)
    }

    fn open_pin(&mut self, id: &str, location: Option<Location>) -> bool {
        self.sink.emit(&UiEvent::pin_selected(id));
        self.selection.select(id);
        match location {
            Some(loc) => {
                self.popup.open(id, loc);
                true
            }
            None => {
                self.popup.close();
                false
            }
        }
    }

    pub fn close_popup(&mut self) {
        self.popup.close();
    }

    /// "How to volunteer" / "Back to details".
    pub fn toggle_learn_more(&mut self) -> bool {
        if self.popup.is_open() {
            self.sink.emit(&UiEvent::volunteer_clicked());
        }
        self.popup.toggle_learn_more()
    }

    pub fn view(&self) -> DashboardView<'_> {
        let filtered = apply_filter(&self.assets, &self.filter);
        let focus = self
            .popup
            .asset_id()
            .filter(|id| self.selection.is_selected(id))
            .and(self.popup.clicked_location());
        let pins = view::pins(&filtered, &self.selection, focus);
        let selected = self.selection.resolve(&self.assets);
        let popup = self.popup.resolve(&self.assets).and_then(|asset| {
            let loc = self.popup.clicked_location()?;
            Some(PopupView {
                lat: loc.lat,
                lng: loc.lng,
                details: PopupCard::from_asset(asset),
                contact: self
                    .popup
                    .learn_more_open()
                    .then(|| ContactCard::from_asset(asset)),
            })
        });

        DashboardView {
            summary: SummaryTile {
                total: self.assets.len(),
            },
            unique_names: unique_values(&self.assets, FilterDimension::Name),
            unique_sponsors: unique_values(&self.assets, FilterDimension::Sponsor),
            sponsor_options: view::filter_options(
                &self.assets,
                FilterDimension::Sponsor,
                &self.filter,
            ),
            name_options: view::filter_options(&self.assets, FilterDimension::Name, &self.filter),
            filtered,
            pins,
            selected,
            detail: selected.map(PopupCard::from_asset),
            popup,
        }
    }
}
