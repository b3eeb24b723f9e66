//! Selected asset and map-pin popup state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::record::{AssetRecord, Location};

/// Record whose id equals `id`. Returns `None` for `None` or an unknown id.
pub fn select_asset<'a>(assets: &'a [AssetRecord], id: Option<&str>) -> Option<&'a AssetRecord> {
    let id = id?;
    assets.iter().find(|a| a.id == id)
}

/// At most one selected asset id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionState {
    selected: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn resolve<'a>(&self, assets: &'a [AssetRecord]) -> Option<&'a AssetRecord> {
        select_asset(assets, self.selected_id())
    }
}

/// Popup shown for a clicked map pin.
///
/// The popup has two views: trial details, and the participation contact
/// ("how to volunteer"). Clicking a pin at a different location always comes
/// back to the details view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupState {
    asset_id: Option<String>,
    clicked_location: Option<Location>,
    learn_more_open: bool,
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, asset_id: impl Into<String>, clicked_location: Location) {
        let moved = self
            .clicked_location
            .as_ref()
            .map_or(true, |prev| !prev.same_point(&clicked_location));
        if moved {
            self.learn_more_open = false;
        }
        self.asset_id = Some(asset_id.into());
        self.clicked_location = Some(clicked_location);
    }

    pub fn close(&mut self) {
        self.asset_id = None;
        self.clicked_location = None;
        self.learn_more_open = false;
    }

    /// Flip between the details and contact views. No-op while closed.
    pub fn toggle_learn_more(&mut self) -> bool {
        if self.is_open() {
            self.learn_more_open = !self.learn_more_open;
        }
        self.learn_more_open
    }

    pub fn is_open(&self) -> bool {
        self.asset_id.is_some()
    }

    pub fn learn_more_open(&self) -> bool {
        self.learn_more_open
    }

    pub fn asset_id(&self) -> Option<&str> {
        self.asset_id.as_deref()
    }

    pub fn clicked_location(&self) -> Option<&Location> {
        self.clicked_location.as_ref()
    }

    /// Record behind the open popup. With duplicate ids, the record whose site
    /// was clicked wins over the first occurrence.
    pub fn resolve<'a>(&self, assets: &'a [AssetRecord]) -> Option<&'a AssetRecord> {
        let id = self.asset_id()?;
        let at_site = self.clicked_location.as_ref().and_then(|loc| {
            assets.iter().find(|a| {
                a.id == id && a.pin_location().is_some_and(|l| l.same_point(loc))
            })
        });
        at_site.or_else(|| select_asset(assets, Some(id)))
    }
}
