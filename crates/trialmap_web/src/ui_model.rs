//! UI models and metadata that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! tab inventory and map projection on the host.

use trialmap::record::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    VolunteerLocations,
    Timeline,
    Charts,
}

impl DashboardTab {
    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::VolunteerLocations => "Volunteer Locations",
            DashboardTab::Timeline => "Timeline",
            DashboardTab::Charts => "Charts",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            DashboardTab::VolunteerLocations => "📍",
            DashboardTab::Timeline => "🗓️",
            DashboardTab::Charts => "📊",
        }
    }

    pub fn all() -> &'static [DashboardTab] {
        &[
            DashboardTab::VolunteerLocations,
            DashboardTab::Timeline,
            DashboardTab::Charts,
        ]
    }
}

/// Steps shown above the map on the volunteer tab.
pub const VOLUNTEER_STEPS: &[&str] = &[
    "In the map below, click on a pin near you to find a hospital or clinic running a clinical trial on COVID-19.",
    "If you are healthy, look under \"Accepts Healthy Volunteers?\" and check that it says Yes.",
    "Click the \"How to Volunteer\" button to find out how to potentially participate in the study.",
];

/// Equirectangular projection of WGS84 coordinates onto a `width` x `height` viewport.
///
/// Longitude -180..180 maps left to right, latitude 90..-90 maps top to bottom.
/// Out-of-range input is clamped to the viewport edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub width: f64,
    pub height: f64,
}

impl MapProjection {
    pub const DEFAULT_WIDTH: f64 = 960.0;
    pub const DEFAULT_HEIGHT: f64 = 480.0;

    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
        let lat = if lat.is_finite() { lat.clamp(-90.0, 90.0) } else { 0.0 };
        let lng = if lng.is_finite() { lng.clamp(-180.0, 180.0) } else { 0.0 };
        let x = (lng + 180.0) / 360.0 * self.width;
        let y = (90.0 - lat) / 180.0 * self.height;
        (x, y)
    }

    pub fn project_location(&self, loc: &Location) -> (f64, f64) {
        self.project(loc.lat, loc.lng)
    }

    /// Position as percentages of the viewport, for absolutely positioned overlays.
    pub fn to_percent(&self, lat: f64, lng: f64) -> (f64, f64) {
        let (x, y) = self.project(lat, lng);
        (x / self.width * 100.0, y / self.height * 100.0)
    }
}

impl Default for MapProjection {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

/// Bar width (percent of the widest bar) for a chart row.
pub fn bar_percent(count: usize, max: usize) -> f64 {
    if max == 0 {
        0.0
    } else {
        (count.min(max) as f64 / max as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_tabs_inventory_is_stable() {
        let all = DashboardTab::all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], DashboardTab::default());
        for t in all {
            assert!(!t.label().trim().is_empty());
            assert!(!t.icon().trim().is_empty());
        }
    }

    #[test]
    fn projection_maps_corners_and_center() {
        let p = MapProjection::new(360.0, 180.0);
        assert_eq!(p.project(90.0, -180.0), (0.0, 0.0));
        assert_eq!(p.project(-90.0, 180.0), (360.0, 180.0));
        assert_eq!(p.project(0.0, 0.0), (180.0, 90.0));
    }

    #[test]
    fn projection_clamps_bad_input() {
        let p = MapProjection::default();
        let (x, y) = p.project(200.0, -500.0);
        assert_eq!((x, y), (0.0, 0.0));
        let (x, y) = p.project(f64::NAN, f64::INFINITY);
        assert_eq!((x, y), p.project(0.0, 0.0));
    }

    #[test]
    fn percent_overlay_matches_projection() {
        let p = MapProjection::default();
        let (px, py) = p.to_percent(0.0, 0.0);
        assert!((px - 50.0).abs() < 1e-9);
        assert!((py - 50.0).abs() < 1e-9);

        let loc = Location::new(45.0, 90.0);
        assert_eq!(p.project_location(&loc), p.project(45.0, 90.0));
    }

    #[test]
    fn bar_percent_handles_zero_max() {
        assert_eq!(bar_percent(3, 0), 0.0);
        assert_eq!(bar_percent(5, 10), 50.0);
        assert_eq!(bar_percent(12, 10), 100.0);
    }
}
