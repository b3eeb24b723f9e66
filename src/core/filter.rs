//! Filter dimensions, filter state and the pure filtering functions.
//!
//! Semantics: an asset passes a dimension when nothing is selected for that
//! dimension or when any of its values is selected (OR within a dimension). An
//! asset is kept when it passes every dimension (AND across dimensions). Input
//! order is preserved.

use hashbrown::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::record::{non_empty, AssetRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FilterDimension {
    Sponsor,
    Name,
}

impl FilterDimension {
    pub fn label(self) -> &'static str {
        match self {
            FilterDimension::Sponsor => "sponsor",
            FilterDimension::Name => "name",
        }
    }

    pub fn all() -> &'static [FilterDimension] {
        &[FilterDimension::Sponsor, FilterDimension::Name]
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sponsor" | "sponsors" | "s" => Some(FilterDimension::Sponsor),
            "name" | "names" | "product" | "n" => Some(FilterDimension::Name),
            _ => None,
        }
    }

    /// Values an asset carries for this dimension. Blank strings are skipped.
    pub fn values<'a>(self, asset: &'a AssetRecord) -> Vec<&'a str> {
        match self {
            FilterDimension::Sponsor => asset.sponsor_names().collect(),
            FilterDimension::Name => non_empty(asset.preferred_name.as_deref())
                .into_iter()
                .collect(),
        }
    }
}

/// Current filter selections. An empty set means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterState {
    #[cfg_attr(feature = "serde", serde(default))]
    sponsors: HashSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    names: HashSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_for(&self, dim: FilterDimension) -> &HashSet<String> {
        match dim {
            FilterDimension::Sponsor => &self.sponsors,
            FilterDimension::Name => &self.names,
        }
    }

    fn set_for_mut(&mut self, dim: FilterDimension) -> &mut HashSet<String> {
        match dim {
            FilterDimension::Sponsor => &mut self.sponsors,
            FilterDimension::Name => &mut self.names,
        }
    }

    /// Replace the selection for one dimension.
    pub fn set<I, S>(&mut self, dim: FilterDimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = self.set_for_mut(dim);
        set.clear();
        set.extend(
            values
                .into_iter()
                .map(Into::<String>::into)
                .filter(|v| !v.trim().is_empty()),
        );
    }

    /// Add `value` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, dim: FilterDimension, value: &str) -> bool {
        let set = self.set_for_mut(dim);
        if set.remove(value) || value.trim().is_empty() {
            return false;
        }
        set.insert(value.to_string());
        true
    }

    pub fn clear(&mut self, dim: FilterDimension) {
        self.set_for_mut(dim).clear();
    }

    pub fn clear_all(&mut self) {
        self.sponsors.clear();
        self.names.clear();
    }

    pub fn is_selected(&self, dim: FilterDimension, value: &str) -> bool {
        self.set_for(dim).contains(value)
    }

    /// Selected values for a dimension, sorted for stable display.
    pub fn selected(&self, dim: FilterDimension) -> Vec<&str> {
        let mut v: Vec<&str> = self.set_for(dim).iter().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    pub fn is_restricted(&self, dim: FilterDimension) -> bool {
        !self.set_for(dim).is_empty()
    }

    pub fn is_unrestricted(&self) -> bool {
        FilterDimension::all()
            .iter()
            .all(|&d| !self.is_restricted(d))
    }

    /// Whether `asset` passes one dimension.
    pub fn passes(&self, dim: FilterDimension, asset: &AssetRecord) -> bool {
        let set = self.set_for(dim);
        set.is_empty() || dim.values(asset).iter().any(|v| set.contains(*v))
    }

    /// Whether `asset` passes every dimension.
    pub fn matches(&self, asset: &AssetRecord) -> bool {
        FilterDimension::all().iter().all(|&d| self.passes(d, asset))
    }
}

/// Distinct values of `dim` across `assets`, in first-seen order.
pub fn unique_values(assets: &[AssetRecord], dim: FilterDimension) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for asset in assets {
        for v in dim.values(asset) {
            if seen.insert(v) {
                out.push(v.to_string());
            }
        }
    }
    out
}

/// Assets matching `state`, in input order.
pub fn apply_filter<'a>(assets: &'a [AssetRecord], state: &FilterState) -> Vec<&'a AssetRecord> {
    if state.is_unrestricted() {
        return assets.iter().collect();
    }
    assets.iter().filter(|a| state.matches(a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<AssetRecord> {
        vec![
            AssetRecord::new("1").with_sponsor("A").with_name("Alpha"),
            AssetRecord::new("2").with_sponsor("B").with_name("Beta"),
            AssetRecord::new("3")
                .with_sponsor("B")
                .with_sponsor("A")
                .with_name("Alpha"),
            AssetRecord::new("4"),
        ]
    }

    fn ids(v: &[&AssetRecord]) -> Vec<String> {
        v.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn sponsor_filter_keeps_matching_assets() {
        let assets = vec![
            AssetRecord::new("1").with_sponsor("A"),
            AssetRecord::new("2").with_sponsor("B"),
        ];
        let mut state = FilterState::new();
        state.set(FilterDimension::Sponsor, ["A"]);

        let out = apply_filter(&assets, &state);
        assert_eq!(out, vec![&assets[0]]);
    }

    #[test]
    fn no_selection_returns_everything() {
        let assets = sample();
        let out = apply_filter(&assets, &FilterState::default());
        assert_eq!(out.len(), assets.len());
        assert!(out.iter().zip(assets.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn empty_input_yields_empty_outputs() {
        let assets: Vec<AssetRecord> = Vec::new();
        assert!(unique_values(&assets, FilterDimension::Name).is_empty());
        assert!(unique_values(&assets, FilterDimension::Sponsor).is_empty());

        let mut state = FilterState::new();
        state.set(FilterDimension::Sponsor, ["A"]);
        assert!(apply_filter(&assets, &state).is_empty());
        assert!(apply_filter(&assets, &FilterState::new()).is_empty());
    }

    #[test]
    fn unique_values_dedup_in_first_seen_order() {
        let assets = sample();
        assert_eq!(
            unique_values(&assets, FilterDimension::Sponsor),
            vec!["A".to_string(), "B".to_string()]
        );
        assert_eq!(
            unique_values(&assets, FilterDimension::Name),
            vec!["Alpha".to_string(), "Beta".to_string()]
        );

        // First-seen order follows the input, not lexical order.
        let reversed: Vec<AssetRecord> = assets.into_iter().rev().collect();
        assert_eq!(
            unique_values(&reversed, FilterDimension::Sponsor),
            vec!["B".to_string(), "A".to_string()]
        );
    }

    #[test]
    fn unique_values_skip_blank_strings() {
        let assets = vec![
            AssetRecord::new("1").with_sponsor("").with_name("  "),
            AssetRecord::new("2").with_sponsor("A").with_sponsor("   ").with_name("Alpha"),
            AssetRecord::new("3").with_sponsor("\t").with_name(""),
        ];
        assert_eq!(unique_values(&assets, FilterDimension::Sponsor), vec!["A".to_string()]);
        assert_eq!(unique_values(&assets, FilterDimension::Name), vec!["Alpha".to_string()]);
    }

    #[test]
    fn or_within_dimension_and_across_dimensions() {
        let assets = sample();
        let mut state = FilterState::new();
        state.set(FilterDimension::Sponsor, ["A", "B"]);
        assert_eq!(ids(&apply_filter(&assets, &state)), vec!["1", "2", "3"]);

        state.set(FilterDimension::Name, ["Alpha"]);
        assert_eq!(ids(&apply_filter(&assets, &state)), vec!["1", "3"]);

        state.set(FilterDimension::Sponsor, ["B"]);
        assert_eq!(ids(&apply_filter(&assets, &state)), vec!["3"]);
    }

    #[test]
    fn assets_without_values_fail_restricted_dimensions_only() {
        let assets = sample();
        let mut state = FilterState::new();
        state.set(FilterDimension::Name, ["Beta"]);
        assert_eq!(ids(&apply_filter(&assets, &state)), vec!["2"]);

        state.clear(FilterDimension::Name);
        assert!(ids(&apply_filter(&assets, &state)).contains(&"4".to_string()));
    }

    #[test]
    fn filtered_is_subset_and_idempotent() {
        let assets = sample();
        let mut state = FilterState::new();
        state.set(FilterDimension::Sponsor, ["A"]);

        let once = apply_filter(&assets, &state);
        assert!(once.iter().all(|a| assets.contains(*a)));

        let owned: Vec<AssetRecord> = once.iter().map(|a| (*a).clone()).collect();
        let twice = apply_filter(&owned, &state);
        assert_eq!(ids(&once), ids(&twice));
        assert_eq!(ids(&once), ids(&apply_filter(&assets, &state)));
    }

    #[test]
    fn unknown_selection_matches_nothing() {
        let assets = sample();
        let mut state = FilterState::new();
        state.set(FilterDimension::Sponsor, ["Nobody"]);
        assert!(apply_filter(&assets, &state).is_empty());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut state = FilterState::new();
        assert!(state.toggle(FilterDimension::Name, "Alpha"));
        assert!(state.is_selected(FilterDimension::Name, "Alpha"));
        assert!(!state.is_unrestricted());
        assert!(!state.toggle(FilterDimension::Name, "Alpha"));
        assert!(state.is_unrestricted());

        assert!(!state.toggle(FilterDimension::Name, "  "));
        assert!(state.is_unrestricted());
    }

    #[test]
    fn selected_is_sorted_and_blank_values_are_dropped() {
        let mut state = FilterState::new();
        state.set(FilterDimension::Sponsor, ["Pfizer", "", "BioNTech"]);
        assert_eq!(
            state.selected(FilterDimension::Sponsor),
            vec!["BioNTech", "Pfizer"]
        );
        state.clear_all();
        assert!(state.is_unrestricted());
    }

    #[test]
    fn dimension_parse_accepts_aliases() {
        assert_eq!(FilterDimension::parse("Sponsor"), Some(FilterDimension::Sponsor));
        assert_eq!(FilterDimension::parse("n"), Some(FilterDimension::Name));
        assert_eq!(FilterDimension::parse("phase"), None);
    }
}
