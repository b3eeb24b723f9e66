//! View models handed to renderers (map, popup, detail panel, charts).
//!
//! Everything here is a plain data projection of records plus filter/selection
//! state. Missing fields are rendered as [`ABSENT`].

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::filter::{unique_values, FilterDimension, FilterState};
use crate::record::{non_empty, AssetRecord, Contact, Location};
use crate::selection::SelectionState;

/// Placeholder shown for a missing optional field.
pub const ABSENT: &str = "__";

/// Label used for missing values in chart tallies.
pub const UNKNOWN: &str = "Unknown";

fn or_absent(s: Option<&str>) -> String {
    non_empty(s).unwrap_or(ABSENT).to_string()
}

/// Map pin for one located asset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Pin {
    pub id: String,
    pub label: String,
    pub location: Location,
    pub selected: bool,
}

/// Pins for every asset that has a usable location. Unlocated assets are skipped.
///
/// A pin is selected when its id is. With `focus` set (the clicked site), only the
/// selected pins at that point are marked, so repeated ids at other sites stay plain.
pub fn pins(
    assets: &[&AssetRecord],
    selection: &SelectionState,
    focus: Option<&Location>,
) -> Vec<Pin> {
    assets
        .iter()
        .filter_map(|a| {
            a.pin_location().map(|loc| Pin {
                id: a.id.clone(),
                label: a.label().to_string(),
                location: loc.clone(),
                selected: selection.is_selected(&a.id)
                    && focus.map_or(true, |f| f.same_point(loc)),
            })
        })
        .collect()
}

/// One entry of a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FilterOption {
    pub value: String,
    pub selected: bool,
}

/// Dropdown entries for `dim`, in first-seen order.
pub fn filter_options(
    assets: &[AssetRecord],
    dim: FilterDimension,
    state: &FilterState,
) -> Vec<FilterOption> {
    unique_values(assets, dim)
        .into_iter()
        .map(|value| FilterOption {
            selected: state.is_selected(dim, &value),
            value,
        })
        .collect()
}

/// "Total Treatment Products" tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryTile {
    pub total: usize,
}

impl SummaryTile {
    pub fn header(&self) -> &'static str {
        "Total Treatment Products"
    }

    /// Count, or `"..."` while nothing is loaded.
    pub fn value(&self) -> String {
        if self.total == 0 {
            "...".to_string()
        } else {
            self.total.to_string()
        }
    }
}

/// Details view of a pin popup (and the side detail panel).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PopupCard {
    pub id: String,
    /// `"Trial Sponsor"` or `"Trial Sponsors"`.
    pub sponsor_heading: String,
    pub sponsor_names: String,
    pub first_sponsor: String,
    pub product: String,
    pub phase: String,
    pub status: String,
    pub accepts_healthy_volunteers: bool,
    /// Registry URL, if any. Renderers show "Click Here" for it.
    pub registry_link: Option<String>,
    pub site: String,
}

impl PopupCard {
    pub fn from_asset(asset: &AssetRecord) -> Self {
        let names: Vec<&str> = asset.sponsor_names().collect();
        let sponsor_heading = if names.len() > 1 {
            "Trial Sponsors"
        } else {
            "Trial Sponsor"
        };
        let sponsor_names = if names.is_empty() {
            ABSENT.to_string()
        } else {
            names.join(", ")
        };

        Self {
            id: asset.id.clone(),
            sponsor_heading: sponsor_heading.to_string(),
            sponsor_names,
            first_sponsor: or_absent(asset.first_sponsor()),
            product: or_absent(asset.preferred_name.as_deref()),
            phase: or_absent(asset.phase.as_deref()),
            status: or_absent(asset.current_status.as_deref()),
            accepts_healthy_volunteers: asset.accepts_healthy_volunteers(),
            registry_link: non_empty(asset.registry_link.as_deref()).map(str::to_string),
            site: or_absent(asset.location.as_ref().and_then(|l| l.name.as_deref())),
        }
    }

    pub fn healthy_volunteers_label(&self) -> &'static str {
        if self.accepts_healthy_volunteers {
            "Yes"
        } else {
            "No"
        }
    }

    pub fn registry_label(&self) -> &str {
        match self.registry_link {
            Some(_) => "Click Here",
            None => ABSENT,
        }
    }
}

/// Contact ("how to volunteer") view of a pin popup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ContactCard {
    pub name: Option<String>,
    pub website: Option<String>,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl ContactCard {
    /// Built from the first contact; an asset without contacts yields an all-absent card.
    pub fn from_asset(asset: &AssetRecord) -> Self {
        let empty = Contact::default();
        let c = asset.first_contact().unwrap_or(&empty);
        Self {
            name: non_empty(c.name.as_deref()).map(str::to_string),
            website: non_empty(c.website.as_deref()).map(str::to_string),
            email: or_absent(c.email.as_deref()),
            phone: or_absent(c.phone.as_deref()),
            notes: or_absent(c.notes.as_deref()),
        }
    }

    pub fn mailto(&self) -> Option<String> {
        if self.email == ABSENT {
            None
        } else {
            Some(format!("mailto:{}", self.email))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ChartDimension {
    Phase,
    Status,
    TherapeuticApproach,
    Sponsor,
}

impl ChartDimension {
    pub fn label(self) -> &'static str {
        match self {
            ChartDimension::Phase => "Phase",
            ChartDimension::Status => "Status",
            ChartDimension::TherapeuticApproach => "Therapeutic Approach",
            ChartDimension::Sponsor => "Sponsor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phase" => Some(ChartDimension::Phase),
            "status" => Some(ChartDimension::Status),
            "approach" | "therapeutic_approach" => Some(ChartDimension::TherapeuticApproach),
            "sponsor" => Some(ChartDimension::Sponsor),
            _ => None,
        }
    }

    pub fn all() -> &'static [ChartDimension] {
        &[
            ChartDimension::Phase,
            ChartDimension::Status,
            ChartDimension::TherapeuticApproach,
            ChartDimension::Sponsor,
        ]
    }

    fn keys(self, asset: &AssetRecord) -> Vec<&str> {
        fn single(s: Option<&str>) -> Vec<&str> {
            vec![non_empty(s).unwrap_or(UNKNOWN)]
        }
        match self {
            ChartDimension::Phase => single(asset.phase.as_deref()),
            ChartDimension::Status => single(asset.current_status.as_deref()),
            ChartDimension::TherapeuticApproach => single(asset.therapeutic_approach.as_deref()),
            ChartDimension::Sponsor => {
                let names: Vec<&str> = asset.sponsor_names().collect();
                if names.is_empty() {
                    vec![UNKNOWN]
                } else {
                    names
                }
            }
        }
    }
}

/// Count assets per value of `dim`, in first-seen order.
///
/// Multi-valued dimensions (sponsors) count an asset once per value.
pub fn tally<'a, I>(assets: I, dim: ChartDimension) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a AssetRecord>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<(String, usize)> = Vec::new();
    for asset in assets {
        for key in dim.keys(asset) {
            match index.get(key) {
                Some(&i) => out[i].1 += 1,
                None => {
                    index.insert(key, out.len());
                    out.push((key.to_string(), 1));
                }
            }
        }
    }
    out
}

/// Assets ordered for the timeline tab: by phase label, then by label.
pub fn timeline<'a>(assets: &[&'a AssetRecord]) -> Vec<&'a AssetRecord> {
    let mut out: Vec<&AssetRecord> = assets.to_vec();
    out.sort_by(|a, b| {
        phase_rank(a.phase.as_deref())
            .cmp(&phase_rank(b.phase.as_deref()))
            .then_with(|| a.label().cmp(b.label()))
    });
    out
}

fn phase_rank(phase: Option<&str>) -> u8 {
    let Some(p) = non_empty(phase) else {
        return u8::MAX;
    };
    let p = p.to_ascii_lowercase();
    if p.starts_with("pre") {
        return 0;
    }
    // "Phase 1/Phase 2" ranks with the later phase.
    p.split(|c: char| !c.is_ascii_alphanumeric())
        .filter_map(|tok| match tok {
            "1" | "i" => Some(1),
            "2" | "ii" => Some(2),
            "3" | "iii" => Some(3),
            "4" | "iv" => Some(4),
            _ => None,
        })
        .max()
        .unwrap_or(u8::MAX - 1)
}
