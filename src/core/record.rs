//! Trial record types.
//!
//! Every optional field is an explicit `Option` (or an empty `Vec`) so a record
//! with missing metadata is still a valid record. Renderers decide how absence is
//! displayed; see [`crate::view::ABSENT`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geographic position of a trial site.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    /// Site name (hospital, clinic), when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            name: None,
        }
    }

    /// Both coordinates are finite and inside the WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Same coordinates; the site name is ignored.
    pub fn same_point(&self, other: &Location) -> bool {
        self.lat == other.lat && self.lng == other.lng
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Sponsor {
    pub sponsor_name: String,
}

impl Sponsor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            sponsor_name: name.into(),
        }
    }
}

/// Participation contact for a trial site ("how to volunteer").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Contact {
    pub name: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// One trial or trial site.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AssetRecord {
    /// Unique key used for selection.
    pub id: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub trial_id: Option<String>,
    /// Product name shown in the name filter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chemical_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub brand_name: Option<String>,

    /// Ordered; the first entry is the "lead" sponsor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sponsors: Vec<Sponsor>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub phase: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_status: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub indication: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub therapeutic_approach: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub repurposed: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub accepts_healthy_subjects: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub registry_link: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub contact: Vec<Contact>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<Location>,
}

impl AssetRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.preferred_name = Some(name.into());
        self
    }

    pub fn with_sponsor(mut self, name: impl Into<String>) -> Self {
        self.sponsors.push(Sponsor::new(name));
        self
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some(Location::new(lat, lng));
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact.push(contact);
        self
    }

    /// Display label: the product name, or the id when the record has none.
    pub fn label(&self) -> &str {
        non_empty(self.preferred_name.as_deref()).unwrap_or(&self.id)
    }

    pub fn sponsor_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sponsors
            .iter()
            .map(|s| s.sponsor_name.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// First sponsor in list order.
    pub fn first_sponsor(&self) -> Option<&str> {
        self.sponsor_names().next()
    }

    /// First participation contact, if any.
    pub fn first_contact(&self) -> Option<&Contact> {
        self.contact.first()
    }

    pub fn accepts_healthy_volunteers(&self) -> bool {
        self.accepts_healthy_subjects.as_deref() == Some("Yes")
    }

    /// Location usable for a map pin.
    pub fn pin_location(&self) -> Option<&Location> {
        self.location.as_ref().filter(|l| l.is_valid())
    }
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
