//! # trialmap
//!
//! Filter and selection kernel for a clinical-trial / vaccine tracker dashboard.
//!
//! The crate turns a list of trial records into everything a map or detail view
//! needs: unique filter options, the filtered record list, map pins, the selected
//! record and the popup card for a clicked pin. Rendering is left to the caller.
//!
//! ## Quick Start
//!
//! ```
//! use trialmap::prelude::*;
//!
//! let assets = vec![
//!     AssetRecord::new("1").with_sponsor("A"),
//!     AssetRecord::new("2").with_sponsor("B"),
//! ];
//!
//! let mut filter = FilterState::default();
//! filter.toggle(FilterDimension::Sponsor, "A");
//!
//! let filtered = apply_filter(&assets, &filter);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].id, "1");
//!
//! assert!(select_asset(&assets, Some("99")).is_none());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialization plus dataset and config loading
//!
//! ## Modules
//!
//! - [`record`]: Trial record types
//! - [`filter`]: Filter dimensions, filter state and the filtering functions
//! - [`selection`]: Selected asset and pin popup state
//! - [`view`]: Derived view models (pins, popup cards, chart tallies)
//! - [`events`]: Injected analytics sink
//! - [`dashboard`]: Stateful controller wiring UI events to the kernel

#[path = "core/record.rs"]
pub mod record;

#[path = "core/filter.rs"]
pub mod filter;

#[path = "core/selection.rs"]
pub mod selection;

#[path = "core/view.rs"]
pub mod view;

#[path = "core/events.rs"]
pub mod events;

#[path = "core/dashboard.rs"]
pub mod dashboard;

#[cfg(feature = "serde")]
#[path = "core/dataset.rs"]
pub mod dataset;

#[cfg(feature = "serde")]
#[path = "core/config.rs"]
pub mod config;

/// Prelude module for convenient imports.
///
/// ```
/// use trialmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dashboard::{Dashboard, DashboardView};
    pub use crate::events::{EventSink, NullSink, RecordingSink, TracingSink, UiEvent};
    pub use crate::filter::{apply_filter, unique_values, FilterDimension, FilterState};
    pub use crate::record::{AssetRecord, Contact, Location, Sponsor};
    pub use crate::selection::{select_asset, PopupState, SelectionState};
    pub use crate::view::{tally, ChartDimension, FilterOption, Pin, PopupCard, ABSENT};
}
