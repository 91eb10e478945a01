//! Map-side orchestration: coarse viewport filtering by state and the
//! marker controller that drives a rendering surface.

pub mod controller;
pub mod states;
pub mod surface;

pub use controller::{MarkerController, ResolveAddress, SearchState, SearchSummary};
pub use states::{states_in_bounds, STATE_POINTS};
pub use surface::{MapSurface, Marker, MarkerIcon, MarkerPopup};
