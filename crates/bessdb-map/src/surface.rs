//! The rendering collaborator: whatever draws the map implements
//! [`MapSurface`] and receives marker and view operations from the
//! controller.

use bessdb_core::premise::collapse_lines;
use bessdb_core::{LatLng, PremiseRecord};

/// Marker icon variant, keyed on certificate status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Active,
    Expired,
}

/// Popup payload shown when a marker is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPopup {
    pub company_name: String,
    pub is_active: bool,
    /// Single-line business address.
    pub address: String,
    pub phone: String,
    pub certificate_date: String,
    pub expiry_date: String,
    pub serial_no: String,
}

/// One placed marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub popup: MarkerPopup,
}

impl Marker {
    /// Builds the marker for a premise resolved to `position`.
    #[must_use]
    pub fn for_premise(record: &PremiseRecord, position: LatLng) -> Self {
        Self {
            position,
            icon: if record.is_active {
                MarkerIcon::Active
            } else {
                MarkerIcon::Expired
            },
            popup: MarkerPopup {
                company_name: record.company_name.clone(),
                is_active: record.is_active,
                address: collapse_lines(&record.business_address),
                phone: record.phone.clone(),
                certificate_date: record.certificate_date.clone(),
                expiry_date: record.expiry_date.clone(),
                serial_no: record.serial_no.clone(),
            },
        }
    }
}

/// Operations the controller needs from a map renderer.
///
/// The surface owns whatever marker collection it maintains; the controller
/// only ever clears it wholesale or appends. Selection callbacks flow the
/// other way and are the surface's concern.
pub trait MapSurface {
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: Marker);
    /// Centers the view on `center` at the given zoom level.
    fn set_view(&mut self, center: LatLng, zoom: u8);
}
