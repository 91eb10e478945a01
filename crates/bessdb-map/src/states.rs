//! Coarse viewport → state filtering.
//!
//! Each state is approximated by a single representative point (its capital),
//! which is enough to prune the geocoding candidate set before the expensive
//! per-address resolution. Precision is deliberately traded away: see
//! [`states_in_bounds`] for the degenerate-viewport fallback.

use bessdb_core::{LatLng, LatLngBounds};

/// Margin added to every side of the viewport before the containment test,
/// so a tightly zoomed view still picks up the state it sits inside even
/// when the capital lies just off-screen.
const VIEWPORT_MARGIN_DEGREES: f64 = 0.5;

/// Representative point per Malaysian state and federal territory.
pub const STATE_POINTS: &[(&str, LatLng)] = &[
    ("JOHOR", LatLng::new(1.4854, 103.7618)),
    ("KEDAH", LatLng::new(6.1184, 100.3685)),
    ("KELANTAN", LatLng::new(6.1254, 102.2381)),
    ("MELAKA", LatLng::new(2.1896, 102.2501)),
    ("NEGERI SEMBILAN", LatLng::new(2.7258, 101.9424)),
    ("PAHANG", LatLng::new(3.8126, 103.3256)),
    ("PERAK", LatLng::new(4.5921, 101.0901)),
    ("PERLIS", LatLng::new(6.4449, 100.1986)),
    ("PULAU PINANG", LatLng::new(5.4164, 100.3327)),
    ("SABAH", LatLng::new(5.9788, 116.0753)),
    ("SARAWAK", LatLng::new(1.5533, 110.3592)),
    ("SELANGOR", LatLng::new(3.0738, 101.5183)),
    ("TERENGGANU", LatLng::new(5.3117, 103.1324)),
    ("KUALA LUMPUR", LatLng::new(3.1390, 101.6869)),
    ("PUTRAJAYA", LatLng::new(2.9264, 101.6964)),
    ("LABUAN", LatLng::new(5.2831, 115.2308)),
];

/// States whose representative point falls inside the viewport expanded by
/// [`VIEWPORT_MARGIN_DEGREES`].
///
/// Degenerate case: when no representative point is inside — the viewport
/// sits between capitals, or covers none at all — the full state list is
/// returned rather than an empty set, so valid candidates are never hidden
/// by the heuristic. Documented limitation, not a bug.
#[must_use]
pub fn states_in_bounds(bounds: LatLngBounds) -> Vec<&'static str> {
    let expanded = bounds.pad(VIEWPORT_MARGIN_DEGREES);
    let visible: Vec<&'static str> = STATE_POINTS
        .iter()
        .filter(|(_, point)| expanded.contains(*point))
        .map(|(name, _)| *name)
        .collect();

    if visible.is_empty() {
        STATE_POINTS.iter().map(|(name, _)| *name).collect()
    } else {
        visible
    }
}
