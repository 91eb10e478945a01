use std::collections::HashMap;
use std::sync::Mutex;

use bessdb_core::{LatLng, LatLngBounds, PremiseRecord};

use super::*;
use crate::surface::MarkerIcon;

/// Viewport over the Klang Valley: contains the Selangor, Kuala Lumpur and
/// Putrajaya capitals, far from Johor's.
fn klang_valley() -> LatLngBounds {
    LatLngBounds::new(LatLng::new(2.8, 101.3), LatLng::new(3.3, 101.9))
}

/// Viewport over open sea: no representative point within the margin.
fn open_sea() -> LatLngBounds {
    LatLngBounds::new(LatLng::new(4.0, 108.0), LatLng::new(4.5, 108.5))
}

fn premise(name: &str, state: &str, business: &str, registered: &str) -> PremiseRecord {
    PremiseRecord {
        index: "1".to_string(),
        state: state.to_string(),
        company_name: name.to_string(),
        registered_address: registered.to_string(),
        business_address: business.to_string(),
        phone: String::new(),
        certificate_date: "01/01/2024".to_string(),
        expiry_date: "01/01/2099".to_string(),
        serial_no: format!("BeSS-{name}"),
        is_active: true,
        district: "PETALING".to_string(),
    }
}

#[derive(Default)]
struct RecordingSurface {
    markers: Vec<Marker>,
    clears: usize,
    view: Option<(LatLng, u8)>,
}

impl MapSurface for RecordingSurface {
    fn clear_markers(&mut self) {
        self.clears += 1;
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some((center, zoom));
    }
}

/// Scripted resolver: known addresses resolve to fixed points, everything
/// else to `None`. Records every attempted address.
#[derive(Default)]
struct ScriptedResolver {
    known: HashMap<String, LatLng>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedResolver {
    fn with(entries: &[(&str, LatLng)]) -> Self {
        Self {
            known: entries
                .iter()
                .map(|(addr, pos)| ((*addr).to_string(), *pos))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ResolveAddress for &ScriptedResolver {
    fn resolve(&self, address: &str) -> impl std::future::Future<Output = Option<LatLng>> + Send {
        self.calls.lock().unwrap().push(address.to_string());
        let out = self.known.get(address).copied();
        async move { out }
    }
}

#[tokio::test]
async fn search_prunes_by_state_and_places_markers_in_bounds() {
    let in_valley = LatLng::new(3.05, 101.55);
    let resolver = ScriptedResolver::with(&[("JALAN SATU, SELANGOR ADDR", in_valley)]);
    let records = vec![
        premise("Kedai Selangor", "SELANGOR", "JALAN SATU, SELANGOR ADDR", ""),
        premise("Kedai Johor", "JOHOR", "JALAN DUA, JOHOR ADDR", ""),
    ];

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    let summary = controller.search_area(klang_valley(), &records).await;

    assert_eq!(summary, SearchSummary { candidates: 1, placed: 1 });
    assert_eq!(resolver.calls(), vec!["JALAN SATU, SELANGOR ADDR"]);
    let markers = &controller.surface().markers;
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].popup.company_name, "Kedai Selangor");
    assert_eq!(markers[0].icon, MarkerIcon::Active);
}

#[tokio::test]
async fn resolved_point_outside_viewport_is_skipped_silently() {
    let far_away = LatLng::new(5.98, 116.07);
    let resolver = ScriptedResolver::with(&[("ALAMAT LUAR", far_away)]);
    let records = vec![premise("Kedai Jauh", "SELANGOR", "ALAMAT LUAR", "")];

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    let summary = controller.search_area(klang_valley(), &records).await;

    assert_eq!(summary, SearchSummary { candidates: 1, placed: 0 });
    assert!(controller.surface().markers.is_empty());
}

#[tokio::test]
async fn unresolved_address_is_skipped_silently() {
    let resolver = ScriptedResolver::default();
    let records = vec![premise("Kedai Hilang", "SELANGOR", "ALAMAT TIADA", "")];

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    let summary = controller.search_area(klang_valley(), &records).await;

    assert_eq!(summary, SearchSummary { candidates: 1, placed: 0 });
    assert_eq!(controller.state(), SearchState::Idle);
}

#[tokio::test]
async fn markers_follow_candidate_order_not_resolution_luck() {
    let resolver = ScriptedResolver::with(&[
        ("ALAMAT A", LatLng::new(3.00, 101.50)),
        ("ALAMAT B", LatLng::new(3.10, 101.60)),
        ("ALAMAT C", LatLng::new(3.20, 101.70)),
    ]);
    let records = vec![
        premise("Pertama", "SELANGOR", "ALAMAT A", ""),
        premise("Kedua", "SELANGOR", "ALAMAT B", ""),
        premise("Ketiga", "SELANGOR", "ALAMAT C", ""),
    ];

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    controller.search_area(klang_valley(), &records).await;

    let names: Vec<&str> = controller
        .surface()
        .markers
        .iter()
        .map(|m| m.popup.company_name.as_str())
        .collect();
    assert_eq!(names, vec!["Pertama", "Kedua", "Ketiga"]);
}

#[tokio::test]
async fn candidate_list_is_truncated_to_the_cap() {
    let resolver = ScriptedResolver::default();
    let records: Vec<PremiseRecord> = (0..5)
        .map(|i| premise(&format!("Kedai {i}"), "SELANGOR", &format!("ALAMAT {i}"), ""))
        .collect();

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 2);
    let summary = controller.search_area(klang_valley(), &records).await;

    assert_eq!(summary.candidates, 2);
    assert_eq!(resolver.calls().len(), 2);
}

#[tokio::test]
async fn blank_business_address_falls_back_to_registered() {
    let resolver = ScriptedResolver::with(&[("ALAMAT BERDAFTAR", LatLng::new(3.0, 101.5))]);
    let records = vec![premise("Kedai Tetap", "SELANGOR", "  ", "ALAMAT BERDAFTAR")];

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    let summary = controller.search_area(klang_valley(), &records).await;

    assert_eq!(resolver.calls(), vec!["ALAMAT BERDAFTAR"]);
    assert_eq!(summary.placed, 1);
}

#[tokio::test]
async fn a_new_search_clears_previous_markers_first() {
    let resolver = ScriptedResolver::with(&[("ALAMAT A", LatLng::new(3.0, 101.5))]);
    let records = vec![premise("Kedai", "SELANGOR", "ALAMAT A", "")];

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    controller.search_area(klang_valley(), &records).await;
    controller.search_area(klang_valley(), &records).await;

    assert_eq!(controller.surface().clears, 2);
    // Second search re-placed from cache-equivalent scripted results.
    assert_eq!(controller.surface().markers.len(), 1);
}

#[tokio::test]
async fn viewport_move_rearms_search_without_clearing_markers() {
    let resolver = ScriptedResolver::with(&[("ALAMAT A", LatLng::new(3.0, 101.5))]);
    let records = vec![premise("Kedai", "SELANGOR", "ALAMAT A", "")];

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    assert!(controller.is_search_armed());
    controller.search_area(klang_valley(), &records).await;
    assert!(!controller.is_search_armed());

    controller.viewport_moved();
    assert!(controller.is_search_armed());
    assert_eq!(controller.surface().markers.len(), 1);
}

#[tokio::test]
async fn degenerate_viewport_attempts_every_record() {
    let resolver = ScriptedResolver::default();
    let records = vec![
        premise("Kedai Selangor", "SELANGOR", "ALAMAT S", ""),
        premise("Kedai Sabah", "SABAH", "ALAMAT B", ""),
    ];

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    let summary = controller.search_area(open_sea(), &records).await;

    assert_eq!(summary.candidates, 2);
    assert_eq!(resolver.calls().len(), 2);
}

#[tokio::test]
async fn select_premise_centers_view_and_adds_a_marker() {
    let position = LatLng::new(2.99, 101.78);
    let resolver = ScriptedResolver::with(&[("ALAMAT PILIHAN", position)]);
    let record = premise("Kedai Pilihan", "SELANGOR", "ALAMAT PILIHAN", "");

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    let resolved = controller.select_premise(&record).await;

    assert_eq!(resolved, Some(position));
    assert_eq!(controller.surface().view, Some((position, 15)));
    assert_eq!(controller.surface().markers.len(), 1);
    assert_eq!(controller.state(), SearchState::Idle);
}

#[tokio::test]
async fn select_premise_with_unresolvable_address_does_nothing() {
    let resolver = ScriptedResolver::default();
    let record = premise("Kedai Hilang", "SELANGOR", "ALAMAT TIADA", "");

    let mut controller = MarkerController::new(RecordingSurface::default(), &resolver, 50);
    assert_eq!(controller.select_premise(&record).await, None);
    assert!(controller.surface().view.is_none());
    assert!(controller.surface().markers.is_empty());
}
