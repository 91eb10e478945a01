//! The per-page marker controller: "search this area" orchestration and
//! one-off premise selection against a persistent map surface.

use std::future::Future;

use bessdb_core::premise::normalize_state;
use bessdb_core::{LatLngBounds, PremiseRecord};
use bessdb_geocode::Resolver;

use crate::states::states_in_bounds;
use crate::surface::{MapSurface, Marker};

/// Zoom level used when centering on a single selected premise.
const SELECT_ZOOM: u8 = 15;

/// Address-resolution collaborator, abstracted so tests can script
/// resolutions without a network.
pub trait ResolveAddress {
    fn resolve(
        &self,
        address: &str,
    ) -> impl Future<Output = Option<bessdb_core::LatLng>> + Send;
}

impl ResolveAddress for Resolver {
    fn resolve(
        &self,
        address: &str,
    ) -> impl Future<Output = Option<bessdb_core::LatLng>> + Send {
        Resolver::resolve(self, address)
    }
}

/// Controller phase. `Resolving` only lasts for the span of one
/// [`MarkerController::search_area`] call; there is no cancellation — a
/// search runs its candidate list to completion even if the viewport has
/// since moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Resolving,
}

/// Outcome of one area search, for "loaded X of Y" progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSummary {
    /// Candidates attempted (after state pruning and truncation).
    pub candidates: usize,
    /// Markers actually placed inside the viewport.
    pub placed: usize,
}

/// Orchestrates resolve-and-place against a single persistent surface.
///
/// Candidates are resolved strictly sequentially, so markers appear in
/// candidate-list order, and the resolver's pacing governs overall search
/// duration. Individual skips (unresolved address, point outside the
/// viewport) are silent; only the summary counts surface.
pub struct MarkerController<S, R> {
    surface: S,
    resolver: R,
    /// Cap on candidates geocoded per search, bounding both external load
    /// and marker count.
    max_candidates: usize,
    state: SearchState,
    search_armed: bool,
}

impl<S: MapSurface, R: ResolveAddress> MarkerController<S, R> {
    #[must_use]
    pub fn new(surface: S, resolver: R, max_candidates: usize) -> Self {
        Self {
            surface,
            resolver,
            max_candidates,
            state: SearchState::Idle,
            // A fresh map has never been searched.
            search_armed: true,
        }
    }

    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Whether the "search this area" action is currently offered.
    #[must_use]
    pub fn is_search_armed(&self) -> bool {
        self.search_armed
    }

    /// Notes a viewport change. Re-arms the search action; does not clear
    /// markers or interrupt anything in flight.
    pub fn viewport_moved(&mut self) {
        self.search_armed = true;
    }

    /// Runs an area search over the given viewport.
    ///
    /// Clears existing markers, prunes `records` to the states intersecting
    /// the viewport, truncates to the candidate cap, then resolves each
    /// candidate in order and places a marker for every resolved point that
    /// falls inside the (unexpanded) viewport.
    pub async fn search_area(
        &mut self,
        bounds: LatLngBounds,
        records: &[PremiseRecord],
    ) -> SearchSummary {
        self.state = SearchState::Resolving;
        self.search_armed = false;
        self.surface.clear_markers();

        let visible_states = states_in_bounds(bounds);
        let candidates: Vec<&PremiseRecord> = records
            .iter()
            .filter(|record| {
                let state = normalize_state(&record.state);
                visible_states.iter().any(|name| state.contains(name))
            })
            .take(self.max_candidates)
            .collect();

        tracing::debug!(
            candidates = candidates.len(),
            states = visible_states.len(),
            "area search started"
        );

        let mut placed = 0usize;
        for candidate in &candidates {
            let Some(position) = self.resolver.resolve(candidate.locatable_address()).await
            else {
                continue;
            };
            if bounds.contains(position) {
                self.surface.add_marker(Marker::for_premise(candidate, position));
                placed += 1;
            }
        }

        self.state = SearchState::Idle;
        tracing::debug!(placed, attempted = candidates.len(), "area search finished");
        SearchSummary {
            candidates: candidates.len(),
            placed,
        }
    }

    /// One-off selection outside the area-search flow: resolves the single
    /// record, centers the view on it and drops its marker. Runs regardless
    /// of controller state and leaves existing markers alone.
    pub async fn select_premise(&mut self, record: &PremiseRecord) -> Option<bessdb_core::LatLng> {
        let position = self.resolver.resolve(record.locatable_address()).await?;
        self.surface.set_view(position, SELECT_ZOOM);
        self.surface.add_marker(Marker::for_premise(record, position));
        Some(position)
    }

    /// Read access to the surface, for rendering state after operations.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
