//! In-memory query pipeline over loaded feed records: search, filters,
//! selector lists, and pagination.
//!
//! Everything operates on already-parsed record slices and returns borrowed
//! views, so filters can be re-applied cheaply as the user types.

use std::str::FromStr;

use crate::facility::FacilityRecord;
use crate::premise::{normalize_state, PremiseRecord, UNKNOWN_DISTRICT};

/// Width of the sliding page-number window shown under result lists.
pub const PAGE_WINDOW: usize = 5;

/// Certificate-status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Expired,
}

impl StatusFilter {
    fn matches(self, record: &PremiseRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => record.is_active,
            StatusFilter::Expired => !record.is_active,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "expired" => Ok(StatusFilter::Expired),
            other => Err(format!(
                "unknown status \"{other}\" (expected all, active or expired)"
            )),
        }
    }
}

/// Combined premise filters. All predicates are ANDed.
#[derive(Debug, Clone, Default)]
pub struct PremiseFilter {
    /// Case-insensitive substring, matched against company name, business
    /// address, state and derived district.
    pub search: Option<String>,
    /// Exact match against the normalized state name.
    pub state: Option<String>,
    /// Exact match against the derived district. Only meaningful with a
    /// state selected; use [`PremiseFilter::set_state`] to keep it coherent.
    pub district: Option<String>,
    pub status: StatusFilter,
}

impl PremiseFilter {
    /// Selects a state, resetting any district choice back to "all".
    pub fn set_state(&mut self, state: Option<String>) {
        self.state = state.map(|s| normalize_state(&s));
        self.district = None;
    }

    fn matches(&self, record: &PremiseRecord) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|needle| {
            let needle = needle.to_lowercase();
            record.company_name.to_lowercase().contains(&needle)
                || record.business_address.to_lowercase().contains(&needle)
                || record.state.to_lowercase().contains(&needle)
                || record.district.to_lowercase().contains(&needle)
        });

        let matches_state = self
            .state
            .as_deref()
            .is_none_or(|state| normalize_state(&record.state) == state);

        let matches_district = self
            .district
            .as_deref()
            .is_none_or(|district| record.district == district);

        matches_search && matches_district && matches_state && self.status.matches(record)
    }
}

/// Applies a [`PremiseFilter`], preserving feed order.
#[must_use]
pub fn filter_premises<'a>(
    records: &'a [PremiseRecord],
    filter: &PremiseFilter,
) -> Vec<&'a PremiseRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Distinct normalized state names, sorted, for populating a state selector.
#[must_use]
pub fn distinct_states(records: &[PremiseRecord]) -> Vec<String> {
    let mut states: Vec<String> = records.iter().map(|r| normalize_state(&r.state)).collect();
    states.sort();
    states.dedup();
    states
}

/// Distinct districts for the given state (or for all records when `None`),
/// sorted, skipping the [`UNKNOWN_DISTRICT`] sentinel and empty extractions.
#[must_use]
pub fn districts_for_state(records: &[PremiseRecord], state: Option<&str>) -> Vec<String> {
    let mut districts: Vec<String> = records
        .iter()
        .filter(|r| state.is_none_or(|s| normalize_state(&r.state) == s))
        .map(|r| r.district.clone())
        .filter(|d| !d.is_empty() && d != UNKNOWN_DISTRICT)
        .collect();
    districts.sort();
    districts.dedup();
    districts
}

/// Count of active records in a filtered view.
#[must_use]
pub fn active_count(records: &[&PremiseRecord]) -> usize {
    records.iter().filter(|r| r.is_active).count()
}

/// Facility filters. All predicates are ANDed; `state` and `facility_type`
/// are exact matches against the feed values.
#[derive(Debug, Clone, Default)]
pub struct FacilityFilter {
    /// Case-insensitive substring over name, address and district.
    pub search: Option<String>,
    pub state: Option<String>,
    pub facility_type: Option<String>,
}

impl FacilityFilter {
    fn matches(&self, facility: &FacilityRecord) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|needle| {
            let needle = needle.to_lowercase();
            facility.name.to_lowercase().contains(&needle)
                || facility.address.to_lowercase().contains(&needle)
                || facility.district.to_lowercase().contains(&needle)
        });

        matches_search
            && self.state.as_deref().is_none_or(|s| facility.state == s)
            && self
                .facility_type
                .as_deref()
                .is_none_or(|t| facility.facility_type == t)
    }
}

/// Applies a [`FacilityFilter`], preserving feed order.
#[must_use]
pub fn filter_facilities<'a>(
    records: &'a [FacilityRecord],
    filter: &FacilityFilter,
) -> Vec<&'a FacilityRecord> {
    records.iter().filter(|f| filter.matches(f)).collect()
}

/// Number of pages needed for `total` items at `page_size` per page.
#[must_use]
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The 1-based `page` of `items`. Out-of-range pages clamp to the nearest
/// valid page; an empty input yields an empty slice.
#[must_use]
pub fn page_slice<'a, T>(items: &'a [T], page: usize, page_size: usize) -> &'a [T] {
    if items.is_empty() || page_size == 0 {
        return &[];
    }
    let last = total_pages(items.len(), page_size);
    let page = page.clamp(1, last);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Sliding window of page numbers to display: up to [`PAGE_WINDOW`] pages
/// centered on `current`, clamped at the first and last page.
#[must_use]
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    if total <= PAGE_WINDOW {
        return (1..=total).collect();
    }
    let half = PAGE_WINDOW / 2;
    let first = if current <= half + 1 {
        1
    } else if current + half >= total {
        total - PAGE_WINDOW + 1
    } else {
        current - half
    };
    (first..first + PAGE_WINDOW).collect()
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
