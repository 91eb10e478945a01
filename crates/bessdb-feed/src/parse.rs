//! CSV text → typed record lists, with derived fields computed at load time.
//!
//! Feed-level failures (unreadable CSV) are errors; row-level defects degrade
//! to safe defaults instead: a bad expiry date yields an inactive record and
//! a short address yields the `OTHER` district sentinel. Rows without a name
//! are dropped outright.

use chrono::NaiveDate;

use bessdb_core::premise::{extract_district, is_active_on};
use bessdb_core::{FacilityRecord, PremiseRecord};

use crate::error::FeedError;

// Positional columns of the premises feed.
const COL_INDEX: usize = 0;
const COL_STATE: usize = 1;
const COL_COMPANY: usize = 2;
const COL_REGISTERED_ADDRESS: usize = 3;
const COL_BUSINESS_ADDRESS: usize = 4;
const COL_PHONE: usize = 5;
const COL_CERT_DATE: usize = 6;
const COL_EXPIRY_DATE: usize = 7;
const COL_SERIAL: usize = 8;

/// Parses the certified-premises feed.
///
/// The feed carries no machine-readable header, so columns are positional
/// and the first row (human header) is skipped. `is_active` is evaluated
/// against `today` once, here; it is never re-evaluated later.
///
/// # Errors
///
/// Returns [`FeedError::Csv`] if the text is not readable as CSV.
pub fn parse_premises(csv_text: &str, today: NaiveDate) -> Result<Vec<PremiseRecord>, FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_number, row) in reader.records().enumerate() {
        let row = row.map_err(|e| FeedError::Csv {
            context: format!("premises feed row {row_number}"),
            source: e,
        })?;
        // Row 0 is the human-readable header.
        if row_number == 0 {
            continue;
        }

        let field = |col: usize| row.get(col).unwrap_or("").to_string();

        let company_name = field(COL_COMPANY);
        if company_name.trim().is_empty() {
            dropped += 1;
            continue;
        }

        let business_address = field(COL_BUSINESS_ADDRESS);
        let expiry_date = field(COL_EXPIRY_DATE);
        let is_active = is_active_on(&expiry_date, today);
        let district = extract_district(&business_address);

        records.push(PremiseRecord {
            index: field(COL_INDEX),
            state: field(COL_STATE),
            company_name,
            registered_address: field(COL_REGISTERED_ADDRESS),
            business_address,
            phone: field(COL_PHONE),
            certificate_date: field(COL_CERT_DATE),
            expiry_date,
            serial_no: field(COL_SERIAL),
            is_active,
            district,
        });
    }

    tracing::debug!(
        parsed = records.len(),
        dropped,
        "parsed certified-premises feed"
    );
    Ok(records)
}

/// Parses the health-facility feed (header-driven columns).
///
/// Rows without a name are dropped; everything else is kept as provided,
/// including the decimal-string coordinates.
///
/// # Errors
///
/// Returns [`FeedError::Csv`] if the text is not readable as CSV or a row
/// does not match the header shape.
pub fn parse_facilities(csv_text: &str) -> Result<Vec<FacilityRecord>, FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut records = Vec::new();
    for (row_number, row) in reader.deserialize::<FacilityRecord>().enumerate() {
        let facility = row.map_err(|e| FeedError::Csv {
            context: format!("facilities feed row {row_number}"),
            source: e,
        })?;
        if facility.name.trim().is_empty() {
            continue;
        }
        records.push(facility);
    }

    tracing::debug!(parsed = records.len(), "parsed health-facility feed");
    Ok(records)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
