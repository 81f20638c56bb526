//! Business extraction and deduplication from conversational responses.
//!
//! The upstream schema is not contractually stable: businesses have been
//! observed under `entities[].businesses[]`, top-level `businesses[]`, and
//! `data.businesses[]`, sometimes more than one at once. Extraction probes
//! every known path additively rather than committing to a single parse.

use std::collections::HashSet;

use crate::types::BusinessRecord;

/// Extracts all businesses from a raw conversational response body.
///
/// Candidate arrays are collected in priority order (entity-wrapped,
/// top-level, data-wrapped), parsed element-by-element (a malformed entry
/// is skipped, never fatal), and deduplicated to first-seen-by-id. Records
/// with a missing or empty id are discarded.
#[must_use]
pub fn extract_businesses(body: &serde_json::Value) -> Vec<BusinessRecord> {
    let mut out = Vec::new();

    if let Some(entities) = body.get("entities").and_then(serde_json::Value::as_array) {
        for entity in entities {
            if let Some(list) = entity
                .get("businesses")
                .and_then(serde_json::Value::as_array)
            {
                push_parsed(&mut out, list);
            }
        }
    }

    // Fallback shapes; the provider may populate these alongside entities.
    if let Some(list) = body.get("businesses").and_then(serde_json::Value::as_array) {
        push_parsed(&mut out, list);
    }
    if let Some(list) = body
        .get("data")
        .and_then(|data| data.get("businesses"))
        .and_then(serde_json::Value::as_array)
    {
        push_parsed(&mut out, list);
    }

    let mut seen = HashSet::new();
    out.retain(|record| seen.insert(record.id.clone()));
    out
}

fn push_parsed(out: &mut Vec<BusinessRecord>, list: &[serde_json::Value]) {
    for raw in list {
        match serde_json::from_value::<BusinessRecord>(raw.clone()) {
            Ok(record) if !record.id.trim().is_empty() => out.push(record),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed business entry");
            }
        }
    }
}

/// True when a record carries at least one day of hours data.
#[must_use]
pub fn has_hours(record: &BusinessRecord) -> bool {
    record
        .contextual_info
        .as_ref()
        .and_then(|info| info.business_hours.as_ref())
        .is_some_and(|days| !days.is_empty())
}

/// Case-insensitive name+address key used to correlate enrichment results
/// with the original records. Exact match only: minor upstream formatting
/// differences will fail to match and leave the record without hours.
#[must_use]
pub fn match_key(name: &str, address: &str) -> String {
    format!(
        "{}|{}",
        name.trim().to_lowercase(),
        address.trim().to_lowercase()
    )
}
