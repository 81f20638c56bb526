//! Hours enrichment: a single scoped follow-up query that fills missing
//! `business_hours` on already-retrieved records.

use std::collections::HashMap;

use crate::client::ProviderClient;
use crate::extract::{extract_businesses, has_hours, match_key};
use crate::types::BusinessRecord;

/// Fills missing hours via at most one additional conversational query.
///
/// Skipped entirely when every record already has hours or when no session
/// identifier is available (the follow-up must reuse the first response's
/// `chat_id` so the provider retains conversational context). Any failure
/// of the enrichment call degrades silently: the original records are
/// returned unmodified and the error is only logged.
pub async fn enrich_missing_hours(
    client: &ProviderClient,
    businesses: Vec<BusinessRecord>,
    chat_id: Option<&str>,
    coords: Option<(f64, f64)>,
) -> Vec<BusinessRecord> {
    let missing: Vec<&BusinessRecord> = businesses.iter().filter(|b| !has_hours(b)).collect();
    if missing.is_empty() {
        return businesses;
    }
    let Some(chat_id) = chat_id else {
        tracing::debug!(
            missing = missing.len(),
            "no session id available; skipping hours enrichment"
        );
        return businesses;
    };

    let query = build_enrichment_query(&missing);
    tracing::debug!(missing = missing.len(), "requesting hours enrichment");

    match client.chat(&query, Some(chat_id), coords).await {
        Ok(reply) => {
            let enriched = extract_businesses(&reply.body);
            merge_hours(businesses, &enriched)
        }
        Err(e) => {
            tracing::warn!(error = %e, "hours enrichment failed; returning unenriched records");
            businesses
        }
    }
}

/// Copies `business_hours` from enrichment results onto original records
/// that had none, matched by the normalized name+address key. All other
/// fields on the originals are left untouched; records that already carry
/// hours are never overwritten.
#[must_use]
pub fn merge_hours(
    mut businesses: Vec<BusinessRecord>,
    enriched: &[BusinessRecord],
) -> Vec<BusinessRecord> {
    let by_key: HashMap<String, &BusinessRecord> = enriched
        .iter()
        .map(|e| (match_key(&e.name, address_of(e)), e))
        .collect();

    for record in &mut businesses {
        if has_hours(record) {
            continue;
        }
        let key = match_key(&record.name, address_of(record));
        let Some(source) = by_key.get(&key) else {
            continue;
        };
        let hours = source
            .contextual_info
            .as_ref()
            .and_then(|info| info.business_hours.clone())
            .filter(|days| !days.is_empty());
        if let Some(hours) = hours {
            record
                .contextual_info
                .get_or_insert_with(Default::default)
                .business_hours = Some(hours);
        }
    }

    businesses
}

fn address_of(record: &BusinessRecord) -> &str {
    record
        .location
        .as_ref()
        .and_then(|loc| loc.formatted_address.as_deref())
        .unwrap_or("")
}

fn build_enrichment_query(missing: &[&BusinessRecord]) -> String {
    let list = missing
        .iter()
        .enumerate()
        .map(|(i, b)| format!("{}. {} - {}", i + 1, b.name, address_of(b)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "For the following businesses, return ONLY weekly hours as \
         contextual_info.business_hours (7 days, each day has business_hours \
         with open_time and close_time). Keep the same business name and \
         address.\n\n{list}"
    )
}
