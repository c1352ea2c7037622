//! Post-load drift operations.
//!
//! Lab lessons mutate the generated dataset after the initial bulk load to
//! simulate statistics drift: aging a slice of Pending filings to Overdue,
//! or appending an extra skewed filing batch. The pipeline itself is never
//! re-run mid-lesson; these are separate entry points, each recorded as a
//! drift_batch row for lineage.

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    filing_phase::FilingPhase,
    rng::PhaseRng,
    store::LabStore,
};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    pub batch_id: String,
    pub kind: &'static str,
    pub rows_affected: usize,
}

/// Shift every `modulus`-th Pending filing to Overdue, stamping a note and
/// a fresh last_updated_at. Set-oriented: one UPDATE, no row loop.
pub fn age_pending_filings(
    store: &LabStore,
    modulus: u64,
    as_of: NaiveDate,
) -> GenResult<DriftReport> {
    let note = format!("aged to Overdue by drift pass on {as_of}");
    let (batch_id, changed) = store.phase_scope(|s| {
        let changed = s.age_pending_filings(modulus as i64, &note, as_of)?;
        let batch_id = format!("drift-{}", Uuid::new_v4());
        s.insert_drift_batch(&batch_id, "age_pending", changed as i64, as_of)?;
        Ok((batch_id, changed))
    })?;
    log::info!("drift age_pending: {changed} rows aged");
    Ok(DriftReport {
        batch_id,
        kind: "age_pending",
        rows_affected: changed,
    })
}

/// Append `extra` filings continuing the id sequence, with the same skew
/// rules as the initial load. Simulates post-setup data growth that
/// invalidates cached plans and statistics.
pub fn append_filing_batch(
    store: &LabStore,
    config: &GeneratorConfig,
    rng: &mut PhaseRng,
    extra: u64,
    as_of: NaiveDate,
) -> GenResult<DriftReport> {
    let first_id = store.max_filing_id()? + 1;
    let rows = FilingPhase::generate_rows(config, rng, first_id, extra);
    let (batch_id, inserted) = store.phase_scope(|s| {
        let inserted = s.insert_filings(&rows)?;
        let batch_id = format!("drift-{}", Uuid::new_v4());
        s.insert_drift_batch(&batch_id, "append_filings", inserted as i64, as_of)?;
        Ok((batch_id, inserted))
    })?;
    log::info!("drift append_filings: {inserted} rows appended from id {first_id}");
    Ok(DriftReport {
        batch_id,
        kind: "append_filings",
        rows_affected: inserted,
    })
}
