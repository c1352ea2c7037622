//! Compliance-filing generation.
//!
//! The join-skew table: 70% of rows land on the low 5% of entity ids,
//! status follows the fixed 60/30/6/3/1 threshold table, and dates are
//! uniform inside the configured window. filed_date and penalty_amount
//! are conditional on status.

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    phase::{GenPhase, PhaseReport},
    rng::PhaseRng,
    skew::{self, FilingStatus},
    store::LabStore,
    types::RowId,
};
use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone)]
pub struct FilingRow {
    pub filing_id: RowId,
    pub entity_id: RowId,
    pub jurisdiction_id: RowId,
    pub filing_type_id: RowId,
    pub due_date: NaiveDate,
    pub filed_date: Option<NaiveDate>,
    pub status: FilingStatus,
    pub penalty_amount: f64,
    pub last_updated_at: NaiveDate,
}

pub struct FilingPhase;

impl FilingPhase {
    /// Generate `count` filing rows with ids starting at `first_id`.
    /// The drift path reuses this with a continuation id to append
    /// additional skewed batches after the initial load.
    pub fn generate_rows(
        config: &GeneratorConfig,
        rng: &mut PhaseRng,
        first_id: RowId,
        count: u64,
    ) -> Vec<FilingRow> {
        let window = config.window_days();
        let mut rows = Vec::with_capacity(count as usize);
        for i in 0..count {
            let n = first_id as u64 + i;
            let entity_id = skew::hot_parent_id(
                rng,
                config.entity_count,
                config.hot_entity_share,
                config.hot_entity_fraction,
            );
            let due_date = config.start_date + Duration::days(rng.next_u64_below(window) as i64);
            let status = FilingStatus::from_roll(rng.roll_percent());
            let filed_date = if status.was_submitted() {
                Some(due_date - Duration::days(rng.next_u64_below(30) as i64))
            } else {
                None
            };
            let penalty_amount = if status == FilingStatus::Overdue {
                rng.amount_between(50.0, 5_000.0)
            } else {
                0.0
            };
            rows.push(FilingRow {
                filing_id: n as RowId,
                entity_id,
                jurisdiction_id: (1 + (n - 1) % config.jurisdiction_count) as RowId,
                filing_type_id: (1 + (n - 1) % config.filing_type_count) as RowId,
                due_date,
                filed_date,
                status,
                penalty_amount,
                last_updated_at: filed_date.unwrap_or(due_date),
            });
        }
        rows
    }
}

impl GenPhase for FilingPhase {
    fn name(&self) -> &'static str {
        "filing"
    }

    fn run(
        &self,
        config: &GeneratorConfig,
        store: &LabStore,
        rng: &mut PhaseRng,
    ) -> GenResult<PhaseReport> {
        let rows = Self::generate_rows(config, rng, 1, config.filing_count);
        let inserted = store.insert_filings(&rows)?;
        Ok(PhaseReport {
            phase: self.name(),
            rows_inserted: inserted,
        })
    }
}
