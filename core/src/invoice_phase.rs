//! Invoice generation: hot-entity bias, thresholded statuses, bounded
//! amounts, currency fixed by entity id modulus.

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    phase::{GenPhase, PhaseReport},
    rng::PhaseRng,
    skew::{self, InvoiceStatus},
    store::LabStore,
    types::RowId,
};
use chrono::{Duration, NaiveDate};

const PAYMENT_TERMS_DAYS: i64 = 30;

#[derive(Debug, Clone)]
pub struct InvoiceRow {
    pub invoice_id: RowId,
    pub entity_id: RowId,
    pub amount: f64,
    pub currency: &'static str,
    pub status: InvoiceStatus,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
}

pub struct InvoicePhase;

impl InvoicePhase {
    pub fn generate_rows(config: &GeneratorConfig, rng: &mut PhaseRng) -> Vec<InvoiceRow> {
        let window = config.window_days();
        let mut rows = Vec::with_capacity(config.invoice_count as usize);
        for n in 1..=config.invoice_count {
            let entity_id = skew::hot_parent_id(
                rng,
                config.entity_count,
                config.hot_entity_share,
                config.hot_entity_fraction,
            );
            let issued_date =
                config.start_date + Duration::days(rng.next_u64_below(window) as i64);
            rows.push(InvoiceRow {
                invoice_id: n as RowId,
                entity_id,
                amount: rng.amount_between(25.0, 25_000.0),
                currency: skew::currency_for_entity(entity_id),
                status: InvoiceStatus::from_roll(rng.roll_percent()),
                issued_date,
                due_date: issued_date + Duration::days(PAYMENT_TERMS_DAYS),
            });
        }
        rows
    }
}

impl GenPhase for InvoicePhase {
    fn name(&self) -> &'static str {
        "invoice"
    }

    fn run(
        &self,
        config: &GeneratorConfig,
        store: &LabStore,
        rng: &mut PhaseRng,
    ) -> GenResult<PhaseReport> {
        let rows = Self::generate_rows(config, rng);
        let inserted = store.insert_invoices(&rows)?;
        Ok(PhaseReport {
            phase: self.name(),
            rows_inserted: inserted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PhaseSlot, RngBank};

    #[test]
    fn currency_is_fixed_by_entity_id() {
        let config = GeneratorConfig::default_test();
        let mut rng = RngBank::new(21).for_phase(PhaseSlot::Invoice);
        for row in InvoicePhase::generate_rows(&config, &mut rng) {
            assert_eq!(row.currency, skew::currency_for_entity(row.entity_id));
        }
    }

    #[test]
    fn amounts_and_dates_stay_bounded() {
        let config = GeneratorConfig::default_test();
        let mut rng = RngBank::new(22).for_phase(PhaseSlot::Invoice);
        for row in InvoicePhase::generate_rows(&config, &mut rng) {
            assert!((25.0..=25_000.0).contains(&row.amount));
            assert!(row.issued_date >= config.start_date);
            assert!(row.issued_date <= config.end_date);
            assert_eq!(row.due_date, row.issued_date + Duration::days(30));
        }
    }
}
