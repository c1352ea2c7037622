//! Payment generation: hot-invoice bias mirrors the filing table's
//! entity skew one level down the FK chain.

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    phase::{GenPhase, PhaseReport},
    rng::PhaseRng,
    skew::{self, PaymentStatus},
    store::LabStore,
    types::RowId,
};
use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone)]
pub struct PaymentRow {
    pub payment_id: RowId,
    pub invoice_id: RowId,
    pub amount: f64,
    pub method: &'static str,
    pub status: PaymentStatus,
    pub paid_date: NaiveDate,
}

pub struct PaymentPhase;

impl PaymentPhase {
    pub fn generate_rows(config: &GeneratorConfig, rng: &mut PhaseRng) -> Vec<PaymentRow> {
        let window = config.window_days();
        let mut rows = Vec::with_capacity(config.payment_count as usize);
        for n in 1..=config.payment_count {
            let invoice_id = skew::hot_parent_id(
                rng,
                config.invoice_count,
                config.hot_entity_share,
                config.hot_entity_fraction,
            );
            rows.push(PaymentRow {
                payment_id: n as RowId,
                invoice_id,
                amount: rng.amount_between(10.0, 20_000.0),
                method: skew::payment_method(n),
                status: PaymentStatus::from_roll(rng.roll_percent()),
                paid_date: config.start_date
                    + Duration::days(rng.next_u64_below(window) as i64),
            });
        }
        rows
    }
}

impl GenPhase for PaymentPhase {
    fn name(&self) -> &'static str {
        "payment"
    }

    fn run(
        &self,
        config: &GeneratorConfig,
        store: &LabStore,
        rng: &mut PhaseRng,
    ) -> GenResult<PhaseReport> {
        let rows = Self::generate_rows(config, rng);
        let inserted = store.insert_payments(&rows)?;
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
    fn payments_reference_generated_invoices_only() {
        let config = GeneratorConfig::default_test();
        let mut rng = RngBank::new(31).for_phase(PhaseSlot::Payment);
        for row in PaymentPhase::generate_rows(&config, &mut rng) {
            assert!((1..=config.invoice_count as RowId).contains(&row.invoice_id));
        }
    }

    #[test]
    fn methods_cycle_over_the_row_index() {
        let config = GeneratorConfig::default_test();
        let mut rng = RngBank::new(32).for_phase(PhaseSlot::Payment);
        let rows = PaymentPhase::generate_rows(&config, &mut rng);
        assert_eq!(rows[0].method, "wire"); // n=1
        assert_eq!(rows[1].method, "card"); // n=2
        assert_eq!(rows[3].method, "ach"); // n=4
    }
}
