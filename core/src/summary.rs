//! Dataset shape report.
//!
//! Collected after generation for the runner's printout and asserted on
//! by the test suite; the shares here are the contract the teaching
//! queries rely on.

use crate::{config::GeneratorConfig, error::GenResult, skew, store::LabStore};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub entities: i64,
    pub jurisdictions: i64,
    pub filing_types: i64,
    pub filings: i64,
    pub invoices: i64,
    pub payments: i64,

    /// (status, share of filings), descending.
    pub filing_status_shares: Vec<(String, f64)>,
    /// Share of entities held by the three mega clients.
    pub mega_client_share: f64,
    /// Share of filings landing on the hot entity subrange.
    pub hot_entity_filing_share: f64,

    pub orphan_filings: i64,
    pub orphan_invoices: i64,
    pub orphan_payments: i64,
}

impl DatasetSummary {
    pub fn collect(store: &LabStore, config: &GeneratorConfig) -> GenResult<Self> {
        let entities = store.entity_count()?;
        let filings = store.filing_count()?;

        let mut filing_status_shares: Vec<(String, f64)> = store
            .filing_status_counts()?
            .into_iter()
            .map(|(status, count)| {
                let share = if filings > 0 {
                    count as f64 / filings as f64
                } else {
                    0.0
                };
                (status, share)
            })
            .collect();
        filing_status_shares
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mega_entities: i64 = {
            let mut total = 0;
            for (name, _) in skew::MEGA_CLIENTS {
                total += store.entity_count_for_client(name)?;
            }
            total
        };
        let mega_client_share = if entities > 0 {
            mega_entities as f64 / entities as f64
        } else {
            0.0
        };

        let hot_max = skew::hot_range_max(config.entity_count.max(1), config.hot_entity_fraction);
        let hot_filings = store.filings_for_entities_below(hot_max)?;
        let hot_entity_filing_share = if filings > 0 {
            hot_filings as f64 / filings as f64
        } else {
            0.0
        };

        Ok(Self {
            entities,
            jurisdictions: store.jurisdiction_count()?,
            filing_types: store.filing_type_count()?,
            filings,
            invoices: store.invoice_count()?,
            payments: store.payment_count()?,
            filing_status_shares,
            mega_client_share,
            hot_entity_filing_share,
            orphan_filings: store.orphan_filing_count()?,
            orphan_invoices: store.orphan_invoice_count()?,
            orphan_payments: store.orphan_payment_count()?,
        })
    }
}
