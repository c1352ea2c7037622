//! Lookup-table generation: filing types and jurisdictions.
//!
//! First phase in the pipeline; everything else references these ids.

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    phase::{GenPhase, PhaseReport},
    rng::PhaseRng,
    skew,
    store::LabStore,
    types::RowId,
};

/// Curated filing-type label pool, cycled when the configured count
/// exceeds the pool.
const FILING_TYPE_POOL: [(&str, &str); 8] = [
    ("Annual Return", "annual"),
    ("VAT Return", "quarterly"),
    ("Corporate Income Tax", "annual"),
    ("Payroll Withholding", "monthly"),
    ("Beneficial Ownership Declaration", "annual"),
    ("Sanctions Screening Attestation", "quarterly"),
    ("Financial Statement", "annual"),
    ("Excise Duty Return", "monthly"),
];

#[derive(Debug, Clone)]
pub struct JurisdictionRow {
    pub jurisdiction_id: RowId,
    pub country_code: &'static str,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct FilingTypeRow {
    pub filing_type_id: RowId,
    pub label: String,
    pub frequency: &'static str,
}

pub struct LookupPhase;

impl LookupPhase {
    pub fn generate_jurisdictions(config: &GeneratorConfig) -> Vec<JurisdictionRow> {
        (1..=config.jurisdiction_count)
            .map(|n| {
                let code = skew::country_bucket(n);
                JurisdictionRow {
                    jurisdiction_id: n as RowId,
                    country_code: code,
                    name: format!("{code}-J{n:03}"),
                }
            })
            .collect()
    }

    pub fn generate_filing_types(config: &GeneratorConfig) -> Vec<FilingTypeRow> {
        (1..=config.filing_type_count)
            .map(|n| {
                let idx = ((n - 1) % FILING_TYPE_POOL.len() as u64) as usize;
                let cycle = (n - 1) / FILING_TYPE_POOL.len() as u64;
                let (base, frequency) = FILING_TYPE_POOL[idx];
                let label = if cycle == 0 {
                    base.to_string()
                } else {
                    format!("{base} {}", cycle + 1)
                };
                FilingTypeRow {
                    filing_type_id: n as RowId,
                    label,
                    frequency,
                }
            })
            .collect()
    }
}

impl GenPhase for LookupPhase {
    fn name(&self) -> &'static str {
        "lookup"
    }

    fn run(
        &self,
        config: &GeneratorConfig,
        store: &LabStore,
        _rng: &mut PhaseRng,
    ) -> GenResult<PhaseReport> {
        // Lookup rows are fully index-derived; the RNG stream stays untouched.
        let jurisdictions = Self::generate_jurisdictions(config);
        let filing_types = Self::generate_filing_types(config);
        let mut inserted = store.insert_jurisdictions(&jurisdictions)?;
        inserted += store.insert_filing_types(&filing_types)?;
        Ok(PhaseReport {
            phase: self.name(),
            rows_inserted: inserted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filing_type_labels_stay_unique_past_the_pool() {
        let mut config = GeneratorConfig::default_test();
        config.filing_type_count = 20;
        let rows = LookupPhase::generate_filing_types(&config);
        let mut labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 20);
    }

    #[test]
    fn jurisdiction_countries_follow_the_weighted_bucket() {
        let mut config = GeneratorConfig::default_test();
        config.jurisdiction_count = 10;
        let rows = LookupPhase::generate_jurisdictions(&config);
        let us = rows.iter().filter(|r| r.country_code == "US").count();
        assert_eq!(us, 6);
    }
}
