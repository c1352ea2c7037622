//! The generation pipeline: a fixed-order batch driver.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Lookup phase   (jurisdictions, filing types)
//!   2. Entity phase
//!   3. Filing phase
//!   4. Invoice phase
//!   5. Payment phase
//!
//! RULES:
//!   - Phases execute in foreign-key dependency order, exactly once.
//!   - Each phase runs inside its own scoped transaction; a failure rolls
//!     that phase back and aborts the run (fail-fast, no retries).
//!   - All randomness flows through the RngBank.
//!   - Secondary indexes are built only after the last phase commits.

use crate::{
    config::GeneratorConfig,
    entity_phase::EntityPhase,
    error::GenResult,
    filing_phase::FilingPhase,
    invoice_phase::InvoicePhase,
    lookup_phase::LookupPhase,
    payment_phase::PaymentPhase,
    phase::{GenPhase, PhaseReport},
    rng::{PhaseSlot, RngBank},
    store::LabStore,
    types::RunId,
};

pub struct GenPipeline {
    pub run_id: RunId,
    config: GeneratorConfig,
    rng_bank: RngBank,
    phases: Vec<(PhaseSlot, Box<dyn GenPhase>)>,
    store: LabStore,
}

impl GenPipeline {
    /// Build a fully wired pipeline. Validates the config up front so a
    /// bad scale fails before any insert.
    pub fn new(
        run_id: RunId,
        seed: u64,
        config: GeneratorConfig,
        store: LabStore,
    ) -> GenResult<Self> {
        config.validate()?;

        // EXECUTION ORDER — fixed, documented, never reordered.
        let phases: Vec<(PhaseSlot, Box<dyn GenPhase>)> = vec![
            (PhaseSlot::Lookup, Box::new(LookupPhase)),
            (PhaseSlot::Entity, Box::new(EntityPhase)),
            (PhaseSlot::Filing, Box::new(FilingPhase)),
            (PhaseSlot::Invoice, Box::new(InvoicePhase)),
            (PhaseSlot::Payment, Box::new(PaymentPhase)),
        ];

        Ok(Self {
            run_id,
            config,
            rng_bank: RngBank::new(seed),
            phases,
            store,
        })
    }

    /// In-memory pipeline with the test config, migrated and run-stamped.
    /// Used throughout the integration tests.
    pub fn build_test(run_id: &str, seed: u64) -> GenResult<Self> {
        Self::build_with(run_id, seed, GeneratorConfig::default_test())
    }

    /// In-memory pipeline with an explicit config.
    pub fn build_with(run_id: &str, seed: u64, config: GeneratorConfig) -> GenResult<Self> {
        let store = LabStore::in_memory()?;
        store.migrate()?;
        store.insert_run(run_id, seed, env!("CARGO_PKG_VERSION"))?;
        Self::new(run_id.to_string(), seed, config, store)
    }

    /// Run every phase to completion, then build secondary indexes.
    /// Single-threaded, single-pass; any error aborts the run with the
    /// failing phase rolled back.
    pub fn run(&self) -> GenResult<Vec<PhaseReport>> {
        let mut reports = Vec::with_capacity(self.phases.len());
        for (slot, phase) in &self.phases {
            let mut rng = self.rng_bank.for_phase(*slot);
            let report = self
                .store
                .phase_scope(|store| phase.run(&self.config, store, &mut rng))?;
            log::info!(
                "phase {}: inserted {} rows",
                report.phase,
                report.rows_inserted
            );
            reports.push(report);
        }
        self.store.build_indexes()?;
        log::info!("secondary indexes built; run {} complete", self.run_id);
        Ok(reports)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn store(&self) -> &LabStore {
        &self.store
    }

    pub fn into_store(self) -> LabStore {
        self.store
    }
}
