//! Generation phase trait.
//!
//! RULE: Every table family is produced by one GenPhase. The pipeline runs
//! phases in foreign-key dependency order, each inside its own scoped
//! transaction. Phases batch-generate rows in memory and hand them to the
//! store in bulk; no per-row decision touches the database.

use crate::{config::GeneratorConfig, error::GenResult, rng::PhaseRng, store::LabStore};
use serde::Serialize;

/// The contract every generation phase must fulfill.
pub trait GenPhase {
    /// Unique stable name for this phase.
    fn name(&self) -> &'static str;

    /// Generate this phase's rows and insert them through the store.
    ///
    /// - `config`: the immutable run configuration
    /// - `store`:  the persistence layer (already inside this phase's
    ///             transaction when called from the pipeline)
    /// - `rng`:    this phase's deterministic RNG stream
    fn run(
        &self,
        config: &GeneratorConfig,
        store: &LabStore,
        rng: &mut PhaseRng,
    ) -> GenResult<PhaseReport>;
}

/// What a completed phase reports back to the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    pub phase: &'static str,
    pub rows_inserted: usize,
}
