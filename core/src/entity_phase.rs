//! Entity generation: the skew anchor of the whole dataset.
//!
//! Client concentration: three mega clients absorb 12% of rows; the rest
//! spread over a fixed 500-slot pool. Country, risk tier, and created_at
//! are all derived from the row index, so the entity table's shape is
//! exact at any scale; only the display name draws from the RNG stream.

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    name_gen::EntityNameGenerator,
    phase::{GenPhase, PhaseReport},
    rng::PhaseRng,
    skew::{self, ClientBucket},
    store::LabStore,
    types::RowId,
};
use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone)]
pub struct EntityRow {
    pub entity_id: RowId,
    pub client_name: String,
    pub name: String,
    pub country_code: &'static str,
    pub risk_tier: i64,
    pub created_at: NaiveDate,
    pub is_active: bool,
}

pub struct EntityPhase;

impl EntityPhase {
    pub fn generate_rows(config: &GeneratorConfig, rng: &mut PhaseRng) -> Vec<EntityRow> {
        let total = config.entity_count;
        let mut rows = Vec::with_capacity(total as usize);
        for n in 1..=total {
            let client_name = match skew::client_bucket(n, total, config.client_pool_size) {
                ClientBucket::Mega(name) => name.to_string(),
                ClientBucket::Pool(slot) => format!("Client-{slot:04}"),
            };
            rows.push(EntityRow {
                entity_id: n as RowId,
                client_name,
                name: EntityNameGenerator::generate(rng),
                country_code: skew::country_bucket(n),
                risk_tier: skew::risk_tier(n),
                // Registration predates the filing window by up to two years.
                created_at: config.start_date - Duration::days((n % 730) as i64),
                is_active: n % 25 != 0,
            });
        }
        rows
    }
}

impl GenPhase for EntityPhase {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn run(
        &self,
        config: &GeneratorConfig,
        store: &LabStore,
        rng: &mut PhaseRng,
    ) -> GenResult<PhaseReport> {
        let rows = Self::generate_rows(config, rng);
        let inserted = store.insert_entities(&rows)?;
        Ok(PhaseReport {
            phase: self.name(),
            rows_inserted: inserted,
        })
    }
}
