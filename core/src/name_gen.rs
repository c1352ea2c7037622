//! Deterministic legal-entity name generation from curated word pools.
//!
//! Same RNG stream = same names. Names are cosmetic; the skewed column is
//! client_name, assigned separately in the entity phase.

use crate::rng::PhaseRng;

pub struct EntityNameGenerator;

impl EntityNameGenerator {
    /// "Prefix Industry Suffix", e.g. "Meridian Logistics Holdings".
    pub fn generate(rng: &mut PhaseRng) -> String {
        let prefixes = Self::prefixes();
        let industries = Self::industries();
        let suffixes = Self::suffixes();

        let prefix = prefixes[rng.next_u64_below(prefixes.len() as u64) as usize];
        let industry = industries[rng.next_u64_below(industries.len() as u64) as usize];
        let suffix = suffixes[rng.next_u64_below(suffixes.len() as u64) as usize];
        format!("{} {} {}", prefix, industry, suffix)
    }

    fn prefixes() -> &'static [&'static str] {
        &[
            "Meridian", "Northgate", "Sterling", "Atlas", "Harbor", "Summit",
            "Crestline", "Vanguard", "Pinnacle", "Beacon", "Granite", "Cascade",
            "Redwood", "Ironwood", "Lakeside", "Continental", "Pacific", "Keystone",
        ]
    }

    fn industries() -> &'static [&'static str] {
        &[
            "Logistics", "Trading", "Manufacturing", "Consulting", "Pharmaceuticals",
            "Shipping", "Energy", "Textiles", "Electronics", "Agriculture",
            "Construction", "Hospitality", "Media", "Analytics", "Chemicals",
            "Aviation", "Maritime", "Telecom", "Robotics", "Materials",
        ]
    }

    fn suffixes() -> &'static [&'static str] {
        &[
            "LLC", "Inc", "Corp", "Group", "Holdings", "Partners", "Ventures",
            "International", "Industries", "GmbH",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PhaseSlot, RngBank};

    #[test]
    fn names_are_deterministic_per_seed() {
        let mut a = RngBank::new(12345).for_phase(PhaseSlot::Entity);
        let mut b = RngBank::new(12345).for_phase(PhaseSlot::Entity);
        for _ in 0..50 {
            assert_eq!(
                EntityNameGenerator::generate(&mut a),
                EntityNameGenerator::generate(&mut b)
            );
        }
    }

    #[test]
    fn names_have_three_parts() {
        let mut rng = RngBank::new(7).for_phase(PhaseSlot::Entity);
        for _ in 0..100 {
            let name = EntityNameGenerator::generate(&mut rng);
            assert_eq!(name.split_whitespace().count(), 3, "bad name: {name}");
        }
    }
}
