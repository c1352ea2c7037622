//! Generation configuration.
//!
//! One immutable structure passed into the pipeline: scale parameters,
//! the date window, and the skew knobs. Validated up front so a bad
//! config fails before any insert.

use crate::error::{GenError, GenResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_hot_entity_share() -> f64 {
    0.70
}

fn default_hot_entity_fraction() -> f64 {
    0.05
}

fn default_client_pool_size() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub entity_count: u64,
    pub jurisdiction_count: u64,
    pub filing_type_count: u64,
    pub filing_count: u64,
    pub invoice_count: u64,
    pub payment_count: u64,

    /// All generated due/issued/paid dates fall in [start_date, end_date].
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Fraction of filing/invoice rows forced into the hot entity subrange.
    #[serde(default = "default_hot_entity_share")]
    pub hot_entity_share: f64,

    /// Size of the hot subrange as a fraction of the parent id space.
    #[serde(default = "default_hot_entity_fraction")]
    pub hot_entity_fraction: f64,

    /// Number of ordinary (non-mega) client identifiers.
    #[serde(default = "default_client_pool_size")]
    pub client_pool_size: u64,
}

impl GeneratorConfig {
    /// Load from a JSON file. Validates before returning.
    pub fn load(path: &str) -> GenResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on a config that would produce an inconsistent dataset.
    /// Zero counts are valid (empty but schema-valid output); a nonzero
    /// child count with a zero parent count is not.
    pub fn validate(&self) -> GenResult<()> {
        if self.start_date > self.end_date {
            return Err(GenError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !(0.0..=1.0).contains(&self.hot_entity_share) {
            return Err(GenError::InvalidConfig {
                field: "hot_entity_share",
                value: self.hot_entity_share.to_string(),
            });
        }
        if !(0.0 < self.hot_entity_fraction && self.hot_entity_fraction <= 1.0) {
            return Err(GenError::InvalidConfig {
                field: "hot_entity_fraction",
                value: self.hot_entity_fraction.to_string(),
            });
        }
        if self.client_pool_size == 0 {
            return Err(GenError::InvalidConfig {
                field: "client_pool_size",
                value: "0".into(),
            });
        }
        if self.filing_count > 0 {
            if self.entity_count == 0 {
                return Err(GenError::MissingParents {
                    child: "compliance_filing",
                    parent: "entity",
                });
            }
            if self.jurisdiction_count == 0 {
                return Err(GenError::MissingParents {
                    child: "compliance_filing",
                    parent: "jurisdiction",
                });
            }
            if self.filing_type_count == 0 {
                return Err(GenError::MissingParents {
                    child: "compliance_filing",
                    parent: "filing_type",
                });
            }
        }
        if self.invoice_count > 0 && self.entity_count == 0 {
            return Err(GenError::MissingParents {
                child: "invoice",
                parent: "entity",
            });
        }
        if self.payment_count > 0 && self.invoice_count == 0 {
            return Err(GenError::MissingParents {
                child: "invoice_payment",
                parent: "invoice",
            });
        }
        Ok(())
    }

    /// Number of days in the inclusive date window.
    pub fn window_days(&self) -> u64 {
        self.end_date
            .signed_duration_since(self.start_date)
            .num_days() as u64
            + 1
    }

    /// Full lab scale: the dataset the teaching scripts are written against.
    pub fn lab_default() -> Self {
        Self {
            entity_count: 20_000,
            jurisdiction_count: 40,
            filing_type_count: 12,
            filing_count: 350_000,
            invoice_count: 120_000,
            payment_count: 180_000,
            start_date: ymd(2022, 1, 1),
            end_date: ymd(2024, 12, 31),
            hot_entity_share: default_hot_entity_share(),
            hot_entity_fraction: default_hot_entity_fraction(),
            client_pool_size: default_client_pool_size(),
        }
    }

    /// Small hardcoded config for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            entity_count: 200,
            jurisdiction_count: 8,
            filing_type_count: 6,
            filing_count: 2_000,
            invoice_count: 500,
            payment_count: 800,
            start_date: ymd(2024, 1, 1),
            end_date: ymd(2024, 12, 31),
            hot_entity_share: default_hot_entity_share(),
            hot_entity_fraction: default_hot_entity_fraction(),
            client_pool_size: default_client_pool_size(),
        }
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}
