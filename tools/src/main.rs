//! labgen: headless dataset generator for FilingLab.
//!
//! Usage:
//!   labgen --seed 12345 --db lab.db
//!   labgen --seed 12345 --db lab.db --config lab_config.json
//!   labgen --seed 12345 --db lab.db --filings 500000 --drift
//!   labgen --seed 12345 --db lab.db --json

use anyhow::Result;
use chrono::Utc;
use filinglab_core::{
    config::GeneratorConfig,
    drift,
    pipeline::GenPipeline,
    rng::{PhaseSlot, RngBank},
    store::LabStore,
    summary::DatasetSummary,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or("filinglab.db");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());
    let apply_drift = args.iter().any(|a| a == "--drift");
    let json_out = args.iter().any(|a| a == "--json");

    let mut config = match config_path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::lab_default(),
    };
    // Scale overrides, applied on top of the file/default config.
    config.entity_count = parse_arg(&args, "--entities", config.entity_count);
    config.jurisdiction_count = parse_arg(&args, "--jurisdictions", config.jurisdiction_count);
    config.filing_type_count = parse_arg(&args, "--filing-types", config.filing_type_count);
    config.filing_count = parse_arg(&args, "--filings", config.filing_count);
    config.invoice_count = parse_arg(&args, "--invoices", config.invoice_count);
    config.payment_count = parse_arg(&args, "--payments", config.payment_count);

    if !json_out {
        println!("FilingLab labgen");
        println!("  seed:     {seed}");
        println!("  db:       {db}");
        println!("  entities: {}", config.entity_count);
        println!("  filings:  {}", config.filing_count);
        println!();
    }

    let store = LabStore::open(db)?;
    store.migrate()?;

    let run_id = format!("lab-{seed}-{}", Utc::now().format("%Y%m%d%H%M%S"));
    store.insert_run(&run_id, seed, env!("CARGO_PKG_VERSION"))?;

    let pipeline = GenPipeline::new(run_id.clone(), seed, config.clone(), store)?;
    let reports = pipeline.run()?;
    let store = pipeline.into_store();

    if apply_drift {
        let today = Utc::now().date_naive();
        let aged = drift::age_pending_filings(&store, 3, today)?;
        let mut drift_rng = RngBank::new(seed).for_phase(PhaseSlot::Drift);
        let appended = drift::append_filing_batch(
            &store,
            &config,
            &mut drift_rng,
            config.filing_count / 20,
            today,
        )?;
        log::info!(
            "drift applied: {} aged, {} appended",
            aged.rows_affected,
            appended.rows_affected
        );
    }

    let summary = DatasetSummary::collect(&store, &config)?;

    if json_out {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("=== GENERATION SUMMARY ===");
    println!("  run_id:        {run_id}");
    for report in &reports {
        println!("  phase {:<8} {} rows", report.phase, report.rows_inserted);
    }
    println!();
    println!("  entities:      {}", summary.entities);
    println!("  jurisdictions: {}", summary.jurisdictions);
    println!("  filing types:  {}", summary.filing_types);
    println!("  filings:       {}", summary.filings);
    println!("  invoices:      {}", summary.invoices);
    println!("  payments:      {}", summary.payments);
    println!();
    println!("=== SKEW SHAPE ===");
    for (status, share) in &summary.filing_status_shares {
        println!("  filing {:<10} {:>5.1}%", status, share * 100.0);
    }
    println!(
        "  mega clients hold {:.1}% of entities",
        summary.mega_client_share * 100.0
    );
    println!(
        "  hot entity range draws {:.1}% of filings",
        summary.hot_entity_filing_share * 100.0
    );
    println!(
        "  orphans: {} filings, {} invoices, {} payments",
        summary.orphan_filings, summary.orphan_invoices, summary.orphan_payments
    );
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
