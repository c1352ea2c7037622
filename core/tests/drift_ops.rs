//! Post-load drift tests: status aging and appended skewed batches.

use chrono::NaiveDate;
use filinglab_core::{
    drift,
    pipeline::GenPipeline,
    rng::{PhaseSlot, RngBank},
    store::LabStore,
};

fn generated_store(run_id: &str) -> LabStore {
    let pipeline = GenPipeline::build_test(run_id, 42).unwrap();
    pipeline.run().unwrap();
    pipeline.into_store()
}

fn status_count(store: &LabStore, status: &str) -> i64 {
    store
        .filing_status_counts()
        .unwrap()
        .into_iter()
        .find(|(s, _)| s == status)
        .map(|(_, c)| c)
        .unwrap_or(0)
}

#[test]
fn aging_moves_only_pending_rows_to_overdue() {
    let store = generated_store("drift-age");
    let as_of = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    let pending_before = status_count(&store, "Pending");
    let overdue_before = status_count(&store, "Overdue");
    let filed_before = status_count(&store, "Filed");

    let report = drift::age_pending_filings(&store, 3, as_of).unwrap();

    assert!(report.rows_affected > 0, "expected some Pending rows to age");
    assert_eq!(
        status_count(&store, "Pending"),
        pending_before - report.rows_affected as i64
    );
    assert_eq!(
        status_count(&store, "Overdue"),
        overdue_before + report.rows_affected as i64
    );
    // Non-Pending rows are untouched.
    assert_eq!(status_count(&store, "Filed"), filed_before);
    // Lineage recorded.
    assert_eq!(store.drift_batch_count().unwrap(), 1);
}

#[test]
fn appended_batch_continues_ids_and_keeps_integrity() {
    let store = generated_store("drift-append");
    let config = filinglab_core::config::GeneratorConfig::default_test();
    let as_of = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    let before = store.filing_count().unwrap();
    let max_before = store.max_filing_id().unwrap();

    let mut rng = RngBank::new(42).for_phase(PhaseSlot::Drift);
    let report = drift::append_filing_batch(&store, &config, &mut rng, 500, as_of).unwrap();

    assert_eq!(report.rows_affected, 500);
    assert_eq!(store.filing_count().unwrap(), before + 500);
    assert_eq!(store.max_filing_id().unwrap(), max_before + 500);
    assert_eq!(store.orphan_filing_count().unwrap(), 0);
    assert_eq!(store.drift_batch_count().unwrap(), 1);
}

#[test]
fn repeated_drift_passes_accumulate_lineage() {
    let store = generated_store("drift-lineage");
    let as_of = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

    drift::age_pending_filings(&store, 5, as_of).unwrap();
    drift::age_pending_filings(&store, 5, as_of).unwrap();

    assert_eq!(store.drift_batch_count().unwrap(), 2);
}
