//! Boundary and configuration-validation tests.

use filinglab_core::{
    config::GeneratorConfig,
    error::GenError,
    pipeline::GenPipeline,
};

fn zero_config() -> GeneratorConfig {
    let mut config = GeneratorConfig::default_test();
    config.entity_count = 0;
    config.jurisdiction_count = 0;
    config.filing_type_count = 0;
    config.filing_count = 0;
    config.invoice_count = 0;
    config.payment_count = 0;
    config
}

#[test]
fn zero_scale_yields_empty_but_valid_schema() {
    let pipeline = GenPipeline::build_with("bound-zero", 42, zero_config()).unwrap();
    let reports = pipeline.run().unwrap();
    assert!(reports.iter().all(|r| r.rows_inserted == 0));

    let store = pipeline.into_store();
    assert_eq!(store.entity_count().unwrap(), 0);
    assert_eq!(store.filing_count().unwrap(), 0);
    assert_eq!(store.orphan_filing_count().unwrap(), 0);
}

#[test]
fn filings_without_entities_fail_before_any_insert() {
    let mut config = zero_config();
    config.filing_count = 1_000;
    config.jurisdiction_count = 4;
    config.filing_type_count = 4;

    let result = GenPipeline::build_with("bound-noparents", 42, config);
    assert!(matches!(
        result,
        Err(GenError::MissingParents {
            child: "compliance_filing",
            parent: "entity",
        })
    ));
}

#[test]
fn payments_without_invoices_fail_before_any_insert() {
    let mut config = GeneratorConfig::default_test();
    config.invoice_count = 0;

    let result = GenPipeline::build_with("bound-noinvoices", 42, config);
    assert!(matches!(result, Err(GenError::MissingParents { .. })));
}

#[test]
fn inverted_date_window_is_rejected() {
    let mut config = GeneratorConfig::default_test();
    std::mem::swap(&mut config.start_date, &mut config.end_date);

    let result = GenPipeline::build_with("bound-dates", 42, config);
    assert!(matches!(result, Err(GenError::InvalidDateRange { .. })));
}

#[test]
fn out_of_range_hot_share_is_rejected() {
    let mut config = GeneratorConfig::default_test();
    config.hot_entity_share = 1.5;

    let result = GenPipeline::build_with("bound-hotshare", 42, config);
    assert!(matches!(
        result,
        Err(GenError::InvalidConfig {
            field: "hot_entity_share",
            ..
        })
    ));
}

#[test]
fn single_day_window_generates_without_error() {
    let mut config = GeneratorConfig::default_test();
    config.end_date = config.start_date;

    let pipeline = GenPipeline::build_with("bound-oneday", 42, config).unwrap();
    pipeline.run().unwrap();
    let store = pipeline.into_store();

    let (min, max) = store.due_date_bounds().unwrap().unwrap();
    assert_eq!(min, max);
}
