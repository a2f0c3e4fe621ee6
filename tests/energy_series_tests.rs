use rust_decimal::Decimal;
use rxn_coords::core::EnergySeries;
use rxn_coords::error::ChartError;

#[test]
fn deltas_of_reference_pathway() {
    let series = EnergySeries::new(vec![6.0, 5.5, 5.7, 5.0, 4.3, 3.4, 3.0]).expect("series");
    let deltas = series.deltas().expect("deltas");
    let expected = [-0.5, 0.2, -0.7, -0.7, -0.9, -0.4];
    assert_eq!(deltas.len(), 6);
    for (delta, want) in deltas.iter().zip(expected) {
        assert!((delta - want).abs() <= 1e-12, "{delta} != {want}");
    }
}

#[test]
fn single_step_has_no_deltas() {
    let series = EnergySeries::new(vec![1.5]).expect("series");
    assert!(series.deltas().expect("deltas").is_empty());
}

#[test]
fn rebase_out_of_range_reports_index_and_length() {
    let series = EnergySeries::new(vec![1.0, 2.0]).expect("series");
    let err = series.rebased(2).expect_err("out of range");
    assert!(matches!(err, ChartError::ZeroIndexOutOfRange { index: 2, len: 2 }));
    assert!(format!("{err}").contains("out of range"));
}

#[test]
fn decimals_convert_to_f64() {
    let values = [
        Decimal::new(-76_4231, 4),
        Decimal::new(-76_3987, 4),
        Decimal::new(-76_4410, 4),
    ];
    let series = EnergySeries::from_decimals(&values).expect("series");
    assert_eq!(series.len(), 3);
    assert!((series.values()[0] + 76.4231).abs() <= 1e-12);
    assert!(matches!(
        EnergySeries::from_decimals(&[]),
        Err(ChartError::EmptySeries)
    ));
}

#[test]
fn textual_energies_parse_or_fail_with_conversion_error() {
    let series = EnergySeries::parse_strs(&["-1.5", "0", "2e-1"]).expect("series");
    assert_eq!(series.values(), &[-1.5, 0.0, 0.2]);

    let err = EnergySeries::parse_strs(&["1.0", "n/a"]).expect_err("not numeric");
    assert!(matches!(err, ChartError::EnergyConversion { index: 1, .. }));

    let err = EnergySeries::parse_strs(&["1.0", "inf"]).expect_err("not finite");
    assert!(matches!(err, ChartError::NonFiniteEnergy { index: 1, .. }));
}

#[test]
fn serde_round_trip_validates_values() {
    let series: EnergySeries = serde_json::from_str("[0.0, -1.25]").expect("json");
    assert_eq!(series.values(), &[0.0, -1.25]);
    assert_eq!(serde_json::to_string(&series).expect("to json"), "[0.0,-1.25]");
    assert!(serde_json::from_str::<EnergySeries>("[]").is_err());
}
