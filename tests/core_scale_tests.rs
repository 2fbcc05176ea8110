use approx::assert_relative_eq;
use barchart_rs::ChartError;
use barchart_rs::core::{BandScale, LinearScale};

#[test]
fn linear_scale_maps_and_inverts() {
    let scale = LinearScale::new(0.0, 30.0, 540.0, 0.0).expect("valid scale");

    assert_relative_eq!(scale.map(0.0), 540.0, epsilon = 1e-9);
    assert_relative_eq!(scale.map(30.0), 0.0, epsilon = 1e-9);
    assert_relative_eq!(scale.map(10.0), 360.0, epsilon = 1e-9);

    let px = scale.map(12.5);
    assert!((scale.invert(px) - 12.5).abs() <= 1e-9);
}

#[test]
fn degenerate_domain_maps_to_range_start() {
    let scale = LinearScale::new(0.0, 0.0, 200.0, 0.0).expect("zero span is allowed");

    assert!(scale.is_degenerate());
    assert_eq!(scale.map(0.0), 200.0);
    assert_eq!(scale.map(-5.0), 200.0);
    assert_eq!(scale.invert(100.0), 0.0);
}

#[test]
fn non_finite_bounds_are_rejected() {
    let err = LinearScale::new(0.0, f64::NAN, 0.0, 1.0).expect_err("nan domain");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = LinearScale::new(0.0, 1.0, f64::INFINITY, 0.0).expect_err("infinite range");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn non_finite_values_map_to_range_start() {
    let scale = LinearScale::new(0.0, 10.0, 100.0, 0.0).expect("valid scale");
    assert_eq!(scale.map(f64::NAN), 100.0);
}

#[test]
fn ticks_use_round_steps() {
    let scale = LinearScale::new(0.0, 30.0, 540.0, 0.0).expect("valid scale");
    let ticks: Vec<f64> = scale.ticks(5).into_iter().collect();
    assert_eq!(ticks, vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);

    let scale = LinearScale::new(0.0, 1.0, 100.0, 0.0).expect("valid scale");
    let ticks: Vec<f64> = scale.ticks(5).into_iter().collect();
    assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);

    let scale = LinearScale::new(0.0, 1000.0, 100.0, 0.0).expect("valid scale");
    let ticks: Vec<f64> = scale.ticks(10).into_iter().collect();
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[1], 100.0);
}

#[test]
fn ticks_for_degenerate_or_zero_count() {
    let flat = LinearScale::new(0.0, 0.0, 100.0, 0.0).expect("valid scale");
    assert_eq!(flat.ticks(5).as_slice(), &[0.0]);

    let scale = LinearScale::new(0.0, 10.0, 100.0, 0.0).expect("valid scale");
    assert!(scale.ticks(0).is_empty());
}

#[test]
fn band_scale_splits_extent_with_gap() {
    let band = BandScale::new(4, 400.0, 0.1).expect("valid band");

    assert_relative_eq!(band.step(), 100.0, epsilon = 1e-9);
    assert_relative_eq!(band.gap(), 10.0, epsilon = 1e-9);
    assert_relative_eq!(band.bar_width(), 90.0, epsilon = 1e-9);
    assert_relative_eq!(band.band_start(2), 200.0, epsilon = 1e-9);
    assert_relative_eq!(band.bar_start(2), 205.0, epsilon = 1e-9);
    assert_relative_eq!(band.band_center(2), 250.0, epsilon = 1e-9);
}

#[test]
fn band_scale_without_gap_tiles_extent() {
    let band = BandScale::new(3, 300.0, 0.0).expect("valid band");
    let end = band.bar_start(2) + band.bar_width();
    assert_relative_eq!(end, 300.0, epsilon = 1e-9);
}

#[test]
fn empty_band_scale_has_zero_step() {
    let band = BandScale::new(0, 500.0, 0.1).expect("valid band");
    assert_eq!(band.step(), 0.0);
    assert_eq!(band.bar_width(), 0.0);
}

#[test]
fn band_scale_rejects_invalid_input() {
    assert!(BandScale::new(3, 300.0, 1.0).is_err());
    assert!(BandScale::new(3, -1.0, 0.1).is_err());
    assert!(BandScale::new(3, f64::NAN, 0.1).is_err());
}

#[test]
fn subnormal_domain_yields_bounded_increasing_ticks() {
    let scale = LinearScale::new(0.0, 1e-310, 540.0, 0.0).expect("finite domain");
    let ticks = scale.ticks(5);

    assert!(!ticks.is_empty() && ticks.len() <= 11, "{ticks:?}");
    assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]), "{ticks:?}");
    assert!(ticks.iter().all(|tick| *tick >= 0.0 && *tick <= 1.01e-310));
}
