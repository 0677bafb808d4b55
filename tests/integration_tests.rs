use approx::assert_abs_diff_eq;
use savgol::{basis, design, smooth, SavgolError};

#[test]
fn linear_ramp_survives_the_filter_unchanged() {
    let samples = [900.0, 920.0, 940.0, 960.0, 980.0];
    let smoothed = smooth(5, 3, &samples).unwrap();

    assert_eq!(smoothed.len(), samples.len());
    for (&actual, &expected) in smoothed.iter().zip(samples.iter()) {
        assert_abs_diff_eq!(actual, expected, epsilon = 1e-9);
    }
}

#[test]
fn cubic_signal_survives_a_cubic_fit() {
    let poly = |t: f64| 0.01 * t.powi(3) - 0.3 * t.powi(2) + 2.0 * t + 5.0;
    let samples: Vec<f64> = (0..25).map(|t| poly(t as f64)).collect();

    let smoothed = smooth(9, 3, &samples).unwrap();
    for (&actual, &expected) in smoothed.iter().zip(samples.iter()) {
        assert_abs_diff_eq!(actual, expected, epsilon = 1e-6);
    }
}

#[test]
fn alternating_noise_is_attenuated_in_the_interior() {
    // A 5-point quadratic kernel maps the alternating pattern +-1 to
    // (-3 - 12 + 17 - 12 - 3) / 35 = -13/35, so the ripple around the mean
    // must shrink by that exact factor.
    let mean = 10.0;
    let samples: Vec<f64> = (0..40)
        .map(|i| mean + if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();

    let smoothed = smooth(5, 2, &samples).unwrap();
    for &value in &smoothed[2..38] {
        assert_abs_diff_eq!((value - mean).abs(), 13.0 / 35.0, epsilon = 1e-9);
    }
}

#[test]
fn full_order_bank_interpolates_any_sequence() {
    // order = frame - 1 leaves no residual: every sample is its own fit.
    let samples = [3.0, -1.5, 2.25, 0.0, 7.5, 4.2, -3.3];
    let bank = design::<f64>(5, 4).unwrap();
    assert_eq!(bank.rank(), 5);

    let smoothed = bank.apply(&samples).unwrap();
    for (&actual, &expected) in smoothed.iter().zip(samples.iter()) {
        assert_abs_diff_eq!(actual, expected, epsilon = 1e-8);
    }
}

#[test]
fn sequences_shorter_than_the_frame_are_still_filtered() {
    // Four samples on a line against a 9-point window: still exact.
    let samples = [2.0, 4.0, 6.0, 8.0];
    let smoothed = smooth(9, 2, &samples).unwrap();
    for (&actual, &expected) in smoothed.iter().zip(samples.iter()) {
        assert_abs_diff_eq!(actual, expected, epsilon = 1e-9);
    }

    // Two samples cannot be smoothed below a linear fit: pass-through.
    let smoothed = smooth(9, 2, &[1.0, -1.0]).unwrap();
    assert_abs_diff_eq!(smoothed[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(smoothed[1], -1.0, epsilon = 1e-9);
}

#[test]
fn five_point_basis_row_at_offset_minus_two() {
    let a = basis(5).unwrap();
    let expected = [1, -2, 4, -8, 16];
    for (j, &value) in expected.iter().enumerate() {
        assert_eq!(a[(0, j)], value);
    }
}

#[test]
fn degenerate_parameters_are_rejected() {
    assert_eq!(
        design::<f64>(5, 5),
        Err(SavgolError::InvalidPolynomialOrder(5, 5))
    );
    assert_eq!(design::<f64>(4, 2), Err(SavgolError::EvenFrameLength(4)));
    assert_eq!(design::<f64>(0, 0), Err(SavgolError::InvalidFrameLength(0)));
    assert_eq!(smooth::<f64>(5, 3, &[]), Err(SavgolError::EmptyInput));
}

#[test]
fn error_messages_name_the_offending_parameters() {
    let err = design::<f64>(4, 2).unwrap_err();
    assert!(err.to_string().contains('4'));

    let err = design::<f64>(5, 7).unwrap_err();
    let message = err.to_string();
    assert!(message.contains('7') && message.contains('5'));
}

#[test]
fn single_precision_end_to_end() {
    let samples = vec![3.5_f32; 12];
    let smoothed = smooth(5, 2, &samples).unwrap();
    assert_eq!(smoothed.len(), 12);
    for &value in &smoothed {
        assert_abs_diff_eq!(value, 3.5, epsilon = 1e-4);
    }
}

#[test]
fn derivative_kernels_track_a_quadratic() {
    let bank = design::<f64>(7, 2).unwrap();
    let poly = |t: f64| 0.5 * t * t;
    let window: Vec<f64> = (7..14).map(|t| poly(t as f64)).collect();
    let center = 10.0;

    // d/dt (t^2 / 2) = t at the window center.
    let d1 = bank.derivative_kernel(1).unwrap();
    let slope: f64 = d1.iter().zip(window.iter()).map(|(c, x)| c * x).sum();
    assert_abs_diff_eq!(slope, center, epsilon = 1e-8);

    // The curvature is 1 everywhere.
    let d2 = bank.derivative_kernel(2).unwrap();
    let curvature: f64 = d2.iter().zip(window.iter()).map(|(c, x)| c * x).sum();
    assert_abs_diff_eq!(curvature, 1.0, epsilon = 1e-8);
}

#[test]
fn repeated_designs_filter_identically() {
    let samples: Vec<f64> = (0..32).map(|i| (i as f64 * 0.41).cos() * 5.0).collect();
    let first = design::<f64>(7, 3).unwrap().apply(&samples).unwrap();
    let second = design::<f64>(7, 3).unwrap().apply(&samples).unwrap();
    assert_eq!(first, second);
}
