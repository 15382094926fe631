use super::*;
use crate::fft::ParallelFft;

fn sinusoid(len: usize, period: f32) -> Vec<f32> {
    (0..len)
        .map(|i| (2.0 * core::f32::consts::PI * i as f32 / period).sin())
        .collect()
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

#[test]
fn test_morlet_spectrum_shape() {
    let n = 1024;
    let kernel = morlet_spectrum(n, 16.0, 2.0).unwrap();
    assert_eq!(kernel.len(), 2 * n);

    // The peak sits on bin N / period.
    let peak = (0..n).max_by(|&a, &b| kernel[2 * a].total_cmp(&kernel[2 * b])).unwrap();
    assert_eq!(peak, 64);

    let m = 2.0 * core::f64::consts::PI * 2.0;
    let expected = (m * 16.0).sqrt() * core::f64::consts::PI.powf(0.25);
    assert!((kernel[128] as f64 - expected).abs() < 1e-3);

    for k in n / 2 + 1..n {
        assert_eq!(kernel[2 * k], 0.0);
    }
    assert!(kernel.iter().skip(1).step_by(2).all(|&im| im == 0.0));
}

#[test]
fn test_morlet_spectrum_rejects_bad_parameters() {
    assert_eq!(morlet_spectrum(100, 16.0, 2.0), Err(FftError::InvalidSize(100)));
    assert!(matches!(morlet_spectrum(64, 0.0, 2.0), Err(FftError::InvalidConfig(_))));
    assert!(matches!(morlet_spectrum(64, 8.0, f32::NAN), Err(FftError::InvalidConfig(_))));
}

#[test]
fn test_padded_slice() {
    let src = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(padded_slice(&src, 1, 3), vec![2.0, 3.0]);
    assert_eq!(padded_slice(&src, -2, 2), vec![0.0, 0.0, 1.0, 2.0]);
    assert_eq!(padded_slice(&src, 3, 6), vec![4.0, 0.0, 0.0]);
    assert_eq!(padded_slice(&src, -1, 5), vec![0.0, 1.0, 2.0, 3.0, 4.0, 0.0]);
    assert_eq!(padded_slice(&src, 6, 8), vec![0.0, 0.0]);
    assert!(padded_slice(&src, 2, 1).is_empty());
}

#[test]
fn test_log2_mix() {
    assert!((log2_mix(110.0, 440.0, 0.0) - 110.0).abs() < 1e-3);
    assert!((log2_mix(110.0, 440.0, 0.5) - 220.0).abs() < 1e-3);
    assert!((log2_mix(110.0, 440.0, 1.0) - 440.0).abs() < 1e-2);
}

#[test]
fn test_cwt_frame_padding() {
    let samples = sinusoid(4096, 16.0);
    let frame = CwtFrame::prepare(&samples, 1024, 512, 32.0, 2.0).unwrap();
    assert_eq!(frame.padding(), 64);
    assert_eq!(frame.view_len(), 512);
    assert_eq!(frame.signal_fft().len(), 2 * 1024);
    assert_eq!(CwtFrame::padded_size(512, 32.0, 2.0), Ok(1024));
}

#[test]
fn test_cwt_rows_pick_the_matching_period() {
    let samples = sinusoid(4096, 16.0);
    let mut frame = CwtFrame::prepare(&samples, 1024, 512, 32.0, 2.0).unwrap();

    let mut matching = vec![0.0; 512];
    let mut distant = vec![0.0; 512];
    frame.row(16.0, &mut matching).unwrap();
    frame.row(64.0, &mut distant).unwrap();
    assert!(mean(&matching) > 10.0 * mean(&distant));

    // A steady tone gives a flat envelope once the padding is gone.
    let max = matching.iter().fold(f32::MIN, |m, &x| m.max(x));
    let min = matching.iter().fold(f32::MAX, |m, &x| m.min(x));
    assert!(min > 0.0);
    assert!(max / min < 1.05, "envelope ratio {}", max / min);
}

#[test]
fn test_cwt_frame_reads_zeros_before_the_buffer() {
    let samples = vec![1.0f32; 64];
    let frame = CwtFrame::prepare(&samples, -8, 16, 4.0, 1.0).unwrap();
    assert_eq!(frame.padding(), 4);
    // Window starts at -12 and spans 32 samples: 12 zeros then 20 ones.
    let dc = frame.signal_fft()[0] * (32f32).sqrt();
    assert!((dc - 20.0).abs() < 1e-4);
}

#[test]
fn test_cwt_frame_with_parallel_engine() {
    let samples = sinusoid(2048, 16.0);
    let fft = ParallelFft::flat(256).unwrap();
    let mut frame = CwtFrame::prepare_with(fft, &samples, 512, 128, 32.0, 1.0).unwrap();
    let mut reference = CwtFrame::prepare(&samples, 512, 128, 32.0, 1.0).unwrap();

    let mut a = vec![0.0; 128];
    let mut b = vec![0.0; 128];
    frame.row(16.0, &mut a).unwrap();
    reference.row(16.0, &mut b).unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert!((x - y).abs() <= 1e-4 * y.abs().max(1.0));
    }
}

#[test]
fn test_cwt_frame_size_checks() {
    let samples = vec![0.0f32; 256];
    let wrong = ScalarFft::new(128).unwrap();
    assert_eq!(
        CwtFrame::prepare_with(wrong, &samples, 0, 64, 32.0, 2.0).err(),
        Some(FftError::SizeMismatch { expected: 512, actual: 256 })
    );

    let mut frame = CwtFrame::prepare(&samples, 0, 64, 32.0, 2.0).unwrap();
    let mut short = vec![0.0; 10];
    assert_eq!(
        frame.row(8.0, &mut short),
        Err(FftError::SizeMismatch { expected: 64, actual: 10 })
    );
}

#[test]
fn test_cwt_frame_rejects_bad_max_period() {
    let samples = vec![0.0f32; 64];
    for period in [-5.0, 0.0, f32::NAN, f32::INFINITY] {
        assert!(matches!(
            CwtFrame::prepare(&samples, 0, 16, period, 1.0),
            Err(FftError::InvalidConfig(_))
        ));
        let fft = ScalarFft::new(16).unwrap();
        assert!(matches!(
            CwtFrame::prepare_with(fft, &samples, 0, 16, period, 1.0),
            Err(FftError::InvalidConfig(_))
        ));
    }
    assert!(matches!(
        CwtFrame::prepare(&samples, 0, 16, 4.0, f32::NAN),
        Err(FftError::InvalidConfig(_))
    ));
}

#[test]
fn test_cwt_frame_rejects_oversized_padding() {
    let samples = vec![0.0f32; 64];
    assert_eq!(
        CwtFrame::prepare(&samples, 0, 16, 1e30, 1.0).err(),
        Some(FftError::InvalidSize(usize::MAX))
    );
    // Fits in a usize but not in one allocation.
    assert!(matches!(
        CwtFrame::padded_size(16, 1e18, 1.0),
        Err(FftError::InvalidSize(_))
    ));
    assert!(matches!(
        CwtFrame::prepare(&samples, isize::MIN, 16, 4.0, 1.0),
        Err(FftError::InvalidConfig(_))
    ));
}
