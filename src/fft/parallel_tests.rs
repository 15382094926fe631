use super::*;
use crate::fft::scalar::ScalarFft;

fn test_signal(len: usize, seed: f32) -> Vec<f32> {
    (0..len)
        .map(|i| ((i as f32 + seed) * 0.618).sin() * 0.8 + ((i * i) as f32 * 0.01).cos() * 0.2)
        .collect()
}

fn assert_relative_close(actual: &[f32], expected: &[f32], rel: f32) {
    assert_eq!(actual.len(), expected.len());
    let peak = expected.iter().fold(1.0f32, |m, x| m.max(x.abs()));
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= rel * peak,
            "slot {}: expected {}, got {}", i, e, a
        );
    }
}

#[test]
fn test_flat_matches_scalar() {
    for log2n in 1..=12 {
        let n = 1usize << log2n;
        let parallel = ParallelFft::flat(n).unwrap();
        let scalar = ScalarFft::new(n).unwrap();
        assert_eq!(parallel.size(), n);
        assert_eq!(parallel.sequence_len(), n);

        let input = test_signal(2 * n, log2n as f32);
        let mut expected = vec![0.0; 2 * n];
        let mut actual = vec![0.0; 2 * n];
        scalar.transform(&input, &mut expected).unwrap();
        parallel.transform(&input, &mut actual).unwrap();
        assert_relative_close(&actual, &expected, 1e-4);
    }
}

#[test]
fn test_flat_factoring() {
    let fft = ParallelFft::flat(32).unwrap();
    assert_eq!((fft.width(), fft.height()), (8, 4));
    let fft = ParallelFft::flat(2).unwrap();
    assert_eq!((fft.width(), fft.height()), (2, 1));
}

#[test]
fn test_rows_transform_each_row() {
    let (w, h) = (16, 3);
    let fft = ParallelFft::new(w, h, Layout::Rows).unwrap();
    let scalar = ScalarFft::new(w).unwrap();
    let input = test_signal(2 * w * h, 0.5);
    let mut actual = vec![0.0; 2 * w * h];
    fft.transform(&input, &mut actual).unwrap();

    for y in 0..h {
        let row = &input[2 * w * y..2 * w * (y + 1)];
        let mut expected = vec![0.0; 2 * w];
        scalar.transform(row, &mut expected).unwrap();
        assert_relative_close(&actual[2 * w * y..2 * w * (y + 1)], &expected, 1e-4);
    }
}

#[test]
fn test_cols_transform_each_column() {
    let (w, h) = (3, 8);
    let fft = ParallelFft::new(w, h, Layout::Cols).unwrap();
    let scalar = ScalarFft::new(h).unwrap();
    let input = test_signal(2 * w * h, 1.5);
    let mut actual = vec![0.0; 2 * w * h];
    fft.transform(&input, &mut actual).unwrap();

    for x in 0..w {
        let mut column = vec![0.0; 2 * h];
        let mut result = vec![0.0; 2 * h];
        for y in 0..h {
            column[2 * y] = input[2 * (y * w + x)];
            column[2 * y + 1] = input[2 * (y * w + x) + 1];
            result[2 * y] = actual[2 * (y * w + x)];
            result[2 * y + 1] = actual[2 * (y * w + x) + 1];
        }
        let mut expected = vec![0.0; 2 * h];
        scalar.transform(&column, &mut expected).unwrap();
        assert_relative_close(&result, &expected, 1e-4);
    }
}

#[test]
fn test_grid_roundtrip() {
    let fft = ParallelFft::new(8, 8, Layout::Rows).unwrap();
    let input = Grid::from_interleaved(8, 8, &test_signal(128, 2.0)).unwrap();
    let spectrum = fft.transform_grid(&input).unwrap();
    let restored = fft.inverse_grid(&spectrum).unwrap();
    assert_relative_close(restored.as_interleaved(), input.as_interleaved(), 1e-5);
}

#[test]
fn test_rejects_invalid_layouts() {
    assert_eq!(ParallelFft::new(6, 4, Layout::Rows).unwrap_err(), FftError::InvalidSize(6));
    assert_eq!(ParallelFft::new(6, 4, Layout::Cols).unwrap().sequence_len(), 4);
    assert_eq!(ParallelFft::new(3, 4, Layout::Flat).unwrap_err(), FftError::InvalidSize(12));
    assert_eq!(ParallelFft::new(1, 1, Layout::Flat).unwrap_err(), FftError::InvalidSize(1));
    assert_eq!(ParallelFft::new(0, 4, Layout::Cols).unwrap_err(), FftError::InvalidSize(0));
}

#[test]
fn test_oversized_grids_are_rejected() {
    let huge = 1usize << (usize::BITS / 2 + 8);
    assert_eq!(
        ParallelFft::new(huge, huge, Layout::Flat).unwrap_err(),
        FftError::InvalidSize(usize::MAX)
    );
    assert_eq!(
        ParallelFft::new(huge, huge, Layout::Rows).unwrap_err(),
        FftError::InvalidSize(usize::MAX)
    );
    let wide = 1usize << (usize::BITS - 2);
    assert_eq!(
        ParallelFft::new(wide, 1, Layout::Flat).unwrap_err(),
        FftError::InvalidSize(wide)
    );
}

#[test]
fn test_rejects_foreign_grid() {
    let fft = ParallelFft::new(4, 4, Layout::Flat).unwrap();
    let grid = Grid::new(4, 2);
    assert_eq!(
        fft.transform_grid(&grid).unwrap_err(),
        FftError::SizeMismatch { expected: 32, actual: 16 }
    );
    let mut out = vec![0.0; 30];
    assert!(fft.transform(&[0.0; 32], &mut out).is_err());
}

#[test]
fn test_shared_table_must_match() {
    let table = Arc::new(BitReversalTable::new(8).unwrap());
    assert!(ParallelFft::with_table(CpuDevice, 8, 2, Layout::Rows, table.clone()).is_ok());
    assert_eq!(
        ParallelFft::with_table(CpuDevice, 4, 2, Layout::Rows, table).unwrap_err(),
        FftError::InvalidSize(8)
    );
}
