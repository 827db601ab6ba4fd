use safepath::infrastructure::audio::mel_filter_bank;

const N_FFT: usize = 400;
const SAMPLE_RATE: u32 = 16_000;

#[test]
fn given_80_mels_when_building_bank_then_shape_matches_and_every_row_has_weight() {
    let bank = mel_filter_bank(80, N_FFT, SAMPLE_RATE);
    let n_bins = N_FFT / 2 + 1;

    assert_eq!(bank.len(), 80 * n_bins);
    assert!(bank.iter().all(|w| *w >= 0.0 && w.is_finite()));
    for row in bank.chunks(n_bins) {
        assert!(row.iter().sum::<f32>() > 0.0);
    }
}

#[test]
fn given_128_mels_when_building_bank_then_sized_for_large_v3() {
    let bank = mel_filter_bank(128, N_FFT, SAMPLE_RATE);

    assert_eq!(bank.len(), 128 * 201);
    assert!(bank.iter().any(|w| *w > 0.0));
}
