use std::io::Cursor;

use safepath::application::services::encode_wav;
use safepath::domain::SynthesizedSpeech;

#[test]
fn given_speech_when_encoding_then_wav_header_matches_sample_rate() {
    let speech = SynthesizedSpeech::new(vec![0.0, 0.5, -0.5, 1.0], 22_050);

    let bytes = encode_wav(&speech).unwrap();
    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();

    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 22_050);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len(), 4);
}

#[test]
fn given_out_of_range_and_nan_samples_when_encoding_then_clamped() {
    let speech = SynthesizedSpeech::new(vec![2.0, -3.0, f32::NAN], 16_000);

    let bytes = encode_wav(&speech).unwrap();
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();

    assert_eq!(samples, vec![i16::MAX, -i16::MAX, 0]);
}

#[test]
fn given_speech_when_measuring_then_duration_follows_rate() {
    let speech = SynthesizedSpeech::new(vec![0.0; 8_000], 16_000);

    assert!((speech.duration_secs() - 0.5).abs() < f32::EPSILON);
}
