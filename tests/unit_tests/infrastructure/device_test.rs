use candle_core::{DType, Device};

use safepath::domain::{ComputeDevice, ModelConfig, Precision};
use safepath::infrastructure::audio::CandleWhisperEngine;
use safepath::infrastructure::inference::{select_device, select_dtype};

#[test]
fn given_cpu_preference_when_selecting_device_then_cpu() {
    let device = select_device(ComputeDevice::Cpu).unwrap();

    assert!(device.is_cpu());
}

#[test]
fn given_auto_precision_on_cpu_when_selecting_dtype_then_f32() {
    assert_eq!(select_dtype(Precision::Auto, &Device::Cpu), DType::F32);
    assert_eq!(select_dtype(Precision::Bf16, &Device::Cpu), DType::BF16);
}

#[test]
fn given_f16_precision_on_cpu_when_choosing_whisper_weights_then_f16_is_honoured() {
    let config = ModelConfig {
        device: ComputeDevice::Cpu,
        precision: Precision::F16,
        ..ModelConfig::default()
    };

    assert_eq!(CandleWhisperEngine::weights_dtype(&config, &Device::Cpu), DType::F16);
}

#[test]
fn given_auto_precision_on_cpu_when_choosing_whisper_weights_then_f32() {
    let config = ModelConfig {
        device: ComputeDevice::Cpu,
        ..ModelConfig::default()
    };

    assert_eq!(CandleWhisperEngine::weights_dtype(&config, &Device::Cpu), DType::F32);
}
