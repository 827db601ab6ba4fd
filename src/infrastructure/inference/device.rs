use candle_core::{DType, Device};

use crate::application::ports::ModelLoadError;
use crate::domain::{ComputeDevice, Precision};

/// Resolves the configured device. `Auto` prefers CUDA, then Metal, then CPU.
pub fn select_device(preference: ComputeDevice) -> Result<Device, ModelLoadError> {
    match preference {
        ComputeDevice::Cpu => Ok(Device::Cpu),
        ComputeDevice::Cuda => Device::new_cuda(0)
            .map_err(|e| ModelLoadError::DeviceUnavailable(format!("cuda: {}", e))),
        ComputeDevice::Metal => Device::new_metal(0)
            .map_err(|e| ModelLoadError::DeviceUnavailable(format!("metal: {}", e))),
        ComputeDevice::Auto => {
            if candle_core::utils::cuda_is_available() {
                if let Ok(device) = Device::new_cuda(0) {
                    return Ok(device);
                }
            }
            if candle_core::utils::metal_is_available() {
                if let Ok(device) = Device::new_metal(0) {
                    return Ok(device);
                }
            }
            Ok(Device::Cpu)
        }
    }
}

pub fn select_dtype(precision: Precision, device: &Device) -> DType {
    match precision.resolve(!device.is_cpu()) {
        Precision::F16 => DType::F16,
        Precision::Bf16 => DType::BF16,
        Precision::F32 | Precision::Auto => DType::F32,
    }
}
