use crate::InferError;
use std::fmt;

/// Where a model runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    Cpu,
    Cuda { device_id: usize },
}

impl Device {
    /// The matching candle device. CUDA requires the `cuda` feature.
    pub fn to_candle(&self) -> Result<candle_core::Device, InferError> {
        match self {
            Device::Cpu => Ok(candle_core::Device::Cpu),
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => Ok(candle_core::Device::new_cuda(*device_id)?),
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => Err(InferError::UnsupportedDevice(self.clone())),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "CPU"),
            Device::Cuda { device_id } => write!(f, "CUDA(device_id={device_id})"),
        }
    }
}
