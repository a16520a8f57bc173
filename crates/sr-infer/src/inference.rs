use crate::{Device, EspcnConfig, EspcnUpscaler, InferError, ModelSource, OnnxUpscaler};
use std::path::Path;

/// Entry point for loading upscalers on one device.
#[derive(Debug, Clone)]
pub struct Inference {
    device: Device,
}

impl Inference {
    pub fn cpu() -> Self {
        Self {
            device: Device::Cpu,
        }
    }

    #[cfg(feature = "cuda")]
    pub fn cuda(device_id: usize) -> Result<Self, InferError> {
        let device = Device::Cuda { device_id };
        device.to_candle()?;
        Ok(Self { device })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Load an ONNX super-resolution model.
    pub fn use_onnx(&self, model: impl Into<ModelSource>) -> Result<OnnxUpscaler, InferError> {
        OnnxUpscaler::new(model.into(), &self.device)
    }

    /// Load ESPCN safetensors weights with an explicit config.
    pub fn use_espcn(
        &self,
        weights: impl Into<ModelSource>,
        config: EspcnConfig,
    ) -> Result<EspcnUpscaler, InferError> {
        EspcnUpscaler::new(weights.into(), config, &self.device)
    }

    /// Load ESPCN weights, reading `config.json` from the same directory when
    /// present and falling back to the default config otherwise.
    pub fn use_espcn_dir(&self, weights_path: impl AsRef<Path>) -> Result<EspcnUpscaler, InferError> {
        let weights_path = weights_path.as_ref();
        let config_path = weights_path
            .parent()
            .map(|dir| dir.join("config.json"))
            .filter(|path| path.exists());
        let config = match config_path {
            Some(path) => EspcnConfig::from_file(path)?,
            None => EspcnConfig::default(),
        };
        self.use_espcn(weights_path, config)
    }
}

impl Default for Inference {
    fn default() -> Self {
        Self::cpu()
    }
}
