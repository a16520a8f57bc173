//! ESPCN (efficient sub-pixel convolution) upscaler on candle.
//!
//! Three convolutions run at the low resolution; the last one produces
//! `r * r` channels per output channel which a pixel shuffle rearranges into
//! an image `r` times larger in each direction.

use crate::upscaler::check_luminance_shape;
use crate::{Device, InferError, ModelSource, Upscaler};
use candle_core::{DType, Module, Tensor as CanTensor};
use candle_nn::{Conv2d, Conv2dConfig, VarBuilder};
use serde::Deserialize;
use sr_base::Tensor;
use std::path::Path;

fn default_upscale_factor() -> usize {
    4
}

fn default_num_channels() -> usize {
    1
}

fn default_feature_channels() -> usize {
    64
}

fn default_hidden_channels() -> usize {
    32
}

/// Network shape, read from the `config.json` shipped next to the weights.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EspcnConfig {
    #[serde(default = "default_upscale_factor")]
    pub upscale_factor: usize,
    #[serde(default = "default_num_channels")]
    pub num_channels: usize,
    #[serde(default = "default_feature_channels")]
    pub feature_channels: usize,
    #[serde(default = "default_hidden_channels")]
    pub hidden_channels: usize,
}

impl Default for EspcnConfig {
    fn default() -> Self {
        Self {
            upscale_factor: default_upscale_factor(),
            num_channels: default_num_channels(),
            feature_channels: default_feature_channels(),
            hidden_channels: default_hidden_channels(),
        }
    }
}

impl EspcnConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, InferError> {
        let config: Self = serde_json::from_str(json)?;
        if config.upscale_factor == 0 || config.num_channels == 0 {
            return Err(InferError::Config(
                "upscale_factor and num_channels must be non-zero".to_string(),
            ));
        }
        Ok(config)
    }
}

/// The ESPCN network. Weights live under `conv1`, `conv2` and `conv3`.
#[derive(Debug)]
pub struct Espcn {
    conv1: Conv2d,
    conv2: Conv2d,
    conv3: Conv2d,
    upscale_factor: usize,
}

impl Espcn {
    pub fn load(vb: VarBuilder, config: &EspcnConfig) -> candle_core::Result<Self> {
        let r = config.upscale_factor;
        let conv1 = candle_nn::conv2d(
            config.num_channels,
            config.feature_channels,
            5,
            Conv2dConfig {
                padding: 2,
                ..Default::default()
            },
            vb.pp("conv1"),
        )?;
        let conv2 = candle_nn::conv2d(
            config.feature_channels,
            config.hidden_channels,
            3,
            Conv2dConfig {
                padding: 1,
                ..Default::default()
            },
            vb.pp("conv2"),
        )?;
        let conv3 = candle_nn::conv2d(
            config.hidden_channels,
            config.num_channels * r * r,
            3,
            Conv2dConfig {
                padding: 1,
                ..Default::default()
            },
            vb.pp("conv3"),
        )?;
        Ok(Self {
            conv1,
            conv2,
            conv3,
            upscale_factor: r,
        })
    }
}

impl Module for Espcn {
    fn forward(&self, xs: &CanTensor) -> candle_core::Result<CanTensor> {
        let xs = self.conv1.forward(xs)?.tanh()?;
        let xs = self.conv2.forward(&xs)?.tanh()?;
        let xs = self.conv3.forward(&xs)?;
        pixel_shuffle(&xs, self.upscale_factor)
    }
}

/// Rearrange `[B, C * r * r, H, W]` into `[B, C, H * r, W * r]`.
///
/// Output pixel `(h * r + i, w * r + j)` of channel `c` comes from input
/// channel `c * r * r + i * r + j` at `(h, w)`.
pub fn pixel_shuffle(xs: &CanTensor, r: usize) -> candle_core::Result<CanTensor> {
    candle_nn::ops::pixel_shuffle(xs, r)
}

/// [`Upscaler`] running [`Espcn`] on a candle device.
pub struct EspcnUpscaler {
    model: Espcn,
    config: EspcnConfig,
    device: candle_core::Device,
}

impl EspcnUpscaler {
    /// Load safetensors weights from a file or from memory.
    pub fn new(
        weights: ModelSource,
        config: EspcnConfig,
        device: &Device,
    ) -> Result<Self, InferError> {
        let candle_device = device.to_candle()?;
        let vb = match weights {
            ModelSource::File(path) => {
                if !path.exists() {
                    return Err(InferError::ModelLoad(format!(
                        "weights not found: {}",
                        path.display()
                    )));
                }
                unsafe {
                    VarBuilder::from_mmaped_safetensors(&[path], DType::F32, &candle_device)?
                }
            }
            ModelSource::Memory(bytes) => {
                VarBuilder::from_buffered_safetensors(bytes, DType::F32, &candle_device)?
            }
        };
        let upscaler = Self::from_var_builder(vb, config, candle_device)?;
        log::info!(
            "espcn model loaded on {device}: x{} upscale",
            upscaler.config.upscale_factor
        );
        Ok(upscaler)
    }

    /// Build from an existing var builder (used for tests and custom weight stores).
    pub fn from_var_builder(
        vb: VarBuilder,
        config: EspcnConfig,
        device: candle_core::Device,
    ) -> Result<Self, InferError> {
        let model = Espcn::load(vb, &config)
            .map_err(|e| InferError::ModelLoad(format!("failed to build espcn: {e}")))?;
        Ok(Self {
            model,
            config,
            device,
        })
    }

    pub fn config(&self) -> &EspcnConfig {
        &self.config
    }
}

impl Upscaler for EspcnUpscaler {
    fn name(&self) -> &str {
        "espcn"
    }

    fn infer(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        let (h, w) = check_luminance_shape(input)?;
        if self.config.num_channels != 1 {
            return Err(InferError::Shape(format!(
                "model expects {} channels, luminance input has 1",
                self.config.num_channels
            )));
        }

        let xs = CanTensor::from_vec(input.data.clone(), (1, 1, h, w), &self.device)?;
        let ys = self.model.forward(&xs)?;
        let (n, c, oh, ow) = ys.dims4()?;
        let data = ys.flatten_all()?.to_vec1::<f32>()?;
        Ok(Tensor::new(vec![n, c, oh, ow], data)?)
    }
}
