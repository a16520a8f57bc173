pub mod backends;
pub mod device;
pub mod error;
pub mod espcn;
pub mod inference;
pub mod modelsource;
pub mod upscaler;

pub use backends::OnnxUpscaler;
pub use device::Device;
pub use error::InferError;
pub use espcn::{pixel_shuffle, Espcn, EspcnConfig, EspcnUpscaler};
pub use inference::Inference;
pub use modelsource::ModelSource;
pub use upscaler::Upscaler;
