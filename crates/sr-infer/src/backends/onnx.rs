use crate::upscaler::check_luminance_shape;
use crate::{Device, InferError, ModelSource, Upscaler};
use ndarray::ArrayD;
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use sr_base::Tensor;
use std::sync::OnceLock;

static ORT_INIT: OnceLock<()> = OnceLock::new();

fn ensure_ort_init() {
    ORT_INIT.get_or_init(|| {
        let _ = ort::init().commit();
    });
}

/// Output name picked when the caller does not configure one.
pub const DEFAULT_OUTPUT_NAME: &str = "output";

/// Super-resolution model served by ONNX Runtime.
pub struct OnnxUpscaler {
    session: OrtSession,
    input_name: String,
    output_name: String,
}

impl OnnxUpscaler {
    /// Load a model. The input defaults to the model's first input, the output
    /// to `"output"` when the model has one and to its first output otherwise.
    pub fn new(model: ModelSource, device: &Device) -> Result<Self, InferError> {
        ensure_ort_init();
        let builder = OrtSession::builder()
            .map_err(|e| InferError::Onnx(format!("failed to create session builder: {e}")))?;

        let builder = match device {
            Device::Cpu => builder,
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
                builder
                    .with_execution_providers([
                        CUDAExecutionProvider::default()
                            .with_device_id(*device_id as i32)
                            .build(),
                        CPUExecutionProvider::default().build(),
                    ])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(&path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load {}: {e}", path.display()))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {e}"))
            })?,
        };

        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let input_name = input_names
            .first()
            .cloned()
            .ok_or_else(|| InferError::ModelLoad("model has no inputs".to_string()))?;
        let output_name = pick_output_name(&output_names)
            .ok_or_else(|| InferError::ModelLoad("model has no outputs".to_string()))?;

        log::info!(
            "onnx model loaded on {device}: input '{input_name}', output '{output_name}'"
        );

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }

    /// Override the input the luminance tensor is fed to.
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = name.into();
        self
    }

    /// Override the output read back as the result.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl Upscaler for OnnxUpscaler {
    fn name(&self) -> &str {
        "onnx"
    }

    fn infer(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        check_luminance_shape(input)?;
        if !self.session.outputs.iter().any(|o| o.name == self.output_name) {
            return Err(InferError::Onnx(format!(
                "model has no output '{}'",
                self.output_name
            )));
        }
        let array = tensor_to_ndarray(input.clone())?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Onnx(format!("failed to create tensor ref: {e}")))?;

        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => tensor_ref])
            .map_err(|e| InferError::Onnx(format!("inference failed: {e}")))?;

        let array = outputs[self.output_name.as_str()].try_extract_array::<f32>().map_err(|e| {
            InferError::Onnx(format!("output '{}' is not f32: {e}", self.output_name))
        })?;
        ndarray_to_tensor(array)
    }
}

/// `"output"` if the model has it, else the first output.
pub fn pick_output_name(names: &[String]) -> Option<String> {
    names
        .iter()
        .find(|name| name.as_str() == DEFAULT_OUTPUT_NAME)
        .or_else(|| names.first())
        .cloned()
}

pub fn tensor_to_ndarray(tensor: Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape, tensor.data)
        .map_err(|e| InferError::Shape(format!("failed to create ndarray from tensor: {e}")))
}

pub fn ndarray_to_tensor(
    array: ndarray::ArrayView<'_, f32, ndarray::IxDyn>,
) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
