use crate::{Backend, Device, InferError, ModelSource, Session};
use log::{debug, info};
use ndarray::ArrayD;
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use pose_base::Tensor;
use std::collections::HashMap;

/// ONNX Runtime backend bound to one device.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        let device = &self.device;
        let mut builder = OrtSession::builder().map_err(|e| {
            InferError::Backend(format!("failed to create session builder: {}", e))
        })?;

        builder = match device {
            Device::Cpu => {
                info!("onnx: using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                let available = ep.is_available().unwrap_or(false);
                info!(
                    "onnx: CUDA EP requested (device_id={}), available: {}",
                    device_id, available
                );
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
            #[cfg(feature = "tensorrt")]
            Device::TensorRt { device_id, fp16 } => {
                use ort::execution_providers::{ExecutionProvider, TensorRTExecutionProvider};
                let ep = TensorRTExecutionProvider::default()
                    .with_device_id(*device_id)
                    .with_fp16(*fp16);
                let available = ep.is_available().unwrap_or(false);
                info!(
                    "onnx: TensorRT EP requested (device_id={}, fp16={}), available: {}",
                    device_id, fp16, available
                );
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "tensorrt"))]
            Device::TensorRt { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(&path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from {}: {}", path.display(), e))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {}", e))
            })?,
        };

        let input_names: Vec<String> = session.inputs().iter().map(|i| i.name().to_string()).collect();
        let output_names: Vec<String> = session.outputs().iter().map(|o| o.name().to_string()).collect();
        debug!("onnx: inputs {:?}, outputs {:?}", input_names, output_names);

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        // pose models take a single image tensor
        let [(name, tensor)] = inputs else {
            return Err(InferError::Backend(format!(
                "expected exactly one input, got {}",
                inputs.len()
            )));
        };
        if !self.input_names.iter().any(|n| n.as_str() == *name) {
            return Err(InferError::InvalidInput {
                name: name.to_string(),
                expected_names: self.input_names.clone(),
            });
        }

        let array = tensor_to_ndarray(tensor.clone())?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Backend(format!("failed to create tensor ref: {}", e)))?;
        let outputs = self
            .session
            .run(inputs![*name => tensor_ref])
            .map_err(|e| InferError::Backend(format!("inference failed: {}", e)))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let array = outputs[output_name.as_str()]
                .try_extract_array::<f32>()
                .map_err(|e| {
                    InferError::UnsupportedDtype(format!(
                        "output '{}' is not f32: {}",
                        output_name, e
                    ))
                })?;
            result.insert(output_name.clone(), ndarray_to_tensor(array)?);
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

pub fn tensor_to_ndarray(tensor: Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape, tensor.data)
        .map_err(|e| InferError::Backend(format!("failed to create ndarray from tensor: {}", e)))
}

pub fn ndarray_to_tensor(
    array: ndarray::ArrayView<'_, f32, ndarray::IxDyn>,
) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
