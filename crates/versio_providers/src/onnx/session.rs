//! ONNX Runtime session wrapper.

use ort::execution_providers::{
    CUDAExecutionProvider, CoreMLExecutionProvider, ExecutionProvider,
};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use parking_lot::Mutex;
use std::path::Path;
use versio_engines::{Device, EngineError, LoadError};

/// An input tensor, row-major.
pub(crate) enum Input {
    /// 64-bit integer ids or masks.
    I64(Vec<usize>, Vec<i64>),
    /// 32-bit floats.
    F32(Vec<usize>, Vec<f32>),
}

/// An output tensor copied out of the session.
pub(crate) struct Output {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// A session shared between requests.
///
/// Running a session needs exclusive access, so calls are serialized by a
/// mutex.
pub(crate) struct OnnxSession {
    name: String,
    session: Mutex<Session>,
}

impl OnnxSession {
    /// Loads `path`, placing it on `device` when that device is usable.
    pub fn load(path: &Path, device: Device) -> Result<Self, LoadError> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("model")
            .to_string();

        let mut builder = Session::builder()
            .map_err(|err| LoadError::model(format!("{name}: {err}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|err| LoadError::model(format!("{name}: {err}")))?;

        builder = match device {
            Device::Cuda => builder
                .with_execution_providers([CUDAExecutionProvider::default().build()])
                .map_err(|err| LoadError::model(format!("{name}: {err}")))?,
            Device::Metal => builder
                .with_execution_providers([CoreMLExecutionProvider::default().build()])
                .map_err(|err| LoadError::model(format!("{name}: {err}")))?,
            Device::Cpu => builder,
        };

        let session = builder
            .commit_from_file(path)
            .map_err(|err| LoadError::model(format!("{}: {err}", path.display())))?;

        tracing::debug!(model = %name, %device, "onnx session ready");
        Ok(Self {
            name,
            session: Mutex::new(session),
        })
    }

    /// Runs the session and copies out the named `f32` output.
    pub fn run(&self, inputs: Vec<(&'static str, Input)>, output: &str) -> Result<Output, EngineError> {
        let mut values = Vec::with_capacity(inputs.len());
        for (name, input) in inputs {
            let value = match input {
                Input::I64(shape, data) => Tensor::from_array((shape, data.into_boxed_slice()))
                    .map(|tensor| tensor.into_dyn()),
                Input::F32(shape, data) => Tensor::from_array((shape, data.into_boxed_slice()))
                    .map(|tensor| tensor.into_dyn()),
            }
            .map_err(|err| EngineError::inference(format!("{}: input {name}: {err}", self.name)))?;
            values.push((name, value));
        }

        let mut session = self.session.lock();
        let outputs = session
            .run(values)
            .map_err(|err| EngineError::inference(format!("{}: {err}", self.name)))?;

        let value = outputs
            .get(output)
            .ok_or_else(|| EngineError::inference(format!("{}: no output {output}", self.name)))?;
        let (shape, data) = value
            .try_extract_tensor::<f32>()
            .map_err(|err| EngineError::inference(format!("{}: output {output}: {err}", self.name)))?;

        Ok(Output {
            shape: shape
                .iter()
                .map(|&dim| usize::try_from(dim).unwrap_or_default())
                .collect(),
            data: data.to_vec(),
        })
    }
}

/// Probes the execution providers in order of preference.
pub(crate) fn detect_device() -> Device {
    if CUDAExecutionProvider::default().is_available().unwrap_or(false) {
        Device::Cuda
    } else if cfg!(target_os = "macos")
        && CoreMLExecutionProvider::default()
            .is_available()
            .unwrap_or(false)
    {
        Device::Metal
    } else {
        Device::Cpu
    }
}
