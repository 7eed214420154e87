mod model_report;
mod tensor_attr;
mod tflite_inspector;
mod onnx_inspector;
pub mod onnx;
pub mod tflite_schema;

use anyhow::Context;

use crate::common::PrepConfig;

pub use model_report::*;
pub use tensor_attr::*;
pub use tflite_inspector::read_tflite_report;
pub use onnx_inspector::{commit_session, load_onnx, read_onnx_report};

/// Loads the model named by `config.model_path` and describes its inputs and outputs.
pub fn inspect_model(config: &PrepConfig) -> anyhow::Result<ModelReport> {
    let model_path = &config.model_path;
    let data = std::fs::read(model_path)
        .with_context(|| format!("Failed to read model {}", model_path.display()))?;

    let format = ModelFormat::detect(model_path, &data);
    log::debug!("Reading {} as {}", model_path.display(), format.name());

    let report = match format {
        ModelFormat::TfLite => read_tflite_report(&data)?,
        ModelFormat::Onnx => {
            let report = read_onnx_report(&data)?;
            match &config.ort_lib_path {
                Some(ort_lib_path) => commit_session(model_path, ort_lib_path)?,
                None => log::info!("OnnxRuntime lib path not set, skipping session allocation"),
            }
            report
        }
    };

    for i in 0..report.inputs_attrs.len() {
        if let Some(x) = report.inputs_attrs.describe(i) {
            log::info!("Input {}: {}", i, x);
        }
    }
    for i in 0..report.outputs_attrs.len() {
        if let Some(x) = report.outputs_attrs.describe(i) {
            log::info!("Output {}: {}", i, x);
        }
    }

    Ok(report)
}
