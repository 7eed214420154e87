use anyhow::{bail, Context, Result};

use crate::inspectors::model_report::has_tflite_identifier;
use crate::inspectors::tflite_schema::{root_as_model, Buffer, SubGraph, Tensor, TFLITE_FILE_IDENTIFIER};
use crate::inspectors::{ModelFormat, ModelReport, QuantParams, TensorAttr, TensorDataType};
use crate::utils::{element_count, human_bytes};

/// Reads the first subgraph of a TFLite flatbuffer and lays out its tensors.
pub fn read_tflite_report(data: &[u8]) -> Result<ModelReport> {
    if !has_tflite_identifier(data) {
        bail!("Missing the {} file identifier. Not a TFLite model.", TFLITE_FILE_IDENTIFIER);
    }
    let model = root_as_model(data).context("Failed to verify TFLite flatbuffer")?;

    let subgraphs = match model.subgraphs() {
        Some(subgraphs) if !subgraphs.is_empty() => subgraphs,
        _ => bail!("No subgraph found in this model. Failed to parse TFLite model."),
    };
    if subgraphs.len() > 1 {
        log::debug!("Model has {} subgraphs, only the first one is inspected", subgraphs.len());
    }
    let graph = subgraphs.get(0);

    let (params, arena_bytes) = allocate_tensors(&graph, model.buffers())?;

    let inputs_attrs = io_from_tensor_indices(&graph, graph.inputs(), "input")?;
    let outputs_attrs = io_from_tensor_indices(&graph, graph.outputs(), "output")?;

    log::info!(
        "Backend: TFLite | Schema: {} | Subgraph: {} | Params: {} | Arena: {}",
        model.version(),
        graph.name().unwrap_or("main"),
        params,
        human_bytes(arena_bytes as f64),
    );
    if let Some(description) = model.description() {
        log::debug!("Model description: {}", description);
    }

    Ok(ModelReport {
        format: ModelFormat::TfLite,
        inputs_attrs,
        outputs_attrs,
        params,
        arena_bytes,
    })
}

/// Walks every tensor of the graph and maps it onto the model buffers.
///
/// Tensors backed by buffer data count as parameters, the rest need space in the activation
/// arena. A tensor pointing past the buffer table cannot be allocated.
fn allocate_tensors(
    graph: &SubGraph<'_>,
    buffers: Option<flatbuffers::Vector<'_, flatbuffers::ForwardsUOffset<Buffer<'_>>>>,
) -> Result<(usize, usize)> {
    let tensors = match graph.tensors() {
        Some(tensors) => tensors,
        None => bail!("Subgraph has no tensors."),
    };
    let n_buffers = buffers.as_ref().map_or(0, |x| x.len());

    let mut params: usize = 0;
    let mut arena_bytes: usize = 0;
    for (i, tensor) in tensors.iter().enumerate() {
        let buffer_idx = tensor.buffer() as usize;
        if buffer_idx >= n_buffers {
            bail!(
                "Tensor {} ({}) references buffer {} but the model has {} buffers",
                i, tensor.name().unwrap_or(""), buffer_idx, n_buffers,
            );
        }
        let dims = tensor_dims(&tensor);
        let elements = match element_count(&dims) {
            Some(elements) => elements,
            None => bail!("Tensor {} ({}) with shape {:?} is too large to allocate", i, tensor.name().unwrap_or(""), dims),
        };
        let is_constant = match &buffers {
            Some(buffers) => !buffers.get(buffer_idx).is_empty(),
            None => false,
        };
        if is_constant {
            params = match params.checked_add(elements) {
                Some(x) => x,
                None => bail!("Parameter count overflows at tensor {} ({})", i, tensor.name().unwrap_or("")),
            };
        } else {
            let nbytes = TensorDataType::from_tflite(tensor.type_()).map_or(1, |x| x.nbytes());
            arena_bytes = match elements.checked_mul(nbytes).and_then(|x| arena_bytes.checked_add(x)) {
                Some(x) => x,
                None => bail!("Arena size overflows at tensor {} ({})", i, tensor.name().unwrap_or("")),
            };
        }
    }
    Ok((params, arena_bytes))
}

fn io_from_tensor_indices(
    graph: &SubGraph<'_>,
    indices: Option<flatbuffers::Vector<'_, i32>>,
    kind: &str,
) -> Result<TensorAttr> {
    let indices = match indices {
        Some(indices) if !indices.is_empty() => indices,
        _ => bail!("Subgraph declares no {} tensors.", kind),
    };
    let tensors = match graph.tensors() {
        Some(tensors) => tensors,
        None => bail!("Subgraph has no tensors."),
    };

    let mut attrs = TensorAttr::default();
    for idx in indices.iter() {
        if idx < 0 || idx as usize >= tensors.len() {
            bail!("The {} tensor index {} is out of range ({} tensors)", kind, idx, tensors.len());
        }
        let tensor = tensors.get(idx as usize);
        attrs.push(
            tensor.name().unwrap_or(""),
            TensorDataType::from_tflite(tensor.type_()),
            tensor_dims(&tensor),
            tensor_quant(&tensor),
        );
    }
    Ok(attrs)
}

fn tensor_dims(tensor: &Tensor<'_>) -> Vec<usize> {
    match tensor.shape() {
        // -1 only shows up for unknown dims, kept as dynamic
        Some(shape) => shape.iter().map(|x| if x < 0 { 0 } else { x as usize }).collect(),
        None => Vec::new(),
    }
}

/// First scale and zero point of the tensor, `(0.0, 0)` when it carries none.
fn tensor_quant(tensor: &Tensor<'_>) -> QuantParams {
    let quantization = match tensor.quantization() {
        Some(quantization) => quantization,
        None => return QuantParams::default(),
    };
    let scale = match quantization.scale() {
        Some(scale) if !scale.is_empty() => scale.get(0),
        _ => return QuantParams::default(),
    };
    let zero_point = match quantization.zero_point() {
        Some(zero_point) if !zero_point.is_empty() => zero_point.get(0),
        _ => 0,
    };
    QuantParams::new(scale, zero_point)
}
