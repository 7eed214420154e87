use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Result};
use ort::session::Session;
use prost::Message;

use crate::data::CROSS_MARK;
use crate::inspectors::onnx;
use crate::inspectors::{ModelFormat, ModelReport, QuantParams, TensorAttr, TensorDataType};
use crate::utils::{element_count, human_bytes, make_divisible};

pub fn load_onnx(data: &[u8]) -> Result<onnx::ModelProto> {
    onnx::ModelProto::decode(data)
        .map_err(|e| anyhow::anyhow!("Failed to decode ONNX model: {}", e))
}

/// Reads graph inputs, outputs and output quantization from an encoded ONNX model.
pub fn read_onnx_report(data: &[u8]) -> Result<ModelReport> {
    let model_proto = load_onnx(data)?;

    let graph = match &model_proto.graph {
        Some(graph) => graph,
        None => bail!("No graph found in this proto. Failed to parse ONNX model."),
    };

    // model params & mems
    let byte_alignment = 16;
    let mut params: usize = 0;
    let mut wbmems: usize = 0;
    let mut initializer_names: HashSet<&str> = HashSet::new();
    for tensor_proto in graph.initializer.iter() {
        initializer_names.insert(&tensor_proto.name);
        let dims: Vec<usize> = tensor_proto.dims.iter().map(|x| (*x).max(0) as usize).collect();
        let n = TensorDataType::from_onnx(tensor_proto.data_type).map_or(1, |x| x.nbytes());
        let sizes = element_count(&dims).and_then(|param| {
            let wbmem = make_divisible(param, byte_alignment)?.checked_mul(n)?;
            Some((params.checked_add(param)?, wbmems.checked_add(wbmem)?))
        });
        (params, wbmems) = match sizes {
            Some(x) => x,
            None => bail!("Initializer '{}' with dims {:?} is too large to allocate", tensor_proto.name, tensor_proto.dims),
        };
    }

    let inputs_attrs = io_from_onnx_value_info(&initializer_names, &graph.input)?;
    let mut outputs_attrs = io_from_onnx_value_info(&initializer_names, &graph.output)?;
    if inputs_attrs.is_empty() {
        bail!("Graph declares no inputs.");
    }
    if outputs_attrs.is_empty() {
        bail!("Graph declares no outputs.");
    }

    for (i, name) in outputs_attrs.names.iter().enumerate() {
        outputs_attrs.quants[i] = output_quantization(graph, name)?;
    }

    let opset = model_proto.opset_import.first().map_or(0, |x| x.version);
    log::info!(
        "Backend: ONNX | Opset: {} | Producer: {} {} | Params: {} | Weights: {}",
        opset,
        model_proto.producer_name,
        model_proto.producer_version,
        params,
        human_bytes(wbmems as f64),
    );

    Ok(ModelReport {
        format: ModelFormat::Onnx,
        inputs_attrs,
        outputs_attrs,
        params,
        arena_bytes: 0,
    })
}

/// Commits an ONNX Runtime session from the model file so a model that cannot be allocated
/// is caught before it reaches the camera.
pub fn commit_session<P: AsRef<Path>>(model_path: P, ort_lib_path: &str) -> Result<()> {
    // the dynamic loader panics on a missing library instead of returning an error
    if !Path::new(ort_lib_path).is_file() {
        bail!("{CROSS_MARK} OnnxRuntime lib not found at {}", ort_lib_path);
    }
    let ort_init = ort::init_from(ort_lib_path);
    match ort_init.commit() {
        Ok(_) => {},
        Err(e) => {
            return Err(anyhow::anyhow!("{CROSS_MARK} Failed to commit ORT: {:?}", e));
        }
    };

    let session = Session::builder()?
        .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
        .commit_from_file(model_path.as_ref())?;

    log::info!(
        "ONNX Runtime session allocated | Inputs: {} | Outputs: {}",
        session.inputs.len(),
        session.outputs.len(),
    );
    Ok(())
}

fn io_from_onnx_value_info(
    initializer_names: &HashSet<&str>,
    value_info: &[onnx::ValueInfoProto],
) -> Result<TensorAttr> {
    let mut attrs = TensorAttr::default();
    for v in value_info.iter() {
        if initializer_names.contains(v.name.as_str()) {
            continue;
        }
        let tensor = match v.r#type.as_ref().and_then(|x| x.value.as_ref()) {
            Some(onnx::type_proto::Value::TensorType(tensor)) => tensor,
            None => {
                log::warn!("Skipping {}: not a tensor value", v.name);
                continue;
            }
        };
        let dtype = TensorDataType::from_onnx(tensor.elem_type);

        let mut shape_: Vec<usize> = Vec::new();
        if let Some(shapes) = &tensor.shape {
            for shape in shapes.dim.iter() {
                match &shape.value {
                    Some(onnx::tensor_shape_proto::dimension::Value::DimValue(x)) => {
                        shape_.push((*x).max(0) as usize);
                    }
                    Some(onnx::tensor_shape_proto::dimension::Value::DimParam(_)) | None => {
                        shape_.push(0);
                    }
                }
            }
        }
        attrs.push(&v.name, dtype, shape_, QuantParams::default());
    }
    Ok(attrs)
}

/// Quantization of a graph output, taken from the `QuantizeLinear` or `DequantizeLinear`
/// node producing it. Any other producer means the output is not quantized.
fn output_quantization(graph: &onnx::GraphProto, output_name: &str) -> Result<QuantParams> {
    let producer = graph.node.iter()
        .find(|node| node.output.iter().any(|x| x == output_name));
    let node = match producer {
        Some(node) if node.op_type == "QuantizeLinear" || node.op_type == "DequantizeLinear" => node,
        _ => return Ok(QuantParams::default()),
    };

    let scale_name = match node.input.get(1) {
        Some(name) => name,
        None => bail!("{} node '{}' has no scale input", node.op_type, node.name),
    };
    let scale = match find_initializer(graph, scale_name) {
        Some(tensor) => first_f32(tensor)?,
        None => bail!("Scale '{}' of output '{}' is not a constant initializer", scale_name, output_name),
    };

    // zero point is optional and defaults to 0
    let zero_point = match node.input.get(2).filter(|x| !x.is_empty()) {
        Some(zp_name) => match find_initializer(graph, zp_name) {
            Some(tensor) => first_i64(tensor)?,
            None => bail!("Zero point '{}' of output '{}' is not a constant initializer", zp_name, output_name),
        },
        None => 0,
    };

    Ok(QuantParams::new(scale, zero_point))
}

fn find_initializer<'a>(graph: &'a onnx::GraphProto, name: &str) -> Option<&'a onnx::TensorProto> {
    graph.initializer.iter().find(|x| x.name == name)
}

fn first_f32(tensor: &onnx::TensorProto) -> Result<f32> {
    if TensorDataType::from_onnx(tensor.data_type) != Some(TensorDataType::Float32) {
        bail!("Expected a float32 scale in '{}', got data type {}", tensor.name, tensor.data_type);
    }
    if let Some(x) = tensor.float_data.first() {
        return Ok(*x);
    }
    match tensor.raw_data.get(0..4) {
        Some(bytes) => Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        None => bail!("Initializer '{}' holds no data", tensor.name),
    }
}

fn first_i64(tensor: &onnx::TensorProto) -> Result<i64> {
    let dtype = TensorDataType::from_onnx(tensor.data_type);
    // narrow integer types are stored widened in int32_data
    let x = match dtype {
        Some(TensorDataType::Int64) => tensor.int64_data.first().copied()
            .or_else(|| tensor.raw_data.get(0..8).map(|b| i64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))),
        Some(TensorDataType::Int32) => tensor.int32_data.first().map(|x| *x as i64)
            .or_else(|| tensor.raw_data.get(0..4).map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]) as i64)),
        Some(TensorDataType::Uint16) => tensor.int32_data.first().map(|x| *x as i64)
            .or_else(|| tensor.raw_data.get(0..2).map(|b| u16::from_le_bytes([b[0], b[1]]) as i64)),
        Some(TensorDataType::Int16) => tensor.int32_data.first().map(|x| *x as i64)
            .or_else(|| tensor.raw_data.get(0..2).map(|b| i16::from_le_bytes([b[0], b[1]]) as i64)),
        Some(TensorDataType::Uint8) => tensor.int32_data.first().map(|x| *x as i64)
            .or_else(|| tensor.raw_data.first().map(|b| *b as i64)),
        Some(TensorDataType::Int8) => tensor.int32_data.first().map(|x| *x as i64)
            .or_else(|| tensor.raw_data.first().map(|b| *b as i8 as i64)),
        _ => bail!("Unsupported zero point data type {} in '{}'", tensor.data_type, tensor.name),
    };
    match x {
        Some(x) => Ok(x),
        None => bail!("Initializer '{}' holds no data", tensor.name),
    }
}
