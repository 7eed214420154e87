#![allow(dead_code)]

use std::fs;
use std::path::Path;

use flatbuffers::{FlatBufferBuilder, WIPOffset};
use prost::Message;

use detectx_prep::common::PrepConfig;
use detectx_prep::inspectors::onnx;
use detectx_prep::inspectors::tflite_schema::{Buffer, Model, QuantizationParameters, SubGraph, Tensor};

pub const TFLITE_UINT8: i8 = 3;
pub const TFLITE_FLOAT32: i8 = 0;
pub const ONNX_FLOAT: i32 = 1;
pub const ONNX_UINT8: i32 = 2;

pub struct TfliteTensor<'a> {
    pub name: &'a str,
    pub shape: &'a [i32],
    pub type_: i8,
    pub buffer: u32,
    pub quant: Option<(f32, i64)>,
}

/// Serializes a single subgraph TFLite model. Buffers listed in `constant_buffers` carry
/// 16 bytes of data, the others are empty.
pub fn build_tflite(
    tensors: &[TfliteTensor],
    inputs: &[i32],
    outputs: &[i32],
    n_buffers: usize,
    constant_buffers: &[usize],
) -> Vec<u8> {
    let mut fbb = FlatBufferBuilder::new();

    let mut buffers: Vec<WIPOffset<Buffer>> = Vec::new();
    for i in 0..n_buffers {
        let data = if constant_buffers.contains(&i) {
            Some(fbb.create_vector(&[7u8; 16]))
        } else {
            None
        };
        let start = fbb.start_table();
        if let Some(data) = data {
            fbb.push_slot_always(Buffer::VT_DATA, data);
        }
        let o = fbb.end_table(start);
        buffers.push(WIPOffset::new(o.value()));
    }

    let mut tensor_offsets: Vec<WIPOffset<Tensor>> = Vec::new();
    for t in tensors {
        let shape = fbb.create_vector(t.shape);
        let name = fbb.create_string(t.name);
        let quant = t.quant.map(|(scale, zero_point)| {
            let scale = fbb.create_vector(&[scale]);
            let zero_point = fbb.create_vector(&[zero_point]);
            let start = fbb.start_table();
            fbb.push_slot_always(QuantizationParameters::VT_SCALE, scale);
            fbb.push_slot_always(QuantizationParameters::VT_ZERO_POINT, zero_point);
            let o = fbb.end_table(start);
            WIPOffset::<QuantizationParameters>::new(o.value())
        });

        let start = fbb.start_table();
        fbb.push_slot_always(Tensor::VT_SHAPE, shape);
        fbb.push_slot::<i8>(Tensor::VT_TYPE_, t.type_, 0);
        fbb.push_slot::<u32>(Tensor::VT_BUFFER, t.buffer, 0);
        fbb.push_slot_always(Tensor::VT_NAME, name);
        if let Some(quant) = quant {
            fbb.push_slot_always(Tensor::VT_QUANTIZATION, quant);
        }
        let o = fbb.end_table(start);
        tensor_offsets.push(WIPOffset::new(o.value()));
    }

    let tensors_vec = fbb.create_vector(&tensor_offsets);
    let inputs_vec = fbb.create_vector(inputs);
    let outputs_vec = fbb.create_vector(outputs);
    let graph_name = fbb.create_string("main");
    let start = fbb.start_table();
    fbb.push_slot_always(SubGraph::VT_TENSORS, tensors_vec);
    fbb.push_slot_always(SubGraph::VT_INPUTS, inputs_vec);
    fbb.push_slot_always(SubGraph::VT_OUTPUTS, outputs_vec);
    fbb.push_slot_always(SubGraph::VT_NAME, graph_name);
    let o = fbb.end_table(start);
    let graph: WIPOffset<SubGraph> = WIPOffset::new(o.value());

    let subgraphs = fbb.create_vector(&[graph]);
    let buffers_vec = fbb.create_vector(&buffers);
    let description = fbb.create_string("test fixture");
    let start = fbb.start_table();
    fbb.push_slot::<u32>(Model::VT_VERSION, 3, 0);
    fbb.push_slot_always(Model::VT_SUBGRAPHS, subgraphs);
    fbb.push_slot_always(Model::VT_DESCRIPTION, description);
    fbb.push_slot_always(Model::VT_BUFFERS, buffers_vec);
    let o = fbb.end_table(start);
    let model: WIPOffset<Model> = WIPOffset::new(o.value());

    fbb.finish(model, Some("TFL3"));
    fbb.finished_data().to_vec()
}

/// Quantized YOLOv5 style detector: uint8 NHWC input, `[1, boxes, 5 + classes]` output.
pub fn yolo_tflite(image_size: i32, boxes: i32, classes: i32, scale: f32, zero_point: i64) -> Vec<u8> {
    let input_shape = [1, image_size, image_size, 3];
    let output_shape = [1, boxes, 5 + classes];
    let weight_shape = [16];
    build_tflite(
        &[
            TfliteTensor { name: "images", shape: &input_shape, type_: TFLITE_UINT8, buffer: 1, quant: Some((0.003921569, 0)) },
            TfliteTensor { name: "conv_weights", shape: &weight_shape, type_: TFLITE_UINT8, buffer: 2, quant: None },
            TfliteTensor { name: "output", shape: &output_shape, type_: TFLITE_UINT8, buffer: 3, quant: Some((scale, zero_point)) },
        ],
        &[0],
        &[2],
        4,
        &[2],
    )
}

fn value_info(name: &str, elem_type: i32, dims: &[Option<i64>]) -> onnx::ValueInfoProto {
    let dim = dims.iter()
        .map(|d| onnx::tensor_shape_proto::Dimension {
            value: Some(match d {
                Some(x) => onnx::tensor_shape_proto::dimension::Value::DimValue(*x),
                None => onnx::tensor_shape_proto::dimension::Value::DimParam("batch".to_string()),
            }),
        })
        .collect();
    onnx::ValueInfoProto {
        name: name.to_string(),
        r#type: Some(onnx::TypeProto {
            value: Some(onnx::type_proto::Value::TensorType(onnx::type_proto::Tensor {
                elem_type,
                shape: Some(onnx::TensorShapeProto { dim }),
            })),
        }),
    }
}

/// QDQ YOLOv5 style detector whose output is produced by a `QuantizeLinear` node.
/// The batch dimension of the input is symbolic.
pub fn yolo_onnx(image_size: i64, boxes: i64, classes: i64, scale: f32, zero_point: u8) -> Vec<u8> {
    let graph = onnx::GraphProto {
        name: "yolo".to_string(),
        node: vec![
            onnx::NodeProto {
                input: vec!["images".to_string(), "weights".to_string()],
                output: vec!["head".to_string()],
                name: "conv".to_string(),
                op_type: "Conv".to_string(),
                ..Default::default()
            },
            onnx::NodeProto {
                input: vec!["head".to_string(), "output_scale".to_string(), "output_zero_point".to_string()],
                output: vec!["output".to_string()],
                name: "quantize_output".to_string(),
                op_type: "QuantizeLinear".to_string(),
                ..Default::default()
            },
        ],
        initializer: vec![
            onnx::TensorProto {
                name: "weights".to_string(),
                dims: vec![16, 3, 3, 3],
                data_type: ONNX_FLOAT,
                ..Default::default()
            },
            onnx::TensorProto {
                name: "output_scale".to_string(),
                data_type: ONNX_FLOAT,
                float_data: vec![scale],
                ..Default::default()
            },
            onnx::TensorProto {
                name: "output_zero_point".to_string(),
                data_type: ONNX_UINT8,
                raw_data: vec![zero_point],
                ..Default::default()
            },
        ],
        input: vec![
            value_info("images", ONNX_FLOAT, &[None, Some(3), Some(image_size), Some(image_size)]),
            // initializers listed as inputs are not graph inputs
            value_info("weights", ONNX_FLOAT, &[Some(16), Some(3), Some(3), Some(3)]),
        ],
        output: vec![value_info("output", ONNX_UINT8, &[Some(1), Some(boxes), Some(5 + classes)])],
    };
    onnx::ModelProto {
        ir_version: 8,
        producer_name: "pytorch".to_string(),
        producer_version: "2.1.0".to_string(),
        graph: Some(graph),
        opset_import: vec![onnx::OperatorSetIdProto { domain: String::new(), version: 13 }],
        ..Default::default()
    }
    .encode_to_vec()
}

pub fn write_labels(config: &PrepConfig, labels: &str) {
    if let Some(parent) = config.labels_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&config.labels_path, labels).unwrap();
}

pub fn write_model(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, data).unwrap();
}

pub fn numbered_labels(n: usize) -> String {
    (0..n).map(|i| format!("class_{}\n", i)).collect()
}
