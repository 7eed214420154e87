use std::path::Path;

use anyhow::bail;

use crate::inspectors::{QuantParams, TensorAttr};

/// Number of values before the class scores in a detection row: x, y, w, h, objectness.
pub const BOX_ATTRS: usize = 5;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModelFormat {
    TfLite,
    Onnx,
}

impl ModelFormat {
    /// Picks the reader from the file extension, falling back to the TFLite file identifier.
    pub fn detect<P: AsRef<Path>>(path: P, head: &[u8]) -> ModelFormat {
        let extension = path.as_ref()
            .extension()
            .and_then(|x| x.to_str())
            .map(|x| x.to_lowercase());
        match extension.as_deref() {
            Some("tflite") => ModelFormat::TfLite,
            Some("onnx") => ModelFormat::Onnx,
            _ if has_tflite_identifier(head) => ModelFormat::TfLite,
            _ => ModelFormat::Onnx,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::TfLite => "TFLite".to_string(),
            Self::Onnx => "ONNX".to_string(),
        }
    }
}

pub(crate) fn has_tflite_identifier(data: &[u8]) -> bool {
    data.get(4..8) == Some(b"TFL3".as_slice())
}

/// What the model file says about its graph inputs and outputs.
#[derive(Debug, Clone)]
pub struct ModelReport {
    pub format: ModelFormat,
    pub inputs_attrs: TensorAttr,
    pub outputs_attrs: TensorAttr,
    /// Elements held in constant tensors.
    pub params: usize,
    /// Bytes needed for the non constant tensors.
    pub arena_bytes: usize,
}

impl ModelReport {
    pub fn in_dimss(&self) -> &Vec<Vec<usize>> {
        &self.inputs_attrs.dimss
    }

    pub fn out_dimss(&self) -> &Vec<Vec<usize>> {
        &self.outputs_attrs.dimss
    }

    /// Height and width of the first input. TFLite lays images out NHWC, ONNX NCHW.
    pub fn input_hw(&self) -> Option<(usize, usize)> {
        let dims = self.in_dimss().first()?;
        if dims.len() != 4 {
            return None;
        }
        match self.format {
            ModelFormat::TfLite => Some((dims[1], dims[2])),
            ModelFormat::Onnx => Some((dims[2], dims[3])),
        }
    }
}

/// Detection geometry derived from output 0, laid out `[batch, boxes, 5 + classes]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelGeometry {
    pub quant: QuantParams,
    pub boxes: usize,
    pub classes: usize,
}

impl ModelGeometry {
    pub fn from_report(report: &ModelReport) -> anyhow::Result<Self> {
        let shape = match report.out_dimss().first() {
            Some(shape) => shape,
            None => bail!("Model has no outputs."),
        };
        if shape.len() < 3 {
            bail!("Expected output 0 to have at least 3 dimensions, got {:?}", shape);
        }

        let boxes = shape[1];
        let row = shape[2];
        if boxes == 0 || row == 0 {
            bail!("Output 0 has a dynamic box or row dimension: {:?}", shape);
        }
        if row < BOX_ATTRS {
            bail!("Output 0 rows hold {} values, fewer than the {} box attributes", row, BOX_ATTRS);
        }

        Ok(Self {
            quant: report.outputs_attrs.quants.first().copied().unwrap_or_default(),
            boxes,
            classes: row - BOX_ATTRS,
        })
    }
}
