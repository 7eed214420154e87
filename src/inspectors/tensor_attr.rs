/// Element types shared by the TFLite and ONNX readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorDataType {
    Float32,
    Float16,
    Float64,
    Bfloat16,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Bool,
    String,
}

impl TensorDataType {
    /// `TensorType` enum values of the TFLite schema.
    pub fn from_tflite(value: i8) -> Option<Self> {
        match value {
            0 => Some(TensorDataType::Float32),
            1 => Some(TensorDataType::Float16),
            2 => Some(TensorDataType::Int32),
            3 => Some(TensorDataType::Uint8),
            4 => Some(TensorDataType::Int64),
            5 => Some(TensorDataType::String),
            6 => Some(TensorDataType::Bool),
            7 => Some(TensorDataType::Int16),
            8 => None, // COMPLEX64
            9 => Some(TensorDataType::Int8),
            10 => Some(TensorDataType::Float64),
            11 => None, // COMPLEX128
            12 => Some(TensorDataType::Uint64),
            13 => None, // RESOURCE
            14 => None, // VARIANT
            15 => Some(TensorDataType::Uint32),
            16 => Some(TensorDataType::Uint16),
            _ => None, // INT4 and newer
        }
    }

    /// `TensorProto.DataType` values of the ONNX schema.
    pub fn from_onnx(value: i32) -> Option<Self> {
        match value {
            0 => None,
            1 => Some(TensorDataType::Float32),
            2 => Some(TensorDataType::Uint8),
            3 => Some(TensorDataType::Int8),
            4 => Some(TensorDataType::Uint16),
            5 => Some(TensorDataType::Int16),
            6 => Some(TensorDataType::Int32),
            7 => Some(TensorDataType::Int64),
            8 => Some(TensorDataType::String),
            9 => Some(TensorDataType::Bool),
            10 => Some(TensorDataType::Float16),
            11 => Some(TensorDataType::Float64),
            12 => Some(TensorDataType::Uint32),
            13 => Some(TensorDataType::Uint64),
            14 => None, // COMPLEX64
            15 => None, // COMPLEX128
            16 => Some(TensorDataType::Bfloat16),
            _ => None,
        }
    }

    pub fn nbytes(&self) -> usize {
        match self {
            TensorDataType::Float64
            | TensorDataType::Uint64
            | TensorDataType::Int64 => 8,
            TensorDataType::Float32
            | TensorDataType::Uint32
            | TensorDataType::Int32
            | TensorDataType::String => 4, // string(1~4)
            TensorDataType::Float16
            | TensorDataType::Bfloat16
            | TensorDataType::Int16
            | TensorDataType::Uint16 => 2,
            TensorDataType::Uint8
            | TensorDataType::Int8
            | TensorDataType::Bool => 1,
        }
    }
}

/// Scale and zero point of a tensor. `(0.0, 0)` means the tensor is not quantized.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuantParams {
    pub scale: f32,
    pub zero_point: i64,
}

impl QuantParams {
    pub fn new(scale: f32, zero_point: i64) -> Self {
        Self { scale, zero_point }
    }

    pub fn is_quantized(&self) -> bool {
        self.scale != 0.0
    }
}

/// Tensor attributes composed of the names, the dtypes, the dimensions and the quantization.
/// A dimension of 0 is dynamic.
#[derive(Debug, Clone, Default)]
pub struct TensorAttr {
    pub names: Vec<String>,
    pub dtypes: Vec<Option<TensorDataType>>,
    pub dimss: Vec<Vec<usize>>,
    pub quants: Vec<QuantParams>,
}

impl TensorAttr {
    pub fn push(&mut self, name: &str, dtype: Option<TensorDataType>, dims: Vec<usize>, quant: QuantParams) {
        self.names.push(name.to_string());
        self.dtypes.push(dtype);
        self.dimss.push(dims);
        self.quants.push(quant);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn describe(&self, i: usize) -> Option<String> {
        let name = self.names.get(i)?;
        let dims = self.dimss.get(i)?;
        let dtype = match self.dtypes.get(i)? {
            Some(dtype) => format!("{:?}", dtype),
            None => "Unknown".to_string(),
        };
        let quant = self.quants.get(i).copied().unwrap_or_default();
        Some(format!("{} {:?} {} (scale={}, zero_point={})", name, dims, dtype, quant.scale, quant.zero_point))
    }
}
