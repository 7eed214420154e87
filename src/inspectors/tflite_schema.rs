//! Read-only accessors for the subset of the TFLite flatbuffer schema (`schema.fbs`) needed to
//! describe a graph: Model, SubGraph, Tensor, QuantizationParameters and Buffer.
//!
//! Vtable offsets are `4 + 2 * field_id` of the schema.

use flatbuffers::{Follow, ForwardsUOffset, InvalidFlatbuffer, Table, VOffsetT, Vector, Verifiable, Verifier};

pub const TFLITE_FILE_IDENTIFIER: &str = "TFL3";

#[derive(Copy, Clone, PartialEq)]
pub struct Model<'a> {
    pub _tab: Table<'a>,
}

impl<'a> Follow<'a> for Model<'a> {
    type Inner = Model<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self { _tab: Table::new(buf, loc) }
    }
}

impl<'a> Model<'a> {
    pub const VT_VERSION: VOffsetT = 4;
    pub const VT_SUBGRAPHS: VOffsetT = 8;
    pub const VT_DESCRIPTION: VOffsetT = 10;
    pub const VT_BUFFERS: VOffsetT = 12;

    // Safety (all accessors): the table comes from a buffer checked by `flatbuffers::root`.
    pub fn version(&self) -> u32 {
        unsafe { self._tab.get::<u32>(Model::VT_VERSION, Some(0)) }.unwrap_or(0)
    }

    pub fn subgraphs(&self) -> Option<Vector<'a, ForwardsUOffset<SubGraph<'a>>>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<SubGraph<'a>>>>>(Model::VT_SUBGRAPHS, None) }
    }

    pub fn description(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Model::VT_DESCRIPTION, None) }
    }

    pub fn buffers(&self) -> Option<Vector<'a, ForwardsUOffset<Buffer<'a>>>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Buffer<'a>>>>>(Model::VT_BUFFERS, None) }
    }
}

impl Verifiable for Model<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<u32>("version", Self::VT_VERSION, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<SubGraph<'_>>>>>("subgraphs", Self::VT_SUBGRAPHS, false)?
            .visit_field::<ForwardsUOffset<&str>>("description", Self::VT_DESCRIPTION, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Buffer<'_>>>>>("buffers", Self::VT_BUFFERS, false)?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct SubGraph<'a> {
    pub _tab: Table<'a>,
}

impl<'a> Follow<'a> for SubGraph<'a> {
    type Inner = SubGraph<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self { _tab: Table::new(buf, loc) }
    }
}

impl<'a> SubGraph<'a> {
    pub const VT_TENSORS: VOffsetT = 4;
    pub const VT_INPUTS: VOffsetT = 6;
    pub const VT_OUTPUTS: VOffsetT = 8;
    pub const VT_NAME: VOffsetT = 12;

    pub fn tensors(&self) -> Option<Vector<'a, ForwardsUOffset<Tensor<'a>>>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<Tensor<'a>>>>>(SubGraph::VT_TENSORS, None) }
    }

    pub fn inputs(&self) -> Option<Vector<'a, i32>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, i32>>>(SubGraph::VT_INPUTS, None) }
    }

    pub fn outputs(&self) -> Option<Vector<'a, i32>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, i32>>>(SubGraph::VT_OUTPUTS, None) }
    }

    pub fn name(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(SubGraph::VT_NAME, None) }
    }
}

impl Verifiable for SubGraph<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<Tensor<'_>>>>>("tensors", Self::VT_TENSORS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i32>>>("inputs", Self::VT_INPUTS, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i32>>>("outputs", Self::VT_OUTPUTS, false)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct Tensor<'a> {
    pub _tab: Table<'a>,
}

impl<'a> Follow<'a> for Tensor<'a> {
    type Inner = Tensor<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self { _tab: Table::new(buf, loc) }
    }
}

impl<'a> Tensor<'a> {
    pub const VT_SHAPE: VOffsetT = 4;
    pub const VT_TYPE_: VOffsetT = 6;
    pub const VT_BUFFER: VOffsetT = 8;
    pub const VT_NAME: VOffsetT = 10;
    pub const VT_QUANTIZATION: VOffsetT = 12;

    pub fn shape(&self) -> Option<Vector<'a, i32>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, i32>>>(Tensor::VT_SHAPE, None) }
    }

    /// Raw `TensorType` value, FLOAT32 (0) when absent.
    pub fn type_(&self) -> i8 {
        unsafe { self._tab.get::<i8>(Tensor::VT_TYPE_, Some(0)) }.unwrap_or(0)
    }

    pub fn buffer(&self) -> u32 {
        unsafe { self._tab.get::<u32>(Tensor::VT_BUFFER, Some(0)) }.unwrap_or(0)
    }

    pub fn name(&self) -> Option<&'a str> {
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(Tensor::VT_NAME, None) }
    }

    pub fn quantization(&self) -> Option<QuantizationParameters<'a>> {
        unsafe { self._tab.get::<ForwardsUOffset<QuantizationParameters<'a>>>(Tensor::VT_QUANTIZATION, None) }
    }
}

impl Verifiable for Tensor<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, i32>>>("shape", Self::VT_SHAPE, false)?
            .visit_field::<i8>("type_", Self::VT_TYPE_, false)?
            .visit_field::<u32>("buffer", Self::VT_BUFFER, false)?
            .visit_field::<ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .visit_field::<ForwardsUOffset<QuantizationParameters<'_>>>("quantization", Self::VT_QUANTIZATION, false)?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct QuantizationParameters<'a> {
    pub _tab: Table<'a>,
}

impl<'a> Follow<'a> for QuantizationParameters<'a> {
    type Inner = QuantizationParameters<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self { _tab: Table::new(buf, loc) }
    }
}

impl<'a> QuantizationParameters<'a> {
    pub const VT_SCALE: VOffsetT = 8;
    pub const VT_ZERO_POINT: VOffsetT = 10;

    pub fn scale(&self) -> Option<Vector<'a, f32>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, f32>>>(QuantizationParameters::VT_SCALE, None) }
    }

    pub fn zero_point(&self) -> Option<Vector<'a, i64>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, i64>>>(QuantizationParameters::VT_ZERO_POINT, None) }
    }
}

impl Verifiable for QuantizationParameters<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, f32>>>("scale", Self::VT_SCALE, false)?
            .visit_field::<ForwardsUOffset<Vector<'_, i64>>>("zero_point", Self::VT_ZERO_POINT, false)?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct Buffer<'a> {
    pub _tab: Table<'a>,
}

impl<'a> Follow<'a> for Buffer<'a> {
    type Inner = Buffer<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self { _tab: Table::new(buf, loc) }
    }
}

impl<'a> Buffer<'a> {
    pub const VT_DATA: VOffsetT = 4;
    pub const VT_OFFSET: VOffsetT = 6;
    pub const VT_SIZE: VOffsetT = 8;

    pub fn data(&self) -> Option<Vector<'a, u8>> {
        unsafe { self._tab.get::<ForwardsUOffset<Vector<'a, u8>>>(Buffer::VT_DATA, None) }
    }

    /// Size of data stored past the end of the flatbuffer (models over 2GB).
    pub fn size(&self) -> u64 {
        unsafe { self._tab.get::<u64>(Buffer::VT_SIZE, Some(0)) }.unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.data().map_or(true, |x| x.is_empty()) && self.size() == 0
    }
}

impl Verifiable for Buffer<'_> {
    #[inline]
    fn run_verifier(v: &mut Verifier, pos: usize) -> Result<(), InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, u8>>>("data", Self::VT_DATA, false)?
            .visit_field::<u64>("offset", Self::VT_OFFSET, false)?
            .visit_field::<u64>("size", Self::VT_SIZE, false)?
            .finish();
        Ok(())
    }
}

/// Verifies `buf` and returns the root `Model` table.
pub fn root_as_model(buf: &[u8]) -> Result<Model<'_>, InvalidFlatbuffer> {
    flatbuffers::root::<Model>(buf)
}
