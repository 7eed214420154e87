use serde::{Deserialize, Serialize, Serializer};

use crate::common::{get_chip_name, PrepConfig, VideoFrame};
use crate::inspectors::ModelGeometry;

pub const DEFAULT_LABELS: [&str; 2] = ["label1", "label2"];

/// Contents of `html/config/model.json`. Field order is the key order on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelJson {
    pub model_width: u32,
    pub model_height: u32,
    #[serde(serialize_with = "serialize_quant")]
    pub quant: f64,
    pub zero_point: i64,
    pub boxes: usize,
    pub classes: usize,
    pub objectness: f64,
    pub nms: f64,
    pub path: String,
    pub scale_mode: u32,
    pub video_width: u32,
    pub video_height: u32,
    pub video_aspect: String,
    pub chip: String,
    pub labels: Vec<String>,
    pub description: String,
}

impl ModelJson {
    /// Record with everything that does not depend on the model file or the label file.
    pub fn new(config: &PrepConfig, platform: &str, image_size: u32) -> Self {
        let frame = VideoFrame::for_image_size(image_size).with_aspect(&config.video_aspect);
        Self {
            model_width: image_size,
            model_height: image_size,
            quant: 0.0,
            zero_point: 0,
            boxes: 0,
            classes: 0,
            objectness: config.objectness,
            nms: config.nms,
            path: config.device_model_path.to_owned(),
            scale_mode: config.scale_mode,
            video_width: frame.width,
            video_height: frame.height,
            video_aspect: frame.aspect,
            chip: get_chip_name(platform).to_string(),
            labels: DEFAULT_LABELS.iter().map(|x| x.to_string()).collect(),
            description: String::new(),
        }
    }

    pub fn apply_geometry(&mut self, geometry: &ModelGeometry) {
        self.quant = geometry.quant.scale as f64;
        self.zero_point = geometry.quant.zero_point;
        self.boxes = geometry.boxes;
        self.classes = geometry.classes;
    }

    pub fn labels_match_classes(&self) -> bool {
        self.labels.len() == self.classes
    }

    pub fn to_pretty_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An unset scale is written as the integer `0`, like the camera application's own files.
fn serialize_quant<S: Serializer>(quant: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if *quant == 0.0 {
        serializer.serialize_u64(0)
    } else {
        serializer.serialize_f64(*quant)
    }
}
