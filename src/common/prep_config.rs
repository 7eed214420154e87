//! Options for generating the model configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::common::DEFAULT_VIDEO_ASPECT;

#[derive(Debug, Clone)]
pub struct PrepConfig {
    pub labels_path: PathBuf,
    pub model_path: PathBuf,
    pub output_dir: PathBuf,
    pub model_json_name: String,
    pub settings_json_name: String,

    // values written into model.json
    pub device_model_path: String,
    pub objectness: f64,
    pub nms: f64,
    pub scale_mode: u32,
    pub video_aspect: String,

    // onnx only, session allocation is skipped when unset
    pub ort_lib_path: Option<String>,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            labels_path: PathBuf::new(),
            model_path: PathBuf::new(),
            output_dir: PathBuf::new(),
            model_json_name: "model.json".to_string(),
            settings_json_name: "settings.json".to_string(),

            device_model_path: "model/model.tflite".to_string(),
            objectness: 0.25,
            nms: 0.05,
            scale_mode: 0,
            video_aspect: DEFAULT_VIDEO_ASPECT.to_string(),

            ort_lib_path: None,
        }
        .with_app_dir("./app")
    }
}

#[allow(dead_code)]
impl PrepConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Re-roots the label file, the model file and the output directory under `app_dir`.
    ///
    /// Layout:
    /// `<app_dir>/model/labels.txt`, `<app_dir>/model/model.tflite`, `<app_dir>/html/config`.
    pub fn with_app_dir<P: AsRef<Path>>(mut self, app_dir: P) -> Self {
        let app_dir = app_dir.as_ref();
        self.labels_path = app_dir.join("model").join("labels.txt");
        self.model_path = app_dir.join("model").join("model.tflite");
        self.output_dir = app_dir.join("html").join("config");
        self
    }

    pub fn with_labels_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.labels_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_model_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.model_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn with_device_model_path(mut self, path: &str) -> Self {
        self.device_model_path = path.to_string();
        self
    }

    pub fn with_objectness(mut self, x: f64) -> Self {
        self.objectness = x;
        self
    }

    pub fn with_nms(mut self, x: f64) -> Self {
        self.nms = x;
        self
    }

    pub fn with_scale_mode(mut self, x: u32) -> Self {
        self.scale_mode = x;
        self
    }

    pub fn with_video_aspect(mut self, aspect: &str) -> Self {
        self.video_aspect = aspect.to_string();
        self
    }

    pub fn with_ort_lib_path(mut self, ort_lib_path: &str) -> Self {
        self.ort_lib_path = Some(ort_lib_path.to_string());
        self
    }

    pub fn model_json_path(&self) -> PathBuf {
        self.output_dir.join(&self.model_json_name)
    }

    pub fn settings_json_path(&self) -> PathBuf {
        self.output_dir.join(&self.settings_json_name)
    }
}

impl fmt::Display for PrepConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Labels Path: {}\n\
        Model Path: {}\n\
        Output Directory: {}\n\
        Device Model Path: {}\n\
        OnnxRuntime Lib Path: {}",
               self.labels_path.display(), self.model_path.display(),
               self.output_dir.display(), self.device_model_path,
               self.ort_lib_path.as_deref().unwrap_or("<unset>"))
    }
}
