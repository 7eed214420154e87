#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TargetPlatform {
    #[default] A8,
    A9,
    TPU,
}

// Platform token and the larod chip string it deploys to.
static A8: [&str; 2] = ["A8", "axis-a8-dlpu-tflite"];
static A9: [&str; 2] = ["A9", "a9-dlpu-tflite"];
static TPU: [&str; 2] = ["TPU", "google-edge-tpu-tflite"];

impl TargetPlatform {
    pub fn from_str(platform: &str) -> Option<Self> {
        match platform.to_uppercase().as_str() {
            "A8" => Some(TargetPlatform::A8),
            "A9" => Some(TargetPlatform::A9),
            "TPU" => Some(TargetPlatform::TPU),
            _ => None,
        }
    }

    pub fn str(&self) -> &'static str {
        match self {
            TargetPlatform::A8 => A8[0],
            TargetPlatform::A9 => A9[0],
            TargetPlatform::TPU => TPU[0],
        }
    }

    pub fn chip_name(&self) -> &'static str {
        match self {
            TargetPlatform::A8 => A8[1],
            TargetPlatform::A9 => A9[1],
            TargetPlatform::TPU => TPU[1],
        }
    }

    pub fn all_platforms() -> Vec<String> {
        vec![
            TargetPlatform::A8.str().to_string(),
            TargetPlatform::A9.str().to_string(),
            TargetPlatform::TPU.str().to_string(),
        ]
    }
}

/// Resolves a platform token (any case) to its chip string.
/// Unknown tokens fall back to the A8 DLPU chip.
pub fn get_chip_name(platform: &str) -> &'static str {
    match TargetPlatform::from_str(platform) {
        Some(target) => target.chip_name(),
        None => {
            log::debug!("Unknown platform '{}', using {}", platform, TargetPlatform::default().chip_name());
            TargetPlatform::default().chip_name()
        }
    }
}
