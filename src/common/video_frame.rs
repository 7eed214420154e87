/// Square model input sizes with a matching 4:3 capture width.
pub const KNOWN_IMAGE_SIZES: [u32; 3] = [480, 768, 960];

pub const DEFAULT_VIDEO_WIDTH: u32 = 640;

pub const DEFAULT_VIDEO_ASPECT: &str = "4:3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub aspect: String,
}

impl VideoFrame {
    /// Capture frame for a model of `image_size` x `image_size`.
    /// The frame height is always the image size.
    pub fn for_image_size(image_size: u32) -> Self {
        Self {
            width: get_video_width(image_size),
            height: image_size,
            aspect: DEFAULT_VIDEO_ASPECT.to_string(),
        }
    }

    pub fn with_aspect(mut self, aspect: &str) -> Self {
        self.aspect = aspect.to_string();
        self
    }
}

pub fn get_video_width(image_size: u32) -> u32 {
    match image_size {
        480 => 640,
        768 => 1024,
        960 => 1280,
        _ => DEFAULT_VIDEO_WIDTH,
    }
}
