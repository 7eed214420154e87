mod model_json;
mod prep_config;
mod target_platform;
mod video_frame;

pub use model_json::*;
pub use prep_config::*;
pub use target_platform::*;
pub use video_frame::*;
