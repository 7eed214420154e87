mod json_writer;
mod labels;
mod prompts;
mod settings_json;

pub use json_writer::{ensure_directory, write_pretty_json};
pub use labels::parse_labels_file;
pub use prompts::{image_size_question, parse_image_size, platform_question, prompt, prompt_platform_and_size};
pub use settings_json::SettingsJson;

pub(crate) const CROSS_MARK: &str = "❌";
