use serde::{Deserialize, Serialize};

/// Defaults for `html/config/settings.json`, the event tuning read by the camera application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsJson {
    /// Milliseconds a label event stays high after its last detection.
    pub min_event_duration: u32,
    /// Milliseconds a label must be seen before its event fires.
    // key spelling is what the camera application reads
    #[serde(rename = "stabelizeTransition")]
    pub stabilize_transition: u32,
    /// Frames in the rolling counter, the application clamps it to 5..=50.
    pub transition_speed: u32,
}

impl Default for SettingsJson {
    fn default() -> Self {
        Self {
            min_event_duration: 3000,
            stabilize_transition: 0,
            transition_speed: 5,
        }
    }
}
