//! Sound configuration.

use std::path::PathBuf;

use serde::Deserialize;

use alarmgroups_domain::notification::ALARM_SOUND_NAME;

/// Configuration for alarm tone playback.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Sound file to loop while an alarm rings.
    pub path: PathBuf,
    /// Playback volume between `0.0` and `1.0`.
    pub volume: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(ALARM_SOUND_NAME),
            volume: 1.0,
        }
    }
}

impl SoundConfig {
    /// Volume clamped to the playable range.
    #[must_use]
    pub fn clamped_volume(&self) -> f32 {
        if self.volume.is_nan() {
            return 1.0;
        }
        self.volume.clamp(0.0, 1.0)
    }
}
