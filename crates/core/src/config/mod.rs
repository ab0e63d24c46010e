use std::{collections::BTreeSet, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{keys, ParameterMap, Result};

/// Top-level configuration structure for the command line tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub hardware: HardwareProfile,
}

impl AppConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads the configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            profile = %config.hardware.name,
            groups = config.hardware.groups.len(),
            "loaded hardware profile"
        );
        Ok(config)
    }
}

/// Optional families of keys that only some camera hardware understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyGroup {
    HighFrameRate,
    TouchIndex,
    FrameRateMode,
    FaceDetection,
    ZeroShutterLag,
    IsoMode,
}

impl KeyGroup {
    pub const ALL: [KeyGroup; 6] = [
        KeyGroup::HighFrameRate,
        KeyGroup::TouchIndex,
        KeyGroup::FrameRateMode,
        KeyGroup::FaceDetection,
        KeyGroup::ZeroShutterLag,
        KeyGroup::IsoMode,
    ];

    pub fn keys(self) -> &'static [&'static str] {
        match self {
            KeyGroup::HighFrameRate => &[
                keys::VIDEO_HIGH_FRAME_RATE,
                keys::SUPPORTED_VIDEO_HIGH_FRAME_RATE_MODES,
                keys::SUPPORTED_HFR_SIZES,
            ],
            KeyGroup::TouchIndex => &[
                keys::TOUCH_AF_AEC,
                keys::SUPPORTED_TOUCH_AF_AEC,
                keys::TOUCH_INDEX_AEC,
                keys::TOUCH_INDEX_AF,
            ],
            KeyGroup::FrameRateMode => &[
                keys::PREVIEW_FRAME_RATE_MODE,
                keys::SUPPORTED_PREVIEW_FRAME_RATE_MODES,
            ],
            KeyGroup::FaceDetection => &[
                keys::MAX_NUM_DETECTED_FACES_HW,
                keys::MAX_NUM_DETECTED_FACES_SW,
            ],
            KeyGroup::ZeroShutterLag => &[keys::ZSL, keys::SUPPORTED_ZSL_MODES],
            KeyGroup::IsoMode => &[keys::ISO_MODE, keys::SUPPORTED_ISO_MODES],
        }
    }

    /// The optional group owning `key`, if any.
    pub fn of_key(key: &str) -> Option<KeyGroup> {
        Self::ALL
            .into_iter()
            .find(|group| group.keys().contains(&key))
    }
}

/// Which optional key groups are meaningful on the target hardware. Resolved
/// once at startup and then only queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareProfile {
    #[serde(default = "default_profile_name")]
    pub name: String,
    #[serde(default)]
    pub groups: BTreeSet<KeyGroup>,
}

impl Default for HardwareProfile {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            groups: BTreeSet::new(),
        }
    }
}

fn default_profile_name() -> String {
    "generic".to_string()
}

impl HardwareProfile {
    pub fn new(name: impl Into<String>, groups: impl IntoIterator<Item = KeyGroup>) -> Self {
        Self {
            name: name.into(),
            groups: groups.into_iter().collect(),
        }
    }

    /// A profile with every optional group enabled.
    pub fn full(name: impl Into<String>) -> Self {
        Self::new(name, KeyGroup::ALL)
    }

    pub fn is_group_active(&self, group: KeyGroup) -> bool {
        self.groups.contains(&group)
    }

    /// Keys outside every optional group are always active, which includes
    /// keys this crate has never heard of.
    pub fn is_key_active(&self, key: &str) -> bool {
        KeyGroup::of_key(key)
            .map(|group| self.is_group_active(group))
            .unwrap_or(true)
    }

    pub fn inactive_keys(&self, params: &ParameterMap) -> Vec<String> {
        params
            .keys()
            .filter(|key| !self.is_key_active(key))
            .map(str::to_string)
            .collect()
    }

    /// Drops the keys this profile does not support and returns them.
    pub fn retain_active(&self, params: &mut ParameterMap) -> Vec<String> {
        let inactive = self.inactive_keys(params);
        for key in &inactive {
            params.remove(key);
        }
        inactive
    }
}
