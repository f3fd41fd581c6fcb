//! Watcher configuration

use serde::{Deserialize, Serialize};

use crate::SIDE_CHANNEL_CLASS;

/// Resize watcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Class name of injected side-channel frames. External styling must
    /// size elements of this class to their parent.
    pub side_channel_class: String,

    /// Use the frame strategy even when the native observer exists
    pub force_fallback: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            side_channel_class: SIDE_CHANNEL_CLASS.to_string(),
            force_fallback: false,
        }
    }
}
