use std::path::PathBuf;

use sitecompat_bridge::BridgeConfig;
use sitecompat_core_types::{ExtensionId, TabId};

/// Static wiring for one DevTools session. No config files are read; the
/// host fills this in from its own environment.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Extension install root; rule data is read from a fixed path below it.
    pub install_root: PathBuf,
    /// Our own extension identity, used to validate message senders.
    pub extension: ExtensionId,
    /// Browser tab the session is attached to.
    pub tab: TabId,
    /// Capacity for the lifecycle and boundary channels.
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from("."),
            extension: ExtensionId::new("sitecompat-tools@example.org"),
            tab: TabId(0),
            channel_capacity: 32,
        }
    }
}

impl SessionConfig {
    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            tab: self.tab,
            extension: self.extension.clone(),
        }
    }
}
