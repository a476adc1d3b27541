use serde::{Deserialize, Serialize};

use super::root_conf::RootConf;

/// Top level of the session configuration
///
/// ```yaml
/// user: student
/// hostname: emulator
/// startup_script: init.sh
/// root: !sandbox
///   name: shell_root
/// ```
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct EmulatorConf {
    /// Name shown in the prompt, `user` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Host shown in the prompt, `localhost` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Commands executed by the interactive loop before it starts reading input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_script: Option<String>,

    pub root: RootConf,
}
