use serde::{Deserialize, Serialize};

use super::sandbox_conf::SandboxConf;

/// Where the emulator root directory comes from.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RootConf {
    /// A fresh temporary directory, removed when the session ends:
    ///
    /// ```yaml
    /// root: !sandbox
    ///   name: shell_root
    /// ```
    Sandbox(SandboxConf),
    /// An already existing directory. It is never removed by the emulator:
    ///
    /// ```yaml
    /// root: !existing /home/student/playground
    /// ```
    Existing(String),
}
