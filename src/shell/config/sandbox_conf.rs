use serde::{Deserialize, Serialize};

use super::config_entry::ConfigEntry;

/// Temporary root directory settings
///
/// ## yaml:
///
/// ```yaml
/// root: !sandbox
///   start_point: /tmp
///   name: shell_root
///   links_allowed: false
///   content:
///     - !file
///         name: test_file.txt
///         content: !inline_text "line1\nline2\nline3\n"
/// ```
///
/// ## json:
///
/// ```json
/// {
///     "root": {
///         "sandbox": {
///             "start_point": "/tmp",
///             "name": "shell_root",
///             "content": []
///         }
///     }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct SandboxConf {
    /// An existing directory in which the root will be created.
    /// The system temporary directory is used when it is empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_point: String,

    /// Name prefix of the root directory. A random suffix keeps sessions apart.
    pub name: String,

    /// Hard links modify their target when written through, so they must be enabled explicitly.
    #[serde(default)]
    pub links_allowed: bool,

    /// Entries created inside the root before the session starts.
    #[serde(default)]
    pub content: Vec<ConfigEntry>,
}
