use serde::{Deserialize, Serialize};

use super::config_entry::ConfigEntry;

/// Directory created inside the root, with its own entries
///
/// ```yaml
/// - !directory
///     name: docs
///     content:
///       - !file
///           name: notes.txt
///           content: !empty
/// ```
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct DirectoryConf {
    pub name: String,

    #[serde(default)]
    pub content: Vec<ConfigEntry>,
}
