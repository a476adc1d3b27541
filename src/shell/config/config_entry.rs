use serde::{Deserialize, Serialize};

use super::{
    clone_directory_conf::CloneDirectoryConf, directory_conf::DirectoryConf, file_conf::FileConf,
    link_conf::LinkConf,
};

/// Entry of the initial root content
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ConfigEntry {
    Directory(DirectoryConf),
    CloneDirectory(CloneDirectoryConf),
    File(FileConf),
    Link(LinkConf),
}
