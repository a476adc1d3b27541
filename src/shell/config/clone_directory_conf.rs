use serde::{Deserialize, Serialize};

/// Copy of a real directory placed inside the root
///
/// ```yaml
/// - !clone_directory
///     name: fixtures
///     source: ../tests/fixtures
/// ```
///
/// `source` is resolved against the directory that receives the copy.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct CloneDirectoryConf {
    pub name: String,
    pub source: String,
}
