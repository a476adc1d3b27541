use serde::{Deserialize, Serialize};

use crate::shell::file_content::FileContent;

/// File created inside the root.
/// See [`FileContent`] for the ways its content can be given.
///
/// ```yaml
/// - !file
///     name: test_file.txt
///     content: !inline_text "line1\nline2\nline3\n"
/// ```
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct FileConf {
    pub name: String,
    pub content: FileContent,
}
