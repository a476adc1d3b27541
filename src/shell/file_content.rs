use serde::{Deserialize, Serialize};

/// Content of a file created in the root before the session starts.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FileContent {
    /// Raw bytes:
    ///
    /// ```yaml
    /// - !file
    ///     name: test.txt
    ///     content:
    ///       !inline_bytes
    ///         - 116
    ///         - 101
    ///         - 115
    ///         - 116
    /// ```
    InlineBytes(Vec<u8>),
    /// Text, handy for files that `tac` should reverse:
    ///
    /// ```yaml
    /// - !file
    ///     name: test_file.txt
    ///     content: !inline_text "line1\nline2\nline3\n"
    /// ```
    InlineText(String),
    /// Copy of a real file:
    ///
    /// ```yaml
    /// - !file
    ///     name: copy.toml
    ///     content: !original_file Cargo.toml
    /// ```
    OriginalFile(String),
    /// Zero length file:
    ///
    /// ```yaml
    /// - !file
    ///     name: empty.txt
    ///     content: !empty
    /// ```
    Empty,
}
