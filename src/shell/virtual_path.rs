//! Virtual paths are the paths the emulator user sees. They always start at `/`,
//! which stands for the root directory, and never climb above it.
use std::path::{Path, PathBuf};

pub const ROOT: &str = "/";

/// Resolves `arg` against the virtual `current` directory.
///
/// Arguments starting with `/` are taken from the root. `.` components are dropped
/// and `..` steps back one component, staying at `/` when there is nothing left.
///
/// ```rust
/// use shell_emulator::virtual_path::resolve;
///
/// assert_eq!(resolve("/", "new_dir"), "/new_dir");
/// assert_eq!(resolve("/a/b", "../c"), "/a/c");
/// assert_eq!(resolve("/a", "/x/./y"), "/x/y");
/// assert_eq!(resolve("/", ".."), "/");
/// ```
pub fn resolve(current: &str, arg: &str) -> String {
    let mut components: Vec<&str> = Vec::new();
    let start = if arg.starts_with('/') { "" } else { current };

    for component in start.split('/').chain(arg.split('/')) {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            name => components.push(name),
        }
    }

    format!("/{}", components.join("/"))
}

/// Maps a normalized virtual path onto the host filesystem below `root`.
pub fn to_host(root: &Path, virtual_path: &str) -> PathBuf {
    let relative = virtual_path.trim_start_matches('/');
    if relative.is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}

/// Whether `ancestor` is `path` itself or one of its parents.
pub fn contains(ancestor: &str, path: &str) -> bool {
    ancestor == ROOT
        || path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}
