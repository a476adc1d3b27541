//! This library provides a small shell emulator for exercising filesystem commands.
//! A session gets its own root directory, described by a YAML configuration: either a
//! temporary directory filled with the configured content and wiped out when the
//! session ends, or an existing directory. The emulator then runs `ls`, `cd`, `mkdir`,
//! `rmdir` and `tac` inside that root and keeps its own current directory.

pub mod shell;

pub use shell::{command, config, file_content, repl, sandbox, virtual_path};

pub use shell::emulator_error::{Result, ShellError};

pub use shell::command::Command;
pub use shell::emulator::{reverse_line_bytes, reverse_lines, Output, ShellEmulator};
pub use shell::file_content::FileContent;
pub use shell::repl::Repl;
