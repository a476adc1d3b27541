//! The `shell` module contains the emulator itself together with the configuration,
//! root directory provisioning, command parsing, the interactive loop and error handling.

pub mod command;
pub mod config;
pub mod emulator;
pub mod emulator_error;
pub mod file_content;
pub mod repl;
pub mod sandbox;
pub mod virtual_path;
