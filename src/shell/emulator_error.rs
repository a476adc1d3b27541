//! ShellError is used to report failures of the emulator commands
//! as well as failures while loading the configuration and preparing the root directory.
use std::io;

use thiserror::Error;

/// Errors produced by the shell emulator
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}: No such file or directory")]
    NotFound(String),

    #[error("{0}: File exists")]
    AlreadyExists(String),

    #[error("{0}: Directory not empty")]
    NotEmpty(String),

    #[error("{0}: Not a directory")]
    NotADirectory(String),

    #[error("{0}: Is a directory")]
    IsADirectory(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("empty command")]
    EmptyCommand,

    #[error("{0}: command not found")]
    UnknownCommand(String),

    #[error("{0}: missing operand")]
    MissingOperand(&'static str),

    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),

    #[error("The configuration should not be empty.")]
    EmptyConfig,

    #[error("The root directory should be created inside an existing directory.")]
    ShouldStartFromDirectory,

    #[error("Links are not allowed by the sandbox settings.")]
    LinksNotAllowed,

    #[error("Config does not satisfy the yaml format: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Config does not satisfy the json format: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error(transparent)]
    Walkdir(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ShellError::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, ShellError::AlreadyExists(_))
    }

    pub fn is_not_empty(&self) -> bool {
        matches!(self, ShellError::NotEmpty(_))
    }

    pub fn is_not_a_directory(&self) -> bool {
        matches!(self, ShellError::NotADirectory(_))
    }

    pub fn is_a_directory(&self) -> bool {
        matches!(self, ShellError::IsADirectory(_))
    }

    pub fn is_should_start_from_directory(&self) -> bool {
        matches!(self, ShellError::ShouldStartFromDirectory)
    }

    pub fn is_links_not_allowed(&self) -> bool {
        matches!(self, ShellError::LinksNotAllowed)
    }

    pub fn is_empty_config(&self) -> bool {
        matches!(self, ShellError::EmptyConfig)
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
