use std::str::FromStr;

use crate::shell::emulator_error::ShellError;

/// A single emulator command, parsed from one input line.
///
/// Words are separated by whitespace. There is no quoting, so names with spaces
/// cannot be passed from the command line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    Ls(Option<String>),
    Cd(String),
    Mkdir(String),
    Rmdir(String),
    Tac(String),
    Pwd,
    Exit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ls(_) => "ls",
            Command::Cd(_) => "cd",
            Command::Mkdir(_) => "mkdir",
            Command::Rmdir(_) => "rmdir",
            Command::Tac(_) => "tac",
            Command::Pwd => "pwd",
            Command::Exit => "exit",
        }
    }
}

fn no_operand(name: &'static str, args: &[&str]) -> Result<(), ShellError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ShellError::TooManyArguments(name))
    }
}

fn optional_operand(name: &'static str, args: &[&str]) -> Result<Option<String>, ShellError> {
    match args {
        [] => Ok(None),
        [operand] => Ok(Some(operand.to_string())),
        _ => Err(ShellError::TooManyArguments(name)),
    }
}

fn single_operand(name: &'static str, args: &[&str]) -> Result<String, ShellError> {
    optional_operand(name, args)?.ok_or(ShellError::MissingOperand(name))
}

impl FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ShellError::EmptyCommand)?;
        let args: Vec<&str> = words.collect();

        match name {
            "ls" => Ok(Command::Ls(optional_operand("ls", &args)?)),
            "cd" => Ok(Command::Cd(single_operand("cd", &args)?)),
            "mkdir" => Ok(Command::Mkdir(single_operand("mkdir", &args)?)),
            "rmdir" => Ok(Command::Rmdir(single_operand("rmdir", &args)?)),
            "tac" => Ok(Command::Tac(single_operand("tac", &args)?)),
            "pwd" => no_operand("pwd", &args).map(|_| Command::Pwd),
            "exit" => no_operand("exit", &args).map(|_| Command::Exit),
            unknown => Err(ShellError::UnknownCommand(unknown.to_string())),
        }
    }
}
