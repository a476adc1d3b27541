use log::{debug, warn};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::shell::command::Command;
use crate::shell::emulator::{Output, ShellEmulator};
use crate::shell::emulator_error::{Result, ShellError};

/// Whether the loop should keep reading after a line was handled.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive loop around a [`ShellEmulator`].
///
/// Command failures are printed and the loop goes on. Only failures of the
/// input or output streams stop it.
pub struct Repl {
    emulator: ShellEmulator,
}

impl Repl {
    pub fn new(emulator: ShellEmulator) -> Repl {
        Repl { emulator }
    }

    pub fn emulator(&self) -> &ShellEmulator {
        &self.emulator
    }

    pub fn into_emulator(self) -> ShellEmulator {
        self.emulator
    }

    /// `user@hostname:/current/dir$ `
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            self.emulator.user(),
            self.emulator.hostname(),
            self.emulator.current_directory()
        )
    }

    /// Handles one line and writes its result to `output`.
    pub fn handle_line<W: Write>(&mut self, line: &str, output: &mut W) -> io::Result<Flow> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ShellError::EmptyCommand) => return Ok(Flow::Continue),
            Err(error) => {
                writeln!(output, "{}", error)?;
                return Ok(Flow::Continue);
            }
        };

        let name = command.name();
        match self.emulator.execute(command) {
            Ok(Output::Exit) => return Ok(Flow::Exit),
            Ok(Output::Text(text)) if text.is_empty() => {}
            Ok(Output::Text(text)) if text.ends_with('\n') => write!(output, "{}", text)?,
            Ok(Output::Text(text)) => writeln!(output, "{}", text)?,
            Err(error) => {
                debug!("{} failed: {}", name, error);
                writeln!(output, "{}: {}", name, error)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Reads commands until the input ends or `exit` is entered.
    /// A prompt is written before every line.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            write!(output, "{}", self.prompt())?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                return Ok(());
            };
            if self.handle_line(&line?, &mut output)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Executes a script file line by line. Blank lines and lines starting with `#` are skipped.
    pub fn run_script<P: AsRef<Path>, W: Write>(&mut self, path: P, output: &mut W) -> Result<Flow> {
        let path = path.as_ref();
        let script = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ShellError::NotFound(path.display().to_string()),
            _ => ShellError::Io(e),
        })?;

        for line in script.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            writeln!(output, "{}{}", self.prompt(), line)?;
            if self.handle_line(line, output)? == Flow::Exit {
                warn!("script {} stopped at exit", path.display());
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }
}
