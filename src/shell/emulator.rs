use log::{debug, info};
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use crate::shell::command::Command;
use crate::shell::config::{parse_config, EmulatorConf, RootConf};
use crate::shell::emulator_error::{Result, ShellError};
use crate::shell::sandbox::Sandbox;
use crate::shell::virtual_path::{self, ROOT};

const DEFAULT_USER: &str = "user";
const DEFAULT_HOSTNAME: &str = "localhost";

/// What a successfully executed command hands back to its caller.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Output {
    Text(String),
    Exit,
}

/// Shell Emulator runs a handful of shell commands against a root directory.
///
/// The emulator keeps its own current directory, a virtual path starting at `/`
/// that stands for the root. The process working directory is never changed.
/// When the root was created from a `!sandbox` configuration it is removed
/// together with the emulator.
///
/// # Example
///
/// ```rust
/// use shell_emulator::{ShellEmulator, ShellError};
///
/// # fn main() -> Result<(), ShellError> {
/// let mut shell = ShellEmulator::from_config_str("
/// root: !sandbox
///   name: doc_session
///   content:
///     - !file
///         name: test_file.txt
///         content: !inline_text \"line1\\nline2\\nline3\\n\"
/// ")?;
///
/// assert!(shell.mkdir("new_dir")?.contains("Directory created"));
/// shell.cd("new_dir")?;
/// assert_eq!(shell.current_directory(), "/new_dir");
///
/// shell.cd("..")?;
/// assert_eq!(shell.tac("test_file.txt")?, "line3\nline2\nline1\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ShellEmulator {
    root_directory: PathBuf,
    current_directory: String,
    user: String,
    hostname: String,
    startup_script: Option<PathBuf>,
    sandbox: Option<Sandbox>,
}

impl ShellEmulator {
    /// Creates an emulator over an existing directory. The directory is never removed.
    pub fn new<P: AsRef<Path>>(root_directory: P) -> Result<ShellEmulator> {
        let requested = root_directory.as_ref();
        let root_directory = fs::canonicalize(requested)
            .map_err(|e| not_found_or_io(e, &requested.display().to_string()))?;
        if !root_directory.is_dir() {
            return Err(ShellError::NotADirectory(requested.display().to_string()));
        }

        Ok(ShellEmulator {
            root_directory,
            current_directory: String::from(ROOT),
            user: String::from(DEFAULT_USER),
            hostname: String::from(DEFAULT_HOSTNAME),
            startup_script: None,
            sandbox: None,
        })
    }

    /// Creates the root described by `conf` and an emulator standing in it.
    pub fn from_config(conf: &EmulatorConf) -> Result<ShellEmulator> {
        let (mut emulator, sandbox) = match &conf.root {
            RootConf::Sandbox(sandbox_conf) => {
                let sandbox = Sandbox::create(sandbox_conf)?;
                (ShellEmulator::new(sandbox.path())?, Some(sandbox))
            }
            RootConf::Existing(path) => (ShellEmulator::new(path)?, None),
        };

        emulator.sandbox = sandbox;
        if let Some(user) = &conf.user {
            emulator.user = user.clone();
        }
        if let Some(hostname) = &conf.hostname {
            emulator.hostname = hostname.clone();
        }
        emulator.startup_script = conf.startup_script.as_ref().map(PathBuf::from);

        info!(
            "emulator session started in {}",
            emulator.root_directory.display()
        );
        Ok(emulator)
    }

    /// Parses a YAML or JSON configuration string and builds the emulator from it.
    pub fn from_config_str(config_str: &str) -> Result<ShellEmulator> {
        Self::from_config(&parse_config(config_str)?)
    }

    /// Reads the configuration file. A relative `startup_script` is taken
    /// relative to the directory of the configuration file.
    pub fn from_config_file<P: AsRef<Path>>(config_path: P) -> Result<ShellEmulator> {
        let config_path = config_path.as_ref();
        let config_str = fs::read_to_string(config_path)
            .map_err(|e| not_found_or_io(e, &config_path.display().to_string()))?;

        let mut emulator = Self::from_config_str(&config_str)?;
        if let (Some(script), Some(config_dir)) =
            (emulator.startup_script.as_ref(), config_path.parent())
        {
            if script.is_relative() {
                emulator.startup_script = Some(config_dir.join(script));
            }
        }
        Ok(emulator)
    }

    /// Absolute host path of the root directory.
    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    /// Virtual path of the current directory, `/` being the root.
    pub fn current_directory(&self) -> &str {
        &self.current_directory
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn startup_script(&self) -> Option<&Path> {
        self.startup_script.as_deref()
    }

    fn resolve(&self, arg: &str) -> (String, PathBuf) {
        let virtual_path = virtual_path::resolve(&self.current_directory, arg);
        let host_path = virtual_path::to_host(&self.root_directory, &virtual_path);
        (virtual_path, host_path)
    }

    fn directory_metadata(host_path: &Path, name: &str) -> Result<Metadata> {
        let metadata = fs::metadata(host_path).map_err(|e| not_found_or_io(e, name))?;
        if metadata.is_dir() {
            Ok(metadata)
        } else {
            Err(ShellError::NotADirectory(name.to_string()))
        }
    }

    fn list(host_path: &Path, name: &str) -> Result<String> {
        Self::directory_metadata(host_path, name)?;

        let mut names = Vec::new();
        for entry in fs::read_dir(host_path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names.join("\n"))
    }

    /// Entry names of the current directory, one per line, in the order the
    /// filesystem enumerates them.
    pub fn ls(&self) -> Result<String> {
        let host_path = virtual_path::to_host(&self.root_directory, &self.current_directory);
        Self::list(&host_path, &self.current_directory)
    }

    /// Same as [`ShellEmulator::ls`] for another directory.
    pub fn ls_path(&self, path: &str) -> Result<String> {
        let (_, host_path) = self.resolve(path);
        Self::list(&host_path, path)
    }

    /// Changes the current directory. Nothing changes when the target is not a directory.
    pub fn cd(&mut self, path: &str) -> Result<()> {
        let (virtual_path, host_path) = self.resolve(path);
        Self::directory_metadata(&host_path, path)?;

        self.current_directory = virtual_path;
        Ok(())
    }

    pub fn pwd(&self) -> String {
        self.current_directory.clone()
    }

    /// Creates a directory. Its parent must already exist.
    pub fn mkdir(&self, name: &str) -> Result<String> {
        let (virtual_path, host_path) = self.resolve(name);
        if virtual_path == ROOT || fs::symlink_metadata(&host_path).is_ok() {
            return Err(ShellError::AlreadyExists(name.to_string()));
        }

        fs::create_dir(&host_path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ShellError::AlreadyExists(name.to_string()),
            _ => not_found_or_io(e, name),
        })?;

        Ok(format!("Directory created: {}", name))
    }

    /// Removes an empty directory.
    /// Neither the current directory nor any of its parents can be removed.
    pub fn rmdir(&self, name: &str) -> Result<String> {
        let (virtual_path, host_path) = self.resolve(name);
        Self::directory_metadata(&host_path, name)?;

        if virtual_path::contains(&virtual_path, &self.current_directory) {
            return Err(ShellError::InvalidArgument(format!(
                "{}: cannot remove the current directory or its parent",
                name
            )));
        }
        if fs::read_dir(&host_path)?.next().is_some() {
            return Err(ShellError::NotEmpty(name.to_string()));
        }

        fs::remove_dir(&host_path)?;
        Ok(format!("Directory removed: {}", name))
    }

    /// Lines of the file in reverse order.
    pub fn tac(&self, filename: &str) -> Result<String> {
        let (_, host_path) = self.resolve(filename);
        let metadata = fs::metadata(&host_path).map_err(|e| not_found_or_io(e, filename))?;
        if metadata.is_dir() {
            return Err(ShellError::IsADirectory(filename.to_string()));
        }

        let content = fs::read(&host_path)?;
        Ok(String::from_utf8_lossy(&reverse_line_bytes(&content)).into_owned())
    }

    /// Runs a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Output> {
        debug!("{} in {}: {:?}", self.user, self.current_directory, command);

        let text = match command {
            Command::Ls(None) => self.ls()?,
            Command::Ls(Some(path)) => self.ls_path(&path)?,
            Command::Cd(path) => {
                self.cd(&path)?;
                String::new()
            }
            Command::Mkdir(name) => self.mkdir(&name)?,
            Command::Rmdir(name) => self.rmdir(&name)?,
            Command::Tac(filename) => self.tac(&filename)?,
            Command::Pwd => self.pwd(),
            Command::Exit => return Ok(Output::Exit),
        };
        Ok(Output::Text(text))
    }

    /// Parses and runs one input line.
    pub fn execute_line(&mut self, line: &str) -> Result<Output> {
        self.execute(line.parse()?)
    }

    /// Runs a test procedure against this emulator and panics when it fails.
    ///
    /// ```rust
    /// use shell_emulator::ShellEmulator;
    ///
    /// let mut shell = ShellEmulator::from_config_str("root: !sandbox\n  name: doc_test\n")
    ///     .expect("Incorrect config");
    /// shell.perform_shell_test(|shell| {
    ///     shell.mkdir("docs")?;
    ///     assert_eq!(shell.ls()?, "docs");
    ///     Ok(())
    /// });
    /// ```
    pub fn perform_shell_test<F>(&mut self, test_proc: F)
    where
        F: FnOnce(&mut ShellEmulator) -> Result<()>,
    {
        if let Err(e) = test_proc(self) {
            panic!("inner test has error: {}", e)
        }
    }
}

fn not_found_or_io(error: io::Error, name: &str) -> ShellError {
    match error.kind() {
        io::ErrorKind::NotFound => ShellError::NotFound(name.to_string()),
        // A regular file used as a directory component: `cd notes.txt/inner`
        io::ErrorKind::NotADirectory => ShellError::NotADirectory(name.to_string()),
        _ => ShellError::Io(error),
    }
}

/// Reverses the order of lines. Every line of the result is terminated,
/// with `\r\n` when the text uses it and `\n` otherwise.
pub fn reverse_lines(content: &str) -> String {
    String::from_utf8_lossy(&reverse_line_bytes(content.as_bytes())).into_owned()
}

/// Byte level [`reverse_lines`]. Lines are split on `\n` only, so text in any
/// ASCII compatible encoding keeps its bytes.
pub fn reverse_line_bytes(content: &[u8]) -> Vec<u8> {
    let terminator: &[u8] = if content.windows(2).any(|pair| pair == b"\r\n") {
        b"\r\n"
    } else {
        b"\n"
    };
    let mut reversed = Vec::with_capacity(content.len() + terminator.len());

    for line in content.split_inclusive(|&byte| byte == b'\n').rev() {
        reversed.extend_from_slice(line);
        if !line.ends_with(b"\n") {
            reversed.extend_from_slice(terminator);
        }
    }
    reversed
}
