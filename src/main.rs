use clap::Parser;
use env_logger::Env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use shell_emulator::repl::Flow;
use shell_emulator::{Repl, ShellEmulator};

#[derive(Parser)]
#[command(name = "shell_emulator")]
#[command(about = "Runs ls, cd, mkdir, rmdir and tac inside a configured root directory")]
#[command(version)]
struct Cli {
    /// Session configuration in YAML or JSON
    #[arg(short = 'c', long = "config", default_value = "config.yaml")]
    config: PathBuf,

    /// Script executed before reading stdin, overrides `startup_script` of the config
    #[arg(short = 's', long = "script")]
    script: Option<PathBuf>,

    /// Run these command lines and exit instead of reading stdin
    #[arg(short = 'e', long = "command")]
    commands: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let emulator = match ShellEmulator::from_config_file(&cli.config) {
        Ok(emulator) => emulator,
        Err(e) => {
            eprintln!("Error: cannot start session from {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let script = cli
        .script
        .or_else(|| emulator.startup_script().map(PathBuf::from));
    let mut repl = Repl::new(emulator);

    let stdout = io::stdout();
    let mut output = stdout.lock();

    if !cli.commands.is_empty() {
        for line in &cli.commands {
            match repl.handle_line(line, &mut output) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        return match output.flush() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    if let Some(script) = script {
        match repl.run_script(&script, &mut output) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: startup script {}: {}", script.display(), e);
                return ExitCode::FAILURE;
            }
        }
    }

    let result = repl
        .run(io::stdin().lock(), &mut output)
        .and_then(|()| output.flush());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
