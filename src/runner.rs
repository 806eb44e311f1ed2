//! Live command runner built on `std::process::Command`.

use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::Arc;
use std::thread;

use crate::config::RunnerConfig;
use crate::error::{RunError, RunResult};
use crate::options::RunOptions;
use crate::ports::executor::CommandExecutor;
use crate::ports::logger::{Field, Logger};

/// Shell used when none is configured.
#[cfg(windows)]
pub const DEFAULT_SHELL: &str = "cmd";
/// Shell used when none is configured.
#[cfg(not(windows))]
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Runs command strings through a shell and returns their output.
///
/// The runner holds no per-run state; one instance can serve any number of
/// sequential or concurrent runs.
pub struct CommandRunner {
    shell: PathBuf,
    logger: Arc<dyn Logger>,
}

impl CommandRunner {
    /// Creates a runner using [`DEFAULT_SHELL`].
    #[must_use]
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { shell: PathBuf::from(DEFAULT_SHELL), logger }
    }

    /// Creates a runner honouring the configured shell override.
    #[must_use]
    pub fn from_config(logger: Arc<dyn Logger>, config: &RunnerConfig) -> Self {
        let mut runner = Self::new(logger);
        if let Some(shell) = &config.shell {
            runner.set_shell(shell);
        }
        runner
    }

    /// Replaces the shell used by subsequent runs.
    ///
    /// The path is not checked until the next run.
    pub fn set_shell(&mut self, path: impl Into<PathBuf>) {
        self.shell = path.into();
    }

    /// The configured shell.
    #[must_use]
    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// Formats a command and runs it.
    ///
    /// Formatting only substitutes values; nothing is shell-escaped. Wrap
    /// untrusted values with [`crate::quote::quote`].
    ///
    /// # Errors
    ///
    /// See [`CommandExecutor::run_command`].
    pub fn run(
        &self,
        options: Option<&RunOptions>,
        command: fmt::Arguments<'_>,
    ) -> RunResult<String> {
        let command = command.to_string();
        self.run_command(options, &command)
    }

    fn resolve_shell(&self) -> RunResult<PathBuf> {
        which::which(&self.shell).map_err(|e| RunError::shell_not_found(&self.shell, e.to_string()))
    }

    fn execute(&self, mut cmd: Command, stdin: Option<&str>) -> RunResult<Output> {
        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                RunError::shell_not_found(&self.shell, e.to_string())
            }
            _ => RunError::io("spawning shell", e),
        })?;

        let pipe = child.stdin.take();
        thread::scope(|scope| {
            let writer = match (pipe, stdin) {
                (Some(mut pipe), Some(content)) => Some(scope.spawn(move || {
                    // Dropping the pipe at the end of the closure closes stdin.
                    pipe.write_all(content.as_bytes())
                })),
                _ => None,
            };

            let output = child.wait_with_output();

            if let Some(writer) = writer {
                match writer.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
                    Ok(Err(e)) => return Err(RunError::io("writing stdin", e)),
                    Err(_) => {
                        let panicked = std::io::Error::other("stdin writer panicked");
                        return Err(RunError::io("writing stdin", panicked));
                    }
                }
            }
            output.map_err(|e| RunError::io("waiting for command", e))
        })
    }
}

impl CommandExecutor for CommandRunner {
    fn run_command(&self, options: Option<&RunOptions>, command: &str) -> RunResult<String> {
        let shell = self.resolve_shell().inspect_err(|err| self.log_failure(command, err))?;
        let cmd = build_command(&shell, options, command)
            .inspect_err(|err| self.log_failure(command, err))?;

        let shell_display = shell.display();
        self.logger.debug(
            "Executing",
            &[Field::new("command", &command), Field::new("shell", &shell_display)],
        );

        let stdin = options.and_then(|o| o.stdin.as_deref());
        let output = self.execute(cmd, stdin).inspect_err(|err| self.log_failure(command, err))?;
        let combined = combined_output(&output);

        if !output.status.success() {
            let err = RunError::command_failed(command, output.status.code(), combined);
            self.log_failure(command, &err);
            return Err(err);
        }

        Ok(trim_line_endings(&combined).to_string())
    }
}

impl CommandRunner {
    fn log_failure(&self, command: &str, err: &RunError) {
        self.logger.debug(
            "Failed to execute command",
            &[Field::new("command", &command), Field::new("err", err)],
        );
    }
}

fn build_command(shell: &Path, options: Option<&RunOptions>, command: &str) -> RunResult<Command> {
    let mut cmd = Command::new(shell);
    cmd.arg(shell_flag(shell));
    push_command_arg(&mut cmd, command);

    if let Some(options) = options {
        if let Some(dir) = &options.working_dir {
            check_working_dir(dir)?;
            cmd.current_dir(dir);
        }
        cmd.envs(&options.env);
    }

    let piped = options.is_some_and(|o| o.stdin.is_some());
    let stdin = if piped { Stdio::piped() } else { Stdio::null() };
    cmd.stdin(stdin).stdout(Stdio::piped()).stderr(Stdio::piped());
    Ok(cmd)
}

/// `cmd` re-parses its whole command line, so the command string goes through
/// verbatim instead of with MSVCRT quoting.
#[cfg(windows)]
fn push_command_arg(cmd: &mut Command, command: &str) {
    use std::os::windows::process::CommandExt;

    if shell_name(Path::new(cmd.get_program())) == "cmd" {
        cmd.raw_arg(command);
    } else {
        cmd.arg(command);
    }
}

#[cfg(not(windows))]
fn push_command_arg(cmd: &mut Command, command: &str) {
    cmd.arg(command);
}

/// Lowercased file name of `shell` without an `.exe` suffix.
///
/// Both `/` and `\` count as separators so Windows paths are recognised on
/// every host.
fn shell_name(shell: &Path) -> String {
    let path = shell.to_string_lossy();
    let file = path.rsplit(['/', '\\']).next().unwrap_or_default().to_ascii_lowercase();
    file.strip_suffix(".exe").map(str::to_string).unwrap_or(file)
}

/// Flag telling `shell` to execute the next argument as a command string.
fn shell_flag(shell: &Path) -> &'static str {
    match shell_name(shell).as_str() {
        "cmd" => "/C",
        "powershell" | "pwsh" => "-Command",
        _ => "-c",
    }
}

fn check_working_dir(dir: &Path) -> RunResult<()> {
    let metadata =
        std::fs::metadata(dir).map_err(|e| RunError::invalid_working_dir(dir, e.to_string()))?;
    if !metadata.is_dir() {
        return Err(RunError::invalid_working_dir(dir, "not a directory"));
    }
    Ok(())
}

/// Stdout followed by stderr.
fn combined_output(output: &Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}

/// Strips trailing `\n` and `\r` only; spaces and tabs survive.
fn trim_line_endings(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}
