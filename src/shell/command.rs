//! External command execution.

use crate::error::{HarnessError, Result};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long output readers may keep going after a timeout kill.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Environment variables set on a child process, on top of the inherited
/// environment.
///
/// The parent's environment is never modified; overrides are applied to
/// the [`Command`] at spawn time only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    vars: BTreeMap<String, String>,
}

impl EnvOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn apply(&self, cmd: &mut Command) {
        for (key, value) in &self.vars {
            cmd.env(key, value);
        }
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed for exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Stdout followed by stderr, for failure reports.
    pub fn combined_output(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }

    /// Turn a non-zero exit into `ExternalToolFailure`.
    pub fn check(self, command: &str) -> Result<Self> {
        if self.success {
            return Ok(self);
        }

        let mut output = self.combined_output();
        if self.timed_out {
            output = format!("timed out after {:?}\n{}", self.duration, output);
        }

        Err(HarnessError::ExternalToolFailure {
            command: command.to_string(),
            code: self.exit_code,
            output,
        })
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with inherited env).
    pub env: EnvOverrides,

    /// Kill the command after this long (None = no timeout).
    pub timeout: Option<Duration>,
}

/// Render a program and its arguments for logs and error messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute a program, capturing its output.
///
/// A non-zero exit is reported in the returned [`CommandResult`], not as an
/// error; use [`CommandResult::check`] to convert it.
///
/// # Errors
///
/// Returns `ExternalToolFailure` if the program cannot be spawned.
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let command_line = display_command(program, args);
    tracing::debug!("Executing: {}", command_line);

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    options.env.apply(&mut cmd);

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    // Own process group, so a timeout also reaches helpers the tool forks.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let spawn_error = |e: std::io::Error| HarnessError::ExternalToolFailure {
        command: command_line.clone(),
        code: None,
        output: e.to_string(),
    };

    let mut child = cmd.spawn().map_err(spawn_error)?;

    let stdout_rx = child.stdout.take().map(spawn_reader);
    let stderr_rx = child.stderr.take().map(spawn_reader);

    let status = wait_with_timeout(&mut child, options.timeout, start).map_err(spawn_error)?;

    let timed_out = status.is_none();
    let stdout = collect(stdout_rx, timed_out);
    let stderr = collect(stderr_rx, timed_out);

    let duration = start.elapsed();

    let result = match status {
        Some(status) => CommandResult {
            exit_code: status.code(),
            success: status.success(),
            stdout,
            stderr,
            duration,
            timed_out: false,
        },
        None => {
            tracing::warn!("Command timed out after {:?}: {}", duration, command_line);
            CommandResult {
                exit_code: None,
                success: false,
                stdout,
                stderr,
                duration,
                timed_out: true,
            }
        }
    };

    tracing::debug!(
        "Command finished with exit code {:?} in {:?}",
        result.exit_code,
        result.duration
    );

    Ok(result)
}

/// Execute a program and require exit code 0.
pub fn execute_checked(
    program: &str,
    args: &[String],
    options: &CommandOptions,
) -> Result<CommandResult> {
    execute(program, args, options)?.check(&display_command(program, args))
}

/// Wait for the child, killing it once the timeout elapses.
///
/// Returns `None` when the child was killed.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
    start: Instant,
) -> std::io::Result<Option<ExitStatus>> {
    let Some(limit) = timeout else {
        return child.wait().map(Some);
    };

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= limit {
            kill_tree(child);
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: killpg only signals the group this child leads (see process_group(0)).
        unsafe {
            libc::killpg(pgid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}

fn spawn_reader(pipe: impl Read + Send + 'static) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(drain(pipe));
    });
    rx
}

/// Output from a reader. After a timeout, a descendant that escaped the
/// kill may still hold the pipe open; give up after `DRAIN_GRACE`.
fn collect(rx: Option<Receiver<String>>, timed_out: bool) -> String {
    match rx {
        Some(rx) if timed_out => rx.recv_timeout(DRAIN_GRACE).unwrap_or_default(),
        Some(rx) => rx.recv().unwrap_or_default(),
        None => String::new(),
    }
}

fn drain(mut pipe: impl Read) -> String {
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).to_string()
}
