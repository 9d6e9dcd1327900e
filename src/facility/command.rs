//! External command execution with a hard timeout.

use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

use super::ExecError;

/// Captured result of one external command invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandOutput {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Run a command with piped output, killing it if `timeout` elapses.
///
/// Output is drained on reader threads while waiting; a child that fills
/// its pipe buffers would otherwise deadlock against `wait_timeout`.
/// Timeout expiry kills the child and reports a transient
/// [`ExecError::Timeout`].
pub fn run_command(program: &str, args: &[String], timeout: Duration) -> Result<CommandOutput, ExecError> {
    let display = display_command(program, args);
    let start = Instant::now();

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExecError::Spawn {
            command: display.clone(),
            source,
        })?;

    let stdout = child.stdout.take().expect("stdout was piped");
    let stderr = child.stderr.take().expect("stderr was piped");

    let stdout_handle = thread::spawn(move || read_all(stdout));
    let stderr_handle = thread::spawn(move || read_all(stderr));

    let status = child
        .wait_timeout(timeout)
        .map_err(|source| ExecError::Spawn {
            command: display.clone(),
            source,
        })?;

    let Some(status) = status else {
        // Timed out. Kill and reap so the reader threads see EOF.
        let _ = child.kill();
        let _ = child.wait();
        let _ = stdout_handle.join();
        let _ = stderr_handle.join();
        return Err(ExecError::Timeout {
            command: display,
            limit: timeout,
        });
    };

    let stdout_text = stdout_handle.join().unwrap_or_default();
    let stderr_text = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    if status.success() {
        Ok(CommandOutput::success(stdout_text, stderr_text, duration))
    } else {
        Ok(CommandOutput::failure(
            status.code(),
            stdout_text,
            stderr_text,
            duration,
        ))
    }
}

/// Human-readable command line for error messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut text = program.to_string();
    for arg in args {
        text.push(' ');
        text.push_str(arg);
    }
    text
}

fn read_all(stream: impl std::io::Read) -> String {
    let reader = BufReader::new(stream);
    let mut output = String::new();
    for line in reader.lines().map_while(std::result::Result::ok) {
        output.push_str(&line);
        output.push('\n');
    }
    output
}
