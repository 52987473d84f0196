//! Command execution in the build environment
//!
//! - `CommandSpec`: typed program + argument list
//! - `CommandRunner`: injectable execution capability
//! - `RvmShell`: production runner (bash login shell with RVM sourced)

mod command;
mod runner;
mod rvm_shell;

pub use command::CommandSpec;
pub use runner::CommandRunner;
pub use rvm_shell::RvmShell;

use tokio::io::{AsyncBufReadExt, BufReader};

/// Max number of output lines to include in command error messages.
const ERROR_TAIL_LINES: usize = 50;

/// Lines captured from a finished child process
#[derive(Debug, Default)]
pub(crate) struct CapturedOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

/// Extract the useful tail of command output for error diagnostics.
///
/// Combines stdout and stderr, then returns the last `ERROR_TAIL_LINES`
/// lines so error messages are actionable without being overwhelming.
pub(crate) fn build_error_output(stdout: &[String], stderr: &[String]) -> String {
    let lines: Vec<&str> = stdout
        .iter()
        .chain(stderr.iter())
        .map(String::as_str)
        .collect();
    let total = lines.len();
    let tail = if total > ERROR_TAIL_LINES {
        &lines[total - ERROR_TAIL_LINES..]
    } else {
        &lines[..]
    };
    tail.join("\n")
}

/// Drain stdout+stderr from a child process, calling `on_stdout` for each
/// stdout line as it arrives.
///
/// Both pipes are read concurrently so a chatty stderr cannot block the
/// child. Returns once both pipes reach EOF.
pub(crate) async fn stream_child_output(
    child: &mut tokio::process::Child,
    on_stdout: &(dyn Fn(String) + Send + Sync),
) -> std::io::Result<CapturedOutput> {
    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Err(std::io::Error::other("child stdout/stderr not piped"));
    };

    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_reader = BufReader::new(stdout).lines();

    let mut captured = CapturedOutput::default();
    let mut stderr_done = false;
    let mut stdout_done = false;

    while !stderr_done || !stdout_done {
        tokio::select! {
            line = stderr_reader.next_line(), if !stderr_done => {
                match line? {
                    Some(line) => captured.stderr.push(line),
                    None => stderr_done = true,
                }
            }
            line = stdout_reader.next_line(), if !stdout_done => {
                match line? {
                    Some(line) => {
                        on_stdout(line.clone());
                        captured.stdout.push(line);
                    }
                    None => stdout_done = true,
                }
            }
        }
    }

    Ok(captured)
}
