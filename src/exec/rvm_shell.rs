//! RVM login-shell runner
//!
//! RVM exposes `rvm`, `gem`, `bundle` through shell functions and PATH
//! tweaks that only exist after sourcing its profile script. Commands are
//! therefore run as `bash --login -c 'source "$0" && "$@"' <script> <cmd...>`:
//! the profile script and every argument travel as positional parameters,
//! never spliced into the script text.

use crate::error::{BundlerError, BundlerResult};
use crate::exec::command::CommandSpec;
use crate::exec::runner::CommandRunner;
use crate::exec::{build_error_output, stream_child_output};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Script passed to `bash -c`
const SHELL_SCRIPT: &str = r#"source "$0" && "$@""#;

/// Runs commands inside an RVM-enabled bash login shell
pub struct RvmShell {
    profile_script: PathBuf,
}

impl RvmShell {
    /// Create a runner for the RVM installation at `rvm_path`
    pub fn new(rvm_path: &Path) -> Self {
        Self {
            profile_script: rvm_path.join("profile.d").join("rvm"),
        }
    }

    /// Create a runner from the `rvm_path` variable exported by the RVM buildpack
    pub fn from_env() -> BundlerResult<Self> {
        let rvm_path = std::env::var_os("rvm_path")
            .filter(|v| !v.is_empty())
            .ok_or(BundlerError::RvmNotFound)?;
        Ok(Self::new(Path::new(&rvm_path)))
    }

    /// Path of the sourced profile script
    pub fn profile_script(&self) -> &Path {
        &self.profile_script
    }

    fn shell_command(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new("bash");
        cmd.arg("--login")
            .arg("-c")
            .arg(SHELL_SCRIPT)
            .arg(&self.profile_script)
            .arg(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.current_dir)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

#[async_trait]
impl CommandRunner for RvmShell {
    async fn run(&self, spec: &CommandSpec) -> BundlerResult<String> {
        let command = spec.to_string();
        info!("Executing: {}", command);
        debug!(
            "Shell: bash --login -c {:?} {} (cwd {})",
            SHELL_SCRIPT,
            self.profile_script.display(),
            spec.current_dir.display()
        );

        let mut child = self
            .shell_command(spec)
            .spawn()
            .map_err(|e| BundlerError::command_failed(&command, e))?;

        let output = stream_child_output(&mut child, &|line| info!("      {}", line))
            .await
            .map_err(|e| BundlerError::command_failed(&command, e))?;

        let status = child
            .wait()
            .await
            .map_err(|e| BundlerError::command_failed(&command, e))?;

        if status.success() {
            Ok(output.stdout.join("\n"))
        } else {
            Err(BundlerError::command_exec(
                command,
                status.code().unwrap_or(-1),
                build_error_output(&output.stdout, &output.stderr),
            ))
        }
    }

    fn runner_name(&self) -> &'static str {
        "RVM bash login shell"
    }
}
