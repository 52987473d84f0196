//! Command runner abstraction
//!
//! The decision engine and the installer only ever see this trait, so tests
//! can substitute a recording fake and never spawn a process.

use crate::error::BundlerResult;
use crate::exec::command::CommandSpec;
use async_trait::async_trait;

/// Runs build-environment commands to completion
///
/// Each call blocks (asynchronously) until the child exits and its output
/// is fully drained. There is no timeout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command and return its captured stdout.
    ///
    /// A non-zero exit status is returned as `BundlerError::CommandExecution`.
    async fn run(&self, spec: &CommandSpec) -> BundlerResult<String>;

    /// Human-readable runner name for logs
    fn runner_name(&self) -> &'static str;
}
