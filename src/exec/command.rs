//! Typed command descriptions
//!
//! A `CommandSpec` is a program plus an ordered argument list. Nothing is
//! ever concatenated into a shell string, so arguments need no quoting.

use std::fmt;
use std::path::{Path, PathBuf};

/// A command to run in the build environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name, resolved through PATH (or an RVM shell function)
    pub program: String,
    /// Ordered arguments
    pub args: Vec<String>,
    /// Extra environment variables for this invocation only
    pub env: Vec<(String, String)>,
    /// Working directory
    pub current_dir: PathBuf,
}

impl CommandSpec {
    /// Create a command with no arguments running in `current_dir`
    pub fn new(program: impl Into<String>, current_dir: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: current_dir.to_path_buf(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for this invocation
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set several environment variables for this invocation
    pub fn envs(mut self, vars: &[(String, String)]) -> Self {
        self.env.extend(vars.iter().cloned());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
