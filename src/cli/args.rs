//! CLI argument definitions using clap derive

use crate::error::{BundlerError, BundlerResult};
use clap::{ArgAction, Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// RVM Bundler Cloud Native Buildpack
///
/// Installs Bundler and the application's gems into a cached layer of an
/// RVM managed Ruby.
#[derive(Parser, Debug)]
#[command(name = "rvm-bundler-cnb")]
#[command(author, version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Phase to run
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Buildpack root containing buildpack.toml
    #[arg(long, global = true, env = "CNB_BUILDPACK_DIR")]
    pub buildpack_dir: Option<PathBuf>,

    /// Application directory [default: current directory]
    #[arg(long, global = true)]
    pub app_dir: Option<PathBuf>,
}

/// Buildpack phases
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decide whether the buildpack applies and write the build plan
    Detect(DetectArgs),

    /// Install Bundler and gems into the layer
    Build(BuildArgs),
}

/// Arguments of `bin/detect`
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Platform directory
    pub platform: PathBuf,

    /// Build plan output file
    pub plan: PathBuf,
}

/// Arguments of `bin/build`
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Layers directory for this buildpack
    pub layers: PathBuf,

    /// Platform directory
    pub platform: PathBuf,

    /// Buildpack plan input file
    pub plan: PathBuf,
}

impl Cli {
    /// Application directory, defaulting to the working directory
    pub fn app_dir(&self) -> BundlerResult<PathBuf> {
        match &self.app_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir()
                .map_err(|e| BundlerError::io("getting current directory", e)),
        }
    }

    /// Buildpack root.
    ///
    /// Without `--buildpack-dir` / `CNB_BUILDPACK_DIR`, the executable is
    /// assumed to live in `<root>/bin/`.
    pub fn buildpack_dir(&self) -> BundlerResult<PathBuf> {
        if let Some(dir) = &self.buildpack_dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe()
            .map_err(|e| BundlerError::io("locating the buildpack executable", e))?;
        Ok(exe
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default())
    }
}

/// Map `bin/detect` and `bin/build` invocations onto subcommands.
///
/// The lifecycle calls the phase executables directly, usually symlinks to
/// this binary; their file name becomes the subcommand.
pub fn normalize_args(mut args: Vec<OsString>) -> Vec<OsString> {
    let phase = args
        .first()
        .and_then(|argv0| Path::new(argv0).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| matches!(*name, "detect" | "build"))
        .map(OsString::from);

    if let Some(phase) = phase {
        args.insert(1, phase);
    }
    args
}
