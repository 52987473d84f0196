//! RVM Bundler buildpack
//!
//! Entry point for `bin/detect` and `bin/build`.

use clap::Parser;
use console::style;
use rvm_bundler_cnb::cli::{normalize_args, Cli, Commands};
use rvm_bundler_cnb::cnb::DETECT_FAIL_EXIT_CODE;
use rvm_bundler_cnb::error::{BundlerError, BundlerResult};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_detect_failure() => {
            eprintln!("{}", style(&e).dim());
            ExitCode::from(DETECT_FAIL_EXIT_CODE)
        }
        Err(e) => report(&e),
    }
}

fn report(e: &BundlerError) -> ExitCode {
    eprintln!("{} {}", style("Error:").red().bold(), e);
    if let Some(hint) = e.hint() {
        eprintln!("{} {}", style("Hint:").yellow(), hint);
    }
    ExitCode::FAILURE
}

fn init_logging(verbose: u8) {
    // 0 = info, 1 = debug, 2+ = trace; BP_LOG_LEVEL=debug raises 0 to debug
    let debug_env = std::env::var("BP_LOG_LEVEL")
        .map(|v| v.eq_ignore_ascii_case("debug"))
        .unwrap_or(false);
    let filter = match (verbose, debug_env) {
        (0, false) => EnvFilter::new("rvm_bundler_cnb=info"),
        (0, true) | (1, _) => EnvFilter::new("rvm_bundler_cnb=debug"),
        _ => EnvFilter::new("rvm_bundler_cnb=trace"),
    };

    let json = std::env::var("BP_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run() -> BundlerResult<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os().collect()));
    init_logging(cli.verbose);

    let app_dir = cli.app_dir()?;
    let buildpack_dir = cli.buildpack_dir()?;
    debug!(
        "App dir {}, buildpack dir {}",
        app_dir.display(),
        buildpack_dir.display()
    );

    match cli.command {
        Commands::Detect(args) => {
            rvm_bundler_cnb::cli::commands::detect(args, &app_dir, &buildpack_dir).await
        }
        Commands::Build(args) => {
            rvm_bundler_cnb::cli::commands::build(args, &app_dir, &buildpack_dir).await
        }
    }
}
