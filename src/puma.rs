//! Puma web server support
//!
//! Writes a default `config/puma.rb`, makes sure the Gemfile pulls in the
//! `puma` gem, and offers `bundle exec puma` as the `web` process unless
//! the app already declares one in its Procfile.

use crate::cnb::Process;
use crate::config::{Config, PumaConfig};
use crate::error::{BundlerError, BundlerResult};
use crate::parse::{gemfile_lock, procfile, GEMFILE, GEMFILE_LOCK, PROCFILE};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Puma configuration path relative to the app root
pub const PUMA_CONFIG: &str = "config/puma.rb";

/// Command of the contributed `web` process
pub const WEB_COMMAND: &str = "bundle exec puma";

/// Render `config/puma.rb` from the buildpack settings
pub fn render_config(puma: &PumaConfig) -> String {
    let mut rb = String::new();
    rb.push_str(&format!("bind '{}'\n", puma.bind));
    rb.push_str(&format!("workers {}\n", puma.workers));
    rb.push_str(&format!("threads {}, {}\n", puma.threads, puma.threads));
    rb.push_str("log_requests true\n");
    if puma.preload {
        rb.push_str("preload_app!\n");
    }
    rb.push_str("activate_control_app 'unix:///tmp/pumactl.sock', { no_token: true }\n");
    rb
}

/// Install Puma into the app when enabled.
///
/// An existing `config/puma.rb` is kept. The Gemfile is only extended when
/// `Gemfile.lock` does not already lock `puma`.
pub async fn install_puma(app_dir: &Path, config: &Config) -> BundlerResult<()> {
    if !config.install_puma {
        return Ok(());
    }

    let config_path = app_dir.join(PUMA_CONFIG);
    if config_path.exists() {
        info!("Using {} supplied by application", PUMA_CONFIG);
    } else {
        info!("Creating configuration file for Puma at: '{}'", config_path.display());
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BundlerError::io(format!("creating {}", parent.display()), e))?;
        }
        fs::write(&config_path, render_config(&config.puma))
            .await
            .map_err(|e| BundlerError::io(format!("writing {}", config_path.display()), e))?;
    }

    if gemfile_lock::lock_file_has_gem(&app_dir.join(GEMFILE_LOCK), "puma")? {
        info!("Puma is present in {}", GEMFILE_LOCK);
        return Ok(());
    }

    info!("Adding Puma version: '{}' to {}", config.puma.version, GEMFILE);
    let gemfile = app_dir.join(GEMFILE);
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&gemfile)
        .await
        .map_err(|e| BundlerError::io(format!("opening {}", gemfile.display()), e))?;
    file.write_all(format!("\ngem \"puma\", \"{}\"\n", config.puma.version).as_bytes())
        .await
        .map_err(|e| BundlerError::io(format!("appending to {}", gemfile.display()), e))?;
    file.flush()
        .await
        .map_err(|e| BundlerError::io(format!("flushing {}", gemfile.display()), e))
}

/// The `web` process to contribute, unless the Procfile declares one
pub fn web_process(app_dir: &Path) -> BundlerResult<Option<Process>> {
    if procfile::has_web_process(&app_dir.join(PROCFILE))? {
        info!("Procfile already declares a 'web' process, not contributing one");
        return Ok(None);
    }

    info!("Returning process type 'web' with command '{}'", WEB_COMMAND);
    Ok(Some(Process::new("web", WEB_COMMAND)))
}
