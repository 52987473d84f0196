//! Bundler install steps

use crate::bundler::{major_version, BUNDLE_USER_CONFIG, RUBYGEMS_FOR_BUNDLER_1};
use crate::cache::LayerActions;
use crate::config::Config;
use crate::error::BundlerResult;
use crate::exec::{CommandRunner, CommandSpec};
use crate::puma;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Installs RubyGems, Bundler and the app's gems into the layer
pub struct BundlerInstaller<'a> {
    runner: &'a dyn CommandRunner,
    app_dir: PathBuf,
    version: String,
    major: u32,
    config: Config,
    env: Vec<(String, String)>,
}

impl<'a> BundlerInstaller<'a> {
    /// Create an installer for Bundler `version`.
    ///
    /// Every command gets `BUNDLE_USER_CONFIG=<user_config>` in its own
    /// environment. Fails when `version` has no numeric major part.
    pub fn new(
        runner: &'a dyn CommandRunner,
        app_dir: &Path,
        version: &str,
        config: Config,
        user_config: &Path,
    ) -> BundlerResult<Self> {
        Ok(Self {
            runner,
            app_dir: app_dir.to_path_buf(),
            version: version.to_string(),
            major: major_version(version)?,
            config,
            env: vec![(
                BUNDLE_USER_CONFIG.to_string(),
                user_config.to_string_lossy().into_owned(),
            )],
        })
    }

    fn command(&self, program: &str) -> CommandSpec {
        CommandSpec::new(program, &self.app_dir).envs(&self.env)
    }

    async fn run(&self, spec: CommandSpec) -> BundlerResult<()> {
        self.runner.run(&spec).await.map(|_| ())
    }

    /// RubyGems version to pin, if any
    fn rubygems_version(&self) -> Option<&'static str> {
        (self.major == 1).then_some(RUBYGEMS_FOR_BUNDLER_1)
    }

    async fn update_rubygems(&self) -> BundlerResult<()> {
        let mut install = self
            .command("gem")
            .args(["install", "-N", "rubygems-update"]);
        let mut update = self.command("gem").args(["update", "-N", "--system"]);
        if let Some(pinned) = self.rubygems_version() {
            install = install.args(["-v", pinned]);
            update = update.arg(pinned);
        }

        self.run(install).await?;
        self.run(update).await?;
        self.run(self.command("gem").arg("cleanup")).await
    }

    async fn install_bundler(&self) -> BundlerResult<()> {
        let mut spec = self
            .command("gem")
            .args(["install", "-N", "--default", "bundler"]);
        if !self.version.is_empty() {
            spec = spec.args(["-v", self.version.as_str()]);
        }
        self.run(spec).await
    }
}

#[async_trait]
impl LayerActions for BundlerInstaller<'_> {
    async fn install(&self, layer_path: &Path) -> BundlerResult<()> {
        self.update_rubygems().await?;
        puma::install_puma(&self.app_dir, &self.config).await?;
        self.install_bundler().await?;
        self.configure(layer_path).await?;
        self.run(self.command("bundle").arg("install")).await?;
        self.run(self.command("bundle").arg("clean")).await
    }

    async fn configure(&self, layer_path: &Path) -> BundlerResult<()> {
        info!("Setting Bundler path to {}", layer_path.display());
        let mut spec = self.command("bundle").arg("config");
        if self.major > 1 {
            spec = spec.arg("set");
        }
        let spec = spec
            .args(["--local", "path"])
            .arg(layer_path.to_string_lossy());
        self.run(spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PumaConfig;
    use crate::error::BundlerError;
    use crate::testing::FakeRunner;
    use tempfile::TempDir;

    const LAYER: &str = "/layers/rvm-bundler";
    const USER_CONFIG: &str = "/layers/rvm-bundler/config";

    fn installer<'a>(runner: &'a FakeRunner, app: &Path, version: &str) -> BundlerInstaller<'a> {
        BundlerInstaller::new(
            runner,
            app,
            version,
            Config::default(),
            Path::new(USER_CONFIG),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn bundler_2_install_sequence() {
        let app = TempDir::new().unwrap();
        let runner = FakeRunner::new();

        installer(&runner, app.path(), "2.1.4")
            .install(Path::new(LAYER))
            .await
            .unwrap();

        assert_eq!(
            runner.commands(),
            vec![
                "gem install -N rubygems-update",
                "gem update -N --system",
                "gem cleanup",
                "gem install -N --default bundler -v 2.1.4",
                "bundle config set --local path /layers/rvm-bundler",
                "bundle install",
                "bundle clean",
            ]
        );
    }

    #[tokio::test]
    async fn bundler_1_pins_rubygems() {
        let app = TempDir::new().unwrap();
        let runner = FakeRunner::new();

        installer(&runner, app.path(), "1.17.3")
            .install(Path::new(LAYER))
            .await
            .unwrap();

        assert_eq!(
            runner.commands(),
            vec![
                "gem install -N rubygems-update -v 3.0.8",
                "gem update -N --system 3.0.8",
                "gem cleanup",
                "gem install -N --default bundler -v 1.17.3",
                "bundle config --local path /layers/rvm-bundler",
                "bundle install",
                "bundle clean",
            ]
        );
    }

    #[tokio::test]
    async fn every_command_carries_user_config() {
        let app = TempDir::new().unwrap();
        let runner = FakeRunner::new();

        installer(&runner, app.path(), "2.1.4")
            .install(Path::new(LAYER))
            .await
            .unwrap();

        for call in runner.calls() {
            assert_eq!(
                call.env,
                vec![(BUNDLE_USER_CONFIG.to_string(), USER_CONFIG.to_string())]
            );
            assert_eq!(call.current_dir, app.path());
        }
    }

    #[tokio::test]
    async fn configure_only_sets_path() {
        let app = TempDir::new().unwrap();
        let runner = FakeRunner::new();

        installer(&runner, app.path(), "2.1.4")
            .configure(Path::new(LAYER))
            .await
            .unwrap();

        assert_eq!(
            runner.commands(),
            vec!["bundle config set --local path /layers/rvm-bundler"]
        );
    }

    #[tokio::test]
    async fn stops_at_first_failure() {
        let app = TempDir::new().unwrap();
        let runner = FakeRunner::failing_on("bundle install");

        let err = installer(&runner, app.path(), "2.1.4")
            .install(Path::new(LAYER))
            .await
            .unwrap_err();

        assert!(matches!(err, BundlerError::CommandExecution { code: 1, .. }));
        assert_eq!(runner.commands().last().unwrap(), "bundle install");
        assert!(!runner.commands().iter().any(|c| c == "bundle clean"));
    }

    #[tokio::test]
    async fn installs_puma_between_rubygems_and_bundler() {
        let app = TempDir::new().unwrap();
        std::fs::write(app.path().join("Gemfile"), "").unwrap();
        let runner = FakeRunner::failing_on("gem install -N --default bundler");
        let config = Config {
            install_puma: true,
            puma: PumaConfig {
                version: "4.3.5".into(),
                ..Default::default()
            },
            ..Default::default()
        };

        let installer =
            BundlerInstaller::new(&runner, app.path(), "2.1.4", config, Path::new(USER_CONFIG))
                .unwrap();
        installer.install(Path::new(LAYER)).await.unwrap_err();

        assert!(app.path().join("config/puma.rb").exists());
        assert!(std::fs::read_to_string(app.path().join("Gemfile"))
            .unwrap()
            .contains("gem \"puma\", \"4.3.5\""));
    }

    #[test]
    fn rejects_bad_version() {
        let runner = FakeRunner::new();
        let result = BundlerInstaller::new(
            &runner,
            Path::new("/app"),
            "latest",
            Config::default(),
            Path::new(USER_CONFIG),
        );
        assert!(matches!(result, Err(BundlerError::BundlerVersion { .. })));
    }
}
