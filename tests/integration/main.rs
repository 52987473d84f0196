//! Integration tests for the RVM Bundler buildpack

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const BUILDPACK_TOML: &str = r#"
api = "0.7"

[buildpack]
id = "com.avarteq.rvm-bundler"
name = "RVM Bundler Buildpack"
version = "0.3.0"

[metadata.configuration]
default_bundler_version = "2.1.4"
"#;

    fn buildpack() -> Command {
        cargo_bin_cmd!("rvm-bundler-cnb")
    }

    struct Workspace {
        app: TempDir,
        buildpack: TempDir,
        platform: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let ws = Self {
                app: TempDir::new().unwrap(),
                buildpack: TempDir::new().unwrap(),
                platform: TempDir::new().unwrap(),
            };
            fs::write(ws.buildpack.path().join("buildpack.toml"), BUILDPACK_TOML).unwrap();
            ws
        }

        fn write(&self, name: &str, content: &str) {
            fs::write(self.app.path().join(name), content).unwrap();
        }

        fn plan(&self) -> std::path::PathBuf {
            self.platform.path().join("plan.toml")
        }

        fn cmd(&self) -> Command {
            let mut cmd = buildpack();
            cmd.current_dir(self.app.path())
                .env("CNB_BUILDPACK_DIR", self.buildpack.path());
            cmd
        }

        fn detect(&self) -> assert_cmd::assert::Assert {
            self.cmd()
                .arg("detect")
                .arg(self.platform.path())
                .arg(self.plan())
                .assert()
        }

        fn plan_version(&self) -> String {
            let plan: toml::Table = toml::from_str(&fs::read_to_string(self.plan()).unwrap()).unwrap();
            plan["requires"][0]["metadata"]["rvm_bundler_version"]
                .as_str()
                .unwrap()
                .to_string()
        }
    }

    #[test]
    fn help_displays() {
        buildpack()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("RVM Bundler Cloud Native Buildpack"));
    }

    #[test]
    fn version_displays() {
        buildpack()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("rvm-bundler-cnb"));
    }

    #[test]
    fn detect_without_gemfile_fails_with_100() {
        let ws = Workspace::new();
        ws.detect()
            .code(100)
            .stderr(predicate::str::contains("No Gemfile found"));
        assert!(!ws.plan().exists());
    }

    #[test]
    fn detect_writes_default_version() {
        let ws = Workspace::new();
        ws.write("Gemfile", "source 'https://rubygems.org'\n");

        ws.detect().success();

        assert_eq!(ws.plan_version(), "2.1.4");
    }

    #[test]
    fn detect_prefers_buildpack_yml() {
        let ws = Workspace::new();
        ws.write("Gemfile", "");
        ws.write("Gemfile.lock", "BUNDLED WITH\n   1.17.3\n");

        ws.detect().success();
        assert_eq!(ws.plan_version(), "1.17.3");

        ws.write("buildpack.yml", "rvm_bundler:\n  bundler_version: \"2.0.2\"\n");
        ws.detect().success();
        assert_eq!(ws.plan_version(), "2.0.2");
    }

    #[test]
    fn detect_with_explicit_app_dir() {
        let ws = Workspace::new();
        ws.write("Gemfile", "");
        let elsewhere = TempDir::new().unwrap();

        buildpack()
            .current_dir(elsewhere.path())
            .env("CNB_BUILDPACK_DIR", ws.buildpack.path())
            .arg("--app-dir")
            .arg(ws.app.path())
            .arg("detect")
            .arg(ws.platform.path())
            .arg(ws.plan())
            .assert()
            .success();
    }

    #[test]
    fn detect_without_descriptor_errors() {
        let ws = Workspace::new();
        ws.write("Gemfile", "");
        fs::remove_file(ws.buildpack.path().join("buildpack.toml")).unwrap();

        ws.detect()
            .code(1)
            .stderr(predicate::str::contains("Buildpack descriptor not found"))
            .stderr(predicate::str::contains("CNB_BUILDPACK_DIR"));
    }

    #[test]
    fn build_without_rvm_errors() {
        let ws = Workspace::new();
        ws.write("Gemfile", "");
        fs::write(ws.plan(), "").unwrap();
        let layers = TempDir::new().unwrap();

        ws.cmd()
            .env_remove("rvm_path")
            .arg("build")
            .arg(layers.path())
            .arg(ws.platform.path())
            .arg(ws.plan())
            .assert()
            .code(1)
            .stderr(predicate::str::contains("RVM not found"));
    }

    /// An RVM profile script whose `rvm`, `gem` and `bundle` are shell
    /// functions that only log their arguments.
    #[cfg(unix)]
    fn fake_rvm(dir: &Path, log: &Path) {
        let profile = dir.join("profile.d");
        fs::create_dir_all(&profile).unwrap();
        fs::write(
            profile.join("rvm"),
            format!(
                r#"
rvm() {{ echo "ruby-2.7.1"; }}
gem() {{ echo "gem $*" >> "{log}"; }}
bundle() {{ echo "bundle $* [$BUNDLE_USER_CONFIG]" >> "{log}"; }}
"#,
                log = log.display()
            ),
        )
        .unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn build_installs_then_reuses() {
        let ws = Workspace::new();
        ws.write("Gemfile", "gem 'rack'\n");
        ws.write("Gemfile.lock", "rack (2.2.3)\n");
        fs::write(ws.plan(), "").unwrap();
        let layers = TempDir::new().unwrap();
        let rvm = TempDir::new().unwrap();
        let log = rvm.path().join("calls.log");
        fake_rvm(rvm.path(), &log);

        let run = || {
            ws.cmd()
                .env("rvm_path", rvm.path())
                .arg("build")
                .arg(layers.path())
                .arg(ws.platform.path())
                .arg(ws.plan())
                .assert()
                .success()
        };

        run().stdout(predicate::str::contains("Installing Bundler 2.1.4"));
        let calls = fs::read_to_string(&log).unwrap();
        assert!(calls.contains("gem install -N --default bundler -v 2.1.4"));
        assert!(calls.contains(&format!(
            "bundle install [{}]",
            layers.path().join("rvm-bundler/config").display()
        )));
        assert!(layers.path().join("rvm-bundler.toml").exists());
        assert!(layers.path().join("launch.toml").exists());

        fs::remove_file(&log).unwrap();
        run().stdout(predicate::str::contains("Reusing cached layer"));
        let calls = fs::read_to_string(&log).unwrap();
        assert!(calls.starts_with("bundle config set --local path"));
        assert!(!calls.contains("bundle install"));
    }
}
