//! Configuration file loading for suitefix.
//!
//! Discovers and loads `suitefix.toml` from the repository root.
//! CLI arguments take precedence over the file, the file over built-in defaults.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use suitefix_domain::rewrites::status_expectation::{EXPECT_BAD_REQUEST, EXPECT_UNAUTHORIZED};
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "suitefix.toml";

/// Directory holding the security tests, relative to the repo root.
pub const DEFAULT_SECURITY_DIR: &str = "backend/src/test/java/com/flogin/security";

pub const DEFAULT_CONSTRUCTOR_FILES: [&str; 6] = [
    "SqlInjectionTest.java",
    "XssSecurityTest.java",
    "CsrfSecurityTest.java",
    "AuthenticationBypassTest.java",
    "InputValidationTest.java",
    "SecurityBestPracticesTest.java",
];

pub const DEFAULT_STATUS_FILE: &str = "SqlInjectionTest.java";

/// Top-level configuration from suitefix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SuitefixConfig {
    pub constructors: ConstructorsConfig,
    pub status_codes: StatusCodesConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConstructorsConfig {
    /// Directory of the target files.
    pub dir: Option<Utf8PathBuf>,

    /// Target file names inside `dir`, processed in order.
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusCodesConfig {
    /// File to update.
    pub file: Option<Utf8PathBuf>,

    /// Expectation to replace.
    pub from: Option<String>,

    /// Replacement expectation.
    pub to: Option<String>,
}

/// Discover the suitefix.toml config file in the repository root.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<SuitefixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<SuitefixConfig> {
    let config: SuitefixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<SuitefixConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(SuitefixConfig::default()),
    }
}

/// Resolved targets of the `constructors` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorTargets {
    pub dir: Utf8PathBuf,
    pub files: Vec<String>,
}

/// Resolved target of the `status-codes` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTarget {
    pub file: Utf8PathBuf,
    pub from: String,
    pub to: String,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: SuitefixConfig,
    repo_root: Utf8PathBuf,
}

impl ConfigMerger {
    pub fn new(config: SuitefixConfig, repo_root: &Utf8Path) -> Self {
        Self {
            config,
            repo_root: repo_root.to_path_buf(),
        }
    }

    /// CLI `files` replace the configured list rather than extending it.
    pub fn merge_constructor_args(
        &self,
        cli_dir: Option<&Utf8Path>,
        cli_files: &[String],
    ) -> ConstructorTargets {
        let dir = cli_dir
            .map(Utf8Path::to_path_buf)
            .or_else(|| self.config.constructors.dir.clone())
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_SECURITY_DIR));

        let files = if !cli_files.is_empty() {
            cli_files.to_vec()
        } else {
            self.config.constructors.files.clone().unwrap_or_else(|| {
                DEFAULT_CONSTRUCTOR_FILES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
        };

        ConstructorTargets {
            dir: self.resolve(&dir),
            files,
        }
    }

    pub fn merge_status_args(&self, cli_file: Option<&Utf8Path>) -> StatusTarget {
        let file = cli_file
            .map(Utf8Path::to_path_buf)
            .or_else(|| self.config.status_codes.file.clone())
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_SECURITY_DIR).join(DEFAULT_STATUS_FILE));

        StatusTarget {
            file: self.resolve(&file),
            from: self
                .config
                .status_codes
                .from
                .clone()
                .unwrap_or_else(|| EXPECT_UNAUTHORIZED.to_string()),
            to: self
                .config
                .status_codes
                .to
                .clone()
                .unwrap_or_else(|| EXPECT_BAD_REQUEST.to_string()),
        }
    }

    fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let contents = r#"
[constructors]
dir = "src/test/java/security"
files = ["ATest.java", "BTest.java"]

[status_codes]
file = "src/test/java/security/ATest.java"
from = ".andExpect(status().isForbidden())"
to = ".andExpect(status().isBadRequest())"
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(
            config.constructors.dir,
            Some(Utf8PathBuf::from("src/test/java/security"))
        );
        assert_eq!(
            config.constructors.files,
            Some(vec!["ATest.java".to_string(), "BTest.java".to_string()])
        );
        assert_eq!(
            config.status_codes.from.as_deref(),
            Some(".andExpect(status().isForbidden())")
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.constructors.dir.is_none());
        assert!(config.status_codes.file.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_types() {
        assert!(parse_config("[constructors]\nfiles = 3\n").is_err());
    }

    #[test]
    fn test_defaults_resolve_under_repo_root() {
        let merger = ConfigMerger::new(SuitefixConfig::default(), Utf8Path::new("/repo"));

        let targets = merger.merge_constructor_args(None, &[]);
        assert_eq!(
            targets.dir,
            Utf8PathBuf::from("/repo/backend/src/test/java/com/flogin/security")
        );
        assert_eq!(targets.files.len(), 6);
        assert_eq!(targets.files[0], "SqlInjectionTest.java");

        let status = merger.merge_status_args(None);
        assert_eq!(
            status.file,
            Utf8PathBuf::from(
                "/repo/backend/src/test/java/com/flogin/security/SqlInjectionTest.java"
            )
        );
        assert_eq!(status.from, EXPECT_UNAUTHORIZED);
        assert_eq!(status.to, EXPECT_BAD_REQUEST);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = SuitefixConfig {
            constructors: ConstructorsConfig {
                dir: Some(Utf8PathBuf::from("cfg/dir")),
                files: Some(vec!["Cfg.java".to_string()]),
            },
            status_codes: StatusCodesConfig {
                file: Some(Utf8PathBuf::from("cfg/Status.java")),
                ..Default::default()
            },
        };
        let merger = ConfigMerger::new(config, Utf8Path::new("/repo"));

        let from_config = merger.merge_constructor_args(None, &[]);
        assert_eq!(from_config.dir, Utf8PathBuf::from("/repo/cfg/dir"));
        assert_eq!(from_config.files, vec!["Cfg.java".to_string()]);

        let from_cli = merger
            .merge_constructor_args(Some(Utf8Path::new("/abs/dir")), &["Cli.java".to_string()]);
        assert_eq!(from_cli.dir, Utf8PathBuf::from("/abs/dir"));
        assert_eq!(from_cli.files, vec!["Cli.java".to_string()]);

        assert_eq!(
            merger.merge_status_args(None).file,
            Utf8PathBuf::from("/repo/cfg/Status.java")
        );
        assert_eq!(
            merger
                .merge_status_args(Some(Utf8Path::new("other/X.java")))
                .file,
            Utf8PathBuf::from("/repo/other/X.java")
        );
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
        assert!(load_or_default(&root).is_ok());
    }
}
