//! Configuration patching.
//!
//! The application config lives at a fixed relative path (`config.yaml`).
//! Patching backs the file up to `config.yaml.bak`, then hands one `yq -i`
//! invocation the five `database.*` fields. Credential values travel as
//! environment variables referenced with `strenv`/`env` inside the yq
//! expression, so no secret ever appears on a command line or in a process
//! listing; `env()` also coerces the port to a YAML number. Every key
//! outside `database.*` is untouched, and partial-write atomicity is
//! delegated to yq's in-place edit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::credentials::DbCredentials;
use crate::error::{BerthError, Result};
use crate::shell::{CommandOptions, CommandRunner};

/// Fixed config file name, relative to the project root.
pub const CONFIG_FILE: &str = "config.yaml";

/// yq expression setting exactly the five database fields.
const YQ_EXPRESSION: &str = "\
.database.host = strenv(BERTH_DB_HOST) | \
.database.port = env(BERTH_DB_PORT) | \
.database.user = strenv(BERTH_DB_USER) | \
.database.password = strenv(BERTH_DB_PASSWORD) | \
.database.database = strenv(BERTH_DB_NAME)";

/// Patches the database section of the application config.
#[derive(Debug, Clone)]
pub struct ConfigPatcher {
    config_path: PathBuf,
}

impl ConfigPatcher {
    /// Create a patcher for the config under the given project root.
    pub fn new(root: &Path) -> Self {
        Self {
            config_path: root.join(CONFIG_FILE),
        }
    }

    /// Path of the config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Path of the backup written before patching.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .config_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        self.config_path.with_file_name(name)
    }

    /// Verify the config exists and parses as a YAML mapping.
    ///
    /// Runs before any prompt or package mutation. Returns an advisory
    /// message when the file has no `database` section yet.
    pub fn preflight(&self) -> Result<Option<String>> {
        self.verify_exists()?;

        let content = std::fs::read_to_string(&self.config_path)?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| BerthError::ConfigParseError {
                path: self.config_path.clone(),
                message: e.to_string(),
            })?;

        if value.as_mapping().is_none() {
            return Err(BerthError::ConfigParseError {
                path: self.config_path.clone(),
                message: "top-level document is not a mapping".to_string(),
            });
        }

        if value.get("database").is_none() {
            return Ok(Some(
                "config has no 'database' section yet; it will be created".to_string(),
            ));
        }
        Ok(None)
    }

    /// Back up the config and patch the five `database.*` fields.
    pub fn apply(&self, creds: &DbCredentials, runner: &dyn CommandRunner) -> Result<()> {
        self.verify_exists()?;

        // Overwrites any previous backup.
        std::fs::copy(&self.config_path, self.backup_path())?;
        tracing::debug!("Backed up config to {}", self.backup_path().display());

        let command = format!("yq -i '{}' '{}'", YQ_EXPRESSION, self.config_path.display());
        let mut options = CommandOptions::quiet();
        options.env = credential_env(creds);

        let result = runner.run(&command, &options)?;
        if result.success {
            Ok(())
        } else {
            Err(BerthError::CommandFailed {
                command: "yq -i <database patch>".to_string(),
                code: result.exit_code,
            })
        }
    }

    fn verify_exists(&self) -> Result<()> {
        if !self.config_path.is_file() {
            return Err(BerthError::ConfigNotFound {
                path: self.config_path.clone(),
            });
        }
        Ok(())
    }
}

fn credential_env(creds: &DbCredentials) -> HashMap<String, String> {
    HashMap::from([
        ("BERTH_DB_HOST".to_string(), creds.host.clone()),
        ("BERTH_DB_PORT".to_string(), creds.port.to_string()),
        ("BERTH_DB_USER".to_string(), creds.user.clone()),
        ("BERTH_DB_PASSWORD".to_string(), creds.password.clone()),
        ("BERTH_DB_NAME".to_string(), creds.database.clone()),
    ])
}
