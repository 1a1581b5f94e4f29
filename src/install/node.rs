//! Node.js runtime installation.
//!
//! Re-provisioning a host must be idempotent: a present runtime is left
//! alone regardless of version (version management is out of scope).

use std::io::Write;

use regex::Regex;

use crate::error::Result;
use crate::probe::{PackageFamily, PackageManager};
use crate::shell::CommandRunner;

use super::fetch::Fetcher;
use super::packages::install_packages;

/// NodeSource setup script for Debian-family hosts.
pub const NODE_SETUP_DEB: &str = "https://deb.nodesource.com/setup_lts.x";

/// NodeSource setup script for RedHat-family hosts.
pub const NODE_SETUP_RPM: &str = "https://rpm.nodesource.com/setup_lts.x";

/// Setup script locations, per manager family.
///
/// A parameter (like the yq release base) so tests can point the fetch at a
/// local server.
#[derive(Debug, Clone)]
pub struct NodeSetupUrls {
    pub deb: String,
    pub rpm: String,
}

impl Default for NodeSetupUrls {
    fn default() -> Self {
        Self {
            deb: NODE_SETUP_DEB.to_string(),
            rpm: NODE_SETUP_RPM.to_string(),
        }
    }
}

impl NodeSetupUrls {
    /// Setup script URL for a manager family, if one applies.
    ///
    /// Suse and Arch hosts install straight from their repositories.
    pub fn for_family(&self, family: PackageFamily) -> Option<&str> {
        match family {
            PackageFamily::Debian => Some(&self.deb),
            PackageFamily::RedHat => Some(&self.rpm),
            PackageFamily::Suse | PackageFamily::Arch => None,
        }
    }
}

/// The installed Node.js version, if the runtime is present.
pub fn node_version(runner: &dyn CommandRunner) -> Option<String> {
    let output = runner.capture("node --version").ok()?;
    let re = Regex::new(r"v(\d+\.\d+\.\d+)").ok()?;
    re.captures(&output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Outcome of ensuring the Node.js runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeInstall {
    /// Runtime was already present.
    AlreadyPresent,
    /// Installed via setup script + package manager.
    Installed,
}

/// Install Node.js if it is not already present.
pub fn ensure_node(
    runner: &dyn CommandRunner,
    fetcher: &Fetcher,
    manager: PackageManager,
    setup_urls: &NodeSetupUrls,
) -> Result<NodeInstall> {
    if let Some(version) = node_version(runner) {
        tracing::info!("Node.js v{} already installed, skipping", version);
        return Ok(NodeInstall::AlreadyPresent);
    }

    if let Some(url) = setup_urls.for_family(manager.family()) {
        tracing::info!("Fetching Node.js setup script from {}", url);
        let script = fetcher.fetch_text(url)?;

        // Exclusively-created file with a random name: the script runs
        // with root privilege, so a predictable /tmp path is off limits.
        let mut script_file = tempfile::NamedTempFile::new()?;
        script_file.write_all(script.as_bytes())?;
        script_file.flush()?;

        runner.capture(&format!("bash {}", script_file.path().display()))?;
        install_packages(runner, manager, &["nodejs"])?;
        // script_file is removed on drop
    } else {
        install_packages(runner, manager, &["nodejs", "npm"])?;
    }

    Ok(NodeInstall::Installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use httpmock::prelude::*;
    use std::path::PathBuf;

    fn setup_urls_on(server: &MockServer) -> NodeSetupUrls {
        NodeSetupUrls {
            deb: server.url("/deb/setup_lts.x"),
            rpm: server.url("/rpm/setup_lts.x"),
        }
    }

    #[test]
    fn version_is_extracted_from_output() {
        let runner = MockRunner::new();
        runner.succeed_with("node --version", "v22.11.0\n");
        assert_eq!(node_version(&runner).as_deref(), Some("22.11.0"));
    }

    #[test]
    fn missing_runtime_has_no_version() {
        let runner = MockRunner::new();
        runner.fail_on("node --version", 127);
        assert_eq!(node_version(&runner), None);
    }

    #[test]
    fn present_runtime_is_skipped() {
        let runner = MockRunner::new();
        runner.succeed_with("node --version", "v20.9.0\n");
        let fetcher = Fetcher::default();
        let outcome = ensure_node(
            &runner,
            &fetcher,
            PackageManager::Apt,
            &NodeSetupUrls::default(),
        )
        .unwrap();
        assert_eq!(outcome, NodeInstall::AlreadyPresent);
        assert!(!runner.ran("apt-get install"));
    }

    #[test]
    fn debian_fetches_setup_script_and_installs() {
        let server = MockServer::start();
        let setup = server.mock(|when, then| {
            when.method(GET).path("/deb/setup_lts.x");
            then.status(200).body("#!/bin/bash\nexit 0\n");
        });

        let runner = MockRunner::new();
        runner.fail_on("node --version", 127);
        let fetcher = Fetcher::default();

        let outcome = ensure_node(
            &runner,
            &fetcher,
            PackageManager::Apt,
            &setup_urls_on(&server),
        )
        .unwrap();

        assert_eq!(outcome, NodeInstall::Installed);
        setup.assert();

        let commands = runner.commands();
        let bash = commands
            .iter()
            .position(|c| c.starts_with("bash "))
            .expect("setup script was not run");
        let install = commands
            .iter()
            .position(|c| c.contains("apt-get install -y nodejs"))
            .expect("nodejs was not installed");
        assert!(bash < install, "script must run before install: {commands:?}");

        // the script file is unique per run and removed afterwards
        let script_path = PathBuf::from(commands[bash].trim_start_matches("bash "));
        assert_ne!(script_path.file_name().unwrap(), "nodesource_setup.sh");
        assert!(!script_path.exists());
    }

    #[test]
    fn redhat_uses_the_rpm_setup_script() {
        let server = MockServer::start();
        let setup = server.mock(|when, then| {
            when.method(GET).path("/rpm/setup_lts.x");
            then.status(200).body("#!/bin/bash\nexit 0\n");
        });

        let runner = MockRunner::new();
        runner.fail_on("node --version", 127);
        let fetcher = Fetcher::default();

        ensure_node(
            &runner,
            &fetcher,
            PackageManager::Yum,
            &setup_urls_on(&server),
        )
        .unwrap();

        setup.assert();
        assert!(runner.ran("yum install -y nodejs"));
    }

    #[test]
    fn arch_installs_from_repositories() {
        let runner = MockRunner::new();
        runner.fail_on("node --version", 127);
        let fetcher = Fetcher::default();
        let outcome = ensure_node(
            &runner,
            &fetcher,
            PackageManager::Pacman,
            &NodeSetupUrls::default(),
        )
        .unwrap();
        assert_eq!(outcome, NodeInstall::Installed);
        assert!(runner.ran("pacman -Sy --noconfirm nodejs npm"));
    }

    #[test]
    fn suse_installs_from_repositories() {
        let runner = MockRunner::new();
        runner.fail_on("node --version", 127);
        let fetcher = Fetcher::default();
        ensure_node(
            &runner,
            &fetcher,
            PackageManager::Zypper,
            &NodeSetupUrls::default(),
        )
        .unwrap();
        assert!(runner.ran("zypper --non-interactive install nodejs npm"));
    }

    #[test]
    fn families_map_to_setup_scripts() {
        let urls = NodeSetupUrls::default();
        assert_eq!(urls.for_family(PackageFamily::Debian), Some(NODE_SETUP_DEB));
        assert_eq!(urls.for_family(PackageFamily::RedHat), Some(NODE_SETUP_RPM));
        assert_eq!(urls.for_family(PackageFamily::Suse), None);
        assert_eq!(urls.for_family(PackageFamily::Arch), None);
    }
}
