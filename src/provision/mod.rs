//! Provisioning orchestration.
//!
//! `Provisioner::run` is a strictly linear sequence: config preflight, host
//! probe, baseline tools, Node.js, yq, credentials, config patch, service
//! launch. Each gate failure aborts the whole run; completed side effects
//! (installed packages, the backup file) stay in place, there is no
//! rollback across steps.

use std::path::PathBuf;

use crate::credentials::{self, DbCredentials};
use crate::error::Result;
use crate::install::{
    ensure_node, ensure_yq, install_baseline, node_version, Fetcher, NodeInstall, NodeSetupUrls,
    YqInstall, YQ_RELEASE_BASE,
};
use crate::patcher::ConfigPatcher;
use crate::probe::{probe_host, ArchTag, HostProbe, PackageManager};
use crate::service::{launch, AppSpec, LaunchOutcome};
use crate::shell::{is_elevated, CommandRunner};
use crate::ui::UserInterface;

/// Tunable paths and identifiers for a provisioning run.
///
/// Defaults provision the real application against the real system paths;
/// tests point everything at scratch directories.
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Project root: where `config.yaml` lives and the app runs from.
    pub root: PathBuf,
    /// The application to register and start.
    pub app: AppSpec,
    /// Directory for the systemd unit.
    pub unit_dir: PathBuf,
    /// NodeSource setup script locations.
    pub node_setup_urls: NodeSetupUrls,
    /// Where the yq binary lands when downloaded.
    pub yq_install_path: PathBuf,
    /// Release download base for the yq fallback.
    pub yq_release_base: String,
}

impl ProvisionOptions {
    /// Production defaults rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            app: AppSpec::default(),
            unit_dir: PathBuf::from("/etc/systemd/system"),
            node_setup_urls: NodeSetupUrls::default(),
            yq_install_path: PathBuf::from("/usr/local/bin/yq"),
            yq_release_base: YQ_RELEASE_BASE.to_string(),
        }
    }
}

/// What a completed run did.
#[derive(Debug)]
pub struct ProvisionReport {
    pub package_manager: PackageManager,
    pub arch: ArchTag,
    pub baseline_installed: bool,
    pub node: NodeInstall,
    pub yq: YqInstall,
    pub launch: LaunchOutcome,
}

/// Orchestrates one provisioning run.
pub struct Provisioner<'a> {
    runner: &'a dyn CommandRunner,
    ui: &'a mut dyn UserInterface,
    fetcher: Fetcher,
    options: ProvisionOptions,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner.
    pub fn new(
        runner: &'a dyn CommandRunner,
        ui: &'a mut dyn UserInterface,
        options: ProvisionOptions,
    ) -> Self {
        Self {
            runner,
            ui,
            fetcher: Fetcher::default(),
            options,
        }
    }

    /// Run the full provisioning sequence.
    pub fn run(&mut self) -> Result<ProvisionReport> {
        self.ui
            .show_header(&format!("Provisioning {}", self.options.app.name));

        // Fail before prompting or mutating anything when the config is
        // absent or malformed.
        let patcher = ConfigPatcher::new(&self.options.root);
        if let Some(advisory) = patcher.preflight()? {
            self.ui.message(&advisory);
        }

        let probe = self.probe_host()?;

        if !is_elevated() {
            self.ui
                .warning("Not running as root; package and service steps may fail");
        }

        let baseline_installed = self.install_baseline(probe);
        let node = self.ensure_node(probe)?;
        let yq = self.ensure_yq(probe)?;

        let creds = credentials::collect(self.ui)?;
        self.patch_config(&patcher, &creds)?;

        let launch = self.launch_service()?;
        self.summarize(&launch);

        Ok(ProvisionReport {
            package_manager: probe.package_manager,
            arch: probe.arch,
            baseline_installed,
            node,
            yq,
            launch,
        })
    }

    fn probe_host(&mut self) -> Result<HostProbe> {
        let mut spinner = self.ui.start_spinner("Probing host environment");
        match probe_host(self.runner) {
            Ok(probe) => {
                spinner.finish_success(&format!(
                    "Detected {} on {}",
                    probe.package_manager, probe.arch
                ));
                Ok(probe)
            }
            Err(e) => {
                spinner.finish_error("Host probe failed");
                Err(e)
            }
        }
    }

    fn install_baseline(&mut self, probe: HostProbe) -> bool {
        let mut spinner = self.ui.start_spinner("Installing baseline tools");
        let installed = install_baseline(self.runner, probe.package_manager);
        if installed {
            spinner.finish_success("Baseline tools installed");
        } else {
            // Explicitly tolerated: at least one of curl/wget is usually
            // present already.
            spinner.finish_skipped("Baseline tool install failed, continuing");
        }
        installed
    }

    fn ensure_node(&mut self, probe: HostProbe) -> Result<NodeInstall> {
        let mut spinner = self.ui.start_spinner("Checking Node.js runtime");
        match ensure_node(
            self.runner,
            &self.fetcher,
            probe.package_manager,
            &self.options.node_setup_urls,
        ) {
            Ok(NodeInstall::AlreadyPresent) => {
                let version = node_version(self.runner)
                    .map(|v| format!(" v{v}"))
                    .unwrap_or_default();
                spinner.finish_skipped(&format!("Node.js{} already installed", version));
                Ok(NodeInstall::AlreadyPresent)
            }
            Ok(NodeInstall::Installed) => {
                spinner.finish_success("Node.js installed");
                Ok(NodeInstall::Installed)
            }
            Err(e) => {
                spinner.finish_error("Node.js install failed");
                Err(e)
            }
        }
    }

    fn ensure_yq(&mut self, probe: HostProbe) -> Result<YqInstall> {
        let mut spinner = self.ui.start_spinner("Checking yq");
        let outcome = ensure_yq(
            self.runner,
            &self.fetcher,
            probe.package_manager,
            probe.arch,
            &self.options.yq_release_base,
            &self.options.yq_install_path,
        );
        match outcome {
            Ok(YqInstall::AlreadyPresent) => {
                spinner.finish_skipped("yq already installed");
                Ok(YqInstall::AlreadyPresent)
            }
            Ok(YqInstall::PackageManager) => {
                spinner.finish_success("yq installed from package manager");
                Ok(YqInstall::PackageManager)
            }
            Ok(YqInstall::BinaryDownload) => {
                spinner.finish_success("yq binary downloaded");
                Ok(YqInstall::BinaryDownload)
            }
            Err(e) => {
                spinner.finish_error("yq install failed");
                Err(e)
            }
        }
    }

    fn patch_config(&mut self, patcher: &ConfigPatcher, creds: &DbCredentials) -> Result<()> {
        let mut spinner = self.ui.start_spinner("Patching database configuration");
        match patcher.apply(creds, self.runner) {
            Ok(()) => {
                spinner.finish_success(&format!(
                    "Updated {} (backup at {})",
                    patcher.config_path().display(),
                    patcher.backup_path().display()
                ));
                Ok(())
            }
            Err(e) => {
                spinner.finish_error("Config patch failed");
                Err(e)
            }
        }
    }

    fn launch_service(&mut self) -> Result<LaunchOutcome> {
        let mut spinner = self.ui.start_spinner("Starting application");
        match launch(
            self.runner,
            &self.options.app,
            &self.options.root,
            &self.options.unit_dir,
        ) {
            Ok(outcome) => {
                match &outcome {
                    LaunchOutcome::Managed { .. } => {
                        spinner.finish_success("Service enabled and started")
                    }
                    LaunchOutcome::Detached { pid } => spinner.finish_success(&format!(
                        "Started detached background process (pid {pid})"
                    )),
                }
                Ok(outcome)
            }
            Err(e) => {
                spinner.finish_error("Service launch failed");
                Err(e)
            }
        }
    }

    fn summarize(&mut self, launch: &LaunchOutcome) {
        match launch {
            LaunchOutcome::Managed { unit_path } => {
                self.ui.success(&format!(
                    "{} provisioned as a managed service ({})",
                    self.options.app.name,
                    unit_path.display()
                ));
            }
            LaunchOutcome::Detached { .. } => {
                self.ui.success(&format!(
                    "{} provisioned; running unmanaged, logs in {}",
                    self.options.app.name,
                    self.options.app.log_name()
                ));
                self.ui
                    .warning("No service manager found: the app will not restart after reboot");
            }
        }
    }
}
