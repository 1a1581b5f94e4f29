//! yq installation.
//!
//! yq performs the structural in-place edit of `config.yaml`. Not every
//! distribution packages it, so the package manager attempt falls back to
//! downloading the prebuilt release binary for the detected architecture.

use std::path::Path;

use crate::error::Result;
use crate::probe::{ArchTag, PackageManager};
use crate::shell::CommandRunner;

use super::fetch::Fetcher;
use super::packages::install_packages;

/// Release download base for the yq binary fallback.
pub const YQ_RELEASE_BASE: &str = "https://github.com/mikefarah/yq/releases/latest/download";

/// Outcome of ensuring yq.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YqInstall {
    /// yq was already on PATH.
    AlreadyPresent,
    /// Installed through the system package manager.
    PackageManager,
    /// Downloaded as a prebuilt binary.
    BinaryDownload,
}

/// Whether yq is available on PATH.
pub fn yq_available(runner: &dyn CommandRunner) -> bool {
    runner.check("command -v yq")
}

/// Install yq if it is not already present.
///
/// `release_base` and `install_path` are parameters so tests can point the
/// fallback at a local server and a scratch directory.
pub fn ensure_yq(
    runner: &dyn CommandRunner,
    fetcher: &Fetcher,
    manager: PackageManager,
    arch: ArchTag,
    release_base: &str,
    install_path: &Path,
) -> Result<YqInstall> {
    if yq_available(runner) {
        tracing::info!("yq already installed, skipping");
        return Ok(YqInstall::AlreadyPresent);
    }

    match install_packages(runner, manager, &["yq"]) {
        Ok(()) => Ok(YqInstall::PackageManager),
        Err(e) => {
            tracing::debug!("Package manager has no yq ({}), downloading binary", e);
            download_yq(fetcher, arch, release_base, install_path)?;
            Ok(YqInstall::BinaryDownload)
        }
    }
}

fn download_yq(
    fetcher: &Fetcher,
    arch: ArchTag,
    release_base: &str,
    install_path: &Path,
) -> Result<()> {
    let url = format!("{}/yq_linux_{}", release_base, arch.yq_suffix());
    tracing::info!("Downloading yq from {}", url);

    let bytes = fetcher.fetch_bytes(&url)?;
    std::fs::write(install_path, bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(install_path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}
