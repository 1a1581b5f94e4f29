//! Host environment probing.
//!
//! Runs once at the start of a provisioning run: pick the first available
//! package manager from a fixed list and normalize the CPU architecture.
//! Both values are immutable for the remainder of the run and are threaded
//! through the later steps by value.

pub mod arch;
pub mod package_manager;

pub use arch::{detect_arch, ArchTag};
pub use package_manager::{detect_package_manager, PackageFamily, PackageManager};

use crate::error::Result;
use crate::shell::CommandRunner;

/// Result of probing the host: exactly one manager, exactly one arch tag.
#[derive(Debug, Clone, Copy)]
pub struct HostProbe {
    pub package_manager: PackageManager,
    pub arch: ArchTag,
}

/// Probe the host environment. No side effects beyond reading host state.
pub fn probe_host(runner: &dyn CommandRunner) -> Result<HostProbe> {
    let package_manager = detect_package_manager(runner)?;
    let arch = detect_arch(runner)?;
    tracing::info!("Host probe: {} on {}", package_manager, arch);
    Ok(HostProbe {
        package_manager,
        arch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    #[test]
    fn probe_selects_one_manager_and_one_arch() {
        let runner = MockRunner::new();
        runner.fail_on("command -v apt-get", 1);
        runner.succeed_with("uname -m", "x86_64\n");

        let probe = probe_host(&runner).unwrap();
        assert_eq!(probe.package_manager, PackageManager::Dnf);
        assert_eq!(probe.arch, ArchTag::Amd64);
    }

    #[test]
    fn manager_failure_short_circuits_arch_probe() {
        let runner = MockRunner::new();
        for manager in PackageManager::ALL {
            runner.fail_on(&format!("command -v {}", manager.binary()), 1);
        }
        assert!(probe_host(&runner).is_err());
        assert!(!runner.ran("uname"));
    }
}
