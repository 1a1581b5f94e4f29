//! Package manager detection and per-manager install syntax.

use std::fmt;

use crate::error::{BerthError, Result};
use crate::shell::CommandRunner;

/// Supported system package managers, in probe order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Yum,
    Zypper,
    Pacman,
}

/// Package manager family, used to pick the Node.js install strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFamily {
    Debian,
    RedHat,
    Suse,
    Arch,
}

impl PackageManager {
    /// All supported managers, in the order they are probed.
    pub const ALL: [PackageManager; 5] = [
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Yum,
        PackageManager::Zypper,
        PackageManager::Pacman,
    ];

    /// The executable probed for on PATH.
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
            PackageManager::Zypper => "zypper",
            PackageManager::Pacman => "pacman",
        }
    }

    /// Family grouping for install strategies.
    pub fn family(&self) -> PackageFamily {
        match self {
            PackageManager::Apt => PackageFamily::Debian,
            PackageManager::Dnf | PackageManager::Yum => PackageFamily::RedHat,
            PackageManager::Zypper => PackageFamily::Suse,
            PackageManager::Pacman => PackageFamily::Arch,
        }
    }

    /// Non-interactive install invocation for the given packages.
    ///
    /// apt and pacman refresh their index first; the others install
    /// directly.
    pub fn install_command(&self, packages: &[&str]) -> String {
        let pkgs = packages.join(" ");
        match self {
            PackageManager::Apt => format!(
                "DEBIAN_FRONTEND=noninteractive apt-get update -y && \
                 DEBIAN_FRONTEND=noninteractive apt-get install -y {pkgs}"
            ),
            PackageManager::Dnf => format!("dnf install -y {pkgs}"),
            PackageManager::Yum => format!("yum install -y {pkgs}"),
            PackageManager::Zypper => format!("zypper --non-interactive install {pkgs}"),
            PackageManager::Pacman => format!("pacman -Sy --noconfirm {pkgs}"),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Probe for the first available package manager.
///
/// Selected exactly once per run; callers thread the value, never re-probe.
pub fn detect_package_manager(runner: &dyn CommandRunner) -> Result<PackageManager> {
    for manager in PackageManager::ALL {
        if runner.check(&format!("command -v {}", manager.binary())) {
            tracing::debug!("Detected package manager: {}", manager);
            return Ok(manager);
        }
    }

    let probed = PackageManager::ALL
        .iter()
        .map(|m| m.binary())
        .collect::<Vec<_>>()
        .join(", ");
    Err(BerthError::UnsupportedSystem { probed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    #[test]
    fn probes_in_fixed_order_and_picks_first_hit() {
        let runner = MockRunner::new();
        runner.fail_on("command -v apt-get", 1);
        runner.fail_on("command -v dnf", 1);
        // yum succeeds by default; zypper/pacman must never be probed
        let manager = detect_package_manager(&runner).unwrap();
        assert_eq!(manager, PackageManager::Yum);
        assert!(!runner.ran("zypper"));
        assert!(!runner.ran("pacman"));
    }

    #[test]
    fn apt_wins_when_present() {
        let runner = MockRunner::new();
        let manager = detect_package_manager(&runner).unwrap();
        assert_eq!(manager, PackageManager::Apt);
        assert_eq!(runner.commands().len(), 1);
    }

    #[test]
    fn no_manager_is_unsupported_system() {
        let runner = MockRunner::new();
        for manager in PackageManager::ALL {
            runner.fail_on(&format!("command -v {}", manager.binary()), 1);
        }
        let err = detect_package_manager(&runner).unwrap_err();
        assert!(matches!(err, BerthError::UnsupportedSystem { .. }));
        assert!(err.to_string().contains("apt-get"));
    }

    #[test]
    fn apt_install_updates_first() {
        let cmd = PackageManager::Apt.install_command(&["curl", "git"]);
        assert!(cmd.contains("apt-get update"));
        assert!(cmd.contains("apt-get install -y curl git"));
        assert!(cmd.contains("DEBIAN_FRONTEND=noninteractive"));
    }

    #[test]
    fn dnf_and_yum_install_directly() {
        assert_eq!(
            PackageManager::Dnf.install_command(&["yq"]),
            "dnf install -y yq"
        );
        assert_eq!(
            PackageManager::Yum.install_command(&["yq"]),
            "yum install -y yq"
        );
    }

    #[test]
    fn zypper_is_non_interactive() {
        assert_eq!(
            PackageManager::Zypper.install_command(&["nodejs", "npm"]),
            "zypper --non-interactive install nodejs npm"
        );
    }

    #[test]
    fn pacman_syncs_and_skips_confirmation() {
        assert_eq!(
            PackageManager::Pacman.install_command(&["git"]),
            "pacman -Sy --noconfirm git"
        );
    }

    #[test]
    fn families_group_redhat_managers() {
        assert_eq!(PackageManager::Dnf.family(), PackageFamily::RedHat);
        assert_eq!(PackageManager::Yum.family(), PackageFamily::RedHat);
        assert_eq!(PackageManager::Apt.family(), PackageFamily::Debian);
        assert_eq!(PackageManager::Zypper.family(), PackageFamily::Suse);
        assert_eq!(PackageManager::Pacman.family(), PackageFamily::Arch);
    }
}
