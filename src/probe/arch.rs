//! CPU architecture detection.

use std::fmt;

use crate::error::{BerthError, Result};
use crate::shell::CommandRunner;

/// Normalized architecture tag for the two supported CPU families.
///
/// The tag doubles as the yq release-asset suffix (`yq_linux_amd64`,
/// `yq_linux_arm64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchTag {
    Amd64,
    Arm64,
}

impl ArchTag {
    /// Map a `uname -m` machine string to a tag.
    pub fn from_machine(machine: &str) -> Option<Self> {
        match machine.trim() {
            "x86_64" | "amd64" => Some(ArchTag::Amd64),
            "aarch64" | "arm64" => Some(ArchTag::Arm64),
            _ => None,
        }
    }

    /// Suffix used in yq release asset names.
    pub fn yq_suffix(&self) -> &'static str {
        match self {
            ArchTag::Amd64 => "amd64",
            ArchTag::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for ArchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.yq_suffix())
    }
}

/// Detect the host CPU architecture via `uname -m`.
pub fn detect_arch(runner: &dyn CommandRunner) -> Result<ArchTag> {
    let machine = runner.capture("uname -m")?;
    ArchTag::from_machine(&machine).ok_or(BerthError::UnsupportedArchitecture { arch: machine })
}
