//! Shell command execution and host environment helpers.

pub mod command;
pub mod mock;

pub use command::{CommandOptions, CommandResult, CommandRunner, SystemRunner};
pub use mock::{Invocation, MockRunner};

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root.
///
/// Package installs, `/usr/local/bin` writes, and systemd unit installation
/// all need elevated privilege; the provisioner warns up front when it is
/// missing rather than failing halfway through.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}
