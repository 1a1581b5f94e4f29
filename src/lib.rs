//! Berth - first-boot provisioning for a Node.js web application on Linux.
//!
//! Berth replaces the ad-hoc `setup.sh` that ships with a freshly cloned
//! application: it detects the host's package manager and CPU
//! architecture, installs prerequisites (baseline tools, the Node.js
//! runtime, yq), collects database credentials interactively, patches the
//! `database.*` section of `config.yaml` with a backup, and registers the
//! app as a systemd service — or launches it as a detached background
//! process on hosts without systemd.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`credentials`] - Interactive database credential collection
//! - [`error`] - Error types and result aliases
//! - [`install`] - Baseline tools, Node.js, and yq installation
//! - [`patcher`] - Config backup and structured database patch
//! - [`probe`] - Package manager and architecture detection
//! - [`provision`] - The linear orchestration of a run
//! - [`service`] - systemd unit or detached-process launch
//! - [`shell`] - Shell command execution behind a mockable runner
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```no_run
//! use berth::provision::{ProvisionOptions, Provisioner};
//! use berth::shell::SystemRunner;
//! use berth::ui::{create_ui, OutputMode};
//!
//! let runner = SystemRunner::new();
//! let mut ui = create_ui(true, OutputMode::Normal);
//! let options = ProvisionOptions::new(std::env::current_dir().unwrap());
//! let report = Provisioner::new(&runner, ui.as_mut(), options).run().unwrap();
//! println!("Provisioned via {}", report.package_manager);
//! ```

pub mod cli;
pub mod credentials;
pub mod error;
pub mod install;
pub mod patcher;
pub mod probe;
pub mod provision;
pub mod service;
pub mod shell;
pub mod ui;

pub use error::{BerthError, Result};
