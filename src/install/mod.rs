//! Dependency installation: baseline tools, the Node.js runtime, and yq.
//!
//! Every install step is skippable when the dependency is already present,
//! so a second run on the same host is a no-op for this module.

pub mod fetch;
pub mod node;
pub mod packages;
pub mod yq;

pub use fetch::Fetcher;
pub use node::{ensure_node, node_version, NodeInstall, NodeSetupUrls};
pub use packages::{install_baseline, install_packages, BASELINE_TOOLS};
pub use yq::{ensure_yq, yq_available, YqInstall, YQ_RELEASE_BASE};
