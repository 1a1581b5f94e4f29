//! CLI argument definitions.
//!
//! Berth is a single no-argument invocation; the flags here only tune
//! output and interactivity.

use clap::Parser;
use std::path::PathBuf;

/// Berth - first-boot provisioning for a Node.js web application.
#[derive(Debug, Parser)]
#[command(name = "berth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Answer prompts from BERTH_PROMPT_* environment variables
    ///
    /// Unset prompts fall back to their defaults (the port falls back to
    /// 3306). The database password has no default: BERTH_PROMPT_DB_PASSWORD
    /// must be set or the run aborts before patching the config.
    #[arg(long)]
    pub non_interactive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_verifies() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_parse() {
        let cli = Cli::parse_from(["berth"]);
        assert!(!cli.verbose);
        assert!(!cli.non_interactive);
        assert!(cli.project.is_none());
    }

    #[test]
    fn long_help_documents_password_env_var() {
        let mut cmd = Cli::command();
        let help = cmd.render_long_help().to_string();
        assert!(help.contains("BERTH_PROMPT_DB_PASSWORD"));
    }

    #[test]
    fn project_override_parses() {
        let cli = Cli::parse_from(["berth", "--project", "/srv/app"]);
        assert_eq!(cli.project, Some(PathBuf::from("/srv/app")));
    }
}
