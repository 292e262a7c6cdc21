//! CLI for GProxy: a command-line host for the plugin.

mod commands;
mod host;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use gproxy_core::config;
use gproxy_core::interceptor::REQUEST_URL_CHANNEL;

use commands::{
    run_completions, run_fetch, run_man, run_mirrors, run_resolve, run_set_enabled,
    run_set_mirror, run_status, run_toggle,
};

/// Top-level CLI for GProxy.
#[derive(Debug, Parser)]
#[command(name = "gproxy")]
#[command(about = "GProxy: rewrite GitHub URLs to mirror endpoints", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the mirror URL and injected headers for a URL.
    Resolve {
        /// URL as the application would request it.
        url: String,
        /// Mirror id to use instead of the configured one.
        #[arg(long, value_name = "ID")]
        mirror: Option<String>,
    },

    /// List known mirrors and their endpoint prefixes.
    Mirrors,

    /// Show current settings.
    Status,

    /// Flip the enabled flag (same as the toggle command in the host).
    Toggle,

    /// Select the mirror used for rewriting.
    SetMirror {
        /// Mirror id (fastgit, mtr, ghproxy, gitclone, mirr).
        id: String,
    },

    /// Set the enabled flag on.
    Enable,

    /// Set the enabled flag off.
    Disable,

    /// Send a request through the intercepted dispatch (HTTP HEAD probe).
    Fetch {
        /// URL as the application would request it.
        url: String,
        /// Dispatch channel; only `request-url` is rewritten.
        #[arg(long, default_value = REQUEST_URL_CHANNEL)]
        channel: String,
    },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page.
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve { url, mirror } => run_resolve(&cfg, &url, mirror.as_deref())?,
            CliCommand::Mirrors => run_mirrors(&cfg)?,
            CliCommand::Status => run_status(&cfg)?,
            CliCommand::Toggle => run_toggle(&cfg)?,
            CliCommand::SetMirror { id } => run_set_mirror(&cfg, &id)?,
            CliCommand::Enable => run_set_enabled(&cfg, true)?,
            CliCommand::Disable => run_set_enabled(&cfg, false)?,
            CliCommand::Fetch { url, channel } => run_fetch(&cfg, &url, &channel)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
