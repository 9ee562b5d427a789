//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options. Every
//! global option falls back to an `MCPDECK_*` environment variable, which may
//! itself come from a `.env` file.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the MCP server deployment manager.
#[derive(Parser)]
#[command(name = "mcpdeck")]
#[command(about = "Deploy and manage containerized MCP servers")]
#[command(version)]
pub struct Cli {
    /// Directory scanned for load<Name>MCP.{ps1,sh} scripts
    #[arg(long = "catalog-dir", env = "MCPDECK_CATALOG_DIR", global = true)]
    pub catalog_dir: Option<String>,

    /// Directory holding <serverType>Settings.env files and templates
    #[arg(long = "settings-dir", env = "MCPDECK_SETTINGS_DIR", global = true)]
    pub settings_dir: Option<String>,

    /// Container runtime CLI to invoke
    #[arg(long = "runtime", env = "MCPDECK_RUNTIME", global = true)]
    pub runtime: Option<String>,

    /// Image substring identifying MCP server instances
    #[arg(long = "image-namespace", env = "MCPDECK_IMAGE_NAMESPACE", global = true)]
    pub image_namespace: Option<String>,

    /// Kill provisioning scripts that run longer than this many seconds
    #[arg(long = "script-timeout", env = "MCPDECK_SCRIPT_TIMEOUT", global = true)]
    pub script_timeout: Option<u64>,

    /// Print response documents as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
