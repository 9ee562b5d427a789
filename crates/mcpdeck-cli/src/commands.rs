//! Main commands enum and subcommands.

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List catalog entries joined with their running instances
    #[command(visible_alias = "ls")]
    Catalog,

    /// List MCP server instances known to the container runtime
    Ps,

    /// Show recent log output of an instance
    Logs {
        /// Instance id or name
        id: String,
        /// Number of trailing lines to fetch (defaults to 500)
        #[arg(long)]
        tail: Option<u32>,
    },

    /// Start a stopped instance
    Start {
        /// Instance id or name
        id: String,
    },

    /// Stop a running instance
    Stop {
        /// Instance id or name
        id: String,
    },

    /// Restart an instance
    Restart {
        /// Instance id or name
        id: String,
    },

    /// Stop and remove an instance
    Remove {
        /// Instance name
        name: String,
        /// Also remove the instance's image
        #[arg(long)]
        image: bool,
    },

    /// Run a catalog entry's provisioning script
    Deploy {
        /// Script file name, e.g. loadBraveMCP.ps1
        script: String,
        /// Setting to persist before deploying (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        set: Vec<(String, String)>,
        /// Wait for the instance to appear before returning
        #[arg(long)]
        wait: bool,
    },

    /// Remove an instance and run its provisioning script again
    Redeploy {
        /// Name of the instance to replace
        name: String,
        /// Script file name, e.g. loadBraveMCP.ps1
        script: String,
        /// Setting to persist before redeploying (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        set: Vec<(String, String)>,
        /// Wait for the instance to reappear before returning
        #[arg(long)]
        wait: bool,
    },

    /// View or change per-server settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Show resolved catalog and settings directories
    Paths {
        /// Create the directories if they are missing
        #[arg(long)]
        create: bool,
    },

    /// Print the effective configuration as JSON
    Config,

    /// Handle one JSON request document and print the response document
    Request {
        /// Request JSON; read from stdin when omitted
        json: Option<String>,
        /// Also await and print the post-operation refresh
        #[arg(long)]
        wait: bool,
    },
}

/// Settings command variants.
#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show merged settings with required and optional names
    Show {
        /// Server type, e.g. brave or googleMaps
        server_type: String,
    },
    /// Update settings; an empty value removes the key from the file
    Set {
        /// Server type, e.g. brave or googleMaps
        server_type: String,
        /// KEY=VALUE pairs
        #[arg(required = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
        pairs: Vec<(String, String)>,
    },
}

/// Parse a `KEY=VALUE` argument. Only the first `=` splits.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("URL=http://x?a=b").unwrap(),
            ("URL".to_string(), "http://x?a=b".to_string())
        );
        assert_eq!(parse_key_value("EMPTY=").unwrap().1, "");
        assert!(parse_key_value("=value").is_err());
        assert!(parse_key_value("novalue").is_err());
    }
}
