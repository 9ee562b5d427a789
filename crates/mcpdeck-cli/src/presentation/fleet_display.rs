//! Terminal rendering of response payloads.

use mcpdeck_core::events::{CatalogPayload, InstanceSummary, Response, SettingsPayload};

use super::tables::{format_optional, print_separator, truncate_string};

/// Render any response for a human reader. Errors go to stderr, after any
/// process output that came with them.
pub fn print_response(response: &Response) {
    match response {
        Response::ActionResult(payload) => print_operation(
            payload.message.as_deref(),
            payload.warning.as_deref(),
            payload.stdout.as_deref(),
            payload.stderr.as_deref(),
        ),
        Response::DeployResult(payload) => print_operation(
            payload.message.as_deref(),
            None,
            payload.stdout.as_deref(),
            payload.stderr.as_deref(),
        ),
        _ if response.error().is_some() => {}
        Response::InstancesData(payload) => {
            print_instances(payload.servers.as_deref().unwrap_or_default());
            if payload.settled == Some(false) {
                println!("\n(runtime had not reached the expected state yet)");
            }
        }
        Response::CatalogData(payload) => print_catalog(payload),
        Response::LogsData(payload) => {
            if let Some(logs) = &payload.logs {
                print!("{logs}");
                if !logs.ends_with('\n') {
                    println!();
                }
            }
        }
        Response::SettingsData(payload) => print_settings(payload),
    }
    if let Some(error) = response.error() {
        eprintln!("✗ {error}");
    }
}

pub fn print_instances(servers: &[InstanceSummary]) {
    if servers.is_empty() {
        println!("No MCP server instances found.");
        return;
    }

    println!("{:<14} {:<28} {:<32} Status", "ID", "Name", "Image");
    print_separator(96);
    for server in servers {
        let instance = &server.instance;
        println!(
            "{:<14} {:<28} {:<32} {}",
            truncate_string(&instance.runtime_id, 12),
            truncate_string(&instance.name, 27),
            truncate_string(&instance.image, 31),
            instance.status_text
        );
    }
}

pub fn print_catalog(payload: &CatalogPayload) {
    let servers = payload.servers.as_deref().unwrap_or_default();
    if servers.is_empty() {
        println!("No provisioning scripts found.");
    } else {
        println!(
            "{:<16} {:<24} {:<9} {:<14} Description",
            "Name", "Script", "State", "ID"
        );
        print_separator(100);
        for server in servers {
            let state = match (server.is_deployed, server.is_running) {
                (true, true) => "running",
                (true, false) => "stopped",
                _ => "-",
            };
            println!(
                "{:<16} {:<24} {:<9} {:<14} {}",
                truncate_string(&server.name, 15),
                truncate_string(&server.script_name, 23),
                state,
                format_optional(server.container_id.as_ref(), "--"),
                truncate_string(&server.description, 60)
            );
        }
    }

    let unmanaged = payload.unmanaged.as_deref().unwrap_or_default();
    if !unmanaged.is_empty() {
        println!("\nInstances without a catalog entry:\n");
        print_instances(unmanaged);
    }

    for warning in &payload.warnings {
        eprintln!("⚠ {warning}");
    }
}

pub fn print_settings(payload: &SettingsPayload) {
    if let Some(message) = &payload.message {
        println!("✓ {message}");
        return;
    }

    let values = payload.settings.clone().unwrap_or_default();
    let descriptions = payload.descriptions.clone().unwrap_or_default();
    let required = payload.required_settings.as_deref().unwrap_or_default();
    let optional = payload.optional_settings.as_deref().unwrap_or_default();

    println!("Settings for {}:\n", payload.server_type);
    for (label, names) in [("Required", required), ("Optional", optional)] {
        if names.is_empty() {
            continue;
        }
        println!("{label}:");
        for name in names {
            let value = values.get(name).map_or("<unset>", String::as_str);
            println!("  {name} = {value}");
            if let Some(description) = descriptions.get(name) {
                println!("      {description}");
            }
        }
        println!();
    }

    let declared = |name: &String| required.contains(name) || optional.contains(name);
    let others: Vec<_> = values.iter().filter(|(name, _)| !declared(name)).collect();
    if !others.is_empty() {
        println!("Other:");
        for (name, value) in others {
            println!("  {name} = {value}");
        }
    }
}

pub fn print_operation(
    message: Option<&str>,
    warning: Option<&str>,
    stdout: Option<&str>,
    stderr: Option<&str>,
) {
    for (label, text) in [("stdout", stdout), ("stderr", stderr)] {
        if let Some(text) = text.map(str::trim_end).filter(|t| !t.is_empty()) {
            println!("--- {label} ---\n{text}");
        }
    }
    if let Some(message) = message {
        println!("✓ {message}");
    }
    if let Some(warning) = warning {
        eprintln!("⚠ {warning}");
    }
}
