//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Domain transforms belong in core services

pub mod fleet_display;
pub mod tables;

pub use fleet_display::{
    print_catalog, print_instances, print_operation, print_response, print_settings,
};
pub use tables::{format_optional, print_separator, truncate_string};
