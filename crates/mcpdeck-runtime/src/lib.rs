//! Process and filesystem adapters for mcpdeck.
//!
//! This crate provides the production implementations of the ports defined in
//! `mcpdeck-core`:
//!
//! - [`ProcessCommandExecutor`] runs the container runtime CLI and
//!   provisioning scripts as child processes
//! - [`FsCatalogScanner`] enumerates provisioning scripts in a directory
//! - [`FsSettingsStore`] reads templates and reads/writes `.env` settings files

#![deny(unsafe_code)]

pub mod ports_impl;
pub mod process;

pub use ports_impl::{FsCatalogScanner, FsSettingsStore};
pub use process::ProcessCommandExecutor;
