//! Domain types for catalog entries, runtime instances and operations.
//!
//! Pure data and pure functions only: no process or filesystem access.

pub mod catalog;
pub mod ident;
pub mod instance;
pub mod operation;
pub mod settings;
pub mod status;
pub mod view;

pub use catalog::{
    CatalogEntry, ScriptKind, ScriptRef, extract_description, instance_name_for,
    parse_script_file_name, settings_key_for,
};
pub use ident::{
    IdentifierError, validate_identifier, validate_script_ref, validate_setting_key,
};
pub use instance::{DEFAULT_IMAGE_NAMESPACE, Instance};
pub use operation::{InvalidTransition, Operation, OperationKind, OperationStatus};
pub use settings::{SettingsDocument, SettingsTemplate, SettingsValues, without_empty};
pub use status::indicates_running;
pub use view::ServerView;
