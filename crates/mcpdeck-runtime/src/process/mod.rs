//! Child process execution.

mod executor;

pub use executor::ProcessCommandExecutor;
