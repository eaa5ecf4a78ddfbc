pub mod commands;
pub mod error;
pub mod gate;
pub mod logging;
pub mod process;
pub mod suite;
pub mod tasks;
pub mod verify;

pub use error::{GateError, Result};
