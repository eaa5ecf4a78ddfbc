pub mod gate;
pub mod tasks;
