//! Terminal client for the pump table controller.

mod commands;
mod print;
mod setup;
mod shell;

pub use commands::run;
