//! Command-line interface module.

mod check;
mod commands;
mod init;
mod run;

pub use check::check_layout;
pub use commands::{Cli, Commands};
pub use init::init_root;
pub use run::run_command;
