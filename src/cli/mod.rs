//! Command-line interface components
//!
//! This module contains CLI-specific code for the catalog client,
//! including argument parsing and command handlers.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigAction, ConfigArgs, GlobalArgs, ShowArgs};
pub use commands::{
    handle_command, handle_config, handle_index, handle_list, handle_show, handle_translation,
    load_config, ListQuery,
};
