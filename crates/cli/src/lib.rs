//! Terminal front end for the inventory ledger: an interactive menu plus
//! one-shot subcommands for scripting.

pub mod commands;
pub mod console;
pub mod menu;
pub mod settings;
pub mod table;
pub mod views;
