//! CLI argument definitions using clap derive
//!
//! The tool is driven entirely by prompts; the command line only carries
//! `--help` and `--version`. Configuration comes from the config file and
//! environment (see `core::config`).

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "emptrack")]
#[command(version, about = "Employee Tracker - manage departments, roles and employees")]
#[command(long_about = "An interactive terminal tool for viewing and editing departments, roles and employees.\n\n\
Database location: $EMPTRACK_DATABASE or `database` in the user config file.\n\
Log level: $EMPTRACK_LOG or `log_level` in the user config file.")]
pub struct Cli {}
