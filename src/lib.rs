//! Employee Tracker
//!
//! An interactive terminal tool for inspecting and editing a small
//! organizational directory of departments, roles and employees kept in
//! SQLite.

pub mod cli;
pub mod core;
