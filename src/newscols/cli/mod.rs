//! # CLI Layer
//!
//! This module is **one possible UI client** for newscols. It is the only
//! place that knows about terminal I/O, logging setup and exit codes.
//!
//! - `setup.rs`: clap argument definitions
//! - `commands.rs`: context wiring and dispatch to the API
//! - `render.rs`: terminal and JSON output of `CmdResult`s

mod commands;
mod render;
mod setup;

pub use commands::run;
