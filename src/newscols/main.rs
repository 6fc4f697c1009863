//! # Newscols CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! newscols new post                      # document with one block
//! newscols set post 1 columnCount=3 dropCapSize=large
//! newscols style post 1 --json
//! newscols check post --heal
//! ```
//!
//! Logging goes to stderr through `env_logger`: `warn` by default, `debug`
//! with `-v`, and `RUST_LOG` wins over both.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
