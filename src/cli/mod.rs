//! Command-line interface
//!
//! `timebox run` executes a program as one governed test; `probe` and
//! `config` report the environment the governor would see.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

/// Print a command error and exit with status 2.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let payload = serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!("{payload}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(2);
}
