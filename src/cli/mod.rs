//! # CLI Module
//!
//! Command-line entry point for applications built on brrtmvc.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the route table built from the configured base package:
//!
//! ```bash
//! demo_app routes
//! ```
//!
//! ### `call`
//!
//! Dispatch one request in-process and print the response:
//!
//! ```bash
//! demo_app call --path /emp/view --param id=7
//! ```
//!
//! ### `serve`
//!
//! Run the HTTP host:
//!
//! ```bash
//! demo_app serve --addr 0.0.0.0:8080 --workers 8
//! ```
//!
//! ## Global Options
//!
//! - `--config <FILE>` (`BRRTMVC_CONFIG`): YAML config, default `config/app.yaml`
//! - `--base-package <PKG>` (`BRRTMVC_BASE_PACKAGE`): package to scan
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! fn main() -> anyhow::Result<()> {
//!     brrtmvc::cli::run()
//! }
//! ```

mod commands;


pub use commands::{execute, run, run_cli, Cli, Commands};
