use crate::app::Application;
use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::logging::{init_logging, LogConfig};
use crate::server::{status_reason, MvcRequest};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

/// Command-line interface for brrtmvc applications
#[derive(Parser, Debug)]
#[command(name = "brrtmvc")]
#[command(about = "brrtmvc application runner", long_about = None)]
pub struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, env = "BRRTMVC_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Package whose controllers are scanned (overrides the config file)
    #[arg(long)]
    pub base_package: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every path mapping
    Routes,
    /// Dispatch one request in-process and print the response
    Call {
        /// Request path, relative to the context path
        #[arg(long)]
        path: String,

        /// Request parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
    /// Run the HTTP server
    Serve {
        /// Address and port to bind (overrides `http.addr`)
        #[arg(long)]
        addr: Option<String>,

        /// Worker threads (overrides `http.workers`)
        #[arg(long)]
        workers: Option<usize>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

/// Parse the process arguments and run the selected command.
///
/// # Errors
///
/// Returns an error if logging, config loading, bootstrap, or the command fails.
pub fn run() -> anyhow::Result<()> {
    run_cli(Cli::parse())
}

/// Run an already parsed command line.
///
/// # Errors
///
/// See [`run`].
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(base) = &cli.base_package {
        config.base_package = Some(base.clone());
    }
    if let Commands::Serve { addr, workers } = &cli.command {
        if let Some(addr) = addr {
            config.http.addr = addr.clone();
        }
        if let Some(workers) = workers {
            config.http.workers = (*workers).max(1);
        }
    }

    let app = Application::bootstrap(config).context("Failed to bootstrap application")?;

    if matches!(cli.command, Commands::Serve { .. }) {
        let handle = app.serve()?;
        println!("Listening on http://{}", handle.addr());
        handle
            .join()
            .map_err(|e| anyhow::anyhow!("server thread panicked: {e:?}"))?;
        return Ok(());
    }

    print!("{}", execute(&cli.command, &app)?);
    Ok(())
}

/// Output of the in-process commands (`routes`, `call`).
///
/// # Errors
///
/// Returns an error for `serve`, which cannot run in-process.
pub fn execute(command: &Commands, app: &Application) -> anyhow::Result<String> {
    match command {
        Commands::Routes => Ok(app.router().route_listing()),
        Commands::Call { path, params } => {
            let mut store: HashMap<String, String> = HashMap::new();
            for (k, v) in params {
                store.entry(k.clone()).or_insert_with(|| v.clone());
            }
            let mut request = MvcRequest::new(path.as_str()).with_params(store);
            let response = app.dispatcher().handle(&mut request);

            let mut out = format!("HTTP {} {}\n", response.status, status_reason(response.status));
            out.push_str(&format!("Content-Type: {}\n", response.content_type));
            if let Some(url) = &response.forwarded_to {
                out.push_str(&format!("Forwarded-To: {url}\n"));
            }
            out.push('\n');
            out.push_str(&response.body);
            if !response.body.ends_with('\n') {
                out.push('\n');
            }
            Ok(out)
        }
        Commands::Serve { .. } => anyhow::bail!("serve cannot be executed in-process"),
    }
}
