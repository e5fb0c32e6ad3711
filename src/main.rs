//! ringprov - idempotent provisioner for the Ring web application host
//!
//! Usage: ringprov [OPTIONS] [COMMAND]
//!
//! Commands:
//!   provision  Run all provisioning stages (default)
//!   plan       Show what each stage would do
//!   status     Report versions, service states and credentials
//!   render     Print a generated file

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use ringprov::config::{load_effective, Verbosity};
use ringprov::presentation::{Cli, Commands};

use crate::ui::context::UiContext;

fn init_logging(verbose: u8, configured: Verbosity) {
    let level = match (verbose, configured) {
        (0, Verbosity::Debug) => "debug",
        (0, Verbosity::Verbose) => "info",
        (0, _) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, warnings) = load_effective(cli.config.as_deref())?;
    init_logging(cli.verbose, config.output.verbosity);

    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
    if !cli.json {
        ui::output::print_config_warnings(&ui, &warnings);
    }
    for w in &warnings {
        log::debug!("{w}");
    }

    match cli.command.unwrap_or(Commands::Provision {
        force: false,
        write_policy: None,
        skip: Vec::new(),
        dry_run: false,
    }) {
        Commands::Provision {
            force,
            write_policy,
            skip,
            dry_run,
        } => commands::provision::cmd_provision(
            config,
            ui,
            force,
            write_policy.map(Into::into),
            skip,
            dry_run,
        ),
        Commands::Plan { write_policy, skip } => {
            commands::provision::cmd_plan(config, ui, write_policy.map(Into::into), skip)
        }
        Commands::Status => commands::status::cmd_status(config, ui),
        Commands::Render { target } => commands::render::cmd_render(&config, target),
    }
}
