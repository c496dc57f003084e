//! `dispatch` - CLI for dispatchboard
//!
//! Every command builds a fresh store from the configured dataset. State
//! lasts for one command, or for one `dispatch session`.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use dispatchboard::cli::{AssignCommand, Cli, Command, ConfigCommand};
use dispatchboard::views::{self, OutputFormat, ViewOptions};
use dispatchboard::{init_logging, Config, Route, Session, ShipmentStore};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    let options = config.view_options();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let succeeded = match cli.command {
        Command::List(cmd) => {
            let store = load_store(&config)?;
            let filter = cmd.status.map(Into::into);
            let options = with_format(options, cmd.format);
            views::render_shipment_list(&store, filter, options, &mut out)?;
            true
        }
        Command::Show(cmd) => {
            let mut store = load_store(&config)?;
            let options = with_format(options, cmd.format);
            views::render_shipment_detail(&mut store, &cmd.id, options, &mut out)?
        }
        Command::Open(cmd) => {
            let route = Route::parse(&cmd.path)?;
            tracing::debug!(%route, "Navigating");
            let mut store = load_store(&config)?;
            let options = with_format(options, cmd.format);
            match route {
                Route::ShipmentList => {
                    views::render_shipment_list(&store, None, options, &mut out)?;
                    true
                }
                Route::ShipmentDetail { id } => {
                    views::render_shipment_detail(&mut store, &id, options, &mut out)?
                }
            }
        }
        Command::Assign(cmd) => {
            let mut store = load_store(&config)?;
            handle_assign(&mut store, &cmd, options, &mut out)?
        }
        Command::Drivers(cmd) => {
            let store = load_store(&config)?;
            views::render_drivers(&store, with_format(options, cmd.format), &mut out)?;
            true
        }
        Command::Stats(cmd) => {
            let store = load_store(&config)?;
            let format = cmd.json.then_some(OutputFormat::Json);
            views::render_stats(&store, with_format(options, format), &mut out)?;
            true
        }
        Command::Session => {
            let store = load_store(&config)?;
            let interactive = io::stdin().is_terminal();
            let mut session = Session::new(store, options).with_prompt(interactive);
            session.run(io::stdin().lock(), &mut out)?;
            true
        }
        Command::Config(cmd) => handle_config(&config, cmd, &mut out)?,
    };

    out.flush()?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_store(config: &Config) -> anyhow::Result<ShipmentStore> {
    let dataset = config.load_dataset().context("loading shipment dataset")?;
    Ok(ShipmentStore::new(&dataset))
}

fn with_format(options: ViewOptions, format: Option<OutputFormat>) -> ViewOptions {
    format.map_or(options, |format| options.with_format(format))
}

fn handle_assign(
    store: &mut ShipmentStore,
    cmd: &AssignCommand,
    options: ViewOptions,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let options = with_format(options, cmd.format);
    let outcome = store.assign_driver(&cmd.shipment_id, &cmd.driver_id);
    views::render_outcome(&outcome, options, out)?;

    if outcome.success && cmd.show {
        writeln!(out)?;
        views::render_shipment_detail(store, &cmd.shipment_id, options, out)?;
    }
    Ok(outcome.success)
}

fn handle_config(
    config: &Config,
    cmd: ConfigCommand,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[Dataset]")?;
                match config.dataset_path() {
                    Some(path) => writeln!(out, "  Path:           {}", path.display())?,
                    None => writeln!(out, "  Path:           (bundled)")?,
                }
                writeln!(out, "  Validate:       {}", config.dataset.validate)?;
                writeln!(out)?;
                writeln!(out, "[Display]")?;
                writeln!(out, "  Format:         {:?}", config.display.format)?;
                writeln!(out, "  Show contacts:  {}", config.display.show_contacts)?;
            }
        }
        ConfigCommand::Path => {
            writeln!(out, "{}", Config::default_config_path().display())?;
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            let result = Config::load_from(Some(path)).and_then(|config| config.load_dataset());
            match result {
                Ok(dataset) => writeln!(
                    out,
                    "Configuration is valid ({} shipments, {} drivers).",
                    dataset.shipments.len(),
                    dataset.drivers.len()
                )?,
                Err(e) => {
                    writeln!(out, "Configuration error: {e}")?;
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}
