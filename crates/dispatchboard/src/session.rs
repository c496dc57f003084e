//! Interactive dispatch session.
//!
//! A session owns one [`ShipmentStore`] for as long as it runs, so an
//! assignment made early on is visible to every later view. Nothing is
//! saved when the session ends.

use std::io::{BufRead, Write};
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::error::Result;
use crate::model::ShipmentStatus;
use crate::routes::Route;
use crate::store::ShipmentStore;
use crate::views::{self, ViewOptions};

const HELP: &str = "\
Commands:
  list [assigned|unassigned]   Show shipments
  open <path>                  Navigate to / or /shipments/<id>
  show <id>                    Open the detail view for a shipment
  select <id>                  Select a shipment without opening it
  clear                        Clear the selection
  selected                     Show the selected shipment
  assign <shipment> <driver>   Assign a driver to a shipment
  drivers                      Show drivers
  stats                        Show counters
  help                         Show this help
  quit                         End the session";

/// Errors from parsing a session command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command '{0}'; type 'help' for a list")]
    Unknown(String),

    /// The command was recognised but its arguments were not.
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Show the list view.
    List(Option<ShipmentStatus>),
    /// Navigate by path.
    Open(String),
    /// Open the detail view for an id.
    Show(String),
    /// Set the selection.
    Select(String),
    /// Clear the selection.
    Clear,
    /// Render the selection.
    Selected,
    /// Assign a driver.
    Assign {
        /// Target shipment.
        shipment_id: String,
        /// Driver to assign.
        driver_id: String,
    },
    /// Show the driver roster.
    Drivers,
    /// Show counters.
    Stats,
    /// Show help.
    Help,
    /// End the session.
    Quit,
}

impl FromStr for SessionCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Usage("help"));
        };
        let args: Vec<&str> = words.collect();

        let one_arg = |usage: &'static str| match args.as_slice() {
            [arg] => Ok((*arg).to_string()),
            _ => Err(CommandError::Usage(usage)),
        };

        match name.to_ascii_lowercase().as_str() {
            "list" | "ls" => match args.as_slice() {
                [] => Ok(Self::List(None)),
                ["assigned"] => Ok(Self::List(Some(ShipmentStatus::Assigned))),
                ["unassigned"] => Ok(Self::List(Some(ShipmentStatus::NotAssigned))),
                _ => Err(CommandError::Usage("list [assigned|unassigned]")),
            },
            "open" => one_arg("open <path>").map(Self::Open),
            "show" => one_arg("show <id>").map(Self::Show),
            "select" => one_arg("select <id>").map(Self::Select),
            "clear" => Ok(Self::Clear),
            "selected" => Ok(Self::Selected),
            "assign" => match args.as_slice() {
                [shipment_id, driver_id] => Ok(Self::Assign {
                    shipment_id: (*shipment_id).to_string(),
                    driver_id: (*driver_id).to_string(),
                }),
                _ => Err(CommandError::Usage("assign <shipment> <driver>")),
            },
            "drivers" => Ok(Self::Drivers),
            "stats" => Ok(Self::Stats),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next command.
    Continue,
    /// Stop the session.
    Stop,
}

/// A running dispatch session.
#[derive(Debug)]
pub struct Session {
    store: ShipmentStore,
    options: ViewOptions,
    prompt: bool,
}

impl Session {
    /// Start a session over `store`.
    #[must_use]
    pub fn new(store: ShipmentStore, options: ViewOptions) -> Self {
        Self {
            store,
            options,
            prompt: false,
        }
    }

    /// Print a prompt before each command.
    #[must_use]
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// The session's store.
    #[must_use]
    pub fn store(&self) -> &ShipmentStore {
        &self.store
    }

    /// Read commands from `input` until it ends or a `quit` command.
    ///
    /// Blank lines and lines starting with `#` are skipped. Malformed
    /// commands print a message and the session continues.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        self.write_prompt(out)?;
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                self.write_prompt(out)?;
                continue;
            }

            match trimmed.parse::<SessionCommand>() {
                Ok(command) => {
                    if self.execute(command, out)? == Flow::Stop {
                        return Ok(());
                    }
                }
                Err(err) => writeln!(out, "{err}")?,
            }
            self.write_prompt(out)?;
        }
        Ok(())
    }

    /// Execute a single command.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub fn execute(&mut self, command: SessionCommand, out: &mut impl Write) -> Result<Flow> {
        debug!(?command, "Executing session command");
        match command {
            SessionCommand::List(filter) => {
                views::render_shipment_list(&self.store, filter, self.options, out)?;
            }
            SessionCommand::Open(path) => match Route::parse(&path) {
                Ok(Route::ShipmentList) => {
                    views::render_shipment_list(&self.store, None, self.options, out)?;
                }
                Ok(Route::ShipmentDetail { id }) => {
                    views::render_shipment_detail(&mut self.store, &id, self.options, out)?;
                }
                Err(err) => writeln!(out, "{err}")?,
            },
            SessionCommand::Show(id) => {
                views::render_shipment_detail(&mut self.store, &id, self.options, out)?;
            }
            SessionCommand::Select(id) => {
                self.store.select_shipment(Some(&id));
                writeln!(out, "Selected {id}.")?;
            }
            SessionCommand::Clear => {
                self.store.select_shipment(None);
                writeln!(out, "Selection cleared.")?;
            }
            SessionCommand::Selected => {
                views::render_selected(&self.store, self.options, out)?;
            }
            SessionCommand::Assign {
                shipment_id,
                driver_id,
            } => {
                let outcome = self.store.assign_driver(&shipment_id, &driver_id);
                views::render_outcome(&outcome, self.options, out)?;
            }
            SessionCommand::Drivers => views::render_drivers(&self.store, self.options, out)?,
            SessionCommand::Stats => views::render_stats(&self.store, self.options, out)?,
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    fn write_prompt(&self, out: &mut impl Write) -> Result<()> {
        if self.prompt {
            write!(out, "dispatch> ")?;
            out.flush()?;
        }
        Ok(())
    }
}
