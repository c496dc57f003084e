//! `dispatchboard` - Shipment tracking and driver assignment
//!
//! This library provides an in-memory store of shipments and drivers loaded
//! from a bundled dataset, the driver assignment operation, and text views
//! over the store.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod model;
pub mod routes;
pub mod session;
pub mod store;
pub mod views;

pub use config::Config;
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{Driver, Shipment, ShipmentStatus};
pub use routes::Route;
pub use session::Session;
pub use store::{AssignmentOutcome, ShipmentStore, StoreStats};
pub use views::{OutputFormat, ViewOptions};
