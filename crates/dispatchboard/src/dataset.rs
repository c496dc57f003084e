//! Source dataset for the shipment store.
//!
//! The default dataset is compiled into the binary. A JSON file with the same
//! shape can be supplied through configuration instead.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Driver, Shipment, ShipmentStatus};

/// The bundled dataset.
const BUNDLED_DATASET: &str = include_str!("../data/shipments.json");

/// Shipments and drivers as loaded from a source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Shipments in source order.
    pub shipments: Vec<Shipment>,
    /// Drivers in source order.
    pub drivers: Vec<Driver>,
}

impl Dataset {
    /// Parse the dataset compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON does not parse.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Parse a dataset from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        debug!(
            shipments = dataset.shipments.len(),
            drivers = dataset.drivers.len(),
            "Parsed dataset"
        );
        Ok(dataset)
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetRead`] if the file cannot be read, or
    /// [`Error::Json`] if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading dataset from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| Error::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check the shipment/driver invariants.
    ///
    /// - shipment ids and driver ids are unique within their collection
    /// - a shipment is `Assigned` exactly when it carries a `driverId`
    /// - every `driverId` names a driver in this dataset
    /// - `driverName`/`driverContact` copy that driver's name and contact,
    ///   and are empty on an unassigned shipment
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetInvalid`] naming the first offending record.
    pub fn validate(&self) -> Result<()> {
        let mut drivers: HashMap<&str, &Driver> = HashMap::new();
        for driver in &self.drivers {
            if drivers.insert(driver.id.as_str(), driver).is_some() {
                return Err(Error::dataset_invalid(format!(
                    "duplicate driver id '{}'",
                    driver.id
                )));
            }
        }

        let mut shipment_ids = HashSet::new();
        for shipment in &self.shipments {
            if !shipment_ids.insert(shipment.id.as_str()) {
                return Err(Error::dataset_invalid(format!(
                    "duplicate shipment id '{}'",
                    shipment.id
                )));
            }

            match (&shipment.driver_id, shipment.status) {
                (Some(driver_id), ShipmentStatus::Assigned) => {
                    let Some(driver) = drivers.get(driver_id.as_str()) else {
                        return Err(Error::dataset_invalid(format!(
                            "shipment '{}' references unknown driver '{driver_id}'",
                            shipment.id
                        )));
                    };
                    if shipment.driver_name != driver.name
                        || shipment.driver_contact != driver.contact
                    {
                        return Err(Error::dataset_invalid(format!(
                            "shipment '{}' carries driver details that do not match driver '{driver_id}'",
                            shipment.id
                        )));
                    }
                }
                (None, ShipmentStatus::NotAssigned) => {
                    if !shipment.driver_name.is_empty() || !shipment.driver_contact.is_empty() {
                        return Err(Error::dataset_invalid(format!(
                            "shipment '{}' is marked {} but carries driver details",
                            shipment.id,
                            ShipmentStatus::NotAssigned
                        )));
                    }
                }
                (Some(driver_id), ShipmentStatus::NotAssigned) => {
                    return Err(Error::dataset_invalid(format!(
                        "shipment '{}' has driver '{driver_id}' but is marked {}",
                        shipment.id,
                        ShipmentStatus::NotAssigned
                    )));
                }
                (None, ShipmentStatus::Assigned) => {
                    return Err(Error::dataset_invalid(format!(
                        "shipment '{}' is marked {} without a driver",
                        shipment.id,
                        ShipmentStatus::Assigned
                    )));
                }
            }
        }

        Ok(())
    }
}
