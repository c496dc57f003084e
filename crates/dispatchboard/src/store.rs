//! The shipment store.
//!
//! Holds the session's shipments and drivers, the current selection, and the
//! driver assignment operation. All state lives in memory and is dropped with
//! the store; nothing is written back to the source dataset.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::model::{Driver, Shipment, ShipmentStatus};

/// Message returned when the shipment id matches nothing.
pub const SHIPMENT_NOT_FOUND: &str = "Shipment not found.";

/// Message returned when the driver id matches nothing.
pub const DRIVER_NOT_FOUND: &str = "Driver not found.";

/// Result of [`ShipmentStore::assign_driver`].
///
/// A rejected assignment is not an error: callers check `success` before
/// relying on the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub struct AssignmentOutcome {
    /// Whether the shipment was updated.
    pub success: bool,
    /// Human-readable description of what happened.
    pub message: String,
}

impl AssignmentOutcome {
    fn assigned(driver: &Driver, shipment_id: &str) -> Self {
        Self {
            success: true,
            message: format!("{} assigned to {shipment_id}.", driver.name),
        }
    }

    fn rejected(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

/// Counters over the shipment collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of shipments.
    pub total: usize,
    /// Shipments with status `Assigned`.
    pub assigned: usize,
    /// Shipments with status `Not Assigned`.
    pub unassigned: usize,
    /// Number of drivers.
    pub drivers: usize,
}

/// In-memory store of shipments and drivers for one session.
///
/// Constructed once at startup and handed to whatever needs it. Derived
/// values (`assigned_count`, `unassigned_count`, `selected_shipment`) are
/// computed on every read, so they always reflect the latest mutation.
#[derive(Debug, Clone)]
pub struct ShipmentStore {
    shipments: Vec<Shipment>,
    drivers: Vec<Driver>,
    selected_shipment_id: Option<String>,
}

impl ShipmentStore {
    /// Create a store from a copy of `dataset`.
    ///
    /// Later assignments mutate the store's copy only.
    #[must_use]
    pub fn new(dataset: &Dataset) -> Self {
        debug!(
            shipments = dataset.shipments.len(),
            drivers = dataset.drivers.len(),
            "Creating shipment store"
        );
        Self {
            shipments: dataset.shipments.clone(),
            drivers: dataset.drivers.clone(),
            selected_shipment_id: None,
        }
    }

    /// All shipments, in dataset order.
    #[must_use]
    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    /// All drivers, in dataset order.
    #[must_use]
    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    /// The raw selection, whether or not it matches a shipment.
    #[must_use]
    pub fn selected_shipment_id(&self) -> Option<&str> {
        self.selected_shipment_id.as_deref()
    }

    /// Number of shipments with status `Assigned`.
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.shipments_with_status(ShipmentStatus::Assigned).count()
    }

    /// Number of shipments with status `Not Assigned`.
    #[must_use]
    pub fn unassigned_count(&self) -> usize {
        self.shipments_with_status(ShipmentStatus::NotAssigned).count()
    }

    /// Shipments with the given status, in dataset order.
    pub fn shipments_with_status(
        &self,
        status: ShipmentStatus,
    ) -> impl Iterator<Item = &Shipment> + '_ {
        self.shipments.iter().filter(move |s| s.status == status)
    }

    /// Snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total: self.shipments.len(),
            assigned: self.assigned_count(),
            unassigned: self.unassigned_count(),
            drivers: self.drivers.len(),
        }
    }

    /// Find a shipment by id.
    #[must_use]
    pub fn get_shipment_by_id(&self, id: &str) -> Option<&Shipment> {
        self.shipments.iter().find(|s| s.id == id)
    }

    /// Find a driver by id.
    #[must_use]
    pub fn get_driver_by_id(&self, id: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    /// The shipment matching the current selection.
    ///
    /// `None` when nothing is selected, when the selection is empty, or when
    /// it names no shipment.
    #[must_use]
    pub fn selected_shipment(&self) -> Option<&Shipment> {
        self.selected_shipment_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .and_then(|id| self.get_shipment_by_id(id))
    }

    /// Set or clear the selection.
    ///
    /// The id is not checked against the shipment collection.
    pub fn select_shipment(&mut self, id: Option<&str>) {
        debug!(selected = ?id, "Selecting shipment");
        self.selected_shipment_id = id.map(str::to_string);
    }

    /// Assign a driver to a shipment.
    ///
    /// Either both lookups succeed and the shipment's driver fields and
    /// status are updated together, or nothing changes. A shipment that
    /// already has a driver is overwritten, and one driver may be assigned to
    /// any number of shipments.
    pub fn assign_driver(&mut self, shipment_id: &str, driver_id: &str) -> AssignmentOutcome {
        let Some(index) = self.shipments.iter().position(|s| s.id == shipment_id) else {
            warn!(shipment_id, driver_id, "Assignment rejected: unknown shipment");
            return AssignmentOutcome::rejected(SHIPMENT_NOT_FOUND);
        };

        let Some(driver) = self.drivers.iter().find(|d| d.id == driver_id) else {
            warn!(shipment_id, driver_id, "Assignment rejected: unknown driver");
            return AssignmentOutcome::rejected(DRIVER_NOT_FOUND);
        };

        let shipment = &mut self.shipments[index];
        if let Some(previous) = shipment.driver_id.as_deref() {
            debug!(shipment_id, previous, "Replacing assigned driver");
        }
        shipment.apply_driver(driver);

        info!(shipment_id, driver_id, "Driver assigned");
        AssignmentOutcome::assigned(driver, &shipment.id)
    }
}
