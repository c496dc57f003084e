//! Core domain types for dispatchboard.
//!
//! Field names and status strings match the bundled dataset exactly, so a
//! record read from JSON serializes back to the same shape.

use serde::{Deserialize, Serialize};

/// Whether a shipment currently has a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// A driver is linked to the shipment.
    #[serde(rename = "Assigned")]
    Assigned,
    /// No driver yet.
    #[serde(rename = "Not Assigned")]
    NotAssigned,
}

impl ShipmentStatus {
    /// The status as it appears in the dataset and in views.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "Assigned",
            Self::NotAssigned => "Not Assigned",
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A driver that can be assigned to shipments.
///
/// Drivers are loaded once and never edited during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    /// Unique identifier within the driver collection.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Phone number or other contact handle.
    pub contact: String,
    /// Operating region.
    pub region: String,
    /// Vehicle class the driver is qualified for.
    pub equipment: String,
}

/// A unit of cargo movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    /// Unique identifier within the shipment collection.
    pub id: String,
    /// Pickup location.
    pub origin: String,
    /// Drop-off location.
    pub destination: String,
    /// Assignment status.
    pub status: ShipmentStatus,
    /// Carrier company.
    pub carrier: String,
    /// Vehicle description.
    pub vehicle: String,
    /// Id of the assigned driver, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    /// Copy of the assigned driver's name, empty when unassigned.
    #[serde(default)]
    pub driver_name: String,
    /// Copy of the assigned driver's contact, empty when unassigned.
    #[serde(default)]
    pub driver_contact: String,
    /// Scheduled departure.
    pub departure_date: String,
    /// Estimated arrival.
    pub eta: String,
    /// Cargo description.
    pub cargo: String,
}

impl Shipment {
    /// Check whether the shipment is marked as assigned.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.status == ShipmentStatus::Assigned
    }

    /// Link `driver` to this shipment.
    ///
    /// Overwrites any previous driver. Only the driver fields and the status
    /// change.
    pub fn apply_driver(&mut self, driver: &Driver) {
        self.driver_id = Some(driver.id.clone());
        self.driver_name.clone_from(&driver.name);
        self.driver_contact.clone_from(&driver.contact);
        self.status = ShipmentStatus::Assigned;
    }
}
