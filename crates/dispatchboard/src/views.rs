//! Text renderings of the list and detail views.
//!
//! Views only read from the store, apart from the detail view which records
//! the shipment it opens as the current selection.

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::model::{Driver, Shipment, ShipmentStatus};
use crate::store::{AssignmentOutcome, ShipmentStore, SHIPMENT_NOT_FOUND};

/// Output format for views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

/// How views render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Include driver contact details in plain and table output.
    pub show_contacts: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            show_contacts: true,
        }
    }
}

impl ViewOptions {
    /// Same options with a different format.
    #[must_use]
    pub fn with_format(self, format: OutputFormat) -> Self {
        Self { format, ..self }
    }
}

/// Render the shipment list, optionally restricted to one status.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_shipment_list(
    store: &ShipmentStore,
    filter: Option<ShipmentStatus>,
    options: ViewOptions,
    out: &mut impl Write,
) -> Result<()> {
    let shipments: Vec<&Shipment> = match filter {
        Some(status) => store.shipments_with_status(status).collect(),
        None => store.shipments().iter().collect(),
    };

    match options.format {
        OutputFormat::Json => {
            let value = json!({
                "assignedCount": store.assigned_count(),
                "unassignedCount": store.unassigned_count(),
                "shipments": shipments,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        OutputFormat::Plain => {
            write_counters(store, out)?;
            writeln!(out)?;
            for shipment in &shipments {
                write!(
                    out,
                    "{}  {} -> {}  [{}]",
                    shipment.id, shipment.origin, shipment.destination, shipment.status
                )?;
                if shipment.is_assigned() {
                    write!(out, "  {}", shipment.driver_name)?;
                }
                writeln!(out)?;
            }
            if shipments.is_empty() {
                writeln!(out, "No shipments.")?;
            }
        }
        OutputFormat::Table => {
            write_counters(store, out)?;
            writeln!(out)?;
            let mut headers = vec!["ID", "ORIGIN", "DESTINATION", "STATUS", "DRIVER"];
            if options.show_contacts {
                headers.push("CONTACT");
            }
            headers.push("ETA");

            let rows: Vec<Vec<String>> = shipments
                .iter()
                .map(|s| {
                    let mut row = vec![
                        s.id.clone(),
                        s.origin.clone(),
                        s.destination.clone(),
                        s.status.to_string(),
                        dash_if_empty(&s.driver_name),
                    ];
                    if options.show_contacts {
                        row.push(dash_if_empty(&s.driver_contact));
                    }
                    row.push(s.eta.clone());
                    row
                })
                .collect();
            write_table(&headers, &rows, out)?;
        }
    }
    Ok(())
}

/// Open the detail view for `id`.
///
/// Selects the shipment in the store, then renders whatever the selection
/// resolves to. Returns `false` when the id matched no shipment.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_shipment_detail(
    store: &mut ShipmentStore,
    id: &str,
    options: ViewOptions,
    out: &mut impl Write,
) -> Result<bool> {
    store.select_shipment(Some(id));
    render_selected(store, options, out)
}

/// Render the currently selected shipment.
///
/// Returns `false` when there is no selection or it matched no shipment.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_selected(
    store: &ShipmentStore,
    options: ViewOptions,
    out: &mut impl Write,
) -> Result<bool> {
    let Some(shipment) = store.selected_shipment() else {
        match options.format {
            OutputFormat::Json => writeln!(out, "null")?,
            OutputFormat::Plain | OutputFormat::Table => writeln!(out, "{SHIPMENT_NOT_FOUND}")?,
        }
        return Ok(false);
    };

    if options.format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(shipment)?)?;
        return Ok(true);
    }

    let mut fields = vec![
        ("Shipment", shipment.id.clone()),
        ("Status", shipment.status.to_string()),
        ("Origin", shipment.origin.clone()),
        ("Destination", shipment.destination.clone()),
        ("Carrier", shipment.carrier.clone()),
        ("Vehicle", shipment.vehicle.clone()),
        ("Departure", shipment.departure_date.clone()),
        ("ETA", shipment.eta.clone()),
        ("Cargo", shipment.cargo.clone()),
        ("Driver", dash_if_empty(&shipment.driver_name)),
    ];
    if options.show_contacts {
        fields.push(("Contact", dash_if_empty(&shipment.driver_contact)));
    }

    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in fields {
        writeln!(out, "{label:<width$}  {value}")?;
    }
    Ok(true)
}

/// Render the driver roster.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_drivers(
    store: &ShipmentStore,
    options: ViewOptions,
    out: &mut impl Write,
) -> Result<()> {
    let drivers = store.drivers();
    match options.format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(drivers)?)?;
        }
        OutputFormat::Plain => {
            for driver in drivers {
                write!(out, "{}  {}", driver.id, driver.name)?;
                if options.show_contacts {
                    write!(out, "  {}", driver.contact)?;
                }
                writeln!(out, "  ({}, {})", driver.region, driver.equipment)?;
            }
        }
        OutputFormat::Table => {
            let mut headers = vec!["ID", "NAME"];
            if options.show_contacts {
                headers.push("CONTACT");
            }
            headers.extend(["REGION", "EQUIPMENT", "SHIPMENTS"]);

            let rows: Vec<Vec<String>> = drivers
                .iter()
                .map(|d| driver_row(store, d, options.show_contacts))
                .collect();
            write_table(&headers, &rows, out)?;
        }
    }
    Ok(())
}

/// Render the result of an assignment.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_outcome(
    outcome: &AssignmentOutcome,
    options: ViewOptions,
    out: &mut impl Write,
) -> Result<()> {
    match options.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(outcome)?)?,
        OutputFormat::Plain | OutputFormat::Table => writeln!(out, "{}", outcome.message)?,
    }
    Ok(())
}

/// Render the store counters.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render_stats(
    store: &ShipmentStore,
    options: ViewOptions,
    out: &mut impl Write,
) -> Result<()> {
    let stats = store.stats();
    if options.format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
    } else {
        writeln!(out, "Shipments:     {}", stats.total)?;
        writeln!(out, "Assigned:      {}", stats.assigned)?;
        writeln!(out, "Not Assigned:  {}", stats.unassigned)?;
        writeln!(out, "Drivers:       {}", stats.drivers)?;
    }
    Ok(())
}

fn write_counters(store: &ShipmentStore, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "Shipments: {}  Assigned: {}  Not Assigned: {}",
        store.shipments().len(),
        store.assigned_count(),
        store.unassigned_count()
    )?;
    Ok(())
}

fn driver_row(store: &ShipmentStore, driver: &Driver, show_contacts: bool) -> Vec<String> {
    let load = store
        .shipments()
        .iter()
        .filter(|s| s.driver_id.as_deref() == Some(driver.id.as_str()))
        .count();

    let mut row = vec![driver.id.clone(), driver.name.clone()];
    if show_contacts {
        row.push(driver.contact.clone());
    }
    row.extend([
        driver.region.clone(),
        driver.equipment.clone(),
        load.to_string(),
    ]);
    row
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn write_table(headers: &[&str], rows: &[Vec<String>], out: &mut impl Write) -> Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    write_row(&header_cells, &widths, out)?;
    for row in rows {
        write_row(row, &widths, out)?;
    }
    Ok(())
}

fn write_row(cells: &[String], widths: &[usize], out: &mut impl Write) -> Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::model::fixtures::{driver, unassigned};

    fn create_test_store() -> ShipmentStore {
        let mut s2 = unassigned("S2");
        s2.apply_driver(&driver("D1", "Alice", "555-0100"));
        ShipmentStore::new(&Dataset {
            shipments: vec![unassigned("S1"), s2],
            drivers: vec![
                driver("D1", "Alice", "555-0100"),
                driver("D2", "Bob", "555-0200"),
            ],
        })
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn plain() -> ViewOptions {
        ViewOptions::default()
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_list_plain_shows_counters_and_rows() {
        let store = create_test_store();
        let text = render(|out| render_shipment_list(&store, None, plain(), out));

        assert!(text.starts_with("Shipments: 2  Assigned: 1  Not Assigned: 1"));
        assert!(text.contains("S1  Jakarta -> Bandung  [Not Assigned]"));
        assert!(text.contains("S2  Jakarta -> Bandung  [Assigned]  Alice"));
    }

    #[test]
    fn test_list_filtered() {
        let store = create_test_store();
        let text = render(|out| {
            render_shipment_list(&store, Some(ShipmentStatus::Assigned), plain(), out)
        });
        assert!(text.contains("S2"));
        assert!(!text.contains("S1 "));
    }

    #[test]
    fn test_list_json() {
        let store = create_test_store();
        let options = plain().with_format(OutputFormat::Json);
        let text = render(|out| render_shipment_list(&store, None, options, out));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["assignedCount"], 1);
        assert_eq!(value["unassignedCount"], 1);
        assert_eq!(value["shipments"].as_array().unwrap().len(), 2);
        assert_eq!(value["shipments"][1]["status"], "Assigned");
    }

    #[test]
    fn test_list_table_hides_contacts() {
        let store = create_test_store();
        let options = ViewOptions {
            format: OutputFormat::Table,
            show_contacts: false,
        };
        let text = render(|out| render_shipment_list(&store, None, options, out));

        assert!(text.contains("ID"));
        assert!(text.contains("DRIVER"));
        assert!(!text.contains("CONTACT"));
        assert!(!text.contains("555-0100"));
    }

    #[test]
    fn test_detail_selects_shipment() {
        let mut store = create_test_store();
        let mut out = Vec::new();
        let found = render_shipment_detail(&mut store, "S2", plain(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(found);
        assert_eq!(store.selected_shipment_id(), Some("S2"));
        assert!(text.contains("Shipment     S2"));
        assert!(text.contains("Driver       Alice"));
        assert!(text.contains("Contact      555-0100"));
    }

    #[test]
    fn test_detail_unknown_id() {
        let mut store = create_test_store();
        let mut out = Vec::new();
        let found = render_shipment_detail(&mut store, "S9", plain(), &mut out).unwrap();

        assert!(!found);
        assert_eq!(String::from_utf8(out).unwrap(), "Shipment not found.\n");
    }

    #[test]
    fn test_detail_unassigned_shows_dash() {
        let mut store = create_test_store();
        let mut out = Vec::new();
        render_shipment_detail(&mut store, "S1", plain(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Driver       -"));
    }

    #[test]
    fn test_selected_json_null_when_nothing_selected() {
        let store = create_test_store();
        let mut out = Vec::new();
        let options = plain().with_format(OutputFormat::Json);
        let found = render_selected(&store, options, &mut out).unwrap();
        assert!(!found);
        assert_eq!(String::from_utf8(out).unwrap().trim(), "null");
    }

    #[test]
    fn test_drivers_table_counts_load() {
        let store = create_test_store();
        let options = plain().with_format(OutputFormat::Table);
        let text = render(|out| render_drivers(&store, options, out));

        let alice = text.lines().find(|l| l.starts_with("D1")).unwrap();
        assert!(alice.trim_end().ends_with('1'));
        let bob = text.lines().find(|l| l.starts_with("D2")).unwrap();
        assert!(bob.trim_end().ends_with('0'));
    }

    #[test]
    fn test_outcome_plain_and_json() {
        let mut store = create_test_store();
        let outcome = store.assign_driver("S1", "D2");

        let text = render(|out| render_outcome(&outcome, plain(), out));
        assert_eq!(text, "Bob assigned to S1.\n");

        let options = plain().with_format(OutputFormat::Json);
        let text = render(|out| render_outcome(&outcome, options, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["success"], true);
    }

    #[test]
    fn test_stats_plain() {
        let store = create_test_store();
        let text = render(|out| render_stats(&store, plain(), out));
        assert!(text.contains("Shipments:     2"));
        assert!(text.contains("Drivers:       2"));
    }

    #[test]
    fn test_table_alignment() {
        let rows = vec![
            vec!["a".to_string(), "long value".to_string()],
            vec!["bbbb".to_string(), "x".to_string()],
        ];
        let text = render(|out| write_table(&["K", "V"], &rows, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "K     V");
        assert_eq!(lines[1], "a     long value");
        assert_eq!(lines[2], "bbbb  x");
    }
}
