use chrono::{DateTime, Local, Utc};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use envoy::{
    models::{Inventory, Measurement, Production},
    quantity::energy::WattHours,
};

pub fn build_inventory_table(inventory: &[Inventory]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Type",
        "Serial number",
        "Part number",
        "Firmware",
        "Status",
        "Producing",
        "Communicating",
        "Last report",
    ]);
    for group in inventory {
        for device in &group.devices {
            table.add_row(vec![
                Cell::new(group.kind),
                Cell::new(device.serial_number.as_deref().unwrap_or_default()),
                Cell::new(device.part_number.as_deref().unwrap_or_default())
                    .add_attribute(Attribute::Dim),
                Cell::new(device.firmware.as_deref().unwrap_or_default())
                    .add_attribute(Attribute::Dim),
                Cell::new(device.statuses.join(", "))
                    .fg(if device.is_ok() { Color::Green } else { Color::Red }),
                flag_cell(device.is_producing),
                flag_cell(device.is_communicating),
                timestamp_cell(device.last_reported_at),
            ]);
        }
    }
    table
}

pub fn build_production_table(production: &Production) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Section",
        "Meter",
        "Measurement",
        "Active",
        "Power",
        "Today",
        "Lifetime",
        "Reading time",
    ]);
    if production.w_now.is_some() || production.wh_lifetime.is_some() {
        table.add_row(vec![
            Cell::new("summary"),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            production
                .w_now
                .map_or_else(|| Cell::new(""), Cell::new)
                .set_alignment(CellAlignment::Right),
            Cell::new(""),
            energy_cell(production.wh_lifetime),
            Cell::new(""),
        ]);
    }
    for (section, measurements) in [
        ("production", &production.production),
        ("consumption", &production.consumption),
        ("storage", &production.storage),
    ] {
        for measurement in measurements {
            table.add_row(measurement_row(section, measurement));
        }
    }
    table
}

fn measurement_row(section: &str, measurement: &Measurement) -> Vec<Cell> {
    vec![
        Cell::new(section),
        Cell::new(measurement.kind),
        measurement
            .measurement_type
            .map_or_else(|| Cell::new(""), Cell::new)
            .add_attribute(Attribute::Dim),
        Cell::new(measurement.active_count).set_alignment(CellAlignment::Right),
        Cell::new(measurement.w_now).set_alignment(CellAlignment::Right),
        energy_cell(measurement.wh_today.or(measurement.wh_now)),
        Cell::new(measurement.wh_lifetime).set_alignment(CellAlignment::Right),
        timestamp_cell(measurement.reading_time),
    ]
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn flag_cell(flag: bool) -> Cell {
    if flag { Cell::new("yes").fg(Color::Green) } else { Cell::new("no").fg(Color::Red) }
}

fn energy_cell(energy: Option<WattHours>) -> Cell {
    energy.map_or_else(|| Cell::new(""), Cell::new).set_alignment(CellAlignment::Right)
}

fn timestamp_cell(timestamp: Option<DateTime<Utc>>) -> Cell {
    timestamp
        .map(|timestamp| timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .map_or_else(|| Cell::new(""), Cell::new)
        .add_attribute(Attribute::Dim)
}
