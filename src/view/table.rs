use prettytable::{format, Cell, Row, Table};
use std::fmt::Display;

use crate::record::CanonicalRecord;

/// Cell text for an absent value.
pub const NO_VALUE: &str = "No value";

pub const HEADINGS: [&str; 9] = [
    "Name",
    "Distance (pc)",
    "Radius (R⊕)",
    "Insolation (S⊕)",
    "Mass (M⊕)",
    "Stellar Mass (M☉)",
    "Orbital Period",
    "Discovery Year",
    "Publication Date",
];

fn cell<T: Display>(v: Option<T>) -> Cell {
    match v {
        Some(v) => Cell::new(&v.to_string()).style_spec("r"),
        None => Cell::new(NO_VALUE),
    }
}

/// Values shown for one record, in `HEADINGS` order.
pub fn row_cells(r: &CanonicalRecord) -> Vec<Cell> {
    vec![
        Cell::new(&r.name),
        cell(r.distance),
        cell(r.radius),
        cell(r.insolation),
        cell(r.mass),
        cell(r.stellar_mass),
        cell(r.orbital_period),
        cell(r.discovery_year),
        cell(r.publication_date),
    ]
}

pub fn build_table(rows: &[CanonicalRecord]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(
        HEADINGS
            .iter()
            .map(|h| Cell::new(h).style_spec("bFg"))
            .collect(),
    ));
    for r in rows {
        table.add_row(Row::new(row_cells(r)));
    }
    table
}
