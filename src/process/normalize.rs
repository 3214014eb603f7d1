use super::{columns as col, units, utils, RawRow, RawTable};
use crate::record::CanonicalRecord;

/// `v` only when every conversion of it stays finite.
fn finite(v: Option<f64>, convs: &[fn(f64) -> f64]) -> Option<f64> {
    v.filter(|&x| convs.iter().all(|c| c(x).is_finite()))
}

/// Normalize one raw row. `None` only when the row has no usable name.
///
/// Unparseable numbers come back as absent fields, never as errors or zeros.
/// A base value whose conversion overflows to infinity is absent as well.
pub fn normalize(row: &RawRow<'_>) -> Option<CanonicalRecord> {
    let name = row.name()?.to_string();
    let num = |field: &str| utils::parse_number(row.get(field));

    let distance = finite(
        num(col::DISTANCE),
        &[
            units::parsecs_to_au,
            units::parsecs_to_light_years,
            units::parsecs_to_km,
        ],
    );
    let radius = finite(num(col::RADIUS), &[units::earth_radii_to_km]);
    let orbital_period = finite(num(col::ORBITAL_PERIOD), &[units::days_to_years]);
    let mass = finite(num(col::MASS), &[units::earth_masses_to_kg]);
    let stellar_mass = finite(
        num(col::STELLAR_MASS),
        &[units::solar_masses_to_kg, units::solar_masses_to_earth_masses],
    );
    let insolation = finite(num(col::INSOLATION), &[units::earth_flux_to_wm2]);

    Some(CanonicalRecord {
        name,
        discovery_year: utils::parse_year(row.get(col::DISCOVERY_YEAR)),
        publication_date: utils::parse_publication_date(row.get(col::PUBLICATION_DATE)),
        discovery_method: utils::parse_text(row.get(col::DISCOVERY_METHOD)),

        distance,
        distance_au: distance.map(units::parsecs_to_au),
        distance_ly: distance.map(units::parsecs_to_light_years),
        distance_km: distance.map(units::parsecs_to_km),

        radius,
        radius_km: radius.map(units::earth_radii_to_km),

        orbital_period,
        orbital_period_years: orbital_period.map(units::days_to_years),
        semi_major_axis: num(col::SEMI_MAJOR_AXIS),

        mass,
        mass_kg: mass.map(units::earth_masses_to_kg),

        equilibrium_temperature: num(col::EQUILIBRIUM_TEMPERATURE),

        insolation,
        insolation_wm2: insolation.map(units::earth_flux_to_wm2),

        stellar_mass,
        stellar_mass_kg: stellar_mass.map(units::solar_masses_to_kg),
        stellar_mass_earth: stellar_mass.map(units::solar_masses_to_earth_masses),

        stellar_temperature: num(col::STELLAR_TEMPERATURE),
        stellar_radius: num(col::STELLAR_RADIUS),
    })
}

/// Normalize every named row, keeping table order.
pub fn normalize_all(table: &RawTable) -> Vec<CanonicalRecord> {
    table.iter().filter_map(|row| normalize(&row)).collect()
}
