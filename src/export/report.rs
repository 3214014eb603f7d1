use super::format::group_thousands;
use crate::{
    record::CanonicalRecord,
    sort::{self, Direction, SortKey},
};

/// Placeholder line for a record lacking the report's field.
pub const NO_DATA: &str = "No data";

/// Periods longer than this are flagged as estimates.
pub const ESTIMATED_PERIOD_DAYS: f64 = 10_000.0;

/// The eight sorted text reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Distance,
    DiscoveryYear,
    PublicationDate,
    Size,
    OrbitalPeriod,
    Mass,
    StellarMass,
    Insolation,
}

impl ReportKind {
    pub const ALL: [ReportKind; 8] = [
        ReportKind::Distance,
        ReportKind::DiscoveryYear,
        ReportKind::PublicationDate,
        ReportKind::Size,
        ReportKind::OrbitalPeriod,
        ReportKind::Mass,
        ReportKind::StellarMass,
        ReportKind::Insolation,
    ];

    pub fn sort_key(self) -> SortKey {
        match self {
            ReportKind::Distance => SortKey::Distance,
            ReportKind::DiscoveryYear => SortKey::DiscoveryYear,
            ReportKind::PublicationDate => SortKey::PublicationDate,
            ReportKind::Size => SortKey::Radius,
            ReportKind::OrbitalPeriod => SortKey::OrbitalPeriod,
            ReportKind::Mass => SortKey::Mass,
            ReportKind::StellarMass => SortKey::StellarMass,
            ReportKind::Insolation => SortKey::Insolation,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::Distance => "exoplanets_distance.txt",
            ReportKind::DiscoveryYear => "exoplanets_discovery.txt",
            ReportKind::PublicationDate => "exoplanets_publication.txt",
            ReportKind::Size => "exoplanets_size.txt",
            ReportKind::OrbitalPeriod => "exoplanets_orbital_period.txt",
            ReportKind::Mass => "exoplanets_mass.txt",
            ReportKind::StellarMass => "exoplanets_star_mass.txt",
            ReportKind::Insolation => "exoplanets_insolation.txt",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Distance => "List of Exoplanets Distance From Earth",
            ReportKind::DiscoveryYear => "List of Exoplanets Discovery Years in Order",
            ReportKind::PublicationDate => "List of Exoplanets Publication Date in Order",
            ReportKind::Size => "List of Exoplanets Size From Smaller to Biggest",
            ReportKind::OrbitalPeriod => "List of Exoplanets Orbital Period",
            ReportKind::Mass => "List of Exoplanets Mass in Order",
            ReportKind::StellarMass => "List of Exoplanets Star's Mass in Order",
            ReportKind::Insolation => "List of Exoplanets Incident Stellar Flux in Order",
        }
    }

    /// Detail lines for one record, or `None` when the field is absent.
    fn details(self, r: &CanonicalRecord) -> Option<Vec<String>> {
        let lines = match self {
            ReportKind::Distance => vec![
                format!("Distance (km): {}", group_thousands(r.distance_km?, 0)),
                format!("Distance (AU): {}", group_thousands(r.distance_au?, 0)),
                format!("Distance (ly): {}", group_thousands(r.distance_ly?, 2)),
                format!("Distance (pc): {}", group_thousands(r.distance?, 2)),
            ],
            ReportKind::DiscoveryYear => {
                vec![format!("Discovery Year: {}", r.discovery_year?)]
            }
            ReportKind::PublicationDate => {
                vec![format!("Publication Date: {}", r.publication_date?)]
            }
            ReportKind::Size => vec![
                format!("Radius (R⊕): {}", group_thousands(r.radius?, 2)),
                format!("Radius (km): {}", group_thousands(r.radius_km?, 0)),
            ],
            ReportKind::OrbitalPeriod => {
                let days = r.orbital_period?;
                let mark = if days > ESTIMATED_PERIOD_DAYS {
                    "(estimated) "
                } else {
                    ""
                };
                vec![
                    format!("Orbital Period (days): {}{}", mark, group_thousands(days, 2)),
                    format!(
                        "Orbital Period (years): {}{}",
                        mark,
                        group_thousands(r.orbital_period_years?, 4)
                    ),
                ]
            }
            ReportKind::Mass => vec![
                format!("Mass (M⊕): {}", group_thousands(r.mass?, 2)),
                format!("Mass (kg): {}", group_thousands(r.mass_kg?, 0)),
            ],
            ReportKind::StellarMass => vec![
                format!("Stellar Mass (M☉): {}", group_thousands(r.stellar_mass?, 3)),
                format!("Stellar Mass (kg): {}", group_thousands(r.stellar_mass_kg?, 0)),
                format!(
                    "Stellar Mass (M⊕): {}",
                    group_thousands(r.stellar_mass_earth?, 0)
                ),
            ],
            ReportKind::Insolation => vec![
                format!("Insolation (S⊕): {}", group_thousands(r.insolation?, 4)),
                format!(
                    "Incident Stellar Flux (W·m⁻²): {}",
                    group_thousands(r.insolation_wm2?, 2)
                ),
            ],
        };
        Some(lines)
    }
}

/// Report text as lines: title, blank line, then one numbered entry per record.
pub fn report_lines(kind: ReportKind, records: &[CanonicalRecord], dir: Direction) -> Vec<String> {
    let mut lines = vec![kind.title().to_string(), String::new()];
    for (i, r) in sort::sorted(records, kind.sort_key(), dir)
        .into_iter()
        .enumerate()
    {
        lines.push(format!("{}) Name: {}:", i + 1, r.name));
        match kind.details(r) {
            Some(details) => lines.extend(details.into_iter().map(|d| format!("\t{}", d))),
            None => lines.push(format!("\t{}", NO_DATA)),
        }
    }
    lines
}

pub fn render_report(kind: ReportKind, records: &[CanonicalRecord], dir: Direction) -> String {
    let mut text = report_lines(kind, records, dir).join("\n");
    text.push('\n');
    text
}
