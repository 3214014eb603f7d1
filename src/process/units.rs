//! Unit conversions from archive units to display units.

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const AU_PER_PARSEC: f64 = 206265.0;
pub const LIGHT_YEARS_PER_PARSEC: f64 = 3.26156;
pub const KM_PER_PARSEC: f64 = 3.0857e13;
pub const DAYS_PER_YEAR: f64 = 365.25;
pub const EARTH_MASS_KG: f64 = 5.972e24;
pub const SOLAR_MASS_KG: f64 = 1.98847e30;
pub const EARTH_MASSES_PER_SOLAR_MASS: f64 = 332946.0;
pub const EARTH_FLUX_W_M2: f64 = 1361.0;

pub fn earth_radii_to_km(r: f64) -> f64 {
    r * EARTH_RADIUS_KM
}

pub fn parsecs_to_au(d: f64) -> f64 {
    d * AU_PER_PARSEC
}

pub fn parsecs_to_light_years(d: f64) -> f64 {
    d * LIGHT_YEARS_PER_PARSEC
}

pub fn parsecs_to_km(d: f64) -> f64 {
    d * KM_PER_PARSEC
}

pub fn days_to_years(p: f64) -> f64 {
    p / DAYS_PER_YEAR
}

pub fn earth_masses_to_kg(m: f64) -> f64 {
    m * EARTH_MASS_KG
}

pub fn solar_masses_to_kg(m: f64) -> f64 {
    m * SOLAR_MASS_KG
}

pub fn solar_masses_to_earth_masses(m: f64) -> f64 {
    m * EARTH_MASSES_PER_SOLAR_MASS
}

pub fn earth_flux_to_wm2(s: f64) -> f64 {
    s * EARTH_FLUX_W_M2
}
