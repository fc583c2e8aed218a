use std::f64::consts::PI;

use chrono::{DateTime, Utc};

use crate::constants::{AU_M, ERG_PER_JOULE};
use crate::error::{GoesError, Result};
use crate::sun::sun_earth_distance;
use crate::time::{check_same_length, integrate};

/// X-ray luminosity in both GOES/XRS channels.
#[derive(Debug, Clone, PartialEq)]
pub struct XrayLuminosity {
    /// Long channel (1-8 Å) luminosity [erg/s]
    pub long: Vec<f64>,
    /// Short channel (0.5-4 Å) luminosity [erg/s]
    pub short: Vec<f64>,
    pub long_integrated: Option<f64>,
    pub short_integrated: Option<f64>,
    pub long_cumulative: Option<Vec<f64>>,
    pub short_cumulative: Option<Vec<f64>>,
    /// Integration weights [s], when times were given.
    pub intervals: Option<Vec<f64>>,
}

/// Isotropic luminosity [erg/s] for a flux [W/m²] observed at Earth.
///
/// The distance is 1 AU, or the true Sun-Earth distance on `date`.
pub fn xray_luminosity_from_flux(flux: &[f64], date: Option<&DateTime<Utc>>) -> Vec<f64> {
    let distance = AU_M * date.map_or(1.0, sun_earth_distance);
    let scale = 4.0 * PI * distance * distance * ERG_PER_JOULE;
    flux.iter().map(|f| scale * f).collect()
}

/// X-ray luminosity of both channels, optionally integrated over `obstime`.
///
/// `cumulative` requires `obstime`.
pub fn goes_lx(
    longflux: &[f64],
    shortflux: &[f64],
    obstime: Option<&[DateTime<Utc>]>,
    date: Option<&DateTime<Utc>>,
    cumulative: bool,
) -> Result<XrayLuminosity> {
    match obstime {
        Some(t) => check_same_length(&[
            ("longflux", longflux.len()),
            ("shortflux", shortflux.len()),
            ("obstime", t.len()),
        ])?,
        None if cumulative => {
            return Err(GoesError::Validation(
                "cumulative X-ray energies need measurement times via obstime".to_string(),
            ));
        }
        None => check_same_length(&[
            ("longflux", longflux.len()),
            ("shortflux", shortflux.len()),
        ])?,
    }

    let long = xray_luminosity_from_flux(longflux, date);
    let short = xray_luminosity_from_flux(shortflux, date);

    let Some(obstime) = obstime else {
        return Ok(XrayLuminosity {
            long,
            short,
            long_integrated: None,
            short_integrated: None,
            long_cumulative: None,
            short_cumulative: None,
            intervals: None,
        });
    };

    let long_energy = integrate(&long, obstime)?;
    let short_energy = integrate(&short, obstime)?;
    Ok(XrayLuminosity {
        long,
        short,
        long_integrated: Some(long_energy.total),
        short_integrated: Some(short_energy.total),
        long_cumulative: cumulative.then_some(long_energy.cumulative),
        short_cumulative: cumulative.then_some(short_energy.cumulative),
        intervals: Some(long_energy.intervals),
    })
}
