use chrono::{DateTime, Utc};

use crate::chianti::GoesChianti;
use crate::error::{GoesError, Result};
use crate::tables::{TableKey, TableSource};
use crate::time::{check_same_length, integrate};

/// Radiative losses of the emitting plasma.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiativeLoss {
    /// Loss rate per sample [erg/s]
    pub rate: Vec<f64>,
    /// Energy radiated over the observation [erg], when times were given.
    pub integrated: Option<f64>,
    /// Energy radiated up to each sample [erg], when requested.
    pub cumulative: Option<Vec<f64>>,
}

impl<S: TableSource> GoesChianti<S> {
    /// Radiative loss rate of an isothermal plasma from temperature [MK] and
    /// emission measure [cm^-3], using the CHIANTI loss function.
    ///
    /// With `obstime`, the rate is also integrated over the observation
    /// (see [`crate::time_intervals`]). `cumulative` requires `obstime`.
    pub fn radiative_loss(
        &self,
        temperature: &[f64],
        em: &[f64],
        obstime: Option<&[DateTime<Utc>]>,
        cumulative: bool,
    ) -> Result<RadiativeLoss> {
        match obstime {
            Some(t) => check_same_length(&[
                ("temp", temperature.len()),
                ("em", em.len()),
                ("obstime", t.len()),
            ])?,
            None if cumulative => {
                return Err(GoesError::Validation(
                    "cumulative radiated losses need measurement times via obstime".to_string(),
                ));
            }
            None => check_same_length(&[("temp", temperature.len()), ("em", em.len())])?,
        }

        let spline = self.spline_over_temperature(&TableKey::RadiativeLoss)?;
        let temp_k: Vec<f64> = temperature.iter().map(|t| t * 1.0e6).collect();
        if !spline.covers(&temp_k) {
            let (min, max) = spline.domain();
            return Err(GoesError::OutOfRange {
                quantity: "temperature",
                min: min / 1.0e6,
                max: max / 1.0e6,
                unit: " MK",
            });
        }

        let rate: Vec<f64> = em
            .iter()
            .zip(spline.evaluate(&temp_k))
            .map(|(measure, per_em)| measure * per_em)
            .collect();

        let Some(obstime) = obstime else {
            return Ok(RadiativeLoss {
                rate,
                integrated: None,
                cumulative: None,
            });
        };
        let energy = integrate(&rate, obstime)?;
        Ok(RadiativeLoss {
            rate,
            integrated: Some(energy.total),
            cumulative: cumulative.then_some(energy.cumulative),
        })
    }
}
