use goesxrs_data::Abundance;

use crate::calibration::{SatelliteContext, correct_fluxes, flux_ratio};
use crate::chianti::{GoesChianti, validate_satellite};
use crate::error::{GoesError, Result};
use crate::spline::CubicSpline;
use crate::tables::{TableKey, TableSource};

/// Isothermal temperature and volume emission measure per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureEm {
    /// Temperature [MK]
    pub temperature: Vec<f64>,
    /// Volume emission measure [cm^-3]
    pub emission_measure: Vec<f64>,
}

impl<S: TableSource> GoesChianti<S> {
    /// Temperature and emission measure from GOES/XRS long (1-8 Å) and
    /// short (0.5-4 Å) channel fluxes in W/m².
    ///
    /// Uses the short/long flux ratio as modelled with CHIANTI for an
    /// isothermal plasma (White, Thomas & Schwartz 2005, Sol. Phys. 227, 231).
    /// Fluxes are first put back on each satellite's own scale (see
    /// [`correct_fluxes`]); samples under the instrument noise floor get the
    /// fixed ratio 0.003 and so a fixed, low-confidence temperature.
    pub fn temperature_em(
        &self,
        longflux: &[f64],
        shortflux: &[f64],
        ctx: &SatelliteContext,
    ) -> Result<TemperatureEm> {
        let corrected = correct_fluxes(longflux, shortflux, ctx.satellite, &ctx.date)?;
        let ratio = flux_ratio(&corrected);

        let temperature = self.temperature_from_ratio(&ratio, ctx.satellite, ctx.abundance)?;
        let emission_measure =
            self.emission_measure(&corrected.long, &temperature, ctx.satellite, ctx.abundance)?;
        Ok(TemperatureEm {
            temperature,
            emission_measure,
        })
    }

    /// Temperature [MK] from an already prepared short/long flux ratio.
    ///
    /// No flux correction or masking is done here; every ratio must lie
    /// inside the tabulated range for the satellite.
    pub fn temperature_from_ratio(
        &self,
        fluxratio: &[f64],
        satellite: u32,
        abundance: Abundance,
    ) -> Result<Vec<f64>> {
        validate_satellite(satellite)?;
        let table = self.load(&TableKey::TemperatureRatio {
            satellite,
            abundance,
        })?;
        let spline = CubicSpline::new(&table.values, &table.temperature)?;

        if !spline.covers(fluxratio) {
            let (min, max) = spline.domain();
            return Err(GoesError::OutOfRange {
                quantity: "flux ratio",
                min,
                max,
                unit: "",
            });
        }

        Ok(spline
            .evaluate(fluxratio)
            .into_iter()
            .map(|log_t| 10f64.powf(log_t))
            .collect())
    }
}
