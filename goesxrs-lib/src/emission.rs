use goesxrs_data::Abundance;

use crate::chianti::{GoesChianti, validate_satellite};
use crate::constants::EM_TABLE_SCALE;
use crate::error::{GoesError, Result};
use crate::tables::{TableKey, TableSource};
use crate::time::check_same_length;

impl<S: TableSource> GoesChianti<S> {
    /// Volume emission measure [cm^-3] from corrected long channel flux
    /// [W/m²] and temperature [MK].
    ///
    /// `longflux` must already be on the satellite's own scale, as returned
    /// by [`crate::correct_fluxes`].
    pub fn emission_measure(
        &self,
        longflux: &[f64],
        temperature: &[f64],
        satellite: u32,
        abundance: Abundance,
    ) -> Result<Vec<f64>> {
        validate_satellite(satellite)?;
        check_same_length(&[("longflux", longflux.len()), ("temp", temperature.len())])?;

        let spline = self.spline_over_temperature(&TableKey::TemperatureLongFlux {
            satellite,
            abundance,
        })?;

        let log_temp: Vec<f64> = temperature.iter().map(|t| t.log10()).collect();
        if !spline.covers(&log_temp) {
            let (min, max) = spline.domain();
            return Err(GoesError::OutOfRange {
                quantity: "temperature",
                min: 10f64.powf(min),
                max: 10f64.powf(max),
                unit: " MK",
            });
        }

        let flux_per_em = spline.evaluate(&log_temp);
        Ok(longflux
            .iter()
            .zip(flux_per_em.iter())
            .map(|(flux, per_em)| flux / per_em * EM_TABLE_SCALE)
            .collect())
    }
}
