use chrono::{DateTime, Datelike, Utc};
use log::debug;

use goesxrs_data::Abundance;

use crate::chianti::validate_satellite;
use crate::constants::{
    GOES6_LONG_CORRECTION, LONG_FLUX_FLOOR, LONG_GOES7_SCALE, SENTINEL_RATIO, SHORT_FLUX_FLOOR,
    SHORT_GOES7_SCALE,
};
use crate::error::Result;
use crate::time::check_same_length;

/// Which instrument made the observation and which atomic model applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteContext {
    pub satellite: u32,
    pub date: DateTime<Utc>,
    pub abundance: Abundance,
}

impl SatelliteContext {
    pub fn new(satellite: u32, date: DateTime<Utc>, abundance: Abundance) -> Result<Self> {
        validate_satellite(satellite)?;
        Ok(SatelliteContext {
            satellite,
            date,
            abundance,
        })
    }
}

/// Fluxes on the scale the model tables expect (W/m²).
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedFluxes {
    pub long: Vec<f64>,
    pub short: Vec<f64>,
}

/// True before the GOES-6 long channel calibration change of 1983-06-28.
fn before_goes6_fix(date: &DateTime<Utc>) -> bool {
    (date.year(), date.month(), date.day()) < (1983, 6, 28)
}

/// Undoes instrument-specific scalings of the published fluxes.
///
/// GOES-6 long channel data before 1983-06-28 are multiplied by 4.43/5.32.
/// From GOES-8 on, published fluxes are normalised to GOES-7; that is
/// removed by dividing long by 0.70 and short by 0.85.
pub fn correct_fluxes(
    longflux: &[f64],
    shortflux: &[f64],
    satellite: u32,
    date: &DateTime<Utc>,
) -> Result<CorrectedFluxes> {
    validate_satellite(satellite)?;
    check_same_length(&[("longflux", longflux.len()), ("shortflux", shortflux.len())])?;

    let long_factor = if satellite == 6 && before_goes6_fix(date) {
        GOES6_LONG_CORRECTION
    } else {
        1.0
    };
    let (long_scale, short_scale) = if satellite > 7 {
        (LONG_GOES7_SCALE, SHORT_GOES7_SCALE)
    } else {
        (1.0, 1.0)
    };

    Ok(CorrectedFluxes {
        long: longflux.iter().map(|f| f * long_factor / long_scale).collect(),
        short: shortflux.iter().map(|f| f / short_scale).collect(),
    })
}

/// Short / long channel ratio with noise-floor samples set to 0.003.
pub fn flux_ratio(fluxes: &CorrectedFluxes) -> Vec<f64> {
    let mut masked = 0usize;
    let ratio: Vec<f64> = fluxes
        .short
        .iter()
        .zip(fluxes.long.iter())
        .map(|(&short, &long)| {
            if short < SHORT_FLUX_FLOOR || long < LONG_FLUX_FLOOR {
                masked += 1;
                SENTINEL_RATIO
            } else {
                short / long
            }
        })
        .collect();
    if masked > 0 {
        debug!("{masked} samples below the flux floor, ratio set to {SENTINEL_RATIO}");
    }
    ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_time;
    use approx::assert_relative_eq;

    fn date(s: &str) -> DateTime<Utc> {
        parse_time(s).unwrap()
    }

    #[test]
    fn test_modern_satellite_unscaled() {
        let c = correct_fluxes(&[7e-6], &[7e-7], 15, &date("2014-04-16")).unwrap();
        assert_relative_eq!(c.long[0], 7e-6 / 0.70);
        assert_relative_eq!(c.short[0], 7e-7 / 0.85);
    }

    #[test]
    fn test_goes7_untouched() {
        let c = correct_fluxes(&[7e-6], &[7e-7], 7, &date("1990-01-01")).unwrap();
        assert_eq!(c.long[0], 7e-6);
        assert_eq!(c.short[0], 7e-7);
    }

    #[test]
    fn test_goes6_early_correction() {
        let early = correct_fluxes(&[5.32e-6], &[1e-6], 6, &date("1983-06-27T23:59:59Z")).unwrap();
        assert_relative_eq!(early.long[0], 4.43e-6, max_relative = 1e-12);
        assert_eq!(early.short[0], 1e-6);

        let late = correct_fluxes(&[5.32e-6], &[1e-6], 6, &date("1983-06-28")).unwrap();
        assert_eq!(late.long[0], 5.32e-6);
    }

    #[test]
    fn test_ratio_sentinel() {
        let fluxes = CorrectedFluxes {
            long: vec![1e-5, 1e-5, 2e-8, 1e-6],
            short: vec![1e-6, 5e-11, 1e-6, 2e-7],
        };
        let ratio = flux_ratio(&fluxes);
        assert_relative_eq!(ratio[0], 0.1);
        assert_eq!(ratio[1], 0.003);
        assert_eq!(ratio[2], 0.003);
        assert_relative_eq!(ratio[3], 0.2);
    }

    #[test]
    fn test_mask_applies_after_rescaling() {
        // 2.5e-8 / 0.7 clears the 3e-8 floor
        let c = correct_fluxes(&[2.5e-8], &[1e-9], 15, &date("2014-01-01")).unwrap();
        assert_ne!(flux_ratio(&c)[0], 0.003);
    }

    #[test]
    fn test_invalid_inputs() {
        let d = date("2014-01-01");
        assert!(correct_fluxes(&[1e-6], &[1e-7], 0, &d).is_err());
        assert!(correct_fluxes(&[1e-6, 1e-6], &[1e-7], 15, &d).is_err());
        assert!(SatelliteContext::new(0, d, Abundance::Coronal).is_err());
    }
}
