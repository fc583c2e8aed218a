//! A minimal time-series table and the wrappers that attach derived
//! GOES/XRS quantities to it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use goesxrs_data::Abundance;

use crate::calibration::SatelliteContext;
use crate::chianti::GoesChianti;
use crate::error::{GoesError, Result};
use crate::luminosity::goes_lx;
use crate::tables::TableSource;

/// Metadata key naming the instrument.
pub const TELESCOP: &str = "TELESCOP";
/// Short channel (0.5-4 Å) column of a GOES XRS lightcurve.
pub const XRSA: &str = "xrsa";
/// Long channel (1-8 Å) column of a GOES XRS lightcurve.
pub const XRSB: &str = "xrsb";

/// Named numeric columns sharing one time axis, plus string metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightCurve {
    times: Vec<DateTime<Utc>>,
    columns: BTreeMap<String, Vec<f64>>,
    meta: BTreeMap<String, String>,
}

impl LightCurve {
    pub fn new(times: Vec<DateTime<Utc>>) -> Self {
        LightCurve {
            times,
            ..Default::default()
        }
    }

    /// A GOES XRS lightcurve with both channels and `TELESCOP = "GOES <n>"`.
    pub fn goes(
        satellite: u32,
        times: Vec<DateTime<Utc>>,
        xrsa: Vec<f64>,
        xrsb: Vec<f64>,
    ) -> Result<Self> {
        Self::new(times)
            .with_meta(TELESCOP, format!("GOES {satellite}"))
            .with_column(XRSA, xrsa)?
            .with_column(XRSB, xrsb)
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Adds or replaces a column; it must match the time axis in length.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.len() != self.times.len() {
            return Err(GoesError::Validation(format!(
                "column '{name}' has {} values for {} times",
                values.len(),
                self.times.len()
            )));
        }
        self.columns.insert(name, values);
        Ok(self)
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Satellite number from `TELESCOP`; anything other than `GOES <n>`
    /// means this is not a GOES XRS lightcurve.
    pub fn goes_satellite(&self) -> Result<u32> {
        let telescop = self.meta(TELESCOP).unwrap_or_default();
        let mut words = telescop.split_whitespace();
        match (words.next(), words.next().map(str::parse::<u32>)) {
            (Some(name), Some(Ok(n))) if name.eq_ignore_ascii_case("GOES") && n >= 1 => Ok(n),
            _ => Err(GoesError::NotGoesLightCurve(telescop.to_string())),
        }
    }

    fn required(&self, name: &str) -> Result<&[f64]> {
        self.column(name)
            .ok_or_else(|| GoesError::Validation(format!("lightcurve has no '{name}' column")))
    }

    fn start(&self) -> Result<DateTime<Utc>> {
        self.times
            .first()
            .copied()
            .ok_or_else(|| GoesError::Validation("lightcurve has no samples".to_string()))
    }
}

impl<S: TableSource> GoesChianti<S> {
    /// Copy of a GOES lightcurve with `temperature` [MK] and `em` [cm^-3]
    /// columns added. The first sample's time selects the calibration.
    pub fn temp_em(&self, lc: &LightCurve, abundance: Abundance) -> Result<LightCurve> {
        let ctx = SatelliteContext::new(lc.goes_satellite()?, lc.start()?, abundance)?;
        let result = self.temperature_em(lc.required(XRSB)?, lc.required(XRSA)?, &ctx)?;
        lc.clone()
            .with_column("temperature", result.temperature)?
            .with_column("em", result.emission_measure)
    }

    /// Copy of a GOES lightcurve with a `rad_loss_rate` [erg/s] column.
    ///
    /// Existing `temperature` and `em` columns are used as they are;
    /// otherwise they are computed assuming coronal abundances and added too.
    pub fn rad_loss_rate(&self, lc: &LightCurve) -> Result<LightCurve> {
        lc.goes_satellite()?;
        let with_tem = match (lc.column("temperature"), lc.column("em")) {
            (Some(_), Some(_)) => lc.clone(),
            _ => self.temp_em(lc, Abundance::Coronal)?,
        };
        let loss = self.radiative_loss(
            with_tem.required("temperature")?,
            with_tem.required("em")?,
            None,
            false,
        )?;
        with_tem.with_column("rad_loss_rate", loss.rate)
    }
}

/// Copy of a GOES lightcurve with `luminosity_xrsa` and `luminosity_xrsb`
/// [erg/s] columns, using the Sun-Earth distance at the first sample.
pub fn xray_luminosity(lc: &LightCurve) -> Result<LightCurve> {
    lc.goes_satellite()?;
    let date = lc.start()?;
    let lx = goes_lx(lc.required(XRSB)?, lc.required(XRSA)?, None, Some(&date), false)?;
    lc.clone()
        .with_column("luminosity_xrsa", lx.short)?
        .with_column("luminosity_xrsb", lx.long)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_time;

    fn times(n: usize) -> Vec<DateTime<Utc>> {
        let t0 = parse_time("2014-01-01 00:00:00").unwrap();
        (0..n)
            .map(|i| t0 + chrono::Duration::seconds(2 * i as i64))
            .collect()
    }

    #[test]
    fn test_goes_satellite() {
        let lc = LightCurve::goes(15, times(2), vec![1e-7; 2], vec![1e-6; 2]).unwrap();
        assert_eq!(lc.goes_satellite().unwrap(), 15);
        assert_eq!(lc.meta(TELESCOP), Some("GOES 15"));
    }

    #[test]
    fn test_not_goes() {
        let lc = LightCurve::new(times(2)).with_meta(TELESCOP, "SDO/EVE");
        assert!(matches!(
            lc.goes_satellite(),
            Err(GoesError::NotGoesLightCurve(name)) if name == "SDO/EVE"
        ));
        assert!(LightCurve::new(times(2)).goes_satellite().is_err());
        assert!(xray_luminosity(&LightCurve::new(times(2)).with_meta(TELESCOP, "GOES")).is_err());
    }

    #[test]
    fn test_column_length_checked() {
        assert!(LightCurve::new(times(3)).with_column("x", vec![1.0]).is_err());
    }

    #[test]
    fn test_luminosity_columns_added_to_copy() {
        let lc = LightCurve::goes(15, times(3), vec![7e-7; 3], vec![7e-6; 3]).unwrap();
        let out = xray_luminosity(&lc).unwrap();

        assert!(lc.column("luminosity_xrsb").is_none());
        let long = out.column("luminosity_xrsb").unwrap();
        let short = out.column("luminosity_xrsa").unwrap();
        assert_eq!(long.len(), 3);
        assert!((long[0] / short[0] - 10.0).abs() < 1e-9);
        assert_eq!(out.column(XRSB), lc.column(XRSB));
    }
}
