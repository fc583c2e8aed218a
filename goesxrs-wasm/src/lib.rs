//! WASM bindings for goesxrs.
//!
//! The CHIANTI tables are not embedded; the caller fetches a bundle written
//! by `goesxrs-generate` and hands its bytes to [`GoesXrs::new`].
//!
//! Build with:
//! ```sh
//! wasm-pack build -p goesxrs-wasm
//! ```

use chrono::{DateTime, Utc};
use wasm_bindgen::prelude::*;

use goesxrs::{Abundance, BundleSource, GoesChianti, GoesError, SatelliteContext, parse_abundance};

fn to_js(e: GoesError) -> JsError {
    JsError::new(&e.to_string())
}

fn abundance(name: Option<String>) -> Result<Abundance, JsError> {
    name.as_deref()
        .map_or(Ok(Abundance::Coronal), parse_abundance)
        .map_err(to_js)
}

fn time_from_millis(ms: f64) -> Result<DateTime<Utc>, JsError> {
    DateTime::from_timestamp_millis(ms.round() as i64)
        .ok_or_else(|| JsError::new(&format!("timestamp out of range: {ms}")))
}

fn times_from_millis(ms: &[f64]) -> Result<Vec<DateTime<Utc>>, JsError> {
    ms.iter().map(|&t| time_from_millis(t)).collect()
}

/// CHIANTI-based estimators over an in-memory table bundle.
#[wasm_bindgen]
pub struct GoesXrs {
    inner: GoesChianti<BundleSource>,
}

#[wasm_bindgen]
impl GoesXrs {
    /// Decodes a zstd-compressed table bundle.
    #[wasm_bindgen(constructor)]
    pub fn new(bundle: &[u8]) -> Result<GoesXrs, JsError> {
        let source = BundleSource::from_compressed(bundle).map_err(to_js)?;
        Ok(GoesXrs {
            inner: GoesChianti::new(source),
        })
    }

    /// Returns temperature (MK) per sample from long and short channel
    /// fluxes (W/m²).
    ///
    /// `date_ms` is the observation date in milliseconds since the Unix
    /// epoch; `abundance_name` is "coronal" (default) or "photospheric".
    pub fn temperature(
        &self,
        longflux: &[f64],
        shortflux: &[f64],
        satellite: u32,
        date_ms: f64,
        abundance_name: Option<String>,
    ) -> Result<Vec<f64>, JsError> {
        let ctx = SatelliteContext::new(
            satellite,
            time_from_millis(date_ms)?,
            abundance(abundance_name)?,
        )
        .map_err(to_js)?;
        self.inner
            .temperature_em(longflux, shortflux, &ctx)
            .map(|r| r.temperature)
            .map_err(to_js)
    }

    /// Returns emission measure (cm^-3) from long channel flux (W/m²) and
    /// temperature (MK).
    pub fn emission_measure(
        &self,
        longflux: &[f64],
        temperature: &[f64],
        satellite: u32,
        abundance_name: Option<String>,
    ) -> Result<Vec<f64>, JsError> {
        self.inner
            .emission_measure(longflux, temperature, satellite, abundance(abundance_name)?)
            .map_err(to_js)
    }

    /// Returns radiative loss rate (erg/s) from temperature (MK) and
    /// emission measure (cm^-3).
    pub fn radiative_loss_rate(&self, temperature: &[f64], em: &[f64]) -> Result<Vec<f64>, JsError> {
        self.inner
            .radiative_loss(temperature, em, None, false)
            .map(|r| r.rate)
            .map_err(to_js)
    }

    /// Returns energy radiated (erg) up to each sample, given sample times
    /// in milliseconds since the Unix epoch.
    pub fn radiative_loss_cumulative(
        &self,
        temperature: &[f64],
        em: &[f64],
        times_ms: &[f64],
    ) -> Result<Vec<f64>, JsError> {
        let times = times_from_millis(times_ms)?;
        let loss = self
            .inner
            .radiative_loss(temperature, em, Some(&times[..]), true)
            .map_err(to_js)?;
        Ok(loss.cumulative.unwrap_or_default())
    }
}

/// Returns X-ray luminosity (erg/s) for fluxes (W/m²) seen from Earth.
///
/// Without `date_ms` the Sun is taken to be 1 AU away.
#[wasm_bindgen]
pub fn xray_luminosity(flux: &[f64], date_ms: Option<f64>) -> Result<Vec<f64>, JsError> {
    let date = date_ms.map(time_from_millis).transpose()?;
    Ok(goesxrs::xray_luminosity_from_flux(flux, date.as_ref()))
}

/// Returns Sun-Earth distance (AU) at a date in milliseconds since the epoch.
#[wasm_bindgen]
pub fn sun_earth_distance(date_ms: f64) -> Result<f64, JsError> {
    Ok(goesxrs::sun_earth_distance(&time_from_millis(date_ms)?))
}

/// Returns integration weights (s) for sample times in milliseconds.
#[wasm_bindgen]
pub fn time_intervals(times_ms: &[f64]) -> Result<Vec<f64>, JsError> {
    goesxrs::time_intervals(&times_from_millis(times_ms)?).map_err(to_js)
}
