use log::debug;

use crate::config::ChiantiConfig;
use crate::error::{GoesError, Result};
use crate::spline::CubicSpline;
use crate::tables::{DirectorySource, ReferenceTable, TableKey, TableSource};

/// Entry point to the CHIANTI-based GOES/XRS estimators.
///
/// Holds the table source every estimator loads its reference table from.
/// Tables are loaded afresh on each call.
pub struct GoesChianti<S = DirectorySource> {
    source: S,
}

impl<S: TableSource> GoesChianti<S> {
    pub fn new(source: S) -> Self {
        GoesChianti { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub(crate) fn load(&self, key: &TableKey) -> Result<ReferenceTable> {
        let table = self.source.load(key)?;
        if table.temperature.len() != table.values.len() {
            return Err(GoesError::DataError(format!(
                "{key}: {} temperatures but {} values",
                table.temperature.len(),
                table.values.len()
            )));
        }
        debug!("using {key} ({} rows)", table.len());
        Ok(table)
    }

    /// Loads a table and fits `values` as a function of `temperature`.
    pub(crate) fn spline_over_temperature(&self, key: &TableKey) -> Result<CubicSpline> {
        let table = self.load(key)?;
        CubicSpline::new(&table.temperature, &table.values)
    }
}

impl GoesChianti<DirectorySource> {
    pub fn from_config(config: &ChiantiConfig) -> Self {
        Self::new(DirectorySource::from_config(config))
    }
}

impl Default for GoesChianti<DirectorySource> {
    fn default() -> Self {
        Self::from_config(&ChiantiConfig::from_env())
    }
}

pub(crate) fn validate_satellite(satellite: u32) -> Result<()> {
    if satellite < 1 {
        return Err(GoesError::InvalidSatellite(satellite));
    }
    Ok(())
}
