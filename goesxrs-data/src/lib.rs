#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A complete set of CHIANTI reference tables, deserialized from a bundle.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChiantiDatabase {
    pub version: String,
    pub tables: Vec<ModelTableRecord>,
}

/// Which modelled relationship a table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableKind {
    /// log10(T [MK]) against the short/long channel flux ratio.
    TemperatureRatio,
    /// log10(T [MK]) against long channel flux per 1e55 cm^-3 of emission measure.
    TemperatureLongFlux,
    /// T [K] against radiative loss rate per unit emission measure.
    RadiativeLoss,
}

/// Elemental abundances assumed by the atomic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Abundance {
    #[default]
    Coronal,
    Photospheric,
}

/// One tabulated column for one satellite.
///
/// `satellite` and `abundance` are `None` for the radiative loss table,
/// which has a single variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelTableRecord {
    pub kind: TableKind,
    pub abundance: Option<Abundance>,
    pub satellite: Option<u32>,
    pub temperature: Vec<f64>,
    pub values: Vec<f64>,
}
