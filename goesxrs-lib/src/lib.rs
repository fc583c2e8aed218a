pub mod bundle;
pub mod cache;
pub mod calibration;
pub mod chianti;
pub mod config;
pub mod constants;
pub mod emission;
pub mod error;
pub mod events;
pub mod lightcurve;
pub mod luminosity;
pub mod radloss;
pub mod spline;
pub mod sun;
pub mod tables;
pub mod temperature;
pub mod time;

pub use bundle::BundleSource;
pub use cache::ensure_local;
pub use calibration::{CorrectedFluxes, SatelliteContext, correct_fluxes, flux_ratio};
pub use chianti::GoesChianti;
pub use config::ChiantiConfig;
pub use error::{GoesError, Result};
pub use events::{EventCatalog, EventQuery, GoesClass, GoesEvent, HekEvent, get_goes_event_list};
pub use goesxrs_data::{Abundance, TableKind};
pub use lightcurve::{LightCurve, xray_luminosity};
pub use luminosity::{XrayLuminosity, goes_lx, xray_luminosity_from_flux};
pub use radloss::RadiativeLoss;
pub use spline::CubicSpline;
pub use sun::sun_earth_distance;
pub use tables::{DirectorySource, ReferenceTable, TableKey, TableSource, parse_abundance};
pub use temperature::TemperatureEm;
pub use time::{Integrated, integrate, parse_time, time_intervals};
pub use goesxrs_data;
