/// Astronomical unit (m)
pub const AU_M: f64 = 1.495978707e11;

/// Joules to erg
pub const ERG_PER_JOULE: f64 = 1.0e7;

/// Emission measure normalisation of the long-flux tables (cm^-3)
pub const EM_TABLE_SCALE: f64 = 1.0e55;

/// Short channel flux below which a sample is considered noise (W/m²)
pub const SHORT_FLUX_FLOOR: f64 = 1.0e-10;

/// Long channel flux below which a sample is considered noise (W/m²)
pub const LONG_FLUX_FLOOR: f64 = 3.0e-8;

/// Flux ratio substituted for samples under either noise floor
pub const SENTINEL_RATIO: f64 = 0.003;

/// GOES-6 long channel correction applied before 1983-06-28
pub const GOES6_LONG_CORRECTION: f64 = 4.43 / 5.32;

/// GOES-7 normalisation of the long channel in public data from GOES-8 on
pub const LONG_GOES7_SCALE: f64 = 0.70;

/// GOES-7 normalisation of the short channel in public data from GOES-8 on
pub const SHORT_GOES7_SCALE: f64 = 0.85;

/// Julian date of the J2000.0 epoch
pub const J2000_JD: f64 = 2_451_545.0;
