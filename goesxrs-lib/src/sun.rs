use chrono::{DateTime, Utc};

use crate::constants::J2000_JD;

/// Julian date of a UTC instant.
pub fn julian_date(date: &DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64 / 86_400_000.0 + 2_440_587.5
}

/// Sun-Earth distance in AU.
///
/// Low-precision solar coordinates (Meeus, Astronomical Algorithms,
/// ch. 25), good to about 1e-5 AU.
pub fn sun_earth_distance(date: &DateTime<Utc>) -> f64 {
    let t = (julian_date(date) - J2000_JD) / 36_525.0;

    let mean_anomaly = (357.52911 + 35_999.05029 * t - 0.0001537 * t * t).to_radians();
    let eccentricity = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;
    let centre = (1.914602 - 0.004817 * t - 0.000014 * t * t) * mean_anomaly.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000289 * (3.0 * mean_anomaly).sin();
    let true_anomaly = mean_anomaly + centre.to_radians();

    1.000001018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos())
}
