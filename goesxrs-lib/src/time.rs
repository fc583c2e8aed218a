//! Observation times: parsing, integration weights and time integration.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{GoesError, Result};

/// Parses an observation time.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`
/// (taken as UTC) and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_time(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Ok(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
        .ok_or_else(|| GoesError::Validation(format!("unrecognised time '{text}'")))
}

fn half_seconds(later: &DateTime<Utc>, earlier: &DateTime<Utc>) -> f64 {
    (*later - *earlier).num_milliseconds() as f64 / 1000.0 / 2.0
}

/// Integration weight of each sample, in seconds.
///
/// Interior samples get half the span to their neighbours; the first and
/// last get half the gap to their single neighbour. With two samples both
/// weights are half the gap.
pub fn time_intervals(obstime: &[DateTime<Utc>]) -> Result<Vec<f64>> {
    let n = obstime.len();
    if n < 2 {
        return Err(GoesError::Validation(
            "obstime must have 2 or more elements".to_string(),
        ));
    }

    let mut dt = Vec::with_capacity(n);
    dt.push(half_seconds(&obstime[1], &obstime[0]));
    dt.extend(obstime.windows(3).map(|w| half_seconds(&w[2], &w[0])));
    dt.push(half_seconds(&obstime[n - 1], &obstime[n - 2]));

    if dt.iter().any(|&w| w <= 0.0) {
        return Err(GoesError::Validation(
            "times in obstime must be in chronological order".to_string(),
        ));
    }
    Ok(dt)
}

/// A rate integrated over the observation times.
#[derive(Debug, Clone, PartialEq)]
pub struct Integrated {
    /// Sum of rate × interval.
    pub total: f64,
    /// Running sum of rate × interval; the last element equals `total`.
    pub cumulative: Vec<f64>,
    /// Per-sample interval weights [s].
    pub intervals: Vec<f64>,
}

/// Integrates `rate` over `obstime` using [`time_intervals`] weights.
pub fn integrate(rate: &[f64], obstime: &[DateTime<Utc>]) -> Result<Integrated> {
    check_same_length(&[("rate", rate.len()), ("obstime", obstime.len())])?;
    let intervals = time_intervals(obstime)?;
    let cumulative: Vec<f64> = rate
        .iter()
        .zip(intervals.iter())
        .scan(0.0, |acc, (r, dt)| {
            *acc += r * dt;
            Some(*acc)
        })
        .collect();
    let total = cumulative.last().copied().unwrap_or(0.0);
    Ok(Integrated {
        total,
        cumulative,
        intervals,
    })
}

/// Fails unless every named sequence has the same length.
pub(crate) fn check_same_length(lengths: &[(&str, usize)]) -> Result<()> {
    let Some(&(_, first)) = lengths.first() else {
        return Ok(());
    };
    if lengths.iter().all(|&(_, len)| len == first) {
        return Ok(());
    }
    let names: Vec<&str> = lengths.iter().map(|(name, _)| *name).collect();
    let lens: Vec<String> = lengths.iter().map(|(_, len)| len.to_string()).collect();
    Err(GoesError::Validation(format!(
        "{} must all have the same number of elements (got {})",
        names.join(", "),
        lens.join(", ")
    )))
}
