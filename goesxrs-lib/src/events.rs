//! GOES flare lists from an external event catalog.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::{GoesError, Result};

/// A GOES flare class such as `M1.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoesClass {
    pub letter: char,
    pub magnitude: f64,
}

impl GoesClass {
    /// Peak long channel flux the class stands for [W/m²].
    pub fn flux(&self) -> f64 {
        let base = match self.letter {
            'A' => 1e-8,
            'B' => 1e-7,
            'C' => 1e-6,
            'M' => 1e-5,
            _ => 1e-4,
        };
        base * self.magnitude
    }
}

impl FromStr for GoesClass {
    type Err = GoesError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GoesError::Validation(format!("invalid GOES class '{s}'"));
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| matches!(*c, 'A' | 'B' | 'C' | 'M' | 'X'))
            .ok_or_else(invalid)?;
        let rest = chars.as_str();
        let magnitude = if rest.is_empty() {
            1.0
        } else {
            rest.parse::<f64>().map_err(|_| invalid())?
        };
        if !(magnitude.is_finite() && magnitude > 0.0) {
            return Err(invalid());
        }
        Ok(GoesClass { letter, magnitude })
    }
}

impl PartialOrd for GoesClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.flux().partial_cmp(&other.flux())
    }
}

impl fmt::Display for GoesClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.magnitude)
    }
}

/// Query sent to an [`EventCatalog`].
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub event_type: String,
    pub observatory: String,
    /// Only events strictly above this class.
    pub min_class: Option<GoesClass>,
}

/// One event record as returned by the Heliophysics Event Knowledgebase.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HekEvent {
    pub event_starttime: NaiveDateTime,
    pub event_peaktime: NaiveDateTime,
    pub event_endtime: NaiveDateTime,
    pub fl_goescls: String,
    pub event_coord1: f64,
    pub event_coord2: f64,
    pub ar_noaanum: Option<u32>,
}

/// A remote catalog of solar events.
pub trait EventCatalog {
    fn query(&self, query: &EventQuery) -> Result<Vec<HekEvent>>;
}

/// A GOES flare-list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GoesEvent {
    /// `YYYY-MM-DD` of the start time.
    pub event_date: String,
    pub start_time: DateTime<Utc>,
    pub peak_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub goes_class: String,
    pub goes_location: (f64, f64),
    pub noaa_active_region: Option<u32>,
}

impl From<HekEvent> for GoesEvent {
    fn from(e: HekEvent) -> Self {
        GoesEvent {
            event_date: e.event_starttime.date().format("%Y-%m-%d").to_string(),
            start_time: e.event_starttime.and_utc(),
            peak_time: e.event_peaktime.and_utc(),
            end_time: e.event_endtime.and_utc(),
            goes_class: e.fl_goescls,
            goes_location: (e.event_coord1, e.event_coord2),
            noaa_active_region: e.ar_noaanum,
        }
    }
}

/// Flares observed by GOES between `start` and `end`, optionally only
/// those above a minimum class such as `"M1"`.
pub fn get_goes_event_list<C: EventCatalog + ?Sized>(
    catalog: &C,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    class_filter: Option<&str>,
) -> Result<Vec<GoesEvent>> {
    if end < start {
        return Err(GoesError::Validation(format!(
            "time range ends ({end}) before it starts ({start})"
        )));
    }
    let query = EventQuery {
        start,
        end,
        event_type: "FL".to_string(),
        observatory: "GOES".to_string(),
        min_class: class_filter.map(str::parse).transpose()?,
    };
    Ok(catalog
        .query(&query)?
        .into_iter()
        .map(GoesEvent::from)
        .collect())
}
