use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoesError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("satellite must be the number of a valid GOES satellite (>= 1), got {0}")]
    InvalidSatellite(u32),
    #[error("abundances must be 'coronal' or 'photospheric', got '{0}'")]
    InvalidAbundance(String),
    #[error("no column '{column}' in {file}")]
    MissingColumn { file: String, column: String },
    #[error("all values of {quantity} must be within the range {min} - {max}{unit}")]
    OutOfRange {
        quantity: &'static str,
        min: f64,
        max: f64,
        unit: &'static str,
    },
    #[error("expected a GOES XRS lightcurve, got '{0}'")]
    NotGoesLightCurve(String),
    #[error("unable to obtain {file}: {reason}")]
    Download { file: String, reason: String },
    #[error("data error: {0}")]
    DataError(String),
    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GoesError>;
