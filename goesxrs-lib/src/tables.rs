//! Reference tables of the CHIANTI-modelled GOES/XRS response.
//!
//! Each table pairs a temperature grid with one modelled quantity per GOES
//! satellite. [`TableKey`] maps a request onto the flat file and column
//! holding it; a [`TableSource`] turns a key into a [`ReferenceTable`].

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::cache::ensure_local;
use crate::config::ChiantiConfig;
use crate::error::{GoesError, Result};
use goesxrs_data::{Abundance, TableKind};

pub const FILE_TEMP_COR: &str = "goes_chianti_temp_cor.csv";
pub const FILE_TEMP_PHO: &str = "goes_chianti_temp_pho.csv";
pub const FILE_EM_COR: &str = "goes_chianti_em_cor.csv";
pub const FILE_EM_PHO: &str = "goes_chianti_em_pho.csv";
pub const FILE_RAD_LOSS: &str = "chianti_rad_loss.csv";

/// Name of the temperature column in the flux tables.
pub const TEMPERATURE_COLUMN: &str = "log10temp_MK";

/// Identifies one tabulated relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKey {
    TemperatureRatio { satellite: u32, abundance: Abundance },
    TemperatureLongFlux { satellite: u32, abundance: Abundance },
    RadiativeLoss,
}

impl TableKey {
    pub fn kind(&self) -> TableKind {
        match self {
            Self::TemperatureRatio { .. } => TableKind::TemperatureRatio,
            Self::TemperatureLongFlux { .. } => TableKind::TemperatureLongFlux,
            Self::RadiativeLoss => TableKind::RadiativeLoss,
        }
    }

    pub fn satellite(&self) -> Option<u32> {
        match self {
            Self::TemperatureRatio { satellite, .. }
            | Self::TemperatureLongFlux { satellite, .. } => Some(*satellite),
            Self::RadiativeLoss => None,
        }
    }

    pub fn abundance(&self) -> Option<Abundance> {
        match self {
            Self::TemperatureRatio { abundance, .. }
            | Self::TemperatureLongFlux { abundance, .. } => Some(*abundance),
            Self::RadiativeLoss => None,
        }
    }

    /// Flat file holding this table.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::TemperatureRatio { abundance: Abundance::Coronal, .. } => FILE_TEMP_COR,
            Self::TemperatureRatio { abundance: Abundance::Photospheric, .. } => FILE_TEMP_PHO,
            Self::TemperatureLongFlux { abundance: Abundance::Coronal, .. } => FILE_EM_COR,
            Self::TemperatureLongFlux { abundance: Abundance::Photospheric, .. } => FILE_EM_PHO,
            Self::RadiativeLoss => FILE_RAD_LOSS,
        }
    }

    /// Header of the value column, `None` for the headerless loss table.
    pub fn column_label(&self) -> Option<String> {
        match self {
            Self::TemperatureRatio { satellite, .. } => Some(format!("ratioGOES{satellite}")),
            Self::TemperatureLongFlux { satellite, .. } => {
                Some(format!("longfluxGOES{satellite}"))
            }
            Self::RadiativeLoss => None,
        }
    }

    pub(crate) fn missing(&self) -> GoesError {
        GoesError::MissingColumn {
            file: self.file_name().to_string(),
            column: self
                .column_label()
                .unwrap_or_else(|| "radiative loss rate".to_string()),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column_label() {
            Some(label) => write!(f, "{}:{label}", self.file_name()),
            None => f.write_str(self.file_name()),
        }
    }
}

/// Parses an abundance model name.
pub fn parse_abundance(name: &str) -> Result<Abundance> {
    match name.trim().to_lowercase().as_str() {
        "coronal" => Ok(Abundance::Coronal),
        "photospheric" => Ok(Abundance::Photospheric),
        _ => Err(GoesError::InvalidAbundance(name.to_string())),
    }
}

/// Parallel temperature / value columns, in file order.
///
/// Temperature is log10(T [MK]) for the flux tables and T [K] for the
/// radiative loss table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    pub temperature: Vec<f64>,
    pub values: Vec<f64>,
}

impl ReferenceTable {
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

/// Anything able to produce reference tables.
pub trait TableSource {
    fn load(&self, key: &TableKey) -> Result<ReferenceTable>;
}

impl<F> TableSource for F
where
    F: Fn(&TableKey) -> Result<ReferenceTable>,
{
    fn load(&self, key: &TableKey) -> Result<ReferenceTable> {
        self(key)
    }
}

/// All value columns of a `;`-delimited flux table.
#[derive(Debug, Clone, PartialEq)]
pub struct ChiantiColumns {
    pub temperature: Vec<f64>,
    pub columns: Vec<(String, Vec<f64>)>,
}

impl ChiantiColumns {
    /// Extracts one satellite column as a [`ReferenceTable`].
    pub fn select(&self, key: &TableKey) -> Result<ReferenceTable> {
        let label = key.column_label().ok_or_else(|| key.missing())?;
        let (_, values) = self
            .columns
            .iter()
            .find(|(name, _)| *name == label)
            .ok_or_else(|| key.missing())?;
        Ok(ReferenceTable {
            temperature: self.temperature.clone(),
            values: values.clone(),
        })
    }

    /// Satellite numbers with a column whose header starts with `prefix`.
    pub fn satellites(&self, prefix: &str) -> Vec<u32> {
        self.columns
            .iter()
            .filter_map(|(name, _)| name.strip_prefix(prefix)?.parse().ok())
            .collect()
    }
}

fn skip_comments(text: &str, marker: char) -> &str {
    let mut rest = text;
    while rest.starts_with(marker) {
        rest = match rest.find('\n') {
            Some(i) => &rest[i + 1..],
            None => "",
        };
    }
    rest
}

fn parse_float(field: &str, file: &str, row: usize) -> Result<f64> {
    field.trim().parse().map_err(|_| {
        GoesError::DataError(format!("{file}, row {row}: '{field}' is not a number"))
    })
}

/// Parses a temperature / flux table.
///
/// Format: leading `#` comment lines, then a `;`-delimited header row with
/// [`TEMPERATURE_COLUMN`] and one column per satellite.
pub fn parse_chianti_csv(text: &str, file: &str) -> Result<ChiantiColumns> {
    let body = skip_comments(text, '#');
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let temp_idx = headers
        .iter()
        .position(|h| h == TEMPERATURE_COLUMN)
        .ok_or_else(|| GoesError::MissingColumn {
            file: file.to_string(),
            column: TEMPERATURE_COLUMN.to_string(),
        })?;
    let value_idx: Vec<usize> = (0..headers.len())
        .filter(|&i| i != temp_idx && !headers[i].is_empty())
        .collect();

    let mut temperature = Vec::new();
    let mut columns: Vec<(String, Vec<f64>)> = value_idx
        .iter()
        .map(|&i| (headers[i].to_string(), Vec::new()))
        .collect();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |i: usize| {
            record.get(i).ok_or_else(|| {
                GoesError::DataError(format!("{file}, row {row}: missing field {i}"))
            })
        };
        temperature.push(parse_float(field(temp_idx)?, file, row)?);
        for (col, &i) in columns.iter_mut().zip(value_idx.iter()) {
            col.1.push(parse_float(field(i)?, file, row)?);
        }
    }

    Ok(ChiantiColumns {
        temperature,
        columns,
    })
}

/// Parses the radiative loss table: leading `;` comment lines, then
/// whitespace-separated rows of temperature [K] and loss rate.
pub fn parse_rad_loss(text: &str, file: &str) -> Result<ReferenceTable> {
    let mut temperature = Vec::new();
    let mut values = Vec::new();
    for (row, line) in skip_comments(text, ';').lines().enumerate() {
        let mut fields = line.split_whitespace();
        let (Some(t), Some(v)) = (fields.next(), fields.next()) else {
            if line.trim().is_empty() {
                continue;
            }
            return Err(GoesError::DataError(format!(
                "{file}, row {row}: expected two columns"
            )));
        };
        temperature.push(parse_float(t, file, row)?);
        values.push(parse_float(v, file, row)?);
    }
    Ok(ReferenceTable {
        temperature,
        values,
    })
}

/// Parses the contents of the file named by `key` and selects its column.
pub fn parse_table(key: &TableKey, text: &str) -> Result<ReferenceTable> {
    match key {
        TableKey::RadiativeLoss => parse_rad_loss(text, key.file_name()),
        _ => parse_chianti_csv(text, key.file_name())?.select(key),
    }
}

/// Reads tables from flat files in a local directory.
///
/// With a remote URL configured every load first makes sure the file is
/// present locally, fetching it if needed (or always, with `force_refresh`).
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    remote_url: Option<String>,
    force_refresh: bool,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            remote_url: None,
            force_refresh: false,
        }
    }

    pub fn from_config(config: &ChiantiConfig) -> Self {
        Self {
            dir: config.data_dir.clone(),
            remote_url: Some(config.remote_url.clone()),
            force_refresh: config.download,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn locate(&self, file: &str) -> Result<PathBuf> {
        match &self.remote_url {
            Some(url) => ensure_local(file, url, &self.dir, self.force_refresh),
            None => Ok(self.dir.join(file)),
        }
    }
}

impl TableSource for DirectorySource {
    fn load(&self, key: &TableKey) -> Result<ReferenceTable> {
        let path = self.locate(key.file_name())?;
        let text = std::fs::read_to_string(&path)?;
        let table = parse_table(key, &text)?;
        debug!("loaded {key} from {}: {} rows", path.display(), table.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMP_CSV: &str = "# model ratios\n# second comment\nlog10temp_MK;ratioGOES6;ratioGOES15\n0.0;0.001;0.002\n0.5;0.010;0.020\n1.0;0.100;0.200\n";

    #[test]
    fn test_table_key_dispatch() {
        let key = TableKey::TemperatureRatio {
            satellite: 15,
            abundance: Abundance::Photospheric,
        };
        assert_eq!(key.file_name(), FILE_TEMP_PHO);
        assert_eq!(key.column_label().as_deref(), Some("ratioGOES15"));

        let key = TableKey::TemperatureLongFlux {
            satellite: 8,
            abundance: Abundance::Coronal,
        };
        assert_eq!(key.file_name(), FILE_EM_COR);
        assert_eq!(key.column_label().as_deref(), Some("longfluxGOES8"));

        assert_eq!(TableKey::RadiativeLoss.file_name(), FILE_RAD_LOSS);
        assert_eq!(TableKey::RadiativeLoss.column_label(), None);
    }

    #[test]
    fn test_parse_abundance() {
        assert_eq!(parse_abundance("coronal").unwrap(), Abundance::Coronal);
        assert_eq!(parse_abundance("Photospheric").unwrap(), Abundance::Photospheric);
        assert!(matches!(
            parse_abundance("solar"),
            Err(GoesError::InvalidAbundance(_))
        ));
    }

    #[test]
    fn test_parse_chianti_csv() {
        let cols = parse_chianti_csv(TEMP_CSV, FILE_TEMP_COR).unwrap();
        assert_eq!(cols.temperature, vec![0.0, 0.5, 1.0]);
        assert_eq!(cols.columns.len(), 2);
        assert_eq!(cols.satellites("ratioGOES"), vec![6, 15]);

        let key = TableKey::TemperatureRatio {
            satellite: 15,
            abundance: Abundance::Coronal,
        };
        let table = cols.select(&key).unwrap();
        assert_eq!(table.values, vec![0.002, 0.020, 0.200]);
    }

    #[test]
    fn test_missing_satellite_column() {
        let key = TableKey::TemperatureRatio {
            satellite: 11,
            abundance: Abundance::Coronal,
        };
        let err = parse_table(&key, TEMP_CSV).unwrap_err();
        match err {
            GoesError::MissingColumn { column, .. } => assert_eq!(column, "ratioGOES11"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rad_loss() {
        let text = "; loss rates\n; T  rate\n1.0e6  2.0e-22\n2.0e6   1.5e-22\n\n";
        let table = parse_rad_loss(text, FILE_RAD_LOSS).unwrap();
        assert_eq!(table.temperature, vec![1.0e6, 2.0e6]);
        assert_eq!(table.values, vec![2.0e-22, 1.5e-22]);
    }

    #[test]
    fn test_bad_number_is_data_error() {
        let text = "log10temp_MK;ratioGOES15\n0.0;abc\n";
        assert!(matches!(
            parse_chianti_csv(text, FILE_TEMP_COR),
            Err(GoesError::DataError(_))
        ));
    }

    #[test]
    fn test_closure_source() {
        let source = |key: &TableKey| -> Result<ReferenceTable> {
            match key {
                TableKey::RadiativeLoss => Ok(ReferenceTable {
                    temperature: vec![1.0, 2.0],
                    values: vec![3.0, 4.0],
                }),
                other => Err(other.missing()),
            }
        };
        assert_eq!(source.load(&TableKey::RadiativeLoss).unwrap().len(), 2);
        assert!(source
            .load(&TableKey::TemperatureRatio {
                satellite: 1,
                abundance: Abundance::Coronal
            })
            .is_err());
    }
}
