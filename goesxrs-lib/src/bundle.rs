use std::io::Read;
use std::path::Path;

use log::debug;

use goesxrs_data::{Abundance, ChiantiDatabase, ModelTableRecord, TableKind};

use crate::error::{GoesError, Result};
use crate::tables::{
    FILE_EM_COR, FILE_EM_PHO, FILE_RAD_LOSS, FILE_TEMP_COR, FILE_TEMP_PHO, ReferenceTable,
    TableKey, TableSource, parse_chianti_csv, parse_rad_loss,
};

/// Flux tables and the column-name prefix of their satellite columns.
const FLUX_TABLES: [(TableKind, Abundance, &str, &str); 4] = [
    (TableKind::TemperatureRatio, Abundance::Coronal, FILE_TEMP_COR, "ratioGOES"),
    (TableKind::TemperatureRatio, Abundance::Photospheric, FILE_TEMP_PHO, "ratioGOES"),
    (TableKind::TemperatureLongFlux, Abundance::Coronal, FILE_EM_COR, "longfluxGOES"),
    (TableKind::TemperatureLongFlux, Abundance::Photospheric, FILE_EM_PHO, "longfluxGOES"),
];

/// Reads every table and satellite column from a directory of flat files.
pub fn database_from_directory(dir: &Path, version: &str) -> Result<ChiantiDatabase> {
    let mut tables = Vec::new();

    for (kind, abundance, file, prefix) in FLUX_TABLES {
        let text = std::fs::read_to_string(dir.join(file))?;
        let cols = parse_chianti_csv(&text, file)?;
        for satellite in cols.satellites(prefix) {
            let key = match kind {
                TableKind::TemperatureRatio => TableKey::TemperatureRatio {
                    satellite,
                    abundance,
                },
                _ => TableKey::TemperatureLongFlux {
                    satellite,
                    abundance,
                },
            };
            let table = cols.select(&key)?;
            tables.push(ModelTableRecord {
                kind,
                abundance: Some(abundance),
                satellite: Some(satellite),
                temperature: table.temperature,
                values: table.values,
            });
        }
        debug!("{file}: {} satellites", cols.satellites(prefix).len());
    }

    let text = std::fs::read_to_string(dir.join(FILE_RAD_LOSS))?;
    let loss = parse_rad_loss(&text, FILE_RAD_LOSS)?;
    tables.push(ModelTableRecord {
        kind: TableKind::RadiativeLoss,
        abundance: None,
        satellite: None,
        temperature: loss.temperature,
        values: loss.values,
    });

    Ok(ChiantiDatabase {
        version: version.to_string(),
        tables,
    })
}

/// Reference tables held in memory, decoded from a compressed bundle
/// produced by `goesxrs-generate`.
pub struct BundleSource {
    data: ChiantiDatabase,
}

impl BundleSource {
    /// Decodes a zstd-compressed, postcard-serialized [`ChiantiDatabase`].
    pub fn from_compressed(bytes: &[u8]) -> Result<Self> {
        let mut decoder = ruzstd::decoding::StreamingDecoder::new(bytes)
            .map_err(|e| GoesError::DataError(format!("invalid bundle: {e}")))?;
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;

        let data: ChiantiDatabase = postcard::from_bytes(&decompressed)
            .map_err(|e| GoesError::DataError(format!("invalid bundle: {e}")))?;
        debug!(
            "decoded bundle {} with {} tables",
            data.version,
            data.tables.len()
        );
        Ok(Self { data })
    }

    pub fn from_database(data: ChiantiDatabase) -> Self {
        Self { data }
    }

    /// Access the raw database.
    pub fn raw(&self) -> &ChiantiDatabase {
        &self.data
    }

    /// Satellites with a table of the given kind, in ascending order.
    pub fn satellites(&self, kind: TableKind) -> Vec<u32> {
        let mut sats: Vec<u32> = self
            .data
            .tables
            .iter()
            .filter(|t| t.kind == kind)
            .filter_map(|t| t.satellite)
            .collect();
        sats.sort_unstable();
        sats.dedup();
        sats
    }

    fn record(&self, key: &TableKey) -> Option<&ModelTableRecord> {
        self.data.tables.iter().find(|t| {
            t.kind == key.kind()
                && t.satellite == key.satellite()
                && t.abundance == key.abundance()
        })
    }
}

impl TableSource for BundleSource {
    fn load(&self, key: &TableKey) -> Result<ReferenceTable> {
        let record = self.record(key).ok_or_else(|| key.missing())?;
        Ok(ReferenceTable {
            temperature: record.temperature.clone(),
            values: record.values.clone(),
        })
    }
}
