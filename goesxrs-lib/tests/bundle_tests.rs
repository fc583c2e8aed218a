use std::path::Path;

use approx::assert_relative_eq;
use goesxrs::bundle::database_from_directory;
use goesxrs::{
    Abundance, BundleSource, GoesChianti, GoesError, SatelliteContext, TableKey, TableKind,
    TableSource, parse_time,
};

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");

fn compressed_bundle() -> Vec<u8> {
    let db = database_from_directory(Path::new(DATA_DIR), "test").unwrap();
    let serialized = postcard::to_allocvec(&db).unwrap();
    zstd::encode_all(serialized.as_slice(), 3).unwrap()
}

#[test]
fn test_bundle_contents() {
    let bundle = BundleSource::from_compressed(&compressed_bundle()).unwrap();
    assert_eq!(bundle.raw().version, "test");
    assert_eq!(bundle.satellites(TableKind::TemperatureRatio), vec![6, 8, 15]);
    assert_eq!(bundle.satellites(TableKind::TemperatureLongFlux), vec![6, 8, 15]);
    // 3 satellites x 2 abundances x 2 kinds + radiative loss
    assert_eq!(bundle.raw().tables.len(), 13);

    let loss = bundle.load(&TableKey::RadiativeLoss).unwrap();
    assert_eq!(loss.len(), 31);
}

#[test]
fn test_bundle_matches_directory() {
    let db = GoesChianti::new(BundleSource::from_compressed(&compressed_bundle()).unwrap());
    let ctx = SatelliteContext::new(15, parse_time("2014-04-16").unwrap(), Abundance::Coronal)
        .unwrap();
    let result = db.temperature_em(&[7e-6], &[7e-7], &ctx).unwrap();
    assert_relative_eq!(result.temperature[0], 11.28295376, max_relative = 1e-9);
    assert_relative_eq!(result.emission_measure[0], 4.78577516e48, max_relative = 1e-8);

    let loss = db.radiative_loss(&[10.0], &[1e48], None, false).unwrap();
    assert_relative_eq!(loss.rate[0], 3.162278e25, max_relative = 1e-9);
}

#[test]
fn test_bundle_missing_satellite() {
    let bundle = BundleSource::from_compressed(&compressed_bundle()).unwrap();
    let err = bundle
        .load(&TableKey::TemperatureLongFlux {
            satellite: 12,
            abundance: Abundance::Photospheric,
        })
        .unwrap_err();
    match err {
        GoesError::MissingColumn { file, column } => {
            assert_eq!(file, "goes_chianti_em_pho.csv");
            assert_eq!(column, "longfluxGOES12");
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_invalid_bundle_bytes() {
    assert!(BundleSource::from_compressed(b"not a bundle").is_err());

    let truncated = zstd::encode_all(&b"\x01\x02"[..], 3).unwrap();
    assert!(BundleSource::from_compressed(&truncated).is_err());
}
