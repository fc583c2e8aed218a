use std::io::Write;
use std::path::{Path, PathBuf};

use goesxrs::bundle::database_from_directory;
use goesxrs_data::{ChiantiDatabase, TableKind};

/// Usage: `goesxrs-generate [INPUT_DIR] [OUTPUT_FILE]`
///
/// INPUT_DIR holds the five CHIANTI flat files (defaults to
/// `<workspace>/chianti_data`); the bundle is written to OUTPUT_FILE
/// (defaults to `goesxrs-lib/data/goes_chianti.bin.zst`).
fn main() {
    env_logger::init();

    let workspace = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf();
    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| workspace.join("chianti_data"));
    let out_path = args.next().map(PathBuf::from).unwrap_or_else(|| {
        workspace
            .join("goesxrs-lib")
            .join("data")
            .join("goes_chianti.bin.zst")
    });

    if !data_dir.exists() {
        eprintln!("Error: CHIANTI data directory not found at {:?}", data_dir);
        eprintln!("Fetch the tables with `GOESXRS_DOWNLOAD=1` or pass the directory explicitly");
        std::process::exit(1);
    }

    println!("Parsing CHIANTI tables from {:?}...", data_dir);
    let version = format!("goesxrs-generate {}", env!("CARGO_PKG_VERSION"));
    let db = match database_from_directory(&data_dir, &version) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    for kind in [
        TableKind::TemperatureRatio,
        TableKind::TemperatureLongFlux,
        TableKind::RadiativeLoss,
    ] {
        let tables: Vec<_> = db.tables.iter().filter(|t| t.kind == kind).collect();
        let rows: usize = tables.iter().map(|t| t.temperature.len()).sum();
        println!("  {:?}: {} tables, {} rows", kind, tables.len(), rows);
    }

    println!("\nSerializing with postcard...");
    let serialized = postcard::to_allocvec(&db).expect("postcard serialization failed");
    println!("  Serialized size: {} bytes", serialized.len());

    println!("Compressing with zstd (level 19)...");
    let compressed = zstd::encode_all(&serialized[..], 19).expect("zstd compression failed");
    println!("  Compressed size: {} bytes", compressed.len());
    println!(
        "  Compression ratio: {:.1}x",
        serialized.len() as f64 / compressed.len() as f64
    );

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create output directory");
    }
    let mut f = std::fs::File::create(&out_path).expect("failed to create output file");
    f.write_all(&compressed)
        .expect("failed to write compressed data");

    println!("\nWrote {:?}", out_path);

    println!("Verifying round-trip deserialization...");
    let decompressed = zstd::decode_all(&compressed[..]).expect("zstd decompression failed");
    assert_eq!(decompressed.len(), serialized.len());
    let db2: ChiantiDatabase =
        postcard::from_bytes(&decompressed).expect("postcard deserialization failed");
    assert_eq!(db2.tables.len(), db.tables.len());
    println!("  Round-trip OK!");
}
