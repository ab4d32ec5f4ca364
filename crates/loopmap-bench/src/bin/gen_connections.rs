//! Writes generated connections workbooks to disk.
//!
//! Usage: `gen-connections [small|medium|large|all] [seed]`. Files land in
//! `target/bench-fixtures/` and can be fed straight to `loopmap analyze` for
//! end-to-end profiling.

use std::error::Error;
use std::fs;
use std::io::BufWriter;

use loopmap_bench::{SizeTier, fixture_path, generate_connections};
use loopmap_excel::{ImportConfig, export_connections};

fn parse_tiers(arg: Option<&str>) -> Result<Vec<SizeTier>, String> {
    match arg.unwrap_or("all") {
        "small" => Ok(vec![SizeTier::Small]),
        "medium" => Ok(vec![SizeTier::Medium]),
        "large" => Ok(vec![SizeTier::Large]),
        "all" => Ok(vec![SizeTier::Small, SizeTier::Medium, SizeTier::Large]),
        other => Err(format!(
            "unknown tier {other:?}; expected small, medium, large, or all"
        )),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let tiers = parse_tiers(args.first().map(String::as_str))?;
    let seed = match args.get(1) {
        Some(raw) => raw.parse::<u64>()?,
        None => 42,
    };

    for tier in tiers {
        let path = fixture_path(tier);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        eprintln!("Generating {} tier (seed {seed})...", tier.name());
        let records = generate_connections(&tier.config(seed));
        eprintln!("Generated {} rows", records.len());

        eprintln!("Writing {}...", path.display());
        let out = fs::File::create(&path)?;
        export_connections(&records, &ImportConfig::default(), BufWriter::new(out))?;

        let meta = fs::metadata(&path)?;
        eprintln!("{}: {:.1} KB", tier.name(), meta.len() as f64 / 1024.0);
    }

    Ok(())
}
