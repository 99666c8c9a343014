/// Shapefile inspection tool: print the header, a per-type record summary,
/// and one line per decoded record.
///
/// Usage:
///   cargo run --bin shp_info -- <file.shp> [--failsafe] [--parallel] [--quiet]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use shptools::{
    NotificationType, Shape, ShapeType, ShapefileReader, ShapefileReaderConfiguration,
};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut path = None;
    let mut failsafe = false;
    let mut parallel = false;
    let mut quiet = false;
    for arg in &args {
        match arg.as_str() {
            "--failsafe" => failsafe = true,
            "--parallel" => parallel = true,
            "--quiet" => quiet = true,
            other if other.starts_with("--") => bail!("unknown option: {other}"),
            other => path = Some(PathBuf::from(other)),
        }
    }
    let Some(path) = path else {
        eprintln!("Usage: shp_info <file.shp> [--failsafe] [--parallel] [--quiet]");
        std::process::exit(2);
    };

    let config = ShapefileReaderConfiguration {
        failsafe,
        ..Default::default()
    };
    let mut reader = ShapefileReader::open(&path)
        .with_context(|| format!("opening {}", path.display()))?
        .with_config(config);

    let header = reader.validate().context("validating header")?.clone();
    let file_type = header
        .shape_type()
        .map_or_else(|| format!("unknown ({})", header.shape_type), |t| t.to_string());
    println!("File:        {}", path.display());
    println!("Shape type:  {file_type}");
    println!("Length:      {} bytes", header.file_length_bytes());
    println!("Extent:      {}", header.bbox);

    reader.index().context("indexing records")?;
    println!("Records:     {}", reader.num_records());
    for (code, count) in reader.type_summary() {
        let name = ShapeType::from_raw(code).map_or("unknown", |t| t.name());
        println!("  {name:<12} ({code:>2}): {count}");
    }

    let shapes = if parallel {
        let mut shapes = Vec::new();
        for (i, result) in reader.read_all_parallel()?.into_iter().enumerate() {
            match result {
                Ok(shape) => shapes.push((i, shape)),
                Err(e) if failsafe => eprintln!("record {i}: {e}"),
                Err(e) => return Err(e).with_context(|| format!("decoding record {i}")),
            }
        }
        shapes
    } else if failsafe {
        // skipped records are reported as Error notifications
        let decoded = reader.read_all()?;
        let failed: Vec<usize> = reader
            .notifications()
            .of_type(NotificationType::Error)
            .iter()
            .filter_map(|n| n.record)
            .collect();
        (0..reader.num_records())
            .filter(|i| !failed.contains(i))
            .zip(decoded)
            .collect()
    } else {
        reader.read_all()?.into_iter().enumerate().collect()
    };

    if !quiet {
        for (i, shape) in &shapes {
            print_shape(*i, shape);
        }
    }

    for notification in reader.notifications() {
        eprintln!("{notification}");
    }
    println!("Decoded:     {} of {}", shapes.len(), reader.num_records());
    Ok(())
}

fn print_shape(i: usize, shape: &Shape) {
    match shape {
        Shape::Null => println!("Null {i}"),
        Shape::Point(p) => println!("Point {i}: {p}"),
        Shape::PointM(p) => println!("PointM {i}: ({}, {}) m = {}", p.x, p.y, p.m),
        Shape::PointZ(p) => println!("PointZ {i}: ({}, {}) z = {} m = {}", p.x, p.y, p.z, p.m),
        Shape::MultiPatch(mp) => println!("MultiPatch {i}: bbox = {}", mp.bbox),
        other => println!(
            "{} {i}: num_parts = {}, num_points = {}",
            other.shape_type(),
            other.num_parts(),
            other.num_points()
        ),
    }
}
