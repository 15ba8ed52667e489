//! LBPK CLI - Command-line tool for converting archived LittleBigPlanet Karting
//! community tracks into local game saves.
//!
//! This is the main entry point for the `lbpk` command-line application.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use rayon::prelude::*;
use serde_json::json;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use lbpk::prelude::*;

/// LBPK - LittleBigPlanet Karting community track converter
#[derive(Parser)]
#[command(name = "lbpk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every track folder in an archive directory
    Convert {
        /// Archive directory containing one folder per track
        #[arg(short, long, env = "LBPK_ARCHIVE")]
        archive: PathBuf,

        /// Output directory
        #[arg(short, long, env = "LBPK_OUTPUT")]
        output: PathBuf,

        /// Number of worker threads (defaults to one per core)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Decode and report names without writing files
        #[arg(long)]
        dry_run: bool,

        /// Exit with an error if any track failed
        #[arg(long)]
        strict: bool,
    },

    /// Show the layout and metadata of a single data.bin
    Info {
        /// Path to the data.bin
        #[arg(short, long)]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Hex dump a file, or one segment of a data.bin
    Dump {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Segment of a data.bin to dump (trk, cm2, nav, hud)
        #[arg(short, long)]
        segment: Option<SegmentKind>,

        /// Start offset within the selected region
        #[arg(long, default_value_t = 0)]
        start: usize,

        /// End offset within the selected region (exclusive)
        #[arg(long)]
        end: Option<usize>,
    },

    /// List every offset where a byte pattern occurs in a file
    Find {
        /// Input file
        input: PathBuf,

        /// Pattern to search for, as text unless --hex is given
        pattern: String,

        /// Read the pattern as hex digits (e.g. 4c4250)
        #[arg(long)]
        hex: bool,

        /// Bytes of context to dump before and after each match
        #[arg(short, long, default_value_t = 16)]
        context: usize,
    },

    /// Compare two files byte by byte
    Diff {
        /// First file
        a: PathBuf,

        /// Second file
        b: PathBuf,

        /// Maximum number of differing offsets to list
        #[arg(short, long, default_value_t = 32)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            archive,
            output,
            jobs,
            dry_run,
            strict,
        } => {
            cmd_convert(&archive, &output, jobs, dry_run, strict)?;
        }
        Commands::Info { input, json } => {
            cmd_info(&input, json)?;
        }
        Commands::Dump {
            input,
            segment,
            start,
            end,
        } => {
            cmd_dump(&input, segment, start, end)?;
        }
        Commands::Find {
            input,
            pattern,
            hex,
            context,
        } => {
            cmd_find(&input, &pattern, hex, context)?;
        }
        Commands::Diff { a, b, limit } => {
            cmd_diff(&a, &b, limit)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_convert(
    archive: &Path,
    output: &Path,
    jobs: Option<usize>,
    dry_run: bool,
    strict: bool,
) -> Result<()> {
    println!("Archive path: {}", archive.display());
    println!("Output path: {}", output.display());

    let sources = discover_tracks(archive).context("Failed to list archive directory")?;
    if sources.is_empty() {
        println!("No server folders found. Please check the archive directory.");
        return Ok(());
    }
    debug!(folders = ?sources.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), "server folders");

    if !dry_run {
        fs::create_dir_all(output).context("Failed to create output directory")?;
    }

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = jobs {
        pool = pool.num_threads(jobs);
    }
    let pool = pool.build().context("Failed to start worker pool")?;

    let converter = Converter::new(output).dry_run(dry_run);

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let converted = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);
    let failures = Mutex::new(Vec::new());

    let start = Instant::now();
    pool.install(|| {
        sources.par_iter().for_each(|source| {
            match converter.convert(source) {
                Ok(track) => {
                    converted.fetch_add(1, Ordering::Relaxed);
                    pb.println(format!(
                        "{} -> {}  \"{}\"",
                        track.track_id, track.base_filename, track.metadata.description
                    ));
                }
                Err(e) if e.is_skip() => {
                    skipped.fetch_add(1, Ordering::Relaxed);
                    warn!("{}. Skipping.", e);
                }
                Err(e) => {
                    error!(track = %source.id, "{}", e);
                    failures.lock().push(source.id.clone());
                }
            }

            pb.inc(1);
        });
    });
    pb.finish_with_message("Done");

    let mut failures = failures.into_inner();
    failures.sort();

    println!(
        "Converted {} tracks in {:?} ({} skipped, {} failed)",
        converted.load(Ordering::Relaxed),
        start.elapsed(),
        skipped.load(Ordering::Relaxed),
        failures.len()
    );
    if !failures.is_empty() {
        println!("Failed: {}", failures.join(", "));
    }

    if strict && !failures.is_empty() {
        anyhow::bail!("{} tracks failed to convert", failures.len());
    }

    Ok(())
}

fn cmd_info(input: &Path, as_json: bool) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let track = extract(&data).context("Failed to decode archive")?;

    if as_json {
        let segments: Vec<_> = track
            .segments
            .iter()
            .map(|s| json!({ "kind": s.kind, "offset": s.offset, "len": s.len() }))
            .collect();
        let report = json!({
            "file": input.display().to_string(),
            "len": data.len(),
            "segments": segments,
            "metadata": track.metadata,
            "base_filename": track.base_filename(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File: {} ({} bytes)", input.display(), data.len());
    println!("NAV size (CTH): {}", track.segments.header.nav_size());
    for segment in track.segments.iter() {
        println!(
            "  {}  {:>#10x}..{:<#10x} {:>10} bytes",
            segment.kind,
            segment.offset,
            segment.end(),
            segment.len()
        );
    }
    println!("Unique ID: {}", track.metadata.unique_id);
    println!("Track Name: {}", track.metadata.display_name);
    println!("Track Description: {}", track.metadata.description);
    println!("Base file name: {}", track.base_filename());

    Ok(())
}

fn cmd_dump(input: &Path, segment: Option<SegmentKind>, start: usize, end: Option<usize>) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;

    let (region, base) = match segment {
        Some(kind) => {
            let segments = split(&data).context("Failed to split archive")?;
            let segment = segments.get(kind);
            (segment.data, segment.offset)
        }
        None => (&data[..], 0),
    };

    let range = dump_range(region.len(), start, end)?;
    let bytes = ByteCursor::new(region)
        .slice_at(range.start, range.len())
        .context("Failed to read dump range")?;

    print!("{}", inspect::hexdump(bytes, base + range.start));

    Ok(())
}

/// Resolve `--start`/`--end` against a region of `len` bytes.
fn dump_range(len: usize, start: usize, end: Option<usize>) -> Result<Range<usize>> {
    let end = end.unwrap_or(len);
    if end < start {
        anyhow::bail!("--end {end} is before --start {start}");
    }
    if end > len {
        anyhow::bail!("Range {start}..{end} is outside a {len}-byte region");
    }
    Ok(start..end)
}

fn cmd_find(input: &Path, pattern: &str, as_hex: bool, context: usize) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let needle = parse_pattern(pattern, as_hex)?;

    let hits = search::find_all(&needle, &data);
    println!("{}: {} matches of {} bytes", input.display(), hits.len(), needle.len());

    for offset in hits {
        let from = offset.saturating_sub(context);
        let to = (offset + needle.len() + context).min(data.len());
        println!("Match at {:#010x}", offset);
        print!("{}", inspect::hexdump(&data[from..to], from));
    }

    Ok(())
}

/// Turn a `find` pattern argument into the bytes to search for.
fn parse_pattern(pattern: &str, as_hex: bool) -> Result<Vec<u8>> {
    let needle = if as_hex {
        let digits: String = pattern.chars().filter(|c| !c.is_whitespace()).collect();
        hex::decode(&digits).with_context(|| format!("Invalid hex pattern {pattern:?}"))?
    } else {
        pattern.as_bytes().to_vec()
    };

    if needle.is_empty() {
        anyhow::bail!("Search pattern is empty");
    }
    Ok(needle)
}

fn cmd_diff(a: &Path, b: &Path, limit: usize) -> Result<()> {
    let left = fs::read(a).with_context(|| format!("Failed to read {}", a.display()))?;
    let right = fs::read(b).with_context(|| format!("Failed to read {}", b.display()))?;

    let cmp = inspect::compare(&left, &right);
    println!("{}: {} bytes", a.display(), left.len());
    println!("{}: {} bytes", b.display(), right.len());

    if cmp.is_identical() {
        println!("Files are identical");
        return Ok(());
    }

    println!(
        "Matching: {}, differing: {}, length difference: {}",
        cmp.matching.len(),
        cmp.differing.len(),
        cmp.length_difference
    );
    for &offset in cmp.differing.iter().take(limit) {
        println!(
            "  {:#010x}: {:02x} != {:02x}",
            offset, left[offset], right[offset]
        );
    }
    if cmp.differing.len() > limit {
        println!("  ... and {} more", cmp.differing.len() - limit);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_range_defaults_to_region_end() {
        assert_eq!(dump_range(64, 0, None).unwrap(), 0..64);
        assert_eq!(dump_range(64, 16, None).unwrap(), 16..64);
        assert_eq!(dump_range(64, 64, None).unwrap(), 64..64);
    }

    #[test]
    fn test_dump_range_rejects_end_before_start() {
        let err = dump_range(64, 32, Some(8)).unwrap_err();
        assert!(err.to_string().contains("before --start"));
    }

    #[test]
    fn test_dump_range_rejects_past_region() {
        assert!(dump_range(64, 0, Some(65)).is_err());
        assert!(dump_range(64, 70, None).is_err());
    }

    #[test]
    fn test_parse_pattern() {
        assert_eq!(parse_pattern("LBP", false).unwrap(), b"LBP");
        assert_eq!(parse_pattern("00 0a ff", true).unwrap(), [0x00, 0x0A, 0xFF]);
        assert!(parse_pattern("0g", true).is_err());
        assert!(parse_pattern("", false).is_err());
    }

    #[test]
    fn test_cli_parses_find() {
        let cli = Cli::try_parse_from(["lbpk", "find", "data.bin", "4c42", "--hex"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Find { hex: true, context: 16, .. }
        ));
    }
}
