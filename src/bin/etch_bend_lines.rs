//! Etch the bend lines of every DXF drawing under a directory
//!
//! # Usage
//!
//! ```bash
//! # Etch all drawings under the current directory
//! etch_bend_lines
//!
//! # Use a settings file and override the etch length
//! etch_bend_lines ./parts --config settings.json --etch-length 0.5
//!
//! # Report what would change without writing anything
//! etch_bend_lines ./parts --dry-run
//! ```

use anyhow::{bail, Context};
use clap::Parser;
use etch_bend_lines::{EtchConfiguration, EtchReport, Etcher};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Add etch marks to upward bend lines in sheet-metal DXF drawings
#[derive(Parser, Debug)]
#[command(name = "etch_bend_lines")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory searched recursively for .dxf files
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Length of the etch marks at each end of long bend lines
    #[arg(long)]
    etch_length: Option<f64>,

    /// Largest bend radius that still gets etched
    #[arg(long)]
    max_bend_radius: Option<f64>,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let etcher = Etcher::new(config);

    let mut files = Vec::new();
    find_drawings(&args.dir, &mut files)
        .with_context(|| format!("cannot search {}", args.dir.display()))?;
    files.sort();

    if files.is_empty() {
        log::warn!("no DXF files found under {}", args.dir.display());
        return Ok(());
    }

    let results: Vec<(PathBuf, etch_bend_lines::Result<EtchReport>)> = files
        .into_par_iter()
        .map(|path| {
            let result = if args.dry_run {
                etcher.check_file(&path)
            } else {
                etcher.etch_file(&path)
            };
            (path, result)
        })
        .collect();

    let mut failed = 0;
    for (path, result) in &results {
        match result {
            Ok(report) => println!("{}: {}", path.display(), report),
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} drawings failed", failed, results.len());
    }
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<EtchConfiguration> {
    let mut config = match &args.config {
        Some(path) => EtchConfiguration::from_settings_file(path)
            .with_context(|| format!("cannot load settings from {}", path.display()))?,
        None => EtchConfiguration::default(),
    };

    if let Some(etch_length) = args.etch_length {
        config = config.with_etch_length(etch_length);
    }
    if let Some(max_bend_radius) = args.max_bend_radius {
        config = config.with_max_bend_radius(max_bend_radius);
    }

    config.validate()?;
    Ok(config)
}

/// Collect `*.dxf` files below `dir`, ignoring case
fn find_drawings(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            find_drawings(&path, files)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("dxf"))
        {
            files.push(path);
        }
    }
    Ok(())
}
