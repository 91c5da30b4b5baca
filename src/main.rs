use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use sumi::replay::StrokeScript;
use sumi::{Config, PaintSession};

#[derive(Parser, Debug)]
#[command(name = "sumi")]
#[command(version, about = "Pressure- and speed-sensitive calligraphy brush renderer")]
struct Cli {
    /// Stroke script (TOML) to replay onto a blank canvas
    #[arg(long, short = 's', value_name = "FILE")]
    script: PathBuf,

    /// Configuration file (defaults to ~/.config/sumi/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the PNG (defaults to the configured export directory)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Seed for splatter jitter, for reproducible output
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut session = match cli.seed {
        Some(seed) => {
            log::info!("Using seed {seed}");
            PaintSession::with_rng(&config, Box::new(StdRng::seed_from_u64(seed)))?
        }
        None => PaintSession::new(&config)?,
    };

    let script = StrokeScript::load(&cli.script)?;
    let summary = script
        .replay(&mut session)
        .with_context(|| format!("Failed to replay {}", cli.script.display()))?;
    log::info!(
        "Replayed {} stroke(s), {} sample(s), {} undo(s)",
        summary.strokes,
        summary.samples,
        summary.undos
    );

    let written = match cli.output {
        Some(path) => {
            session
                .export_to_path(&path)
                .with_context(|| format!("Failed to export {}", path.display()))?;
            path
        }
        None => session
            .export_to_directory(&config.export)
            .context("Failed to export to the configured directory")?,
    };

    println!("{}", written.display());
    Ok(())
}
