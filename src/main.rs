use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use carl::args::Cli;
use carl::{classify, find_bouts, ClassifierParameters};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let params = match &cli.params {
        Some(path) => ClassifierParameters::load(path)
            .with_context(|| format!("Failed to load classifier parameters from {}", path))?,
        None => ClassifierParameters::pretrained(),
    };

    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read samples from {}", cli.input))?;
    let mut signal = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let sample: f64 = line
            .parse()
            .with_context(|| format!("Invalid sample on line {}", lineno + 1))?;
        signal.push(sample);
    }

    let mask = classify(&signal, cli.location, cli.continuity, cli.sample_rate, &params)
        .context("Classification failed")?;

    let bouts = find_bouts(&mask);
    if bouts.count == 0 {
        println!("No running bouts detected.");
        return Ok(());
    }
    println!("{} running bout(s):", bouts.count);
    for i in 0..bouts.count {
        println!(
            "  samples {}..{} ({:.1} s)",
            bouts.starts[i],
            bouts.ends[i],
            bouts.lengths[i] as f64 / cli.sample_rate
        );
    }
    Ok(())
}
