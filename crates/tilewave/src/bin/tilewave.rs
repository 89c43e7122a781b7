//! # Tilewave
//!
//! Command-line front end: load a run description, generate one map,
//! print it as a grid of tile ids.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tilewave::{Generation, GenerationResult, Generator, TilewaveConfig};
use tilewave_core::PropagationStrategy;

#[derive(Parser, Debug)]
#[command(
    name = "tilewave",
    version,
    about = "Generate an edge-matched tile map with wave function collapse"
)]
struct Cli {
    /// Run description (generation settings plus tileset). The default is
    /// relative to the current directory, so it only resolves when run from
    /// the workspace root
    #[arg(long, value_name = "PATH", default_value = "data/tilesets/coast.toml")]
    config: PathBuf,
    /// Override the master seed
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Override the grid width
    #[arg(long, value_name = "W")]
    width: Option<usize>,
    /// Override the grid height
    #[arg(long, value_name = "H")]
    height: Option<usize>,
    /// Override the attempt bound
    #[arg(long, value_name = "N")]
    max_attempts: Option<u32>,
    /// Propagate until stable instead of one hop
    #[arg(long)]
    transitive: bool,
    /// Also print the entropy map of the last discarded attempt
    #[arg(long)]
    entropy: bool,
}

impl Cli {
    fn load(&self) -> GenerationResult<TilewaveConfig> {
        let mut config = TilewaveConfig::from_toml_file(&self.config)?;
        let generation = &mut config.generation;
        if let Some(seed) = self.seed {
            generation.seed = seed;
        }
        if let Some(width) = self.width {
            generation.width = width;
        }
        if let Some(height) = self.height {
            generation.height = height;
        }
        if let Some(max_attempts) = self.max_attempts {
            generation.max_attempts = max_attempts;
        }
        if self.transitive {
            generation.propagation = PropagationStrategy::Transitive;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         TILEWAVE                                                 ║");
    println!("║         EDGE-MATCHED TILE MAP GENERATOR                          ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let cli = Cli::parse();
    println!("Loading config: {}", cli.config.display());

    let generator = match cli.load().and_then(|config| Generator::from_config(&config)) {
        Ok(generator) => generator,
        Err(err) => {
            println!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let settings = generator.config();
    println!();
    println!("┌─ RUN ────────────────────────────────────────────────────────────┐");
    println!("│ Grid:               {}x{}", settings.width, settings.height);
    println!("│ Seed:               {}", settings.seed);
    println!("│ Max Attempts:       {}", settings.max_attempts);
    println!("│ Propagation:        {:?}", settings.propagation);
    println!(
        "│ Tiles:              {} ({:?} edges)",
        generator.catalog().len(),
        generator.catalog().rule()
    );
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    match generator.generate() {
        Ok(generation) => {
            report(&generation, cli.entropy);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}

fn report(generation: &Generation, show_entropy: bool) {
    let stats = generation.stats;
    println!("{}", generation.map);
    println!();
    println!("┌─ RESULT ─────────────────────────────────────────────────────────┐");
    println!("│ Attempts:           {}", stats.attempts);
    println!("│ Contradictions:     {}", stats.contradictions);
    println!("│ Collapses:          {}", stats.steps);
    println!("└──────────────────────────────────────────────────────────────────┘");

    if !show_entropy {
        return;
    }
    println!();
    match &generation.last_contradiction {
        Some(entropy) => {
            println!("Entropy at last contradiction:");
            for row in entropy {
                let line: Vec<String> = row.iter().map(usize::to_string).collect();
                println!("{}", line.join(" "));
            }
        }
        None => println!("No contradictions: first attempt succeeded."),
    }
}
