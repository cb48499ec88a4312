use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use mediagen_core::config::Settings;
use mediagen_core::layout::LibraryLayout;
use mediagen_core::pipeline::FixtureGenerator;

mod tree;

#[derive(Parser, Debug)]
#[command(author, version, about = "mediagen - synthetic music library test data generator", long_about = None)]
struct Args {
    /// Root directory for the generated environment
    #[arg(short, long, default_value = ".testenv")]
    root: PathBuf,

    /// Album colors to generate (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    albums: Option<Vec<String>>,

    /// Seed for reproducible metadata
    #[arg(short, long)]
    seed: Option<u64>,

    /// Show debug information
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    info!("Setting up test data...");
    let started = Instant::now();

    let mut settings = Settings::default();
    settings.media.seed = args.seed;
    settings.tools.log_commands = args.debug;

    let generator = FixtureGenerator::new(settings);
    let mut layout = LibraryLayout::new(&args.root);
    if let Some(albums) = args.albums {
        layout = layout.with_albums(albums);
    }

    let report = layout.generate(&generator)?;

    info!("Done: {:.2} seconds", started.elapsed().as_secs_f64());
    info!(
        "Created {} files under {}",
        report.total_files(),
        args.root.display()
    );

    print!("{}", tree::render(&args.root)?);
    Ok(())
}
