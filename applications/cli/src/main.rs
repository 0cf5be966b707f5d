//! Sworn - headless front end for the Sworn Player engine

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use sworn_cli::{walk::walk_queue, SwornConfig};
use sworn_core::apply_favorites;
use sworn_metadata::{read_tag_window, scan_id3v1, AudioMetadata, TrackImporter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sworn")]
#[command(about = "Sworn Player command line tools", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./sworn.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the trailing tag of each file
    Inspect {
        /// Files to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Build track records from local files
    Import {
        /// Files to import
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Track ids to mark as favorites
        #[arg(short, long, value_delimiter = ',')]
        favorites: Vec<String>,
    },
    /// Play imported files headlessly, ending each track in turn
    Walk {
        /// Files to queue, in order
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Queue index to start from
        #[arg(short, long, default_value_t = 0)]
        start: usize,

        /// Stop after this many tracks
        #[arg(long, default_value_t = 20)]
        max_steps: usize,

        /// Turn shuffle on regardless of configuration
        #[arg(long)]
        shuffle: bool,
    },
}

#[derive(Serialize)]
struct InspectReport {
    path: PathBuf,
    tagged: bool,
    metadata: AudioMetadata,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sworn=info,sworn_cli=info,sworn_playback=info,sworn_metadata=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = SwornConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect { paths } => {
            inspect(&paths).await?;
        }
        Commands::Import { paths, favorites } => {
            import(&config, &paths, favorites).await?;
        }
        Commands::Walk {
            paths,
            start,
            max_steps,
            shuffle,
        } => {
            walk(config, &paths, start, max_steps, shuffle).await?;
        }
    }

    Ok(())
}

async fn inspect(paths: &[PathBuf]) -> anyhow::Result<()> {
    let mut reports = Vec::with_capacity(paths.len());

    for path in paths {
        let scan = match read_tag_window(path).await {
            Ok(bytes) => scan_id3v1(&bytes),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Could not read file");
                continue;
            }
        };

        reports.push(InspectReport {
            path: path.clone(),
            tagged: scan.is_found(),
            metadata: scan.into_metadata(),
        });
    }

    print_json(&reports)
}

async fn import(
    config: &SwornConfig,
    paths: &[PathBuf],
    favorites: Vec<String>,
) -> anyhow::Result<()> {
    let importer = TrackImporter::new(config.import.clone());
    let tracks = importer.import_files(paths).await;

    let favorites: HashSet<String> = favorites.into_iter().collect();
    print_json(&apply_favorites(&tracks, &favorites))
}

async fn walk(
    config: SwornConfig,
    paths: &[PathBuf],
    start: usize,
    max_steps: usize,
    shuffle: bool,
) -> anyhow::Result<()> {
    let importer = TrackImporter::new(config.import);
    let tracks = importer.import_files(paths).await;

    let mut playback = config.playback;
    playback.shuffle |= shuffle;

    tracing::info!(
        tracks = tracks.len(),
        shuffle = playback.shuffle,
        repeat = %playback.repeat,
        "Starting walk"
    );

    let report = walk_queue(tracks, start, playback, max_steps).await?;
    print_json(&report)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
