use anyhow::{Context, Result};
use campwatch::workflow::load_posts;
use campwatch::{CampWatchConfig, GeoPoint, LocationMode, LogSink, Qualifier, logging};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "campwatch",
    version,
    about = "Campsite transfer post qualifier for first-comment automation"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the configured location mode (distance, region, skip)
    #[arg(long, global = true)]
    mode: Option<LocationMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Qualify a single post (text from --text or stdin)
    Check {
        #[arg(long)]
        text: Option<String>,
    },
    /// Qualify a JSON array of posts and dry-run the replies
    Scan {
        #[arg(long)]
        posts: PathBuf,
        /// Reply text, defaults to the configured one
        #[arg(long)]
        comment: Option<String>,
    },
    /// Great-circle distance between two "lat,lon" points
    Distance {
        #[arg(long, allow_hyphen_values = true)]
        from: GeoPoint,
        #[arg(long, allow_hyphen_values = true)]
        to: GeoPoint,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<campwatch::CampWatchError>() {
                Some(err) => eprintln!("Error: {}", err.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = CampWatchConfig::load_from_path(cli.config.clone())?;
    if let Some(mode) = cli.mode {
        config.qualifier.location_mode = mode;
        config.validate()?;
    }
    logging::init(&config.logging, cli.verbose)?;
    debug!("Location mode: {}", config.qualifier.location_mode);

    match cli.command {
        Command::Check { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read post text from stdin")?;
                    buf
                }
            };

            let qualifier = Qualifier::from_config(&config)?;
            let result = qualifier.qualify(&text);
            println!("{result}");

            Ok(if result.is_qualified() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Scan { posts, comment } => {
            let posts = load_posts(&posts)?;
            info!("Loaded {} post(s)", posts.len());

            let qualifier = Qualifier::from_config(&config)?;
            let comment = comment.unwrap_or_else(|| config.qualifier.comment_text.clone());
            let mut sink = LogSink::default();
            let summary = campwatch::process_posts(&qualifier, &posts, &comment, &mut sink);

            for (reference, comment) in &sink.submitted {
                println!("reply '{comment}' -> {reference}");
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Distance { from, to } => {
            println!("{:.2} km", from.distance_km(&to));
            Ok(ExitCode::SUCCESS)
        }
    }
}
