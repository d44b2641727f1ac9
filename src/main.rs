//! Thread Art CLI
//!
//! Usage:
//!   thread-art generate <COUNT> <SHAPE> [-o FILE]
//!   thread-art visualize <INPUT> [-o FILE.png|FILE.svg] [-s WIDTH HEIGHT]
//!
//! Options:
//!   -v, --verbose  Enable debug logging (RUST_LOG overrides)
//!   -h, --help     Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use thread_art::{
    generate_file, load_stylesheet, visualize_file, CanvasConfig, Error, RenderConfig, Stylesheet,
};

#[derive(Parser)]
#[command(name = "thread-art")]
#[command(about = "Generate and visualize thread art nail layouts")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a thread art file with nails arranged in a shape
    Generate {
        /// Number of nails to generate
        #[arg(allow_negative_numbers = true)]
        count: i64,

        /// Shape to arrange nails in (circle, square)
        shape: String,

        /// Output YAML file path
        #[arg(short, long, default_value = "generated_thread_art.yml")]
        output: PathBuf,
    },

    /// Render a thread art file to an image
    Visualize {
        /// Input YAML file path
        input: PathBuf,

        /// Output image file path (.png or .svg)
        #[arg(short, long, default_value = "thread_art.png")]
        output: PathBuf,

        /// Output image size
        #[arg(
            short,
            long,
            num_args = 2,
            value_names = ["WIDTH", "HEIGHT"],
            default_values_t = [800, 800],
            allow_negative_numbers = true
        )]
        size: Vec<i64>,

        /// Stylesheet file for the colour palette (TOML format)
        #[arg(long)]
        stylesheet: Option<PathBuf>,

        /// Hide nail index labels
        #[arg(long)]
        no_labels: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Generate {
            count,
            shape,
            output,
        } => run_generate(count, &shape, &output).map_err(|e| e.to_string()),
        Command::Visualize {
            input,
            output,
            size,
            stylesheet,
            no_labels,
        } => run_visualize(&input, &output, &size, stylesheet.as_deref(), no_labels)
            .map_err(|e| describe(e, &input)),
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

/// Render an error for the terminal, annotating malformed documents with
/// the offending source location when the input can be re-read
fn describe(error: Error, input: &Path) -> String {
    match error {
        Error::Document(e) => {
            let filename = input.display().to_string();
            match fs::read_to_string(input) {
                Ok(source) => e.format(&source, &filename),
                Err(_) => e.to_string(),
            }
        }
        e => e.to_string(),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_generate(count: i64, shape: &str, output: &Path) -> Result<(), Error> {
    generate_file(count, shape, output)?;

    println!("Thread art file created: {}", output.display());
    println!("  - Shape: {}", shape.to_ascii_lowercase());
    println!("  - Nails: {}", count);
    println!("  - Thread: empty (ready for editing)");
    Ok(())
}

fn run_visualize(
    input: &Path,
    output: &Path,
    size: &[i64],
    stylesheet: Option<&Path>,
    no_labels: bool,
) -> Result<(), Error> {
    let (width, height) = match size {
        [w, h] => (*w, *h),
        _ => (800, 800),
    };
    let canvas = CanvasConfig::new()
        .with_checked_size(width, height)?
        .with_labels(!no_labels);

    let stylesheet = match stylesheet {
        Some(path) => load_stylesheet(path)?,
        None => Stylesheet::default(),
    };

    let config = RenderConfig::new()
        .with_canvas(canvas)
        .with_stylesheet(stylesheet);

    let summary = visualize_file(input, output, &config)?;
    println!(
        "Loaded thread art with {} nails and {} thread points",
        summary.stats.nails, summary.thread_points
    );
    println!("Thread art visualization saved to: {}", output.display());
    Ok(())
}
