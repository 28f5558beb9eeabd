//! # Postmaker CLI
//!
//! Command-line interface for rendering event posters.
//!
//! ## Usage
//!
//! ```bash
//! # Render every preset with the default texts
//! postmaker render
//!
//! # Render one preset with a photo, logo and QR link
//! postmaker render -c IG_STORY --background photo.jpg --logo logo.png \
//!     --link https://example.com --title "Rust Meetup" --title-font Inter-Bold.ttf
//!
//! # List presets and available fonts
//! postmaker presets
//! postmaker fonts Fonts
//! ```

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use postmaker::{
    CanvasPreset, EventInformation, FontResolver, PosterComposer, PosterError, PosterRequest, TextField,
    event::{PLACEHOLDER_FONT, validate_size},
    font,
    logo::PLACEHOLDER_LINK,
    output::{self, RenderReport, ReportEntry},
};

/// Postmaker - Event poster generator
#[derive(Parser, Debug)]
#[command(name = "postmaker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render posters and save them as PNG
    Render(RenderArgs),

    /// List canvas presets
    Presets,

    /// List font files in a directory
    Fonts {
        /// Directory to scan
        #[arg(default_value = "Fonts")]
        dir: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Canvas preset (repeatable; omit to render all)
    #[arg(short, long = "canvas", value_name = "PRESET")]
    canvas: Vec<String>,

    /// Background photo
    #[arg(long, value_name = "FILE")]
    background: Option<PathBuf>,

    /// Logo image
    #[arg(long, value_name = "FILE")]
    logo: Option<PathBuf>,

    /// Background color
    #[arg(long, default_value = "#ffffff")]
    bgcolor: String,

    /// Foreground color
    #[arg(long, default_value = "#eb4034")]
    fgcolor: String,

    #[arg(long, default_value = "Title: Not decided yet")]
    title: String,
    #[arg(long, default_value = PLACEHOLDER_FONT)]
    title_font: String,
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    title_size: i64,

    #[arg(long, default_value = "Description: Not decided yet")]
    description: String,
    #[arg(long, default_value = PLACEHOLDER_FONT)]
    description_font: String,
    #[arg(long, default_value_t = 54, allow_negative_numbers = true)]
    description_size: i64,

    #[arg(long, default_value = "Place: Not decided yet")]
    place: String,
    #[arg(long, default_value = PLACEHOLDER_FONT)]
    place_font: String,
    #[arg(long, default_value_t = 75, allow_negative_numbers = true)]
    place_size: i64,

    #[arg(long, default_value = "Date: Not decided yet")]
    date: String,
    #[arg(long, default_value = PLACEHOLDER_FONT)]
    date_font: String,
    #[arg(long, default_value_t = 60, allow_negative_numbers = true)]
    date_size: i64,

    /// Link encoded as a QR code next to the logo
    #[arg(long, default_value = PLACEHOLDER_LINK)]
    link: String,

    /// Output directory
    #[arg(long, default_value = ".")]
    savedir: PathBuf,

    /// Directory searched for bare font file names
    #[arg(long, default_value = "Fonts")]
    font_dir: PathBuf,

    /// Write a JSON summary of the run
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(long, default_value_t = 0)]
    jobs: usize,
}

impl RenderArgs {
    fn event(&self) -> Result<EventInformation, PosterError> {
        Ok(EventInformation::new(
            TextField::new(&self.title, &self.title_font, validate_size("title_size", self.title_size)?),
            TextField::new(
                &self.description,
                &self.description_font,
                validate_size("description_size", self.description_size)?,
            ),
            TextField::new(&self.place, &self.place_font, validate_size("place_size", self.place_size)?),
            TextField::new(&self.date, &self.date_font, validate_size("date_size", self.date_size)?),
        ))
    }

    fn presets(&self) -> Result<Vec<CanvasPreset>, PosterError> {
        if self.canvas.is_empty() {
            return Ok(CanvasPreset::ALL.to_vec());
        }
        self.canvas.iter().map(|id| id.parse()).collect()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<ExitCode, PosterError> {
    match command {
        Commands::Render(args) => render(&args),
        Commands::Presets => {
            println!("{:<10} {:>11}  {:>10}", "PRESET", "SIZE", "PADDING");
            for preset in CanvasPreset::ALL {
                let (w, h) = preset.dimensions();
                let padding = preset.padding();
                println!(
                    "{:<10} {:>11}  {:>10}",
                    preset.name(),
                    format!("{}x{}", w, h),
                    format!("{},{}", padding.horizontal, padding.vertical)
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fonts { dir } => {
            let fonts = font::list_fonts(&dir)?;
            if fonts.is_empty() {
                println!("No fonts found in {}", dir.display());
            }
            for path in fonts {
                println!("  {}", path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn render(args: &RenderArgs) -> Result<ExitCode, PosterError> {
    // Caller errors first: nothing is drawn if any of these fail
    let presets = args.presets()?;
    let event = args.event()?;
    let mut request = PosterRequest::new(&args.bgcolor, &args.fgcolor, event)?.link(&args.link);
    if let Some(path) = &args.background {
        request = request.background(output::load_image(path, "background")?);
    }
    if let Some(path) = &args.logo {
        request = request.logo(output::load_image(path, "logo")?);
    }

    let composer = PosterComposer::with_resolver(FontResolver::with_search_dir(&args.font_dir));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs)
        .build()
        .map_err(|e| PosterError::invalid_argument("jobs", e.to_string()))?;
    debug!(presets = presets.len(), threads = pool.current_num_threads(), "rendering");
    let results = pool.install(|| composer.compose_batch(&presets, &request));

    let mut report = RenderReport::default();
    for (preset, result) in results {
        let entry = match result.and_then(|image| output::save_png(&image, &args.savedir, &request.event, preset)) {
            Ok(path) => {
                println!("{:<10} {}", preset.name(), path.display());
                ReportEntry::saved(preset, path)
            }
            Err(e) => {
                eprintln!("{:<10} failed: {}", preset.name(), e);
                ReportEntry::failed(preset, &e)
            }
        };
        report.push(entry);
    }

    if let Some(path) = &args.report {
        report.write(path)?;
        debug!(path = %path.display(), "wrote report");
    }

    Ok(exit_code(&report, &args.savedir))
}

fn exit_code(report: &RenderReport, savedir: &Path) -> ExitCode {
    if report.failed == 0 {
        println!("Saved {} poster(s) to {}", report.succeeded, savedir.display());
        ExitCode::SUCCESS
    } else {
        eprintln!("{} of {} preset(s) failed", report.failed, report.entries.len());
        ExitCode::FAILURE
    }
}
