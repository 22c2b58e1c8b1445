use clap::{Parser, Subcommand};
use series_gal::filter::FilterRegistry;
use series_gal::state::AppState;
use series_gal::{artwork, check, config, import, output, render, series};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "series-gal")]
#[command(about = "Static site generator for art portfolios organised into series")]
#[command(long_about = "\
Static site generator for art portfolios organised into series

A JSON list of artworks is the data source. Works are grouped by their
series name and rendered as one gallery page with tag filters, expandable
series sections, a lightbox and deep links (#series-<slug>).

Source structure:

  site/
  ├── config.toml                  # Site config (optional)
  ├── data/
  │   └── artworks.json            # Artwork records (JSON array)
  ├── images/                      # Referenced images → copied to output
  │   └── thumbs/
  └── assets/                      # Fonts, favicon, default cover → copied

Artwork record fields (all optional):
  title, series, year, medium, dimensions, image_file, thumb_file,
  alt_text, image_description, series_description,
  subcategories (\"oil, portrait\"), order, sub_order

Run 'series-gal gen-config' to generate a documented config.toml.
Run 'series-gal import-csv artworks.csv' to convert a spreadsheet export.")]
#[command(version = version_string())]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (series manifest)
    #[arg(long, default_value = ".series-gal-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate config and data, and report missing image files
    Check,
    /// Group artworks into series and write the series manifest
    Group,
    /// Render the gallery site
    Build,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Convert a spreadsheet CSV export into the artwork JSON file
    ImportCsv {
        /// CSV file with a header row naming the record fields
        csv_path: PathBuf,

        /// Output JSON path
        #[arg(short = 'o', long = "out", default_value = "data/artworks.json")]
        out: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let config = config::load_config(&cli.source)?;
            let artworks = artwork::load_artworks(&cli.source.join(&config.data_file))?;
            let index = series::group_series(&artworks);
            output::print_series_output(&index);
            let missing = check::find_missing_files(&index, &cli.source);
            output::print_missing_files(&missing);
            if missing.is_empty() {
                println!("==> Site is valid");
            } else {
                println!("==> Data is valid, {} referenced files missing", missing.len());
            }
        }
        Command::Group => {
            let config = config::load_config(&cli.source)?;
            let artworks = artwork::load_artworks(&cli.source.join(&config.data_file))?;
            let index = series::group_series(&artworks);
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("series.json");
            let json = serde_json::to_string_pretty(&index)?;
            std::fs::write(&manifest_path, json)?;
            output::print_series_output(&index);
            println!("==> Wrote {}", manifest_path.display());
        }
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            let artworks = artwork::load_or_empty(&cli.source.join(&config.data_file));
            let state = AppState::new(artworks, config.filters.policy);
            log_registry(state.filters());

            println!("==> Generating HTML → {}", cli.output.display());
            let summary = render::generate(&state, &config, &cli.source, &cli.output)?;
            output::print_generate_output(&summary, &config.copy_dirs);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::ImportCsv { csv_path, out } => {
            let count = import::import_csv(&csv_path, &out)?;
            println!("Wrote {} with {} records.", out.display(), count);
        }
    }

    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn log_registry(filters: &FilterRegistry) {
    tracing::info!(
        tags = filters.all_tags().count(),
        policy = filters.policy().as_str(),
        "filter registry built"
    );
}
