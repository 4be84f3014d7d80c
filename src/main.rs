pub mod types;
pub mod config;
pub mod data;
pub mod palette;
pub mod view;
pub mod render;
pub mod html;
pub mod server;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use geojson::GeoJson;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard and its API
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Print the filtered view for a selection
    Query {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        /// Place name to keep, may be repeated
        #[arg(long = "place", value_name = "NAME")]
        places: Vec<String>,
        /// Company name to keep, may be repeated
        #[arg(long = "company", value_name = "NAME")]
        companies: Vec<String>,
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Csv,
    Geojson,
}

fn load_model() -> Result<view::ViewModel> {
    let dataset = data::Dataset::builtin()?;
    let colors = palette::CATEGORY_COLORS;
    dataset.warn_unmapped(&colors);
    tracing::info!("Loaded {} records", dataset.len());
    Ok(view::ViewModel::new(dataset, colors))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            let app_config = config::AppConfig::load_or_default(&config)?;
            let model = load_model()?;
            server::start_server(app_config, model).await?;
        }
        Commands::Query { config, places, companies, format } => {
            let app_config = config::AppConfig::load_or_default(&config)?;
            let model = load_model()?;
            let selection = types::Selection::new(places, companies);

            let output = match format {
                Format::Json => {
                    let body = server::view_response(&model, &app_config, &selection);
                    serde_json::to_string_pretty(&body)?
                }
                Format::Csv => render::table_csv(&model.derive_view(&selection))?,
                Format::Geojson => {
                    GeoJson::from(render::points_geojson(&model.derive_view(&selection))).to_string()
                }
            };
            println!("{}", output);
        }
    }

    Ok(())
}
