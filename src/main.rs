extern crate log;
pub mod crs;
pub mod geofile;
pub mod search_features;
pub mod thumbnail;
use crate::geofile::geojson::write_geojson_to_file;
use crate::search_features::FeatureSearchPreparer;
use crate::thumbnail::{PngFileRenderer, ReqwestFetcher, SearchResultTable, ThumbnailPager};
use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Prepare areas of interest for an imagery search and page through search result thumbnails.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
struct PropertyFilter {
    column: String,
    value: serde_json::Value,
}

#[derive(Deserialize, Debug)]
struct FeaturesConfig {
    filepath: PathBuf,
    #[serde(default)]
    bounding_box: bool,
    output_filepath: Option<PathBuf>,
    filter: Option<PropertyFilter>,
}

fn default_thumbnail_count() -> usize {
    1
}

#[derive(Deserialize, Debug)]
struct ThumbnailsConfig {
    results_filepath: PathBuf,
    output_dir: PathBuf,
    /// Name of the environment variable holding the imagery API key.
    api_key_env: Option<String>,
    #[serde(default = "default_thumbnail_count")]
    count: usize,
}

#[derive(Deserialize, Debug)]
struct Config {
    features: Option<FeaturesConfig>,
    thumbnails: Option<ThumbnailsConfig>,
}

fn prepare_features(config: &FeaturesConfig) -> anyhow::Result<()> {
    let mut preparer = FeatureSearchPreparer::load(&config.filepath, config.bounding_box)?;
    let json_data = preparer.process()?;
    log::info!("Prepared {} features", json_data.features.len());

    if let Some(output_filepath) = &config.output_filepath {
        log::info!("Writing search features to {:?}", output_filepath);
        write_geojson_to_file(json_data, output_filepath)?;
    }

    if let Some(filter) = &config.filter {
        match preparer.filter_by_property(&filter.column, &filter.value) {
            Some(feature) => {
                let bbox = FeatureSearchPreparer::feature_to_bbox_string(feature)?;
                log::info!("Bounding box of {} = {}: {}", filter.column, filter.value, bbox);
                println!("{}", bbox);
            }
            None => log::warn!(
                "No feature with {} = {} in {:?}",
                filter.column,
                filter.value,
                preparer.features_filepath()
            ),
        }
    }
    Ok(())
}

async fn show_thumbnails(config: &ThumbnailsConfig) -> anyhow::Result<()> {
    let table = SearchResultTable::from_json_file(&config.results_filepath)?;
    log::info!(
        "Read {} search results from {:?}",
        table.len(),
        config.results_filepath
    );
    let api_key = match &config.api_key_env {
        Some(name) => Some(std::env::var(name).map_err(|_| {
            anyhow!("Environment variable {} with the API key is not set", name)
        })?),
        None => None,
    };
    let mut pager = ThumbnailPager::new(
        table,
        ReqwestFetcher::new(api_key)?,
        PngFileRenderer::new(&config.output_dir),
    )?;
    for _ in 0..config.count {
        pager.advance_and_show().await?;
    }
    log::debug!("Last thumbnail shown: {:?}", pager.current_link());
    Ok(())
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    if !Path::new(&args.config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", &args.config_filepath));
    }
    let config_contents = read_to_string(args.config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;

    if config.features.is_none() && config.thumbnails.is_none() {
        return Err(anyhow!("Config has neither a features nor a thumbnails section"));
    }
    if let Some(features_config) = &config.features {
        prepare_features(features_config)?;
    }
    if let Some(thumbnails_config) = &config.thumbnails {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(show_thumbnails(thumbnails_config))?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
