mod app;
mod chart;
mod color;
mod config;
mod data;
mod select;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};

use app::{NativeDisplay, render_all};
use config::{AppConfig, CONFIG_FILE};
use data::extract::extract_data;
use data::loader::{describe_source, load_table};
use select::{StdinSource, choose_stations};

const INTRO: &str = "This program is based on data from 2014 collected from London Datastore. \
You can choose a number of stations to see and compare how many entries \
to the stations have been on a weekday, Saturday and Sunday.";

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE))?;

    println!("{INTRO}");

    let table = load_table(&config.dataset)
        .with_context(|| format!("loading stations from {}", describe_source(&config.dataset)))?;

    let stations = choose_stations(&table, &mut StdinSource::new())?;
    let series = extract_data(&stations, &table)?;

    render_all(&mut NativeDisplay, &stations, &series, &config.charts)
}
