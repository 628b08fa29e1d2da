//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{command, Parser, Subcommand};
use indicatif::ProgressBar;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the current AQI reading for a city
    Fetch {
        /// City name used in the API feed endpoint
        #[arg(long, default_value = "hanoi")]
        city: String,

        /// Directory the dated CSV file is appended to
        #[arg(long, default_value = "data_aqicn")]
        output_dir: PathBuf,
    },
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}
