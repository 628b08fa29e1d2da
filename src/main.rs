mod cli;
mod fetch;
mod reading;
mod store;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Fetch { city, output_dir } => match command::fetch(city, output_dir).await {
            Ok(filename) => println!("Reading saved to `{}`", filename),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
