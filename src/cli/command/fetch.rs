//! Fetch the current reading for a city and append it to the dated CSV file.

use std::{env, fs, path::Path};

use anyhow::{bail, Result};

use crate::{cli::create_spinner, fetch::fetch_feed, reading::AqiReading, store};

use super::make_csv_file_name;

const TOKEN_VAR: &str = "AQICN_TOKEN";

pub async fn fetch(city: &str, output_dir: &Path) -> Result<String> {
    let token = read_token()?;

    let bar = create_spinner(format!("Fetching AQI for `{}`...", city));
    let payload = fetch_feed(city, &token).await?;
    bar.finish_with_message("Reading fetched");

    let reading = AqiReading::from_payload(&payload);
    let row = reading.flatten();

    for (key, value) in &row {
        println!("{:<14} {}", key, value);
    }

    fs::create_dir_all(output_dir)?;
    let csv_file_name = make_csv_file_name(output_dir, city);
    store::append_row(&csv_file_name, &row)?;

    Ok(csv_file_name.to_string_lossy().to_string())
}

// Token absence is a configuration error and aborts before any request.
fn read_token() -> Result<String> {
    validate_token(env::var(TOKEN_VAR).ok())
}

fn validate_token(token: Option<String>) -> Result<String> {
    match token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => bail!(
            "Set environment variable {} with your token from aqicn.org",
            TOKEN_VAR
        ),
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_accept_token() {
        let token = validate_token(Some("abc123".to_string())).unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn should_reject_missing_token() {
        assert!(validate_token(None).is_err());
    }

    #[test]
    fn should_reject_empty_token() {
        assert!(validate_token(Some("".to_string())).is_err());
        assert!(validate_token(Some("   ".to_string())).is_err());
    }
}
