pub mod fetch;

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
pub use fetch::fetch;

pub fn make_csv_file_name(output_dir: &Path, city: &str) -> PathBuf {
    let today = Local::now();
    let file_name = format!(
        "aqicn-{}-{}-{:02}-{:02}.csv",
        city.to_lowercase(),
        today.year(),
        today.month(),
        today.day()
    );

    output_dir.join(file_name)
}

// -- Tests -------------------------------------------------------------------
