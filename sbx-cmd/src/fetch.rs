//! Download the UGZ open data files from data.stadt-zuerich.ch.

use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;

const OPEN_DATA_BASE: &str = "https://data.stadt-zuerich.ch/dataset";

/// (dataset, file name) pairs for one year.
fn ugz_files(year: i32) -> Vec<(&'static str, String)> {
    vec![
        (
            "ugz_meteodaten_stundenmittelwerte",
            format!("ugz_ogd_meteo_h1_{}.csv", year),
        ),
        (
            "ugz_luftschadstoffmessung_stundenwerte",
            format!("ugz_ogd_air_h1_{}.csv", year),
        ),
        (
            "ugz_meteodaten_stundenmittelwerte",
            "uzg_ogd_metadaten.json".to_string(),
        ),
    ]
}

fn download_url(dataset: &str, file: &str) -> String {
    format!("{}/{}/download/{}", OPEN_DATA_BASE, dataset, file)
}

/// GET `url` with retry and exponential backoff.
async fn get_with_retry(client: &Client, url: &str) -> Option<String> {
    let max_tries = 3;
    let mut sleep_millis: u64 = 1000;

    for attempt in 1..=max_tries {
        match client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => match response.text().await {
                Ok(body) if !body.trim().is_empty() => return Some(body),
                Ok(_) => warn!("Attempt {}/{}: Empty response for {}", attempt, max_tries, url),
                Err(e) => warn!(
                    "Attempt {}/{}: Failed to read response body for {}: {}",
                    attempt, max_tries, url, e
                ),
            },
            Ok(response) => warn!(
                "Attempt {}/{}: Bad response status for {}: {}",
                attempt,
                max_tries,
                url,
                response.status()
            ),
            Err(e) => warn!("Attempt {}/{}: Request failed for {}: {}", attempt, max_tries, url, e),
        }

        if attempt < max_tries {
            info!("Sleeping for {} milliseconds before retry", sleep_millis);
            tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
            sleep_millis *= 2;
        }
    }

    warn!("All attempts failed for {}", url);
    None
}

/// Download the meteo, air and station metadata files for `year`.
pub async fn run_fetch(year: i32, output_dir: &str) -> anyhow::Result<()> {
    let dir = Path::new(output_dir);
    std::fs::create_dir_all(dir)?;

    let client = Client::builder().timeout(Duration::from_secs(120)).build()?;

    let mut failed = Vec::new();
    for (dataset, file) in ugz_files(year) {
        let url = download_url(dataset, &file);
        info!("Fetching {}", url);
        match get_with_retry(&client, &url).await {
            Some(body) => {
                let dest = dir.join(&file);
                std::fs::write(&dest, body)?;
                info!("Wrote {}", dest.display());
            }
            None => failed.push(file),
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Failed to download: {}", failed.join(", "));
    }
    info!("Fetch complete. Output: {}", output_dir);
    Ok(())
}
