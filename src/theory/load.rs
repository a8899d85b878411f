use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use super::dataset::Dataset;
use super::record::parse_rows;

pub const DEFAULT_DATA_PATH: &str = "./data/benchmark_results_v4_11_2.csv";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_owned())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::parse(DEFAULT_DATA_PATH)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

fn fetch_url(url: &str) -> Result<String> {
    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => {
            return Err(anyhow!("HTTP error! status: {status}"));
        }
        Err(error) => {
            return Err(anyhow::Error::new(error).context(format!("failed to fetch {url}")));
        }
    };

    response
        .into_string()
        .with_context(|| format!("response body from {url} was not valid UTF-8 text"))
}

pub fn load_dataset(source: &DataSource) -> Result<Dataset> {
    tracing::info!(%source, "loading theory data");

    let rows = match source {
        DataSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            parse_rows(BufReader::new(file))
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        DataSource::Url(url) => {
            let body = fetch_url(url)?;
            parse_rows(body.as_bytes()).with_context(|| format!("failed to parse {url}"))?
        }
    };

    let dataset = Dataset::new(rows);
    tracing::info!(
        rows = dataset.row_count(),
        categories = dataset.color_domain().len(),
        "theory data loaded"
    );
    Ok(dataset)
}

pub fn describe_load_error(error: &anyhow::Error) -> String {
    format!("Error loading data: {error:#}")
}
