use crate::dataset::DatasetSource;
use crate::logger::DEFAULT_LOG_FILE;
use std::path::PathBuf;

pub const DEFAULT_DATASET: &str = "data/flags.json";
pub const DATASET_ENV: &str = "FLAG_MASTER_DATASET";
pub const LOG_ENV: &str = "FLAG_MASTER_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub dataset: DatasetSource,
    pub log_path: PathBuf,
}

impl Config {
    /// Reads the environment, then lets the first CLI argument override the dataset.
    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::resolve(
            args.first().map(String::as_str),
            std::env::var(DATASET_ENV).ok().as_deref(),
            std::env::var(LOG_ENV).ok().as_deref(),
        )
    }

    pub fn resolve(arg: Option<&str>, dataset_env: Option<&str>, log_env: Option<&str>) -> Self {
        let dataset = arg
            .or(dataset_env)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DATASET);
        let log_path = log_env
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LOG_FILE);

        Self {
            dataset: DatasetSource::parse(dataset),
            log_path: PathBuf::from(log_path),
        }
    }
}
