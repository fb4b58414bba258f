use crate::logger;
use crate::models::CountryRecord;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    File(PathBuf),
    Url(String),
}

impl DatasetSource {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            DatasetSource::Url(source.to_string())
        } else {
            DatasetSource::File(PathBuf::from(source))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server answered with status {0}")]
    Status(u16),
    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Dataset contains no countries")]
    Empty,
    #[error("Record {index} has an empty '{field}' field")]
    EmptyField { index: usize, field: &'static str },
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    continent: String,
    country: String,
    url: String,
    capital: String,
    currency: String,
    #[serde(default, alias = "president_or_head")]
    head_of_state: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Envelope { sheet1: Vec<RawRecord> },
    Records(Vec<RawRecord>),
}

impl RawRecord {
    fn normalize(self, index: usize) -> Result<CountryRecord, DatasetError> {
        let required = |value: String, field: &'static str| {
            let value = value.trim().to_string();
            if value.is_empty() {
                Err(DatasetError::EmptyField { index, field })
            } else {
                Ok(value)
            }
        };

        Ok(CountryRecord {
            continent: required(self.continent, "continent")?,
            country: required(self.country, "country")?,
            flag_url: required(self.url, "url")?,
            capital: required(self.capital, "capital")?,
            currency: required(self.currency, "currency")?,
            head_of_state: self
                .head_of_state
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty()),
        })
    }
}

/// Parses either `{"sheet1": [...]}` or a bare array of records.
pub fn parse_dataset(body: &str) -> Result<Vec<CountryRecord>, DatasetError> {
    let records = match serde_json::from_str::<Payload>(body)? {
        Payload::Envelope { sheet1 } => sheet1,
        Payload::Records(records) => records,
    };

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.normalize(index))
        .collect()
}

pub async fn load_dataset(source: &DatasetSource) -> Result<Vec<CountryRecord>, DatasetError> {
    logger::log(&format!("Loading dataset from {}", source));

    let body = match source {
        DatasetSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| DatasetError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        DatasetSource::Url(url) => {
            let response = reqwest::get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(DatasetError::Status(status.as_u16()));
            }
            response.text().await?
        }
    };

    let records = parse_dataset(&body)?;
    logger::log(&format!("Loaded {} country records", records.len()));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ENVELOPE: &str = r#"{
        "sheet1": [
            {"continent": "Europe", "country": "France", "url": "https://flags.example/fr.png", "capital": "Paris", "currency": "Euro"},
            {"continent": " Asia ", "country": "Japan", "url": "https://flags.example/jp.png", "capital": "Tokyo", "currency": "Yen", "extra": 1}
        ]
    }"#;

    #[test]
    fn test_parse_envelope() {
        let records = parse_dataset(ENVELOPE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].country, "France");
        assert_eq!(records[0].flag_url, "https://flags.example/fr.png");
        assert_eq!(records[1].continent, "Asia");
        assert!(records[1].head_of_state.is_none());
    }

    #[test]
    fn test_parse_bare_array_with_head_of_state_alias() {
        let body = r#"[
            {"continent": "Europe", "country": "France", "url": "u", "capital": "Paris", "currency": "Euro", "president_or_head": "Someone"},
            {"continent": "Europe", "country": "Italy", "url": "u", "capital": "Rome", "currency": "Euro", "head_of_state": "  "}
        ]"#;
        let records = parse_dataset(body).unwrap();
        assert_eq!(records[0].head_of_state.as_deref(), Some("Someone"));
        assert_eq!(records[1].head_of_state, None);
    }

    #[test]
    fn test_parse_empty_dataset() {
        assert!(matches!(
            parse_dataset(r#"{"sheet1": []}"#),
            Err(DatasetError::Empty)
        ));
        assert!(matches!(parse_dataset("[]"), Err(DatasetError::Empty)));
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse_dataset("not json"),
            Err(DatasetError::Json(_))
        ));
        // Missing a required field
        assert!(matches!(
            parse_dataset(r#"[{"continent": "Europe", "country": "France"}]"#),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn test_parse_empty_required_field() {
        let body = r#"[
            {"continent": "Europe", "country": "France", "url": "u", "capital": "Paris", "currency": "Euro"},
            {"continent": "Europe", "country": "Italy", "url": "u", "capital": " ", "currency": "Euro"}
        ]"#;
        match parse_dataset(body) {
            Err(DatasetError::EmptyField { index, field }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "capital");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            DatasetSource::parse("https://example.com/api/quiz"),
            DatasetSource::Url("https://example.com/api/quiz".to_string())
        );
        assert_eq!(
            DatasetSource::parse("data/flags.json"),
            DatasetSource::File(PathBuf::from("data/flags.json"))
        );
    }

    #[tokio::test]
    async fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ENVELOPE.as_bytes()).unwrap();

        let source = DatasetSource::File(file.path().to_path_buf());
        let records = load_dataset(&source).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_load_dataset_missing_file() {
        let source = DatasetSource::File(PathBuf::from("/definitely/not/here.json"));
        let err = load_dataset(&source).await.unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_shipped_dataset_parses() {
        let body = include_str!("../data/flags.json");
        let records = parse_dataset(body).unwrap();
        assert!(records.len() >= 20);
    }
}
