use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use super::domain::Dataset;

/// Where the static dataset document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLocator {
    Url(String),
    File(PathBuf),
}

impl FromStr for DatasetLocator {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Ok(Self::Url(trimmed.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for DatasetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetLocator::Url(url) => write!(f, "{url}"),
            DatasetLocator::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("dataset request returned status {0}")]
    Status(u16),
    #[error("dataset document is not valid: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Retrieve and parse the dataset, reporting every failure to the caller.
pub async fn fetch_dataset(locator: &DatasetLocator) -> Result<Dataset, LoadError> {
    let raw = match locator {
        DatasetLocator::Url(url) => {
            let response = reqwest::get(url.as_str()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status(status.as_u16()));
            }
            response.text().await?
        }
        DatasetLocator::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
    };

    let dataset = Dataset::from_json_str(&raw)?;
    info!(
        source = %locator,
        candidates = dataset.candidates.len(),
        companies = dataset.companies.len(),
        job_offers = dataset.job_offers.len(),
        matches = dataset.matches.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Like [`fetch_dataset`], but never fails: errors are logged and an empty dataset comes back
/// so rendering degrades to empty states.
pub async fn load_dataset(locator: &DatasetLocator) -> Dataset {
    match fetch_dataset(locator).await {
        Ok(dataset) => dataset,
        Err(err) => {
            warn!(source = %locator, error = %err, "falling back to empty dataset");
            Dataset::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::Router;
    use std::io::Write;
    use tokio::net::TcpListener;

    const ACME: &str = r#"{"candidates": [], "companies": [{"id": 3, "name": "Acme", "industry": "Retail"}]}"#;

    /// Serve `body` at `/db.json` on an ephemeral local port and return the base URL.
    async fn serve_dataset(body: &'static str) -> String {
        let app = Router::new().route("/db.json", get(move || async move { body }));
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}")
    }

    #[test]
    fn locator_distinguishes_urls_from_paths() {
        let url: DatasetLocator = "https://example.com/db.json".parse().unwrap();
        assert_eq!(
            url,
            DatasetLocator::Url("https://example.com/db.json".to_string())
        );

        let path: DatasetLocator = " ./db.json ".parse().unwrap();
        assert_eq!(path, DatasetLocator::File(PathBuf::from("./db.json")));
    }

    #[tokio::test]
    async fn reads_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(ACME.as_bytes()).expect("write dataset");

        let locator = DatasetLocator::File(file.path().to_path_buf());
        let dataset = fetch_dataset(&locator).await.expect("dataset loads");
        assert_eq!(dataset.companies.len(), 1);
        assert_eq!(dataset.companies[0].name, "Acme");
    }

    #[tokio::test]
    async fn missing_file_is_reported_by_fetch() {
        let locator = DatasetLocator::File(PathBuf::from("/definitely/not/here/db.json"));
        match fetch_dataset(&locator).await {
            Err(LoadError::Io { path, .. }) => assert!(path.ends_with("db.json")),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetches_dataset_over_http() {
        let base = serve_dataset(ACME).await;
        let locator = DatasetLocator::Url(format!("{base}/db.json"));

        let dataset = fetch_dataset(&locator).await.expect("dataset loads");
        assert_eq!(dataset.companies.len(), 1);
        assert_eq!(dataset.companies[0].name, "Acme");
        assert!(dataset.matches.is_empty());
    }

    #[tokio::test]
    async fn http_error_status_is_reported_and_load_falls_back() {
        let base = serve_dataset(ACME).await;
        let locator = DatasetLocator::Url(format!("{base}/missing.json"));

        match fetch_dataset(&locator).await {
            Err(LoadError::Status(status)) => assert_eq!(status, 404),
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(load_dataset(&locator).await.is_empty());
    }

    #[tokio::test]
    async fn load_falls_back_to_empty_on_parse_failure() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write garbage");

        let locator = DatasetLocator::File(file.path().to_path_buf());
        let dataset = load_dataset(&locator).await;
        assert!(dataset.is_empty());
    }
}
