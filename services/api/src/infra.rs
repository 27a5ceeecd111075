use chrono::Local;
use matchflow::config::MarketplaceConfig;
use matchflow::marketplace::{
    fetch_dataset, AccountDirectory, CompanyId, Dataset, DatasetLocator, LoadError, View,
    ViewState,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

const CLOCK_REFRESH: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared handle to the single logical user's view and the demo account directory.
#[derive(Clone)]
pub(crate) struct Marketplace {
    view: Arc<Mutex<ViewState>>,
    accounts: Arc<Mutex<AccountDirectory>>,
    source: DatasetLocator,
}

impl Marketplace {
    pub(crate) fn new(state: ViewState, source: DatasetLocator) -> Self {
        Self {
            view: Arc::new(Mutex::new(state)),
            accounts: Arc::new(Mutex::new(AccountDirectory::new())),
            source,
        }
    }

    /// Fetch the configured dataset and build the initial view. A failed fetch still yields a
    /// running marketplace over empty collections.
    pub(crate) async fn bootstrap(config: &MarketplaceConfig) -> Self {
        let state = load_view(&config.dataset, config.company_id).await;
        Self::new(state, config.dataset.clone())
    }

    pub(crate) fn source(&self) -> &DatasetLocator {
        &self.source
    }

    pub(crate) fn view(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn accounts(&self) -> MutexGuard<'_, AccountDirectory> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Keep the header clock label current while the server runs.
    pub(crate) fn spawn_clock(&self) -> JoinHandle<()> {
        let marketplace = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(CLOCK_REFRESH);
            loop {
                ticker.tick().await;
                marketplace.view().refresh_clock(Local::now());
                debug!("clock label refreshed");
            }
        })
    }
}

pub(crate) async fn load_view(source: &DatasetLocator, company: Option<CompanyId>) -> ViewState {
    let loaded = fetch_dataset(source).await;
    let session = company.map(|id| session_dataset(&loaded).session_for(id));
    let mut state = ViewState::bootstrap(loaded, session);
    state.refresh_clock(Local::now());
    state
}

fn session_dataset(loaded: &Result<Dataset, LoadError>) -> std::borrow::Cow<'_, Dataset> {
    match loaded {
        Ok(dataset) => std::borrow::Cow::Borrowed(dataset),
        Err(_) => std::borrow::Cow::Owned(Dataset::empty()),
    }
}

pub(crate) fn parse_locator(raw: &str) -> Result<DatasetLocator, String> {
    if raw.trim().is_empty() {
        return Err("dataset location must not be empty".to_string());
    }
    match raw.parse::<DatasetLocator>() {
        Ok(locator) => Ok(locator),
        Err(never) => match never {},
    }
}

pub(crate) fn parse_view(raw: &str) -> Result<View, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "candidates" => Ok(View::Candidates),
        "offers" | "job-offers" => Ok(View::Offers),
        "matches" => Ok(View::Matches),
        other => Err(format!(
            "unknown view '{other}' (expected candidates, offers or matches)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_parse_case_insensitively() {
        assert_eq!(parse_view("Offers"), Ok(View::Offers));
        assert_eq!(parse_view(" matches "), Ok(View::Matches));
        assert!(parse_view("timeline").is_err());
    }

    #[test]
    fn locators_distinguish_urls_from_paths() {
        assert_eq!(
            parse_locator("https://example.com/db.json"),
            Ok(DatasetLocator::Url("https://example.com/db.json".to_string()))
        );
        assert!(matches!(parse_locator("./db.json"), Ok(DatasetLocator::File(_))));
        assert!(parse_locator("  ").is_err());
    }

    #[tokio::test]
    async fn missing_dataset_still_builds_a_session() {
        let source: DatasetLocator = "/nonexistent/matchflow-db.json"
            .parse()
            .unwrap_or_else(|never| match never {});
        let state = load_view(&source, Some(CompanyId(7))).await;

        assert!(state.dataset().is_empty());
        let session = state.session().expect("session kept");
        assert_eq!(session.company_name, "Company 7");
    }
}
