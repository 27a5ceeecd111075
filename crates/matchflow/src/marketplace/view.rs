//! View controller: one explicit state value plus a reducer.
//!
//! Every UI change arrives as a [`ViewEvent`] and goes through [`ViewState::apply`]. The screen is
//! recomputed from scratch on demand with [`ViewState::screen`], composing the filters with the
//! card renderers.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::actions::{self, Action, ActionError, ActionOutcome};
use super::domain::{Candidate, Dataset, JobOffer, Match, Session};
use super::filters::{self, ALL_PROFESSIONS};
use super::loader::LoadError;
use super::render::{self, RenderContext};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Candidates,
    Offers,
    Matches,
}

impl View {
    pub const fn title(self) -> &'static str {
        match self {
            View::Candidates => "Candidates",
            View::Offers => "Job Offers",
            View::Matches => "Matches",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification shown in the corner of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub title: String,
    pub text: String,
    pub kind: ToastKind,
}

impl Toast {
    fn success(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            kind: ToastKind::Success,
        }
    }

    fn error(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            kind: ToastKind::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewEvent {
    SelectProfession { profession: String },
    ToggleAvailability,
    ToggleView,
    SelectView { view: View },
    ResetFilters,
    Dispatch { action: Action },
    Reload { dataset: Dataset },
    DismissToast,
    DismissAlert,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub matches: usize,
    pub reserved: usize,
}

/// Everything the hosting page needs to redraw itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub view: View,
    pub title: &'static str,
    pub results_count: usize,
    pub grid: String,
    pub filter_summary: String,
    pub profession_filter: String,
    pub profession_options: Vec<String>,
    pub only_available: bool,
    pub availability_label: &'static str,
    pub view_toggle_label: &'static str,
    pub stats: Stats,
    pub clock: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    dataset: Dataset,
    session: Option<Session>,
    view: View,
    profession_filter: String,
    only_available: bool,
    toast: Option<Toast>,
    alert: Option<String>,
    clock: String,
}

impl ViewState {
    pub fn new(dataset: Dataset, session: Option<Session>) -> Self {
        Self {
            dataset,
            session,
            view: View::Candidates,
            profession_filter: ALL_PROFESSIONS.to_string(),
            only_available: false,
            toast: None,
            alert: None,
            clock: "now".to_string(),
        }
    }

    /// Build the initial state from a load attempt. A failed load still yields a usable state
    /// over an empty dataset, with an error toast.
    pub fn bootstrap(loaded: Result<Dataset, LoadError>, session: Option<Session>) -> Self {
        let mut state = Self::new(Dataset::empty(), session);
        state.replace_dataset(loaded);
        state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Swap in a freshly loaded dataset, discarding every in-memory mutation.
    pub fn replace_dataset(&mut self, loaded: Result<Dataset, LoadError>) {
        match loaded {
            Ok(dataset) => {
                self.dataset = dataset;
                self.toast = Some(Toast::success("Welcome!", "Database loaded successfully"));
            }
            Err(err) => {
                warn!(error = %err, "dataset load failed; rendering empty collections");
                self.dataset = Dataset::empty();
                self.toast = Some(Toast::error("Error", "Failed to load database"));
            }
        }
    }

    pub fn apply(&mut self, event: ViewEvent, now: DateTime<Utc>) -> Option<ActionOutcome> {
        match event {
            ViewEvent::SelectProfession { profession } => {
                self.profession_filter = profession;
            }
            ViewEvent::ToggleAvailability => {
                self.only_available = !self.only_available;
            }
            ViewEvent::ToggleView => {
                self.view = match self.view {
                    View::Candidates => View::Offers,
                    View::Offers | View::Matches => View::Candidates,
                };
            }
            ViewEvent::SelectView { view } => {
                self.view = view;
            }
            ViewEvent::ResetFilters => {
                self.profession_filter = ALL_PROFESSIONS.to_string();
                self.only_available = false;
                self.view = View::Candidates;
            }
            ViewEvent::Dispatch { action } => return self.dispatch(action, now).ok(),
            ViewEvent::Reload { dataset } => self.replace_dataset(Ok(dataset)),
            ViewEvent::DismissToast => self.toast = None,
            ViewEvent::DismissAlert => self.alert = None,
        }
        None
    }

    /// Run an action against the dataset. A failed precondition becomes the blocking alert.
    pub fn dispatch(
        &mut self,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<ActionOutcome, ActionError> {
        let result = actions::dispatch(&mut self.dataset, self.session.as_ref(), action, now);
        match &result {
            Ok(_) => self.alert = None,
            Err(err) => self.alert = Some(err.to_string()),
        }
        result
    }

    pub fn refresh_clock(&mut self, now: DateTime<Local>) {
        self.clock = render::clock_label(now);
    }

    /// Candidates after the availability toggle, then the profession filter.
    pub fn visible_candidates(&self) -> Vec<Candidate> {
        let candidates = if self.only_available {
            filters::filter_by_availability(&self.dataset.candidates, true)
        } else {
            self.dataset.candidates.clone()
        };
        filters::filter_by_profession(&candidates, Some(self.profession_filter.as_str()))
    }

    pub fn visible_offers(&self) -> Vec<JobOffer> {
        self.dataset.active_offers().cloned().collect()
    }

    pub fn visible_matches(&self) -> Vec<Match> {
        match &self.session {
            Some(session) => self
                .dataset
                .matches_for_company(session.company_id)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn stats(&self) -> Stats {
        match &self.session {
            Some(session) => {
                let company = session.company_id;
                Stats {
                    matches: self.dataset.matches_for_company(company).count(),
                    reserved: self.dataset.reserved_by(company).count(),
                }
            }
            None => Stats::default(),
        }
    }

    pub fn filter_summary(&self) -> String {
        if self.profession_filter == ALL_PROFESSIONS {
            if self.only_available {
                "Available candidates".to_string()
            } else {
                "All candidates".to_string()
            }
        } else {
            self.profession_filter.clone()
        }
    }

    pub fn render_grid(&self, now: DateTime<Utc>) -> (String, usize) {
        let ctx = RenderContext::new(self.session.as_ref(), now);
        match self.view {
            View::Candidates => {
                let candidates = self.visible_candidates();
                let grid = render::render_candidate_cards(&candidates, &ctx, &self.dataset.matches);
                (grid, candidates.len())
            }
            View::Offers => {
                let offers = self.visible_offers();
                let grid = render::render_job_offer_cards(&offers, &self.dataset.companies, &ctx);
                (grid, offers.len())
            }
            View::Matches => {
                let matches = self.visible_matches();
                let grid = render::render_match_cards(&matches, &self.dataset, &ctx);
                (grid, matches.len())
            }
        }
    }

    pub fn screen(&self, now: DateTime<Utc>) -> Screen {
        let (grid, results_count) = self.render_grid(now);
        Screen {
            view: self.view,
            title: self.view.title(),
            results_count,
            grid,
            filter_summary: self.filter_summary(),
            profession_filter: self.profession_filter.clone(),
            profession_options: filters::distinct_professions(&self.dataset.candidates),
            only_available: self.only_available,
            availability_label: if self.only_available {
                "Show All"
            } else {
                "Open to Work Only"
            },
            view_toggle_label: if self.view == View::Candidates {
                "View Job Offers"
            } else {
                "View Candidates"
            },
            stats: self.stats(),
            clock: self.clock.clone(),
            session: self.session.clone(),
            toast: self.toast.clone(),
            alert: self.alert.clone(),
        }
    }
}
