//! Recruiting marketplace: dataset model, filters, card rendering, user actions and the view
//! controller that ties them together.

pub mod accounts;
pub mod actions;
pub mod domain;
pub mod filters;
pub mod loader;
pub mod render;
pub mod view;

pub use accounts::{AccountDirectory, AccountError, UserAccount};
pub use actions::{dispatch, Action, ActionError, ActionOutcome, ActionParseError, ControlPatch};
pub use domain::{
    Candidate, CandidateId, Company, CompanyId, Dataset, JobOffer, JobOfferId, Match, MatchId,
    MatchStatus, Session,
};
pub use filters::{filter_by_availability, filter_by_profession};
pub use loader::{fetch_dataset, load_dataset, DatasetLocator, LoadError};
pub use view::{Screen, Stats, Toast, ToastKind, View, ViewEvent, ViewState};
