//! User-triggered commands against the in-memory dataset.
//!
//! Controls in the rendered markup declare a `data-action` name plus an id attribute;
//! [`Action::from_control`] turns that pair into a typed [`Action`] and [`dispatch`] routes it to
//! its handler. Handlers mutate the dataset directly and report the visual change the triggering
//! control should apply.

mod dispatcher;

pub use dispatcher::dispatch;

use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CompanyId, JobOfferId, MatchId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Action {
    MatchRequest { candidate_id: CandidateId },
    Reserve { candidate_id: CandidateId },
    ViewMatch { match_id: MatchId },
    ViewCandidates { offer_id: JobOfferId },
    EditOffer { offer_id: JobOfferId },
    SaveOffer { offer_id: JobOfferId },
    ToggleStatus { offer_id: JobOfferId },
}

impl Action {
    /// Decode a control's `data-action` name and its id attribute.
    pub fn from_control(name: &str, raw_id: &str) -> Result<Self, ActionParseError> {
        let parse_id = || {
            raw_id
                .trim()
                .parse::<u64>()
                .map_err(|_| ActionParseError::InvalidId {
                    action: name.to_string(),
                    raw: raw_id.to_string(),
                })
        };

        let action = match name {
            "match-request" => Action::MatchRequest {
                candidate_id: CandidateId(parse_id()?),
            },
            "reserve" => Action::Reserve {
                candidate_id: CandidateId(parse_id()?),
            },
            "view-match" => Action::ViewMatch {
                match_id: MatchId(parse_id()?),
            },
            "view-candidates" => Action::ViewCandidates {
                offer_id: JobOfferId(parse_id()?),
            },
            "edit-offer" => Action::EditOffer {
                offer_id: JobOfferId(parse_id()?),
            },
            "save-offer" => Action::SaveOffer {
                offer_id: JobOfferId(parse_id()?),
            },
            "toggle-status" => Action::ToggleStatus {
                offer_id: JobOfferId(parse_id()?),
            },
            other => return Err(ActionParseError::UnknownAction(other.to_string())),
        };
        Ok(action)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Action::MatchRequest { .. } => "match-request",
            Action::Reserve { .. } => "reserve",
            Action::ViewMatch { .. } => "view-match",
            Action::ViewCandidates { .. } => "view-candidates",
            Action::EditOffer { .. } => "edit-offer",
            Action::SaveOffer { .. } => "save-offer",
            Action::ToggleStatus { .. } => "toggle-status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("action '{action}' needs a numeric id, got '{raw}'")]
    InvalidId { action: String, raw: String },
}

/// Precondition failures. Each one aborts the action with the dataset untouched; the message is
/// what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Please log in as a company to make match requests")]
    MatchRequiresSession,
    #[error("Please log in to reserve candidates")]
    ReserveRequiresSession,
    #[error("This candidate is not available")]
    CandidateUnavailable,
    #[error("You need an active job offer for \"{profession}\" to request a match")]
    NoActiveOffer { profession: String },
}

/// Visual update for the control that triggered an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_class: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_class: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ActionOutcome {
    MatchCreated {
        match_id: MatchId,
        job_offer_id: JobOfferId,
        patch: ControlPatch,
    },
    ReservationToggled {
        candidate_id: CandidateId,
        reserved_by: Option<CompanyId>,
        patch: ControlPatch,
    },
    OfferStatusToggled {
        offer_id: JobOfferId,
        is_active: bool,
        patch: ControlPatch,
    },
    /// Navigation and detail views that only log for now.
    Acknowledged { action: &'static str },
    /// The referenced record does not exist.
    Ignored { action: &'static str },
}

impl ActionOutcome {
    pub fn control_patch(&self) -> Option<&ControlPatch> {
        match self {
            ActionOutcome::MatchCreated { patch, .. }
            | ActionOutcome::ReservationToggled { patch, .. }
            | ActionOutcome::OfferStatusToggled { patch, .. } => Some(patch),
            ActionOutcome::Acknowledged { .. } | ActionOutcome::Ignored { .. } => None,
        }
    }

    pub fn mutated(&self) -> bool {
        self.control_patch().is_some()
    }
}
