use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{Action, ActionError, ActionOutcome, ControlPatch};
use crate::marketplace::domain::{CandidateId, Dataset, JobOfferId, Match, MatchStatus, Session};

/// Route an action to its handler. Nothing here is transactional: a handler either fails a
/// precondition and leaves the dataset alone, or applies its single mutation.
pub fn dispatch(
    dataset: &mut Dataset,
    session: Option<&Session>,
    action: Action,
    now: DateTime<Utc>,
) -> Result<ActionOutcome, ActionError> {
    match action {
        Action::MatchRequest { candidate_id } => request_match(dataset, session, candidate_id, now),
        Action::Reserve { candidate_id } => toggle_reservation(dataset, session, candidate_id),
        Action::ToggleStatus { offer_id } => Ok(toggle_offer_status(dataset, offer_id)),
        Action::ViewMatch { match_id } => {
            debug!(%match_id, "view match requested");
            Ok(ActionOutcome::Acknowledged {
                action: action.name(),
            })
        }
        Action::ViewCandidates { offer_id }
        | Action::EditOffer { offer_id }
        | Action::SaveOffer { offer_id } => {
            debug!(action = action.name(), %offer_id, "offer action requested");
            Ok(ActionOutcome::Acknowledged {
                action: action.name(),
            })
        }
    }
}

/// Duplicate requests for the same candidate are not blocked; each one appends a new match.
fn request_match(
    dataset: &mut Dataset,
    session: Option<&Session>,
    candidate_id: CandidateId,
    now: DateTime<Utc>,
) -> Result<ActionOutcome, ActionError> {
    let session = session.ok_or(ActionError::MatchRequiresSession)?;

    let candidate = dataset
        .candidate(candidate_id)
        .filter(|candidate| candidate.open_to_work)
        .ok_or(ActionError::CandidateUnavailable)?;

    let offer = dataset
        .job_offers
        .iter()
        .find(|offer| {
            offer.company_id == session.company_id
                && offer.is_active
                && offer.profession == candidate.profession
        })
        .ok_or_else(|| ActionError::NoActiveOffer {
            profession: candidate.profession.clone(),
        })?;

    let created = Match {
        id: dataset.next_match_id(),
        company_id: session.company_id,
        candidate_id,
        job_offer_id: offer.id,
        status: MatchStatus::Pending,
        created_at: now,
    };
    let match_id = created.id;
    let job_offer_id = created.job_offer_id;
    dataset.matches.push(created);

    info!(
        %match_id,
        %candidate_id,
        %job_offer_id,
        company_id = %session.company_id,
        "match created"
    );

    Ok(ActionOutcome::MatchCreated {
        match_id,
        job_offer_id,
        patch: ControlPatch {
            label: Some("Request Sent"),
            disabled: Some(true),
            add_class: Some("btn-success"),
            ..ControlPatch::default()
        },
    })
}

/// Flip the reservation. A candidate held by another company is taken over without warning.
fn toggle_reservation(
    dataset: &mut Dataset,
    session: Option<&Session>,
    candidate_id: CandidateId,
) -> Result<ActionOutcome, ActionError> {
    let session = session.ok_or(ActionError::ReserveRequiresSession)?;

    let Some(candidate) = dataset
        .candidates
        .iter_mut()
        .find(|candidate| candidate.id == candidate_id)
    else {
        debug!(%candidate_id, "reserve ignored for unknown candidate");
        return Ok(ActionOutcome::Ignored { action: "reserve" });
    };

    let patch = if candidate.reserved_by == Some(session.company_id) {
        candidate.reserved_by = None;
        candidate.reserved_for_offer = None;
        ControlPatch {
            icon: Some("bookmark_border"),
            remove_class: Some("bookmarked"),
            ..ControlPatch::default()
        }
    } else {
        candidate.reserved_by = Some(session.company_id);
        ControlPatch {
            icon: Some("bookmark"),
            add_class: Some("bookmarked"),
            ..ControlPatch::default()
        }
    };

    info!(%candidate_id, reserved_by = ?candidate.reserved_by, "candidate reservation toggled");

    Ok(ActionOutcome::ReservationToggled {
        candidate_id,
        reserved_by: candidate.reserved_by,
        patch,
    })
}

fn toggle_offer_status(dataset: &mut Dataset, offer_id: JobOfferId) -> ActionOutcome {
    let Some(offer) = dataset
        .job_offers
        .iter_mut()
        .find(|offer| offer.id == offer_id)
    else {
        debug!(%offer_id, "status toggle ignored for unknown offer");
        return ActionOutcome::Ignored {
            action: "toggle-status",
        };
    };

    offer.is_active = !offer.is_active;
    info!(%offer_id, is_active = offer.is_active, "offer status toggled");

    ActionOutcome::OfferStatusToggled {
        offer_id,
        is_active: offer.is_active,
        patch: ControlPatch {
            icon: Some(if offer.is_active { "pause" } else { "play_arrow" }),
            ..ControlPatch::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::domain::{Candidate, Company, CompanyId, JobOffer, MatchId};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset {
            candidates: vec![
                Candidate {
                    id: CandidateId(1),
                    name: "Andrés".to_string(),
                    email: "andres@example.com".to_string(),
                    phone: "1".to_string(),
                    profession: "Backend".to_string(),
                    open_to_work: true,
                    reserved_by: None,
                    reserved_for_offer: None,
                    bio: String::new(),
                },
                Candidate {
                    id: CandidateId(2),
                    name: "Sofía".to_string(),
                    email: "sofia@example.com".to_string(),
                    phone: "2".to_string(),
                    profession: "Backend".to_string(),
                    open_to_work: false,
                    reserved_by: None,
                    reserved_for_offer: None,
                    bio: String::new(),
                },
            ],
            companies: vec![Company {
                id: CompanyId(1),
                name: "TechCorp Solutions".to_string(),
                industry: "Software".to_string(),
            }],
            job_offers: vec![
                JobOffer {
                    id: JobOfferId(5),
                    company_id: CompanyId(1),
                    profession: "Backend".to_string(),
                    is_active: false,
                    title: "Paused".to_string(),
                    description: String::new(),
                    created_at: now(),
                },
                JobOffer {
                    id: JobOfferId(6),
                    company_id: CompanyId(1),
                    profession: "Backend".to_string(),
                    is_active: true,
                    title: "Live".to_string(),
                    description: String::new(),
                    created_at: now(),
                },
            ],
            matches: Vec::new(),
        }
    }

    fn session() -> Session {
        Session {
            company_id: CompanyId(1),
            company_name: "TechCorp Solutions".to_string(),
            user_id: "company-1".to_string(),
        }
    }

    #[test]
    fn match_request_uses_first_active_offer() {
        let mut data = dataset();
        let outcome = dispatch(
            &mut data,
            Some(&session()),
            Action::MatchRequest {
                candidate_id: CandidateId(1),
            },
            now(),
        )
        .expect("match created");

        match outcome {
            ActionOutcome::MatchCreated {
                match_id,
                job_offer_id,
                ref patch,
            } => {
                assert_eq!(match_id, MatchId(1));
                assert_eq!(job_offer_id, JobOfferId(6));
                assert_eq!(patch.label, Some("Request Sent"));
                assert_eq!(patch.disabled, Some(true));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(data.matches[0].status, MatchStatus::Pending);
        assert_eq!(data.matches[0].created_at, now());
    }

    #[test]
    fn match_request_requires_session() {
        let mut data = dataset();
        let err = dispatch(
            &mut data,
            None,
            Action::MatchRequest {
                candidate_id: CandidateId(1),
            },
            now(),
        )
        .unwrap_err();
        assert_eq!(err, ActionError::MatchRequiresSession);
        assert!(data.matches.is_empty());
    }

    #[test]
    fn unavailable_or_unknown_candidates_are_rejected() {
        let mut data = dataset();
        for id in [2, 42] {
            let err = dispatch(
                &mut data,
                Some(&session()),
                Action::MatchRequest {
                    candidate_id: CandidateId(id),
                },
                now(),
            )
            .unwrap_err();
            assert_eq!(err, ActionError::CandidateUnavailable);
        }
        assert!(data.matches.is_empty());
    }

    #[test]
    fn reserve_requires_session_and_ignores_unknown_candidates() {
        let mut data = dataset();
        let err = dispatch(
            &mut data,
            None,
            Action::Reserve {
                candidate_id: CandidateId(1),
            },
            now(),
        )
        .unwrap_err();
        assert_eq!(err, ActionError::ReserveRequiresSession);

        let outcome = dispatch(
            &mut data,
            Some(&session()),
            Action::Reserve {
                candidate_id: CandidateId(77),
            },
            now(),
        )
        .expect("ignored");
        assert_eq!(outcome, ActionOutcome::Ignored { action: "reserve" });
        assert!(!outcome.mutated());
    }

    #[test]
    fn unreserving_clears_offer_reference() {
        let mut data = dataset();
        data.candidates[0].reserved_by = Some(CompanyId(1));
        data.candidates[0].reserved_for_offer = Some(JobOfferId(6));

        let outcome = dispatch(
            &mut data,
            Some(&session()),
            Action::Reserve {
                candidate_id: CandidateId(1),
            },
            now(),
        )
        .expect("toggled");

        assert_eq!(data.candidates[0].reserved_by, None);
        assert_eq!(data.candidates[0].reserved_for_offer, None);
        let patch = outcome.control_patch().expect("patch present");
        assert_eq!(patch.icon, Some("bookmark_border"));
        assert_eq!(patch.remove_class, Some("bookmarked"));
    }

    #[test]
    fn placeholder_actions_leave_dataset_untouched() {
        let mut data = dataset();
        let before = data.clone();
        let actions = [
            Action::ViewMatch {
                match_id: MatchId(1),
            },
            Action::ViewCandidates {
                offer_id: JobOfferId(6),
            },
            Action::EditOffer {
                offer_id: JobOfferId(6),
            },
            Action::SaveOffer {
                offer_id: JobOfferId(6),
            },
        ];
        for action in actions {
            let outcome = dispatch(&mut data, None, action, now()).expect("acknowledged");
            let expected = ActionOutcome::Acknowledged {
                action: action.name(),
            };
            assert_eq!(outcome, expected);
        }
        assert_eq!(data, before);
    }

    #[test]
    fn toggling_unknown_offer_is_ignored() {
        let mut data = dataset();
        let outcome = dispatch(
            &mut data,
            None,
            Action::ToggleStatus {
                offer_id: JobOfferId(404),
            },
            now(),
        )
        .expect("ignored");
        assert!(!outcome.mutated());
    }
}
