//! Pure candidate filters. Every function returns a fresh `Vec` in input order.

use super::domain::{Candidate, JobOffer};

/// Sentinel used by the profession selector to mean "no filter".
pub const ALL_PROFESSIONS: &str = "all";

/// Keep candidates whose profession equals `profession` exactly (no case folding).
///
/// A missing, blank or `"all"` profession returns the input unchanged.
pub fn filter_by_profession(candidates: &[Candidate], profession: Option<&str>) -> Vec<Candidate> {
    match profession {
        Some(wanted) if !wanted.is_empty() && wanted != ALL_PROFESSIONS => candidates
            .iter()
            .filter(|candidate| candidate.profession == wanted)
            .cloned()
            .collect(),
        _ => candidates.to_vec(),
    }
}

/// Keep candidates whose open-to-work flag equals `wanted`.
pub fn filter_by_availability(candidates: &[Candidate], wanted: bool) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|candidate| candidate.open_to_work == wanted)
        .cloned()
        .collect()
}

/// Open-to-work candidates whose profession matches the offer.
pub fn candidates_for_offer(candidates: &[Candidate], offer: &JobOffer) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|candidate| candidate.open_to_work && candidate.profession == offer.profession)
        .cloned()
        .collect()
}

/// Distinct professions in first-seen order, for the profession selector.
pub fn distinct_professions(candidates: &[Candidate]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for candidate in candidates {
        if !seen.iter().any(|known| known == &candidate.profession) {
            seen.push(candidate.profession.clone());
        }
    }
    seen
}
