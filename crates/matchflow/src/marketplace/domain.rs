use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a candidate record.
    CandidateId
);
record_id!(
    /// Identifier of a hiring company.
    CompanyId
);
record_id!(
    /// Identifier of a job offer.
    JobOfferId
);
record_id!(
    /// Identifier of a match between a company and a candidate.
    MatchId
);

/// A person listed on the marketplace.
///
/// Contact fields travel with the record; hiding them before a match happens at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub profession: String,
    pub open_to_work: bool,
    #[serde(default)]
    pub reserved_by: Option<CompanyId>,
    #[serde(default)]
    pub reserved_for_offer: Option<JobOfferId>,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOffer {
    pub id: JobOfferId,
    pub company_id: CompanyId,
    pub profession: String,
    pub is_active: bool,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle of a match. There is no terminal or rejected state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Contacted,
    Interview,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MatchStatus::Pending => "Match pending",
            MatchStatus::Contacted => "Contacted",
            MatchStatus::Interview => "In interview",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            MatchStatus::Pending => "status-pending",
            MatchStatus::Contacted => "status-contacted",
            MatchStatus::Interview => "status-interview",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub company_id: CompanyId,
    pub candidate_id: CandidateId,
    pub job_offer_id: JobOfferId,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// First match recorded for the candidate by the given company, in source order.
    pub fn find(matches: &[Match], candidate: CandidateId, company: CompanyId) -> Option<&Match> {
        matches
            .iter()
            .find(|entry| entry.candidate_id == candidate && entry.company_id == company)
    }
}

/// The acting company for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub company_id: CompanyId,
    pub company_name: String,
    pub user_id: String,
}

impl Session {
    pub fn for_company(company: &Company) -> Self {
        Self {
            company_id: company.id,
            company_name: company.name.clone(),
            user_id: format!("company-{}", company.id),
        }
    }
}

/// The four collections loaded from the static source.
///
/// Mutations only ever touch this value; nothing is written back to the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub job_offers: Vec<JobOffer>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
            && self.companies.is_empty()
            && self.job_offers.is_empty()
            && self.matches.is_empty()
    }

    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    pub fn company(&self, id: CompanyId) -> Option<&Company> {
        self.companies.iter().find(|company| company.id == id)
    }

    pub fn job_offer(&self, id: JobOfferId) -> Option<&JobOffer> {
        self.job_offers.iter().find(|offer| offer.id == id)
    }

    pub fn match_for(&self, candidate: CandidateId, company: CompanyId) -> Option<&Match> {
        Match::find(&self.matches, candidate, company)
    }

    pub fn matches_for_company(&self, company: CompanyId) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .filter(move |entry| entry.company_id == company)
    }

    pub fn reserved_by(&self, company: CompanyId) -> impl Iterator<Item = &Candidate> {
        self.candidates
            .iter()
            .filter(move |candidate| candidate.reserved_by == Some(company))
    }

    pub fn active_offers(&self) -> impl Iterator<Item = &JobOffer> {
        self.job_offers.iter().filter(|offer| offer.is_active)
    }

    /// Session for the given company, named after its record when the dataset has one.
    pub fn session_for(&self, company_id: CompanyId) -> Session {
        match self.company(company_id) {
            Some(company) => Session::for_company(company),
            None => Session {
                company_id,
                company_name: format!("Company {company_id}"),
                user_id: format!("company-{company_id}"),
            },
        }
    }

    /// Ids are assigned as `len + 1`, which only holds up with a single writer.
    pub fn next_match_id(&self) -> MatchId {
        MatchId(self.matches.len() as u64 + 1)
    }
}
