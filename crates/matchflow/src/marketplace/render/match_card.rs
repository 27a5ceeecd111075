use super::{empty_state, escape_html, icon, time_ago, RenderContext};
use crate::marketplace::domain::{Dataset, Match};

pub fn render_match_card(entry: &Match, dataset: &Dataset, ctx: &RenderContext<'_>) -> String {
    let profession = dataset
        .candidate(entry.candidate_id)
        .map_or("Unknown candidate", |candidate| candidate.profession.as_str());
    let offer_title = dataset
        .job_offer(entry.job_offer_id)
        .map_or("Unknown offer", |offer| offer.title.as_str());

    format!(
        r#"<article class="card match-card" data-match-id="{id}" data-candidate-id="{candidate_id}">
    <div class="card-body">
        <div class="card-meta">
            <span class="{status_class}">{status_label}</span>
            <span class="time-ago">{schedule}{age}</span>
        </div>
        <div class="card-info">
            <h4 class="card-title">{profession}</h4>
            <p class="card-location">{work}{offer_title}</p>
        </div>
    </div>
    <div class="card-footer">
        <button class="btn-view-match" data-action="view-match" data-match-id="{id}">{visibility}View Match Details</button>
    </div>
</article>
"#,
        id = entry.id,
        candidate_id = entry.candidate_id,
        status_class = entry.status.css_class(),
        status_label = entry.status.label(),
        schedule = icon("schedule"),
        age = time_ago(entry.created_at, ctx.now),
        profession = escape_html(profession),
        work = icon("work"),
        offer_title = escape_html(offer_title),
        visibility = icon("visibility"),
    )
}

/// Matches in input order, or the "No Matches Yet" placeholder.
pub fn render_match_cards(matches: &[Match], dataset: &Dataset, ctx: &RenderContext<'_>) -> String {
    if matches.is_empty() {
        return empty_state(
            "handshake",
            "No Matches Yet",
            "Send a match request to an open-to-work candidate to get started.",
            "resetFilters()",
            "Browse Candidates",
        );
    }

    matches
        .iter()
        .map(|entry| render_match_card(entry, dataset, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::domain::{CandidateId, CompanyId, JobOfferId, MatchId, MatchStatus};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn match_card_shows_status_and_missing_references() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let entry = Match {
            id: MatchId(3),
            company_id: CompanyId(1),
            candidate_id: CandidateId(99),
            job_offer_id: JobOfferId(99),
            status: MatchStatus::Contacted,
            created_at: now - Duration::days(2),
        };
        let ctx = RenderContext::new(None, now);
        let html = render_match_card(&entry, &Dataset::empty(), &ctx);

        assert!(html.contains("Contacted"));
        assert!(html.contains("2d ago"));
        assert!(html.contains("Unknown candidate"));
        assert!(html.contains("Unknown offer"));
    }

    #[test]
    fn empty_matches_render_placeholder() {
        let ctx = RenderContext::new(None, Utc::now());
        let html = render_match_cards(&[], &Dataset::empty(), &ctx);
        assert!(html.contains("No Matches Yet"));
    }
}
