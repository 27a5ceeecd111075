use super::{empty_state, escape_html, icon, time_ago, RenderContext};
use crate::marketplace::domain::{Candidate, Match};

/// Location line shown on every candidate card; the dataset carries no location field.
const CANDIDATE_LOCATION: &str = "Bogotá, Colombia";

const GENERIC_SKILLS: &[&str] = &["Professional", "Experienced"];

/// Illustrative skill tags for the professions the marketplace knows about.
pub fn skills_for(profession: &str) -> &'static [&'static str] {
    match profession {
        "Desarrollador Frontend" => &["React", "Vue", "JavaScript", "CSS"],
        "Desarrollador Backend" => &["Node.js", "Python", "API", "SQL"],
        "Desarrollador Full Stack" => &["React", "Node.js", "MongoDB", "Express"],
        "Diseñador UX/UI" => &["Figma", "Sketch", "Research", "Prototyping"],
        "Data Analyst" => &["SQL", "Python", "Power BI", "Excel"],
        _ => GENERIC_SKILLS,
    }
}

/// Status label and CSS class; an existing match outranks the availability flag.
pub fn candidate_status(
    candidate: &Candidate,
    existing: Option<&Match>,
) -> (&'static str, &'static str) {
    match existing {
        Some(entry) => (entry.status.label(), entry.status.css_class()),
        None if candidate.open_to_work => ("Open to work", "status-open"),
        None => ("Not available", "status-unavailable"),
    }
}

pub fn render_candidate_card(
    candidate: &Candidate,
    ctx: &RenderContext<'_>,
    matches: &[Match],
) -> String {
    let company_id = ctx.session.map(|session| session.company_id);
    let existing = company_id.and_then(|company| Match::find(matches, candidate.id, company));
    let reserved_by_viewer = company_id.is_some() && candidate.reserved_by == company_id;

    let (status_label, status_class) = candidate_status(candidate, existing);
    let pulse = if candidate.open_to_work && existing.is_none() {
        "pulse-dot"
    } else {
        "pulse-dot-static"
    };
    // Candidates carry no creation timestamp, so the card is stamped with the render instant.
    let age = time_ago(ctx.now, ctx.now);

    let tags: String = skills_for(&candidate.profession)
        .iter()
        .map(|skill| format!(r#"<span class="tag">{}</span>"#, escape_html(skill)))
        .collect();

    let details = match existing {
        Some(_) => format!(
            r#"<div class="candidate-contact-info">
            <div class="contact-item">{}<span>{}</span></div>
            <div class="contact-item">{}<span>{}</span></div>
            <div class="contact-item">{}<span>{}</span></div>
        </div>"#,
            icon("person"),
            escape_html(&candidate.name),
            icon("email"),
            escape_html(&candidate.email),
            icon("phone"),
            escape_html(&candidate.phone),
        ),
        None => format!(
            r#"<div class="card-privacy">{}Profile details hidden until match request</div>"#,
            icon("lock")
        ),
    };

    let footer = match existing {
        Some(entry) => format!(
            r#"<button class="btn-view-match" data-action="view-match" data-match-id="{}">{}View Match Details</button>"#,
            entry.id,
            icon("visibility")
        ),
        None => {
            let disabled = if candidate.open_to_work {
                ""
            } else {
                " disabled"
            };
            let (bookmark_class, bookmark_icon) = if reserved_by_viewer {
                ("btn-bookmark bookmarked", "bookmark")
            } else {
                ("btn-bookmark", "bookmark_border")
            };
            format!(
                r#"<button class="btn-match" data-action="match-request" data-candidate-id="{id}"{disabled}>{verified}Match Request</button>
            <button class="{bookmark_class}" data-action="reserve" data-candidate-id="{id}">{bookmark}</button>"#,
                id = candidate.id,
                verified = icon("verified"),
                bookmark = icon(bookmark_icon),
            )
        }
    };

    format!(
        r#"<article class="card candidate-card" data-candidate-id="{id}" data-profession="{profession}">
    <div class="card-body">
        <div class="card-header">
            <div class="avatar-placeholder">{avatar}</div>
            <div class="card-meta">
                <span class="{status_class}"><span class="{pulse}"></span>{status_label}</span>
                <span class="time-ago">{schedule}{age}</span>
            </div>
        </div>
        <div class="card-info">
            <h4 class="card-title">{profession}</h4>
            <p class="card-location">{pin}{location}</p>
        </div>
        <div class="tags">{tags}</div>
        <div class="candidate-bio"><p>{bio}</p></div>
        {details}
    </div>
    <div class="card-footer">
        {footer}
    </div>
</article>
"#,
        id = candidate.id,
        profession = escape_html(&candidate.profession),
        avatar = icon("person"),
        status_label = escape_html(status_label),
        schedule = icon("schedule"),
        pin = icon("location_on"),
        location = CANDIDATE_LOCATION,
        bio = escape_html(&candidate.bio),
    )
}

/// Cards in input order, or the "No Candidates Found" placeholder for an empty list.
pub fn render_candidate_cards(
    candidates: &[Candidate],
    ctx: &RenderContext<'_>,
    matches: &[Match],
) -> String {
    if candidates.is_empty() {
        return empty_state(
            "person_search",
            "No Candidates Found",
            "Try adjusting your search filters or create a new job posting.",
            "resetFilters()",
            "Reset Filters",
        );
    }

    candidates
        .iter()
        .map(|candidate| render_candidate_card(candidate, ctx, matches))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::domain::{
        CandidateId, CompanyId, JobOfferId, MatchId, MatchStatus, Session,
    };
    use chrono::{TimeZone, Utc};

    fn session() -> Session {
        Session {
            company_id: CompanyId(1),
            company_name: "TechCorp Solutions".to_string(),
            user_id: "company-1".to_string(),
        }
    }

    fn candidate(open_to_work: bool) -> Candidate {
        Candidate {
            id: CandidateId(9),
            name: "Laura Gómez".to_string(),
            email: "laura@example.com".to_string(),
            phone: "+57 300 000 0000".to_string(),
            profession: "Data Analyst".to_string(),
            open_to_work,
            reserved_by: None,
            reserved_for_offer: None,
            bio: "Builds <dashboards>".to_string(),
        }
    }

    fn matched(status: MatchStatus, company: u64) -> Match {
        Match {
            id: MatchId(4),
            company_id: CompanyId(company),
            candidate_id: CandidateId(9),
            job_offer_id: JobOfferId(2),
            status,
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 8, 0, 0).unwrap(),
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 3, 8, 0, 0).unwrap()
    }

    #[test]
    fn unmatched_open_candidate_hides_contact_details() {
        let viewer = session();
        let ctx = RenderContext::new(Some(&viewer), now());
        let html = render_candidate_card(&candidate(true), &ctx, &[]);

        assert!(html.contains("Open to work"));
        assert!(html.contains("status-open"));
        assert!(html.contains(r#"<span class="pulse-dot"></span>"#));
        assert!(html.contains("Profile details hidden until match request"));
        assert!(!html.contains("laura@example.com"));
        assert!(!html.contains("Laura Gómez"));
        assert!(html.contains(r#"data-action="match-request" data-candidate-id="9">"#));
        assert!(html.contains("bookmark_border"));
    }

    #[test]
    fn interview_match_reveals_contact_details() {
        let viewer = session();
        let ctx = RenderContext::new(Some(&viewer), now());
        let matches = vec![matched(MatchStatus::Interview, 1)];
        let html = render_candidate_card(&candidate(true), &ctx, &matches);

        assert!(html.contains("In interview"));
        assert!(html.contains("status-interview"));
        assert!(html.contains("laura@example.com"));
        assert!(html.contains("+57 300 000 0000"));
        assert!(!html.contains("Profile details hidden"));
        assert!(html.contains(r#"data-action="view-match" data-match-id="4""#));
        assert!(!html.contains("match-request"));
    }

    #[test]
    fn matches_by_other_companies_are_ignored() {
        let viewer = session();
        let ctx = RenderContext::new(Some(&viewer), now());
        let matches = vec![matched(MatchStatus::Contacted, 2)];
        let html = render_candidate_card(&candidate(true), &ctx, &matches);

        assert!(html.contains("Open to work"));
        assert!(!html.contains("laura@example.com"));
    }

    #[test]
    fn match_without_session_is_not_applied() {
        let ctx = RenderContext::new(None, now());
        let matches = vec![matched(MatchStatus::Pending, 1)];
        let html = render_candidate_card(&candidate(false), &ctx, &matches);

        assert!(html.contains("Not available"));
        assert!(html.contains(r#"data-candidate-id="9" disabled>"#));
        assert!(html.contains("pulse-dot-static"));
    }

    #[test]
    fn reserved_by_viewer_draws_filled_bookmark() {
        let viewer = session();
        let ctx = RenderContext::new(Some(&viewer), now());
        let mut reserved = candidate(true);
        reserved.reserved_by = Some(CompanyId(1));
        let html = render_candidate_card(&reserved, &ctx, &[]);

        assert!(html.contains(r#"class="btn-bookmark bookmarked""#));
        assert!(html.contains(">bookmark</span>"));
    }

    #[test]
    fn candidate_card_is_stamped_with_render_instant() {
        let ctx = RenderContext::new(None, now());
        let html = render_candidate_card(&candidate(true), &ctx, &[]);
        assert!(html.contains("0m ago"));
    }

    #[test]
    fn text_fields_are_escaped() {
        let ctx = RenderContext::new(None, now());
        let html = render_candidate_card(&candidate(true), &ctx, &[]);
        assert!(html.contains("Builds &lt;dashboards&gt;"));
    }

    #[test]
    fn known_and_unknown_professions_map_to_skills() {
        assert_eq!(skills_for("Data Analyst"), &["SQL", "Python", "Power BI", "Excel"]);
        assert_eq!(skills_for("Chef"), &["Professional", "Experienced"]);
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let ctx = RenderContext::new(None, now());
        let html = render_candidate_cards(&[], &ctx, &[]);
        assert!(html.contains("No Candidates Found"));
        assert!(html.contains("Reset Filters"));
    }

    #[test]
    fn cards_follow_input_order() {
        let ctx = RenderContext::new(None, now());
        let mut second = candidate(true);
        second.id = CandidateId(2);
        let html = render_candidate_cards(&[candidate(true), second], &ctx, &[]);

        let first_at = html.find(r#"data-candidate-id="9""#).expect("first card");
        let second_at = html.find(r#"data-candidate-id="2""#).expect("second card");
        assert!(first_at < second_at);
    }
}
