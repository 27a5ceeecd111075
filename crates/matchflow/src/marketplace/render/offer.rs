use chrono::{DateTime, Utc};

use super::{empty_state, escape_html, icon, time_ago, RenderContext};
use crate::marketplace::domain::{Company, JobOffer};

const UNKNOWN_COMPANY: &str = "Unknown company";

/// Render one job offer. Edit and pause/resume controls only appear for the owner.
pub fn render_job_offer_card(
    offer: &JobOffer,
    company: Option<&Company>,
    is_owner: bool,
    now: DateTime<Utc>,
) -> String {
    let (status_class, pulse, status_label) = if offer.is_active {
        ("status-active", "pulse-dot", "Active")
    } else {
        ("status-inactive", "pulse-dot-static", "Closed")
    };
    let age = time_ago(offer.created_at, now);

    let owner_controls = if is_owner {
        let toggle_icon = if offer.is_active { "pause" } else { "play_arrow" };
        format!(
            r#"<div class="offer-actions">
                    <button class="idea-action-btn" data-action="edit-offer" data-offer-id="{id}">{edit}</button>
                    <button class="idea-action-btn" data-action="toggle-status" data-offer-id="{id}">{toggle}</button>
                </div>"#,
            id = offer.id,
            edit = icon("edit"),
            toggle = icon(toggle_icon),
        )
    } else {
        String::new()
    };

    let company_name = company.map_or(UNKNOWN_COMPANY, |company| company.name.as_str());
    let mut tags = format!(r#"<span class="tag">{}</span>"#, escape_html(&offer.profession));
    if let Some(company) = company {
        tags.push_str(&format!(
            r#"<span class="tag">{}</span>"#,
            escape_html(&company.industry)
        ));
    }

    format!(
        r#"<article class="card job-offer-card" data-offer-id="{id}" data-company-id="{company_id}">
    <div class="card-body">
        <div class="card-header">
            <div class="company-logo">{logo}</div>
            <div class="card-meta">
                <span class="{status_class}"><span class="{pulse}"></span>{status_label}</span>
                <span class="time-ago">{schedule}{age}</span>
                {owner_controls}
            </div>
        </div>
        <div class="card-info">
            <h4 class="card-title">{title}</h4>
            <p class="card-location">{logo}{company_name}</p>
        </div>
        <div class="tags">{tags}</div>
        <div class="offer-description"><p>{description}</p></div>
    </div>
    <div class="card-footer">
        <button class="btn-match" data-action="view-candidates" data-offer-id="{id}">{group}View Candidates</button>
        <button class="btn-bookmark" data-action="save-offer" data-offer-id="{id}">{bookmark}</button>
    </div>
</article>
"#,
        id = offer.id,
        company_id = offer.company_id,
        logo = icon("business"),
        schedule = icon("schedule"),
        title = escape_html(&offer.title),
        company_name = escape_html(company_name),
        description = escape_html(&offer.description),
        group = icon("group"),
        bookmark = icon("bookmark"),
    )
}

/// Cards in input order, or the "No Job Offers" placeholder for an empty list.
pub fn render_job_offer_cards(
    offers: &[JobOffer],
    companies: &[Company],
    ctx: &RenderContext<'_>,
) -> String {
    if offers.is_empty() {
        return empty_state(
            "work",
            "No Job Offers",
            "Create your first job posting to start finding candidates.",
            "createNewOffer()",
            "Create Job Offer",
        );
    }

    offers
        .iter()
        .map(|offer| {
            let company = companies
                .iter()
                .find(|company| company.id == offer.company_id);
            let is_owner = ctx
                .session
                .is_some_and(|session| session.company_id == offer.company_id);
            render_job_offer_card(offer, company, is_owner, ctx.now)
        })
        .collect()
}
