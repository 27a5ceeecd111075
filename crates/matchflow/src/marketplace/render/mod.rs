//! Markup rendering for marketplace cards.
//!
//! Every function here is pure: records in, an HTML fragment out. Interactive controls carry a
//! `data-action` attribute plus the id attribute the action needs, which is what
//! [`crate::marketplace::actions::Action::from_control`] decodes.

mod candidate;
mod match_card;
mod offer;
mod time;

pub use candidate::{candidate_status, render_candidate_card, render_candidate_cards, skills_for};
pub use match_card::{render_match_card, render_match_cards};
pub use offer::{render_job_offer_card, render_job_offer_cards};
pub use time::{clock_label, time_ago};

use chrono::{DateTime, Utc};

use super::domain::Session;

/// Viewer context shared by all card renderers.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub session: Option<&'a Session>,
    pub now: DateTime<Utc>,
}

impl<'a> RenderContext<'a> {
    pub fn new(session: Option<&'a Session>, now: DateTime<Utc>) -> Self {
        Self { session, now }
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn icon(name: &str) -> String {
    format!(r#"<span class="material-symbols-outlined">{name}</span>"#)
}

fn empty_state(
    icon_name: &str,
    title: &str,
    text: &str,
    button_call: &str,
    button_label: &str,
) -> String {
    format!(
        r#"<article class="card-empty">
    <div class="empty-icon">{icon}</div>
    <h4 class="empty-title">{title}</h4>
    <p class="empty-text">{text}</p>
    <button class="btn-refine" onclick="{button_call}">{button_label}</button>
</article>
"#,
        icon = icon(icon_name),
    )
}
