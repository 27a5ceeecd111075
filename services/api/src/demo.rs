use crate::infra::{load_view, parse_locator, parse_view};
use chrono::Utc;
use clap::Args;
use matchflow::config::AppConfig;
use matchflow::error::AppError;
use matchflow::marketplace::{
    Action, ActionError, ActionOutcome, CandidateId, DatasetLocator, ToastKind, View, ViewEvent,
    ViewState,
};

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Which grid to print: candidates, offers or matches
    #[arg(long, value_parser = parse_view, default_value = "candidates")]
    pub(crate) view: View,
    /// Only show candidates with this exact profession
    #[arg(long)]
    pub(crate) profession: Option<String>,
    /// Only show candidates who are open to work
    #[arg(long)]
    pub(crate) available_only: bool,
    /// Dataset file path or http(s) URL (defaults to MATCHFLOW_DATASET)
    #[arg(long, value_parser = parse_locator)]
    pub(crate) dataset: Option<DatasetLocator>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Dataset file path or http(s) URL (defaults to MATCHFLOW_DATASET)
    #[arg(long, value_parser = parse_locator)]
    pub(crate) dataset: Option<DatasetLocator>,
}

pub(crate) async fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let RenderArgs {
        view,
        profession,
        available_only,
        dataset,
    } = args;

    let config = AppConfig::load()?;
    let source = dataset.unwrap_or(config.marketplace.dataset);
    let mut state = load_view(&source, config.marketplace.company_id).await;
    warn_if_unloaded(&state, &source);

    let now = Utc::now();
    state.apply(ViewEvent::SelectView { view }, now);
    if let Some(profession) = profession {
        state.apply(ViewEvent::SelectProfession { profession }, now);
    }
    if available_only {
        state.apply(ViewEvent::ToggleAvailability, now);
    }

    let (grid, count) = state.render_grid(now);
    eprintln!(
        "{} | {} result(s) | {}",
        view.title(),
        count,
        state.filter_summary()
    );
    print!("{grid}");
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let source = args.dataset.unwrap_or(config.marketplace.dataset);
    let mut state = load_view(&source, config.marketplace.company_id).await;

    println!("MatchFlow marketplace demo");
    println!("Dataset: {source}");
    warn_if_unloaded(&state, &source);
    {
        let dataset = state.dataset();
        println!(
            "- {} candidates | {} companies | {} job offers | {} matches",
            dataset.candidates.len(),
            dataset.companies.len(),
            dataset.job_offers.len(),
            dataset.matches.len()
        );
    }
    match state.session() {
        Some(session) => println!("Acting as: {} ({})", session.company_name, session.user_id),
        None => println!("Acting as: nobody (MATCHFLOW_COMPANY_ID is unset)"),
    }

    let now = Utc::now();

    println!("\nFilter by profession");
    let profession = demo_profession(&state);
    match profession {
        Some(profession) => {
            state.apply(ViewEvent::SelectProfession { profession }, now);
            let visible = state.visible_candidates();
            println!(
                "- {}: {} candidate(s)",
                state.filter_summary(),
                visible.len()
            );
            for candidate in &visible {
                let availability = if candidate.open_to_work {
                    "open to work"
                } else {
                    "not available"
                };
                println!(
                    "  - #{} {} ({})",
                    candidate.id, candidate.profession, availability
                );
            }
        }
        None => println!("- no professions in the dataset"),
    }

    let target = state
        .visible_candidates()
        .into_iter()
        .find(|candidate| candidate.open_to_work)
        .map(|candidate| candidate.id);

    match target {
        Some(candidate_id) => {
            println!("\nMatch request for candidate #{candidate_id} (sent twice)");
            for _ in 0..2 {
                let result = state.dispatch(Action::MatchRequest { candidate_id }, now);
                report(result);
            }

            println!("\nReserve candidate #{candidate_id} (toggled twice)");
            for _ in 0..2 {
                let result = state.dispatch(Action::Reserve { candidate_id }, now);
                report(result);
                print_reservation(&state, candidate_id);
            }
        }
        None => println!("\nNo open-to-work candidate for the selected profession"),
    }

    let offer = state
        .session()
        .and_then(|session| {
            state
                .dataset()
                .job_offers
                .iter()
                .find(|offer| offer.company_id == session.company_id)
        })
        .or_else(|| state.dataset().job_offers.first())
        .map(|offer| offer.id);

    match offer {
        Some(offer_id) => {
            println!("\nToggle job offer #{offer_id} (twice)");
            for _ in 0..2 {
                let result = state.dispatch(Action::ToggleStatus { offer_id }, now);
                report(result);
            }
        }
        None => println!("\nNo job offers to toggle"),
    }

    let stats = state.stats();
    println!(
        "\nCounters: {} match(es) | {} reserved",
        stats.matches, stats.reserved
    );
    if let Some(alert) = state.alert() {
        println!("Last alert: {alert}");
    }

    Ok(())
}

/// A profession the acting company is hiring for, falling back to the first one on file.
fn demo_profession(state: &ViewState) -> Option<String> {
    let dataset = state.dataset();
    state
        .session()
        .and_then(|session| {
            dataset
                .active_offers()
                .find(|offer| offer.company_id == session.company_id)
                .map(|offer| offer.profession.clone())
        })
        .or_else(|| {
            dataset
                .candidates
                .first()
                .map(|candidate| candidate.profession.clone())
        })
}

fn report(result: Result<ActionOutcome, ActionError>) {
    match result {
        Ok(ActionOutcome::MatchCreated {
            match_id,
            job_offer_id,
            ..
        }) => println!("- match #{match_id} created against offer #{job_offer_id} (pending)"),
        Ok(ActionOutcome::ReservationToggled { reserved_by, .. }) => match reserved_by {
            Some(company) => println!("- reserved by company #{company}"),
            None => println!("- reservation released"),
        },
        Ok(ActionOutcome::OfferStatusToggled {
            offer_id,
            is_active,
            ..
        }) => {
            let status = if is_active { "active" } else { "closed" };
            println!("- offer #{offer_id} is now {status}");
        }
        Ok(ActionOutcome::Acknowledged { action }) => println!("- {action} acknowledged"),
        Ok(ActionOutcome::Ignored { action }) => println!("- {action} ignored (no such record)"),
        Err(err) => println!("- blocked: {err}"),
    }
}

fn print_reservation(state: &ViewState, candidate_id: CandidateId) {
    if let Some(candidate) = state.dataset().candidate(candidate_id) {
        match candidate.reserved_by {
            Some(company) => println!("  reservedBy = {company}"),
            None => println!("  reservedBy = null"),
        }
    }
}

fn warn_if_unloaded(state: &ViewState, source: &DatasetLocator) {
    if state.toast().map(|toast| toast.kind) == Some(ToastKind::Error) {
        eprintln!("warning: failed to load dataset from {source}; showing empty collections");
    }
}
