use chrono::{DateTime, Local, Timelike, Utc};

/// Elapsed time in the largest unit that fits: minutes under an hour, hours under a day, else
/// days. Timestamps in the future count as zero elapsed.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - then).max(chrono::Duration::zero());
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();

    if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

/// Header "updated" label: minutes since local midnight.
pub fn clock_label(now: DateTime<Local>) -> String {
    let minutes = now.num_seconds_from_midnight() / 60;
    if minutes < 1 {
        "now".to_string()
    } else {
        format!("{minutes}m ago")
    }
}
