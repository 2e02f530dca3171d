use chrono::DateTime;

/// Abbreviates a karma count the way Reddit's UI does: one decimal place
/// with a `K` suffix from 1,000 and an `M` suffix from 1,000,000.
pub fn format_karma(karma: i64) -> String {
    if karma >= 1_000_000 {
        format!("{:.1}M", karma as f64 / 1_000_000.0)
    } else if karma >= 1_000 {
        format!("{:.1}K", karma as f64 / 1_000.0)
    } else {
        karma.to_string()
    }
}

/// Renders an epoch-seconds timestamp as e.g. "March 5, 2019".
pub fn format_created(epoch_secs: i64) -> String {
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => "unknown".to_string(),
    }
}
