use crate::types::CallId;
use chrono::{DateTime, Utc};

/// Builds the shareable join link: `{base}/meeting/{id}`.
pub fn join_link(base_url: &str, id: &CallId) -> String {
    format!("{}/meeting/{}", base_url.trim_end_matches('/'), id)
}

/// Human-readable start-time label shown alongside a created session.
///
/// A fixed UTC format rather than a locale formatter: the label travels with
/// the join link between participants on different machines.
pub fn format_starts_at(starts_at: DateTime<Utc>) -> String {
    starts_at.format("%B %-d, %Y %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn join_link_appends_meeting_path() {
        let id = CallId::new();
        let link = join_link("https://advising.example.edu", &id);
        assert_eq!(link, format!("https://advising.example.edu/meeting/{id}"));
    }

    #[test]
    fn join_link_tolerates_trailing_slash() {
        let id = CallId::new();
        let link = join_link("https://advising.example.edu/", &id);
        assert_eq!(link, format!("https://advising.example.edu/meeting/{id}"));
    }

    #[test]
    fn start_label_is_unambiguous() {
        let t = Utc.with_ymd_and_hms(2026, 3, 14, 15, 30, 0).unwrap();
        assert_eq!(format_starts_at(t), "March 14, 2026 15:30 UTC");
    }
}
