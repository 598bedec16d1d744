use crate::format::format_datetime;
use guard_core::{Page, Snapshot};
use serde::Serialize;

/// Sidebar status lines plus the connectivity error indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBlock {
    /// `"Stream: LIVE"` and friends.
    pub stream:      String,
    pub last_update: String,
    /// Present while the upstream is unreachable; values shown are last known.
    pub error:       Option<String>,
}

pub fn status(snapshot: &Snapshot) -> StatusBlock {
    let last = snapshot
        .last_updated
        .as_ref()
        .map_or_else(|| "never".to_string(), format_datetime);

    StatusBlock {
        stream:      format!("Stream: {}", snapshot.stream_status),
        last_update: format!("Last Update: {last}"),
        error:       snapshot
            .last_error
            .as_ref()
            .map(|reason| format!("Upstream unavailable: {reason}")),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub label:  String,
    pub href:   String,
    pub active: bool,
}

/// Sidebar navigation, with the current page marked active.
pub fn navigation(current: &Page) -> Vec<NavLink> {
    Page::KNOWN
        .iter()
        .map(|page| NavLink {
            label:  nav_label(page).to_string(),
            href:   page.path().to_string(),
            active: page == current,
        })
        .collect()
}

fn nav_label(page: &Page) -> &'static str {
    match page {
        Page::Overview    => "Dashboard Overview",
        Page::LiveStream  => "Live Stream",
        Page::Trends      => "Trends & Analytics",
        Page::NotFound(_) => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_indicator_follows_snapshot() {
        let mut snap = Snapshot::default();
        assert!(status(&snap).error.is_none());
        assert_eq!(status(&snap).last_update, "Last Update: never");

        snap.mark_unavailable("connection refused");
        let block = status(&snap);
        assert_eq!(block.stream, "Stream: OFFLINE");
        assert_eq!(
            block.error.as_deref(),
            Some("Upstream unavailable: connection refused")
        );
    }

    #[test]
    fn navigation_marks_active_page() {
        let links = navigation(&Page::Trends);
        assert_eq!(links.len(), 3);
        assert!(links.iter().filter(|l| l.active).all(|l| l.href == "/trends"));
        assert_eq!(links.iter().filter(|l| l.active).count(), 1);
        assert!(navigation(&Page::NotFound("/x".into())).iter().all(|l| !l.active));
    }
}
