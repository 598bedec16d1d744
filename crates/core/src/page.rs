/// Every page the dashboard can render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Page {
    /// `/`: KPI cards, classification bar chart, video placeholder.
    Overview,
    /// `/streams`: live feed panel and detections-over-time chart.
    LiveStream,
    /// `/trends`: population trend, history table, hotspot map, drill-down.
    Trends,
    /// Any other path; carries the path exactly as requested.
    NotFound(String),
}

impl Page {
    /// The routable pages, in navigation order.
    pub const KNOWN: [Page; 3] = [Page::Overview, Page::LiveStream, Page::Trends];

    /// Map a request path to a page.  Total: every input yields a page.
    ///
    /// Query strings and fragments are ignored, as is a single trailing `/`.
    /// Matching is case-sensitive.
    pub fn route(path: &str) -> Page {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let normalized = match trimmed.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => trimmed,
        };

        match normalized {
            "" | "/" | "/overview"      => Page::Overview,
            "/streams" | "/live"        => Page::LiveStream,
            "/trends" | "/analytics"    => Page::Trends,
            _ => Page::NotFound(path.to_string()),
        }
    }

    /// Canonical path used for navigation links.
    pub fn path(&self) -> &str {
        match self {
            Page::Overview    => "/",
            Page::LiveStream  => "/streams",
            Page::Trends      => "/trends",
            Page::NotFound(p) => p,
        }
    }

    /// Heading shown at the top of the page and in the sidebar.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview    => "Detections Overview",
            Page::LiveStream  => "Live Stream",
            Page::Trends      => "Historical Trends & Behaviour Analytics",
            Page::NotFound(_) => "Page Not Found",
        }
    }

    /// Stable machine-readable identifier.
    pub fn kind(&self) -> &'static str {
        match self {
            Page::Overview    => "overview",
            Page::LiveStream  => "streams",
            Page::Trends      => "trends",
            Page::NotFound(_) => "not_found",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Page::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_known_paths_and_aliases() {
        assert_eq!(Page::route("/"), Page::Overview);
        assert_eq!(Page::route(""), Page::Overview);
        assert_eq!(Page::route("/streams"), Page::LiveStream);
        assert_eq!(Page::route("/live/"), Page::LiveStream);
        assert_eq!(Page::route("/trends"), Page::Trends);
        assert_eq!(Page::route("/analytics?range=1h"), Page::Trends);
    }

    #[test]
    fn unknown_path_is_echoed() {
        assert_eq!(
            Page::route("/admin/../etc"),
            Page::NotFound("/admin/../etc".to_string())
        );
        assert_eq!(Page::route("/Trends"), Page::NotFound("/Trends".into()));
    }

    #[test]
    fn known_pages_round_trip_through_their_path() {
        for page in Page::KNOWN {
            assert_eq!(Page::route(page.path()), page);
        }
    }
}
