use crate::format::format_datetime;
use guard_core::{MediaSources, Snapshot};
use serde::Serialize;

/// Live video panel.  The dashboard never fetches these URLs itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaPanel {
    pub title:       String,
    pub mjpeg:       Option<String>,
    pub hls:         Option<String>,
    /// Text shown instead of video when no real feed exists.
    pub placeholder: Option<String>,
    /// Small overlay badge, e.g. `"Tracking LIVE"`.
    pub badge:       String,
}

pub fn video_feed(media: &MediaSources, snapshot: &Snapshot) -> MediaPanel {
    let placeholder = media.is_simulated().then(|| {
        let at = snapshot
            .last_updated
            .as_ref()
            .map_or_else(|| "waiting for first sample".to_string(), format_datetime);
        format!("Live Video Feed (simulated @ {at})")
    });

    MediaPanel {
        title: if media.is_simulated() {
            "Live Video Feed (Placeholder)".to_string()
        } else {
            "Live Video Feed".to_string()
        },
        mjpeg: media.mjpeg.clone(),
        hls: media.hls.clone(),
        placeholder,
        badge: format!("Tracking {}", snapshot.stream_status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_feed_has_placeholder() {
        let panel = video_feed(&MediaSources::default(), &Snapshot::default());
        assert!(panel.mjpeg.is_none());
        assert_eq!(
            panel.placeholder.as_deref(),
            Some("Live Video Feed (simulated @ waiting for first sample)")
        );
        assert_eq!(panel.badge, "Tracking Connecting...");
    }

    #[test]
    fn real_feed_embeds_urls() {
        let panel = video_feed(&MediaSources::under("http://cam:8080"), &Snapshot::default());
        assert_eq!(panel.hls.as_deref(), Some("http://cam:8080/hls.m3u8"));
        assert!(panel.placeholder.is_none());
    }
}
