use std::collections::BTreeMap;

/// One observation of a tracked individual.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Wall-clock label, `HH:MM:SS`.
    pub time: String,
    /// Horizontal pixel position in the camera frame.
    pub x: u32,
    /// Vertical pixel position in the camera frame.
    pub y: u32,
    /// Behaviour label, e.g. `"Grazing"`.
    pub activity: String,
}

impl TrackPoint {
    pub fn new(time: &str, x: u32, y: u32, activity: &str) -> Self {
        Self {
            time: time.to_string(),
            x,
            y,
            activity: activity.to_string(),
        }
    }
}

/// Movement history per tracked individual, keyed by entity id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingLog {
    tracks: BTreeMap<String, Vec<TrackPoint>>,
}

impl TrackingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demonstration log shown until a tracker backend supplies real tracks.
    pub fn demo() -> Self {
        let mut log = Self::new();
        for point in [
            TrackPoint::new("09:00:00", 150, 200, "Grazing"),
            TrackPoint::new("09:05:00", 155, 205, "Grazing"),
            TrackPoint::new("09:10:00", 160, 210, "Walking"),
        ] {
            log.record("bison_id_101", point);
        }
        for point in [
            TrackPoint::new("09:01:00", 300, 450, "Resting"),
            TrackPoint::new("09:06:00", 300, 450, "Resting"),
            TrackPoint::new("09:11:00", 310, 455, "Grazing"),
        ] {
            log.record("bison_id_102", point);
        }
        log
    }

    /// Append a point to an entity's track, creating the track if needed.
    pub fn record(&mut self, entity: impl Into<String>, point: TrackPoint) {
        self.tracks.entry(entity.into()).or_default().push(point);
    }

    pub fn get(&self, entity: &str) -> Option<&[TrackPoint]> {
        self.tracks.get(entity).map(Vec::as_slice)
    }

    /// Entity ids in sorted order.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    /// Every recorded point across all entities.
    pub fn points(&self) -> impl Iterator<Item = &TrackPoint> {
        self.tracks.values().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_has_two_entities_with_three_points() {
        let log = TrackingLog::demo();
        let ids: Vec<&str> = log.entities().collect();
        assert_eq!(ids, ["bison_id_101", "bison_id_102"]);
        assert_eq!(log.get("bison_id_101").map(<[_]>::len), Some(3));
        assert_eq!(log.points().count(), 6);
    }

    #[test]
    fn unknown_entity_is_none() {
        assert!(TrackingLog::demo().get("bison_id_999").is_none());
    }
}
