use crate::colors::Color;
use serde::Serialize;

/// Visual settings for cards and the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelStyle {
    pub background: Color,
    pub panel:      Color,
    pub foreground: Color,
    pub muted:      Color,
    pub accent:     Color,
    pub font:       String,
}

/// Colours handed to the chart renderer alongside each chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    /// Vertical gradient stops for bar fills, top to bottom.
    pub bar_stops: Vec<Color>,
    pub line:      Color,
    /// Marker fill for line charts; a lighter tint of `line`.
    pub marker:    Color,
    pub axis:      Color,
}
