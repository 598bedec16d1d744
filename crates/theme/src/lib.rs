pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::{ChartStyle, PanelStyle};

use guard_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible; invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub panel: PanelStyle,
    pub chart: ChartStyle,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let line = Color::from_hex(&cfg.line_color).unwrap_or(Color::PURPLE);
        let muted = Color::from_hex(&cfg.muted).unwrap_or(Color::GRAY);

        let mut bar_stops: Vec<Color> = cfg
            .bar_palette
            .iter()
            .filter_map(|hex| Color::from_hex(hex))
            .collect();
        if bar_stops.is_empty() {
            bar_stops.push(line);
        }

        Self {
            panel: PanelStyle {
                background: Color::from_hex(&cfg.background).unwrap_or(Color::SLATE),
                panel:      Color::from_hex(&cfg.panel).unwrap_or(Color::PANEL),
                foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::WHITE),
                muted,
                accent:     Color::from_hex(&cfg.accent).unwrap_or(Color::PURPLE),
                font:       cfg.font.clone(),
            },
            chart: ChartStyle {
                bar_stops,
                line,
                marker: lighten(line, 0.35),
                axis:   muted.with_alpha(0.4),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

/// Mix `c` toward white by `amount` (0 = unchanged, 1 = white).
fn lighten(c: Color, amount: f32) -> Color {
    let t = amount.clamp(0.0, 1.0);
    Color {
        r: c.r + (1.0 - c.r) * t,
        g: c.g + (1.0 - c.g) * t,
        b: c.b + (1.0 - c.b) * t,
        a: c.a,
    }
}
