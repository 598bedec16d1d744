use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `bison-guard.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Embedded web server settings.
    pub server: ServerConfig,
    /// Where samples come from and how often.
    pub source: SourceConfig,
    /// Rolling history settings.
    pub history: HistoryConfig,
    /// Classification labels shown on the dashboard.
    pub tracking: TrackingConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

/// Embedded web server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, `"127.0.0.1"` or `"0.0.0.0"` for all interfaces.
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `bind:port` suitable for `TcpListener::bind`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Which sample source feeds the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Random-walk mock data; never fails.
    #[default]
    Synthetic,
    /// Poll `GET {base_url}/stats` on every tick.
    Polled,
}

/// Sample source and refresh timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub mode: SourceMode,
    /// Base URL of the tracker backend (polled mode and media links).
    pub base_url: String,
    /// Refresh tick period in milliseconds.
    pub interval_ms: u64,
    /// Upper bound for a single `/stats` request.
    pub request_timeout_ms: u64,
    /// Attempts per tick before the tick is reported as unavailable.
    pub retry_attempts: u32,
    /// First backoff delay; doubles per attempt, capped at `interval_ms`.
    pub retry_initial_delay_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            mode:                   SourceMode::Synthetic,
            base_url:               "http://localhost:8080".to_string(),
            interval_ms:            2_000,
            request_timeout_ms:     1_500,
            retry_attempts:         2,
            retry_initial_delay_ms: 200,
        }
    }
}

/// Rolling history settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum retained samples.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}

/// Classification labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Label whose count is the headline number.
    pub primary_category: String,
    /// All labels shown in the classification chart.
    pub categories: Vec<String>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            primary_category: "bison".to_string(),
            categories: ["bison", "deer", "elk", "other"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Page background color (hex, e.g. `"#0f172a"`).
    pub background: String,
    /// Card / panel background.
    pub panel: String,
    /// Primary text color.
    pub foreground: String,
    /// Secondary text color for labels.
    pub muted: String,
    /// Accent / highlight color.
    pub accent: String,
    /// Stroke color for line charts.
    pub line_color: String,
    /// Gradient stops for bar charts, top to bottom.
    pub bar_palette: Vec<String>,
    /// Font family name.
    pub font: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#0f172a".to_string(),
            panel:      "#1c1e2b".to_string(),
            foreground: "#e2e8f0".to_string(),
            muted:      "#9ca3af".to_string(),
            accent:     "#a78bfa".to_string(),
            line_color: "#a78bfa".to_string(),
            bar_palette: ["#a78bfa", "#fcd34d", "#34d399", "#f87171"]
                .into_iter()
                .map(String::from)
                .collect(),
            font: "Inter".to_string(),
        }
    }
}
