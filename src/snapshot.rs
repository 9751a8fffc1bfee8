/// Dashboard output types sent to the presentation layer
use crate::facet::FacetOptions;
use crate::filter::FacetSelection;
use crate::record::Record;
use serde::Serialize;

/// Label shown in place of a statistic that has no data.
pub const NO_DATA: &str = "no data";

/// Where the dataset came from, or why it is empty
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DataStatus {
    /// Query succeeded
    Loaded { rows: usize },

    /// Credentials missing or invalid; no query was attempted
    ConfigError { message: String },

    /// Database unreachable or login refused
    ConnectionError { message: String },

    /// Query failed or returned unusable rows
    QueryError { message: String },
}

impl DataStatus {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, DataStatus::Loaded { .. })
    }

    /// Operator-facing message for a degraded load.
    pub fn message(&self) -> Option<&str> {
        match self {
            DataStatus::Loaded { .. } => None,
            DataStatus::ConfigError { message }
            | DataStatus::ConnectionError { message }
            | DataStatus::QueryError { message } => Some(message),
        }
    }
}

/// One headline figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    /// `None` means "no data"
    pub value: Option<f64>,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_shipped: Kpi,
    pub mean_critic_score: Kpi,
    pub mean_user_score: Kpi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Chart-ready series; an empty `points` list renders an empty chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, |a, b| a + b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub shipped_by_platform: ChartSeries,
    pub shipped_by_publisher: ChartSeries,
    pub games_by_critic_score: ChartSeries,
    pub publisher_share: ChartSeries,
}

/// Everything the page needs for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub title: String,
    pub status: DataStatus,
    pub selection: FacetSelection,
    pub options: FacetOptions,
    pub rows: Vec<Record>,
    pub kpis: Kpis,
    pub charts: Charts,
}

impl DashboardSnapshot {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("JSON serialization error: {}", e))
    }
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // never show "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `12.35M` style label for units shipped in millions.
pub fn format_millions(value: f64) -> String {
    format!("{}M", round2(value))
}

/// Two-decimal label, or `no data`.
pub fn format_score(value: Option<f64>) -> String {
    match value {
        Some(v) => round2(v).to_string(),
        None => NO_DATA.to_string(),
    }
}
