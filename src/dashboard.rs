/// Dashboard
///
/// Owns the loaded record set and its load status. Each call to `snapshot`
/// is one full request/response pass: filter the original records with the
/// selection, then recompute every KPI and chart from the filtered view.
/// Nothing is cached between selections except the facet option lists and
/// the page title, which depend only on the immutable record set.

use crate::aggregate::{distinct_ratio, group_sum, max, mean, min, sum, value_counts};
use crate::error::LoadError;
use crate::facet::FacetOptions;
use crate::filter::{apply, FacetSelection};
use crate::record::{Field, FieldValue, NumericField};
use crate::record_set::{FilteredView, RecordSet};
use crate::snapshot::{
    format_millions, format_score, ChartKind, ChartPoint, ChartSeries, Charts, DashboardSnapshot,
    DataStatus, Kpi, Kpis,
};
use log::{debug, error, info, warn};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Dashboard {
    records: RecordSet,
    status: DataStatus,
    options: FacetOptions,
    title: String,
}

impl Dashboard {
    pub fn new(records: RecordSet) -> Self {
        let status = DataStatus::Loaded { rows: records.len() };
        let options = FacetOptions::from_records(&records);
        let title = title_for(&records);
        Dashboard {
            records,
            status,
            options,
            title,
        }
    }

    /// A dashboard with no data, showing why.
    pub fn degraded(status: DataStatus) -> Self {
        Dashboard {
            records: RecordSet::empty(),
            status,
            options: FacetOptions::default(),
            title: title_for(&RecordSet::empty()),
        }
    }

    /// Build from the outcome of a load, degrading to an empty dataset on
    /// any error.
    pub fn from_load(result: Result<RecordSet, LoadError>) -> Self {
        match result {
            Ok(records) => {
                info!("Loaded {} sales records", records.len());
                Dashboard::new(records)
            }
            Err(e) => {
                let message = e.to_string();
                let status = match e {
                    LoadError::Config(_) => {
                        error!("{}", message);
                        DataStatus::ConfigError { message }
                    }
                    LoadError::Connection(_) => {
                        warn!("{}; serving an empty dataset", message);
                        DataStatus::ConnectionError { message }
                    }
                    LoadError::Query(_) | LoadError::InvalidRow { .. } => {
                        warn!("{}; serving an empty dataset", message);
                        DataStatus::QueryError { message }
                    }
                };
                Dashboard::degraded(status)
            }
        }
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn status(&self) -> &DataStatus {
        &self.status
    }

    /// Selector options, always from the unfiltered records.
    pub fn options(&self) -> &FacetOptions {
        &self.options
    }

    /// Page heading with the year span of the dataset.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn filter(&self, selection: &FacetSelection) -> FilteredView<'_> {
        apply(&self.records, selection)
    }

    pub fn snapshot(&self, selection: &FacetSelection) -> DashboardSnapshot {
        let view = self.filter(selection);
        debug!(
            "Selection on {:?} kept {} of {} records",
            selection.active_facets(),
            view.len(),
            self.records.len()
        );

        DashboardSnapshot {
            title: self.title.clone(),
            status: self.status.clone(),
            selection: selection.clone(),
            options: self.options.clone(),
            rows: view.to_records(),
            kpis: kpis(&view),
            charts: charts(&view),
        }
    }
}

fn title_for(records: &RecordSet) -> String {
    let first = min(records, NumericField::Year);
    let last = max(records, NumericField::Year);
    match (first, last) {
        (Some(first), Some(last)) => format!("Game Sales ({}-{})", first as i64, last as i64),
        _ => "Game Sales".to_string(),
    }
}

/// Total shipped and the two mean scores of a view.
pub fn kpis(view: &FilteredView<'_>) -> Kpis {
    let total = sum(view, NumericField::TotalShipped);
    let critic = mean(view, NumericField::CriticScore);
    let user = mean(view, NumericField::UserScore);

    Kpis {
        total_shipped: Kpi {
            label: "Units shipped",
            value: Some(total),
            display: format_millions(total),
        },
        mean_critic_score: Kpi {
            label: "Mean critic score",
            value: critic,
            display: format_score(critic),
        },
        mean_user_score: Kpi {
            label: "Mean user score",
            value: user,
            display: format_score(user),
        },
    }
}

/// The four dashboard charts of a view.
pub fn charts(view: &FilteredView<'_>) -> Charts {
    let counts_as_f64 = |counts: BTreeMap<FieldValue, usize>| -> BTreeMap<FieldValue, f64> {
        counts.into_iter().map(|(k, n)| (k, n as f64)).collect()
    };

    Charts {
        shipped_by_platform: series(
            "Sales by Platform",
            ChartKind::Bar,
            "Platform",
            "Units shipped (M)",
            group_sum(view, Field::Platform, NumericField::TotalShipped),
        ),
        shipped_by_publisher: series(
            "Sales by Publisher",
            ChartKind::Bar,
            "Publisher",
            "Units shipped (M)",
            group_sum(view, Field::Publisher, NumericField::TotalShipped),
        ),
        games_by_critic_score: series(
            "Games by Critic Score",
            ChartKind::Bar,
            "Critic score",
            "Games",
            counts_as_f64(value_counts(view, Field::CriticScore)),
        ),
        publisher_share: series(
            "Share of Games by Publisher",
            ChartKind::Pie,
            "Publisher",
            "Share",
            distinct_ratio(view, Field::Publisher),
        ),
    }
}

fn series(
    title: &'static str,
    kind: ChartKind,
    x_label: &'static str,
    y_label: &'static str,
    values: BTreeMap<FieldValue, f64>,
) -> ChartSeries {
    ChartSeries {
        title,
        kind,
        x_label,
        y_label,
        points: values
            .into_iter()
            .map(|(key, value)| ChartPoint {
                label: key.to_string(),
                value,
            })
            .collect(),
    }
}
