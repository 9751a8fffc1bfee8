/// Filter Engine
///
/// A `FacetSelection` holds, for each facet, the set of values the user
/// picked. An empty set places no constraint on its facet. `apply` keeps the
/// records that satisfy every active facet, in their original order.

use crate::facet::Facet;
use crate::record::Record;
use crate::record_set::{FilteredView, RecordSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacetSelection {
    pub titles: BTreeSet<String>,
    pub publishers: BTreeSet<String>,
    pub developers: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
    pub years: BTreeSet<i32>,
}

impl FacetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles.extend(titles.into_iter().map(Into::into));
        self
    }

    pub fn with_publishers<I, S>(mut self, publishers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.publishers.extend(publishers.into_iter().map(Into::into));
        self
    }

    pub fn with_developers<I, S>(mut self, developers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.developers.extend(developers.into_iter().map(Into::into));
        self
    }

    pub fn with_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms.extend(platforms.into_iter().map(Into::into));
        self
    }

    pub fn with_years<I>(mut self, years: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        self.years.extend(years);
        self
    }

    /// Number of values chosen for `facet`.
    pub fn selected_count(&self, facet: Facet) -> usize {
        match facet {
            Facet::Title => self.titles.len(),
            Facet::Publisher => self.publishers.len(),
            Facet::Developer => self.developers.len(),
            Facet::Platform => self.platforms.len(),
            Facet::Year => self.years.len(),
        }
    }

    pub fn is_active(&self, facet: Facet) -> bool {
        self.selected_count(facet) > 0
    }

    /// Facets that constrain the result, in selector order.
    pub fn active_facets(&self) -> Vec<Facet> {
        Facet::ALL.into_iter().filter(|f| self.is_active(*f)).collect()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_facets().is_empty()
    }

    /// Whether `record` passes the constraint of one facet.
    /// An inactive facet admits everything.
    pub fn admits(&self, facet: Facet, record: &Record) -> bool {
        if !self.is_active(facet) {
            return true;
        }
        match facet {
            Facet::Title => self.titles.contains(&record.title),
            Facet::Publisher => self.publishers.contains(&record.publisher),
            Facet::Developer => self.developers.contains(&record.developer),
            Facet::Platform => self.platforms.contains(&record.platform),
            Facet::Year => self.years.contains(&record.year),
        }
    }

    /// Whether `record` passes every facet.
    pub fn matches(&self, record: &Record) -> bool {
        Facet::ALL.iter().all(|&facet| self.admits(facet, record))
    }
}

/// Apply `selection` to `records`.
///
/// One pass per active facet; with nothing selected the view is the whole
/// record set.
///
/// # Example
///
/// ```
/// use gamesales::{apply, FacetSelection, Record, RecordSet};
///
/// let game = |rank: i64, platform: &str| Record {
///     rank, title: format!("Game {}", rank), critic_score: None, user_score: None,
///     total_shipped: 1.0, year: 2000, platform: platform.to_string(),
///     publisher: "Acme".to_string(), developer: "Acme".to_string(),
/// };
/// let records = RecordSet::new(vec![game(1, "X"), game(2, "Y"), game(3, "X")]);
///
/// let view = apply(&records, &FacetSelection::new().with_platforms(["X"]));
/// assert_eq!(view.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 3]);
///
/// assert_eq!(apply(&records, &FacetSelection::new()).len(), 3);
/// ```
pub fn apply<'a>(records: &'a RecordSet, selection: &FacetSelection) -> FilteredView<'a> {
    let mut view = records.view();
    for facet in selection.active_facets() {
        view = view.refine(|record| selection.admits(facet, record));
    }
    view
}
