/// Facet Index
///
/// The five filterable attributes and the sorted distinct values each one
/// takes in a set of records. Option lists feed the dashboard selectors.

use crate::record::{Field, FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A filterable attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Title,
    Publisher,
    Developer,
    Platform,
    Year,
}

impl Facet {
    /// Selector order on the dashboard.
    pub const ALL: [Facet; 5] = [
        Facet::Title,
        Facet::Publisher,
        Facet::Developer,
        Facet::Platform,
        Facet::Year,
    ];

    pub fn field(&self) -> Field {
        match self {
            Facet::Title => Field::Title,
            Facet::Publisher => Field::Publisher,
            Facet::Developer => Field::Developer,
            Facet::Platform => Field::Platform,
            Facet::Year => Field::Year,
        }
    }
}

impl From<Facet> for Field {
    fn from(facet: Facet) -> Self {
        facet.field()
    }
}

/// Sorted distinct values of `facet` across `records`, nulls excluded.
///
/// # Example
///
/// ```
/// use gamesales::{distinct_values, Facet, FieldValue, Record, RecordSet};
///
/// let game = |title: &str, year: i32| Record {
///     rank: 0, title: title.to_string(), critic_score: None, user_score: None,
///     total_shipped: 1.0, year, platform: "PC".to_string(),
///     publisher: "Valve".to_string(), developer: "Valve".to_string(),
/// };
/// let records = RecordSet::new(vec![game("Portal 2", 2011), game("Half-Life", 1998), game("Portal", 2007)]);
///
/// let years = distinct_values(&records, Facet::Year);
/// assert_eq!(years, vec![FieldValue::Int(1998), FieldValue::Int(2007), FieldValue::Int(2011)]);
/// assert_eq!(distinct_values(&records, Facet::Publisher).len(), 1);
/// ```
pub fn distinct_values<'a, I>(records: I, facet: Facet) -> Vec<FieldValue>
where
    I: IntoIterator<Item = &'a Record>,
{
    let field = facet.field();
    records
        .into_iter()
        .map(|r| r.get(field))
        .filter(|v| !v.is_null())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Option lists for every facet, built in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    pub titles: Vec<String>,
    pub publishers: Vec<String>,
    pub developers: Vec<String>,
    pub platforms: Vec<String>,
    pub years: Vec<i32>,
}

impl FacetOptions {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut titles = BTreeSet::new();
        let mut publishers = BTreeSet::new();
        let mut developers = BTreeSet::new();
        let mut platforms = BTreeSet::new();
        let mut years = BTreeSet::new();

        for r in records {
            titles.insert(r.title.as_str());
            publishers.insert(r.publisher.as_str());
            developers.insert(r.developer.as_str());
            platforms.insert(r.platform.as_str());
            years.insert(r.year);
        }

        let owned = |set: BTreeSet<&str>| -> Vec<String> { set.into_iter().map(str::to_string).collect() };
        FacetOptions {
            titles: owned(titles),
            publishers: owned(publishers),
            developers: owned(developers),
            platforms: owned(platforms),
            years: years.into_iter().collect(),
        }
    }

    /// Options for one facet as field values.
    pub fn values(&self, facet: Facet) -> Vec<FieldValue> {
        let strings = |v: &[String]| -> Vec<FieldValue> { v.iter().map(|s| FieldValue::from(s.as_str())).collect() };
        match facet {
            Facet::Title => strings(&self.titles),
            Facet::Publisher => strings(&self.publishers),
            Facet::Developer => strings(&self.developers),
            Facet::Platform => strings(&self.platforms),
            Facet::Year => self.years.iter().map(|&y| FieldValue::from(y)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
