/// Aggregator
///
/// Read-only reductions over a set of records, normally a `FilteredView`.
/// Null values are skipped everywhere, and so are NaN and infinite floats.
/// Scalar reductions that have nothing to reduce return `None` ("no data")
/// instead of a NaN; `sum` returns 0.0.
/// Grouped reductions drop records whose group key is null and return an
/// empty map for empty input.

use crate::record::{Field, FieldValue, NumericField, Record};
use std::collections::BTreeMap;

fn finite(record: &Record, field: NumericField) -> Option<f64> {
    record.numeric(field).filter(|v| v.is_finite())
}

/// Group key of a record; None for null and NaN/infinite floats.
fn group_key(record: &Record, field: Field) -> Option<FieldValue> {
    match record.get(field) {
        FieldValue::Null => None,
        FieldValue::Float(v) if !v.is_finite() => None,
        value => Some(value),
    }
}

/// Sum of a numeric field. NULL values are skipped; empty input gives 0.0.
pub fn sum<'a, I>(records: I, field: NumericField) -> f64
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|r| finite(r, field))
        .fold(0.0, |total, v| total + v)
}

/// Number of records where `field` is not null.
pub fn count_non_null<'a, I>(records: I, field: Field) -> usize
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| group_key(r, field).is_some()).count()
}

/// Arithmetic mean of a numeric field.
/// NULL values are skipped. Returns None if there are no non-NULL values.
///
/// # Example
///
/// ```
/// use gamesales::{mean, NumericField, Record, RecordSet};
///
/// let game = |critic_score: Option<f64>| Record {
///     rank: 1, title: "t".to_string(), critic_score, user_score: None,
///     total_shipped: 1.0, year: 2000, platform: "p".to_string(),
///     publisher: "p".to_string(), developer: "d".to_string(),
/// };
/// let records = RecordSet::new(vec![game(Some(8.0)), game(None), game(Some(9.0))]);
///
/// assert_eq!(mean(&records, NumericField::CriticScore), Some(8.5));
/// assert_eq!(mean(&records, NumericField::UserScore), None);
/// ```
pub fn mean<'a, I>(records: I, field: NumericField) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut total = 0.0;
    let mut count = 0usize;
    for num in records.into_iter().filter_map(|r| finite(r, field)) {
        total += num;
        count += 1;
    }

    if count > 0 {
        Some(total / count as f64)
    } else {
        None
    }
}

/// Smallest value of a numeric field, or None when there is no data.
pub fn min<'a, I>(records: I, field: NumericField) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|r| finite(r, field))
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.min(v))))
}

/// Largest value of a numeric field, or None when there is no data.
pub fn max<'a, I>(records: I, field: NumericField) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|r| finite(r, field))
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
}

/// Sum of `value` per distinct `group` value.
///
/// Records with a null group key are dropped; null values add nothing but
/// still create their group.
pub fn group_sum<'a, I>(records: I, group: Field, value: NumericField) -> BTreeMap<FieldValue, f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups = BTreeMap::new();
    for r in records {
        let Some(key) = group_key(r, group) else {
            continue;
        };
        let amount = finite(r, value).unwrap_or(0.0);
        *groups.entry(key).or_insert(0.0) += amount;
    }
    groups
}

/// Number of records per distinct value of `field`, nulls dropped.
pub fn value_counts<'a, I>(records: I, field: Field) -> BTreeMap<FieldValue, usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts = BTreeMap::new();
    for r in records {
        if let Some(key) = group_key(r, field) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// Share of records per distinct value of `field`: count / non-null total.
/// The shares of a non-empty result add up to 1.
pub fn distinct_ratio<'a, I>(records: I, field: Field) -> BTreeMap<FieldValue, f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let counts = value_counts(records, field);
    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(key, count)| (key, count as f64 / total as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{apply, FacetSelection};
    use crate::record_set::RecordSet;

    fn game(
        rank: i64,
        platform: &str,
        publisher: &str,
        year: i32,
        shipped: f64,
        critic: Option<f64>,
        user: Option<f64>,
    ) -> Record {
        Record {
            rank,
            title: format!("Game {}", rank),
            critic_score: critic,
            user_score: user,
            total_shipped: shipped,
            year,
            platform: platform.to_string(),
            publisher: publisher.to_string(),
            developer: format!("{} Dev", publisher),
        }
    }

    fn two_games() -> RecordSet {
        RecordSet::new(vec![
            game(1, "X", "P1", 2000, 1.0, Some(80.0), Some(70.0)),
            game(2, "Y", "P2", 2001, 2.0, Some(90.0), Some(85.0)),
        ])
    }

    fn catalogue() -> RecordSet {
        RecordSet::new(vec![
            game(1, "PS2", "Sony", 2001, 4.0, Some(9.0), Some(8.0)),
            game(2, "PS2", "EA", 2002, 2.5, Some(8.0), None),
            game(3, "Wii", "Nintendo", 2006, 10.0, Some(9.0), Some(7.0)),
            game(4, "DS", "Nintendo", 2005, 3.0, None, None),
            game(5, "Wii", "EA", 2008, 0.5, Some(6.5), Some(6.0)),
        ])
    }

    #[test]
    fn test_platform_selection_scenario() {
        let records = two_games();
        let view = apply(&records, &FacetSelection::new().with_platforms(["X"]));

        assert_eq!(view.len(), 1);
        assert_eq!(view.get(0).unwrap().title, "Game 1");
        assert_eq!(sum(&view, NumericField::TotalShipped), 1.0);
        assert_eq!(mean(&view, NumericField::CriticScore), Some(80.0));
    }

    #[test]
    fn test_year_selection_scenario() {
        let records = two_games();
        let view = apply(&records, &FacetSelection::new().with_years([2000, 2001]));

        assert_eq!(view.len(), 2);
        let by_platform = group_sum(&view, Field::Platform, NumericField::TotalShipped);
        let expected: BTreeMap<FieldValue, f64> =
            [(FieldValue::from("X"), 1.0), (FieldValue::from("Y"), 2.0)].into_iter().collect();
        assert_eq!(by_platform, expected);
    }

    #[test]
    fn test_empty_view() {
        let records = catalogue();
        let view = apply(&records, &FacetSelection::new().with_publishers(["Capcom"]));
        assert!(view.is_empty());

        assert_eq!(sum(&view, NumericField::TotalShipped), 0.0);
        assert_eq!(mean(&view, NumericField::CriticScore), None);
        assert_eq!(mean(&view, NumericField::UserScore), None);
        assert_eq!(min(&view, NumericField::Year), None);
        assert_eq!(max(&view, NumericField::Year), None);
        assert!(group_sum(&view, Field::Platform, NumericField::TotalShipped).is_empty());
        assert!(value_counts(&view, Field::CriticScore).is_empty());
        assert!(distinct_ratio(&view, Field::Publisher).is_empty());
        assert_eq!(count_non_null(&view, Field::CriticScore), 0);
    }

    #[test]
    fn test_mean_skips_nulls() {
        let records = catalogue();
        // 9.0 + 8.0 + 9.0 + 6.5 over four non-null scores
        assert_eq!(mean(&records, NumericField::CriticScore), Some(8.125));
        assert_eq!(mean(&records, NumericField::UserScore), Some(7.0));
        assert_eq!(count_non_null(&records, Field::UserScore), 3);

        let ds_only = records.filter(|r| r.platform == "DS");
        assert_eq!(mean(&ds_only, NumericField::CriticScore), None);
        assert_eq!(sum(&ds_only, NumericField::CriticScore), 0.0);
    }

    #[test]
    fn test_non_finite_scores_count_as_missing() {
        let records = RecordSet::new(vec![
            game(1, "X", "P1", 2000, 1.0, Some(f64::NAN), Some(f64::INFINITY)),
            game(2, "X", "P1", 2001, f64::NAN, Some(8.0), None),
        ]);
        assert_eq!(mean(&records, NumericField::CriticScore), Some(8.0));
        assert_eq!(mean(&records, NumericField::UserScore), None);
        assert_eq!(max(&records, NumericField::UserScore), None);
        assert_eq!(sum(&records, NumericField::TotalShipped), 1.0);
        assert_eq!(count_non_null(&records, Field::CriticScore), 1);

        let histogram = value_counts(&records, Field::CriticScore);
        assert_eq!(histogram.len(), 1);
        assert_eq!(histogram[&FieldValue::Float(8.0)], 1);
        assert_eq!(group_sum(&records, Field::Platform, NumericField::TotalShipped)[&FieldValue::from("X")], 1.0);
    }

    #[test]
    fn test_min_max() {
        let records = catalogue();
        assert_eq!(min(&records, NumericField::Year), Some(2001.0));
        assert_eq!(max(&records, NumericField::Year), Some(2008.0));
        assert_eq!(min(&records, NumericField::CriticScore), Some(6.5));
        assert_eq!(max(&records, NumericField::TotalShipped), Some(10.0));
    }

    #[test]
    fn test_group_sum_conserves_total() {
        let records = catalogue();
        let selections = [
            FacetSelection::new(),
            FacetSelection::new().with_platforms(["PS2", "Wii"]),
            FacetSelection::new().with_publishers(["EA"]),
        ];
        for selection in &selections {
            let view = apply(&records, selection);
            let total = sum(&view, NumericField::TotalShipped);
            for group in [Field::Platform, Field::Publisher, Field::Year] {
                let grouped: f64 = group_sum(&view, group, NumericField::TotalShipped).values().sum();
                assert!((grouped - total).abs() < 1e-9, "{:?} by {}", selection, group);
            }
        }
    }

    #[test]
    fn test_group_sum_by_publisher() {
        let records = catalogue();
        let by_publisher = group_sum(&records, Field::Publisher, NumericField::TotalShipped);
        assert_eq!(by_publisher.len(), 3);
        assert_eq!(by_publisher[&FieldValue::from("EA")], 3.0);
        assert_eq!(by_publisher[&FieldValue::from("Nintendo")], 13.0);
        assert_eq!(by_publisher[&FieldValue::from("Sony")], 4.0);
    }

    #[test]
    fn test_group_sum_drops_null_keys() {
        let records = catalogue();
        let by_score = group_sum(&records, Field::CriticScore, NumericField::TotalShipped);
        assert_eq!(by_score[&FieldValue::Float(9.0)], 14.0);
        assert!(!by_score.contains_key(&FieldValue::Null));
        let total: f64 = by_score.values().sum();
        assert_eq!(total, 17.0);
    }

    #[test]
    fn test_value_counts() {
        let records = catalogue();
        let counts = value_counts(&records, Field::CriticScore);
        let expected: BTreeMap<FieldValue, usize> = [
            (FieldValue::Float(6.5), 1),
            (FieldValue::Float(8.0), 1),
            (FieldValue::Float(9.0), 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(counts, expected);

        let by_platform = value_counts(&records, Field::Platform);
        assert_eq!(by_platform[&FieldValue::from("Wii")], 2);
        assert_eq!(by_platform.values().sum::<usize>(), records.len());
    }

    #[test]
    fn test_distinct_ratio() {
        let records = catalogue();
        let shares = distinct_ratio(&records, Field::Publisher);
        assert_eq!(shares[&FieldValue::from("EA")], 0.4);
        assert_eq!(shares[&FieldValue::from("Nintendo")], 0.4);
        assert_eq!(shares[&FieldValue::from("Sony")], 0.2);
        assert!((shares.values().sum::<f64>() - 1.0).abs() < 1e-12);

        let scores = distinct_ratio(&records, Field::CriticScore);
        assert_eq!(scores[&FieldValue::Float(9.0)], 0.5);
    }

    #[test]
    fn test_aggregates_leave_view_untouched() {
        let records = catalogue();
        let view = apply(&records, &FacetSelection::new().with_platforms(["Wii"]));
        let before = view.parent_indices().to_vec();
        let _ = sum(&view, NumericField::TotalShipped);
        let _ = group_sum(&view, Field::Publisher, NumericField::TotalShipped);
        let _ = distinct_ratio(&view, Field::Publisher);
        assert_eq!(view.parent_indices(), before.as_slice());
    }
}
