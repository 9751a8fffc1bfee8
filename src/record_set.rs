/// GameSales Record Set and Filtered View
///
/// A `RecordSet` is the immutable, ordered result of the sales query. It is
/// reference counted so request handlers can share one copy.
///
/// A `FilteredView` borrows a `RecordSet` and keeps a mapping from view
/// indices to parent indices. Views are always rebuilt from the parent;
/// the parent is never mutated.

use crate::record::{Field, FieldValue, Record};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Arc<[Record]>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        RecordSet {
            records: records.into(),
        }
    }

    /// Like `new`, but rejects the first record with a non-finite number.
    pub fn try_new(records: Vec<Record>) -> Result<Self, String> {
        for record in &records {
            record.validate()?;
        }
        Ok(RecordSet::new(records))
    }

    /// The record set served when nothing could be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn get_value(&self, row: usize, field: Field) -> Result<FieldValue, String> {
        self.get(row)
            .map(|r| r.get(field))
            .ok_or_else(|| format!("Row {} out of range [0, {})", row, self.len()))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Build a view of the records matching `predicate`, in parent order.
    pub fn filter<F>(&self, predicate: F) -> FilteredView<'_>
    where
        F: Fn(&Record) -> bool,
    {
        let view_to_parent = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| predicate(record))
            .map(|(i, _)| i)
            .collect();
        FilteredView::from_indices(self, view_to_parent)
    }

    /// View over every record.
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::from_indices(self, (0..self.len()).collect())
    }

    // ========================================================================
    // Serialization Methods
    // ========================================================================

    /// Create a record set from a JSON array of records.
    ///
    /// Every record is validated; the first invalid one aborts the load.
    ///
    /// # Example
    ///
    /// ```
    /// use gamesales::RecordSet;
    ///
    /// let json = r#"[{"rank": 1, "title": "Tetris", "critic_score": null, "user_score": null,
    ///     "total_shipped": 35.0, "year": 1989, "platform": "GB",
    ///     "publisher": "Nintendo", "developer": "Bullet-Proof Software"}]"#;
    /// let records = RecordSet::from_json(json).unwrap();
    /// assert_eq!(records.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<RecordSet, String> {
        let records: Vec<Record> =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {}", e))?;

        RecordSet::try_new(records)
    }

    /// Export the record set as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&*self.records)
            .map_err(|e| format!("JSON serialization error: {}", e))
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        RecordSet::new(records)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An order-preserving subsequence of a `RecordSet`.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    parent: &'a RecordSet,
    view_to_parent: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// `view_to_parent` must be strictly increasing and in range.
    pub(crate) fn from_indices(parent: &'a RecordSet, view_to_parent: Vec<usize>) -> Self {
        debug_assert!(view_to_parent.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(view_to_parent.last().map_or(true, |&i| i < parent.len()));
        FilteredView {
            parent,
            view_to_parent,
        }
    }

    pub fn len(&self) -> usize {
        self.view_to_parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_to_parent.is_empty()
    }

    pub fn parent(&self) -> &'a RecordSet {
        self.parent
    }

    pub fn get(&self, index: usize) -> Option<&'a Record> {
        let parent = self.parent;
        self.view_to_parent.get(index).and_then(|&i| parent.get(i))
    }

    pub fn get_value(&self, row: usize, field: Field) -> Result<FieldValue, String> {
        self.get(row)
            .map(|r| r.get(field))
            .ok_or_else(|| format!("Row {} out of range [0, {})", row, self.len()))
    }

    /// Parent index of each view row.
    pub fn parent_indices(&self) -> &[usize] {
        &self.view_to_parent
    }

    pub fn iter(&self) -> FilteredViewIter<'a, '_> {
        FilteredViewIter {
            parent: self.parent,
            indices: self.view_to_parent.iter(),
        }
    }

    /// Narrow this view further; the result still indexes the original parent.
    pub fn refine<F>(&self, predicate: F) -> FilteredView<'a>
    where
        F: Fn(&Record) -> bool,
    {
        let parent = self.parent;
        let view_to_parent = self
            .view_to_parent
            .iter()
            .copied()
            .filter(|&i| predicate(&parent.records()[i]))
            .collect();
        FilteredView::from_indices(parent, view_to_parent)
    }

    /// Clone the visible records out of the parent.
    pub fn to_records(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }
}

pub struct FilteredViewIter<'a, 'v> {
    parent: &'a RecordSet,
    indices: std::slice::Iter<'v, usize>,
}

impl<'a, 'v> Iterator for FilteredViewIter<'a, 'v> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let parent = self.parent;
        self.indices.next().map(|&i| &parent.records()[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<'a, 'v> ExactSizeIterator for FilteredViewIter<'a, 'v> {}

impl<'a, 'v> IntoIterator for &'v FilteredView<'a> {
    type Item = &'a Record;
    type IntoIter = FilteredViewIter<'a, 'v>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
