//! Column detection by horizontal gap analysis.
//!
//! Items are sorted by the horizontal center of their boxes. Walking that
//! sequence left to right, a jump in `center_x` wider than the gap threshold
//! starts a new column. Two fragments whose centers sit within the
//! threshold of each other always share a column.

use std::cmp::Ordering;

use crate::model::{Paragraph, Positioned};

/// A detected column in the page layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Left boundary (smallest `left` of any member)
    pub left: f32,
    /// Right boundary (largest `right` of any member)
    pub right: f32,
    /// Column index (0 = leftmost)
    pub index: usize,
    /// Number of items assigned to this column
    pub members: usize,
}

impl Column {
    /// Check if an X coordinate falls within this column.
    pub fn contains(&self, x: f32) -> bool {
        x >= self.left && x <= self.right
    }

    /// Column width.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Result of column detection on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Column index per input item, in input order
    pub assignments: Vec<usize>,
    /// Column descriptors, left to right
    pub columns: Vec<Column>,
}

impl ColumnLayout {
    /// Number of columns (at least 1).
    pub fn count(&self) -> usize {
        self.columns.len().max(1)
    }

    /// Check if the page has more than one column.
    pub fn is_multi_column(&self) -> bool {
        self.count() > 1
    }
}

/// Clusters a page's items into left-to-right columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDetector {
    gap_threshold: f32,
}

impl ColumnDetector {
    /// Create a detector with the given `center_x` gap threshold.
    pub fn new(gap_threshold: f32) -> Self {
        Self { gap_threshold }
    }

    /// The configured gap threshold.
    pub fn gap_threshold(&self) -> f32 {
        self.gap_threshold
    }

    /// Detect columns among the items of one page.
    pub fn detect<T: Positioned>(&self, items: &[T]) -> ColumnLayout {
        if items.is_empty() {
            return ColumnLayout {
                assignments: Vec::new(),
                columns: Vec::new(),
            };
        }

        // Stable sort keeps input order among equal centers.
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| {
            items[a]
                .bbox()
                .center_x()
                .partial_cmp(&items[b].bbox().center_x())
                .unwrap_or(Ordering::Equal)
        });

        let mut assignments = vec![0usize; items.len()];
        let mut columns: Vec<Column> = Vec::new();
        let mut previous_center: Option<f32> = None;

        for index in order {
            let bbox = items[index].bbox();
            let center = bbox.center_x();

            let starts_column = match previous_center {
                None => true,
                Some(prev) => center - prev > self.gap_threshold,
            };
            if starts_column {
                columns.push(Column {
                    left: bbox.left,
                    right: bbox.right,
                    index: columns.len(),
                    members: 0,
                });
            }

            if let Some(column) = columns.last_mut() {
                column.left = column.left.min(bbox.left);
                column.right = column.right.max(bbox.right);
                column.members += 1;
                assignments[index] = column.index;
            }
            previous_center = Some(center);
        }

        log::debug!(
            "Detected {} columns among {} items",
            columns.len(),
            items.len()
        );
        for col in &columns {
            log::trace!(
                "  Column {}: left={:.3}, right={:.3}, members={}",
                col.index,
                col.left,
                col.right,
                col.members
            );
        }

        ColumnLayout {
            assignments,
            columns,
        }
    }

    /// Detect columns and write the index into each paragraph.
    ///
    /// Returns the column count.
    pub fn assign(&self, paragraphs: &mut [Paragraph]) -> usize {
        let layout = self.detect(paragraphs);
        for (paragraph, column) in paragraphs.iter_mut().zip(&layout.assignments) {
            paragraph.column = *column;
        }
        layout.count()
    }
}

impl Default for ColumnDetector {
    fn default() -> Self {
        Self::new(0.2)
    }
}
