//! Property-based tests for geometry, parsing and layout invariants.

use proptest::prelude::*;
use serde_json::json;
use unocr::parser::{ColumnDetector, FontClassifier, ReadingOrderSequencer};
use unocr::{BoundingBox, ChunkParser, Paragraph, TextType};

fn coordinate() -> impl Strategy<Value = f32> {
    -2.0f32..2.0f32
}

/// Property: derived values are exact functions of the four edges
#[test]
fn proptest_bbox_derived_values() {
    proptest!(|(l in coordinate(), t in coordinate(), r in coordinate(), b in coordinate())| {
        let bbox = BoundingBox::new(l, t, r, b);
        prop_assert_eq!(bbox.width(), r - l);
        prop_assert_eq!(bbox.height(), b - t);
        prop_assert_eq!(bbox.center_x(), (l + r) / 2.0);
        prop_assert_eq!(bbox.center_y(), (t + b) / 2.0);
        // No clamping on construction.
        prop_assert_eq!(bbox.left, l);
        prop_assert_eq!(bbox.bottom, b);
    });
}

/// Property: parsing the same input twice gives the same chunks
#[test]
fn proptest_parser_idempotent() {
    let kinds = prop::sample::select(vec!["text", "logo", "chunkFigure", "table", "marginalia"]);
    proptest!(|(records in prop::collection::vec((kinds.clone(), "[a-z <>:\\[\\] ]{0,40}", 0u32..3), 0..12))| {
        let input = serde_json::Value::Array(
            records
                .iter()
                .map(|(kind, text, page)| json!({"type": kind, "text": text, "grounding": {"page": page}}))
                .collect(),
        );
        let parser = ChunkParser::default();
        let first = parser.parse_value(&input).unwrap();
        let second = parser.parse_value(&input).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.iter().all(|chunk| !chunk.text().is_empty()));
        prop_assert!(first.len() <= records.len());
    });
}

/// Property: centers further apart than the threshold split, closer ones join
#[test]
fn proptest_column_boundary() {
    proptest!(|(start in 0.0f32..0.5, threshold in 0.05f32..0.3, eps in 0.001f32..0.02)| {
        let detector = ColumnDetector::new(threshold);
        let at = |center: f32| BoundingBox::new(center - 0.01, 0.1, center + 0.01, 0.2);

        let split = detector.detect(&[at(start), at(start + threshold + eps)]);
        prop_assert_eq!(split.count(), 2);

        let joined = detector.detect(&[at(start), at(start + threshold - eps)]);
        prop_assert_eq!(joined.count(), 1);
    });
}

/// Property: within one column, reading order is ascending top
#[test]
fn proptest_column_order_ascending() {
    proptest!(|(tops in prop::collection::vec(0.0f32..0.95, 1..20))| {
        let mut paragraphs: Vec<Paragraph> = tops
            .iter()
            .enumerate()
            .map(|(i, top)| Paragraph::new(format!("p{}", i), 0, BoundingBox::new(0.1, *top, 0.9, top + 0.02)))
            .collect();
        ReadingOrderSequencer::default().sequence(&mut paragraphs);
        prop_assert!(paragraphs.windows(2).all(|w| w[0].bbox.top <= w[1].bbox.top));
    });
}

/// Property: estimated sizes stay in range, on the half-point grid, and bucket monotonically
#[test]
fn proptest_font_estimate_bounds() {
    proptest!(|(a in -0.5f32..1.5, b in -0.5f32..1.5)| {
        let classifier = FontClassifier::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let small = classifier.estimate_size(low);
        let large = classifier.estimate_size(high);

        prop_assert!((7.5..=48.0).contains(&small));
        prop_assert_eq!((small * 2.0).fract(), 0.0);
        prop_assert!(small <= large);
        let order = |t: TextType| TextType::ALL.iter().position(|x| *x == t);
        prop_assert!(order(classifier.classify_size(small)) <= order(classifier.classify_size(large)));
    });
}
