use crate::analysis::object::Candidate;

/// Sorts candidates by descending confidence.
///
/// The suppression pass below gives priority to earlier candidates, so
/// standard NMS semantics (highest confidence wins) require this order.
/// Kept separate because suppression itself never reorders its input.
pub fn sort_by_confidence(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Greedy class-aware non-maximum suppression.
///
/// Walks candidates in their given order and accepts each one unless it
/// overlaps an already-accepted candidate of the same label with
/// `IoU > iou_threshold`. Priority is therefore first-seen, not
/// highest-confidence; callers wanting the standard behavior apply
/// [`sort_by_confidence`] first. The accepted subset keeps its input order.
///
/// A pair whose union has zero area counts as non-overlapping. On return no
/// two accepted candidates of the same label overlap past the threshold, and
/// re-running on the output is a fixed point.
pub fn non_max_suppression(candidates: &[Candidate], iou_threshold: f32) -> Vec<Candidate> {
    let mut picked: Vec<Candidate> = Vec::new();

    for candidate in candidates {
        let suppressed = picked.iter().any(|kept| {
            candidate.label == kept.label && candidate.bbox.iou(&kept.bbox) > iou_threshold
        });
        if !suppressed {
            picked.push(*candidate);
        }
    }

    picked
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::analysis::bbox::Bbox;

    fn candidate(min: (f32, f32), max: (f32, f32), label: usize, confidence: f32) -> Candidate {
        Candidate {
            bbox: Bbox::new(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1)),
            label,
            confidence,
        }
    }

    /// Two boxes shifted so that IoU = 0.9: 100x90 overlap of 100x95 boxes.
    fn overlapping_pair(label_a: usize, label_b: usize) -> Vec<Candidate> {
        let a = candidate((0.0, 0.0), (100.0, 95.0), label_a, 0.9);
        let b = candidate((0.0, 5.0), (100.0, 100.0), label_b, 0.8);
        assert!(a.bbox.iou(&b.bbox) > 0.45);
        vec![a, b]
    }

    #[test]
    fn test_same_class_overlap_is_suppressed() {
        let picked = non_max_suppression(&overlapping_pair(3, 3), 0.45);
        assert_eq!(picked.len(), 1);
        // First-seen candidate survives
        assert_eq!(picked[0].confidence, 0.9);
    }

    #[test]
    fn test_different_classes_both_survive() {
        let picked = non_max_suppression(&overlapping_pair(3, 5), 0.45);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_priority_is_first_seen_without_sort() {
        let mut candidates = overlapping_pair(3, 3);
        candidates.swap(0, 1);

        // Decode order puts the 0.8 candidate first, so it wins
        let picked = non_max_suppression(&candidates, 0.45);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].confidence, 0.8);

        // Sorting restores highest-confidence priority
        sort_by_confidence(&mut candidates);
        let picked = non_max_suppression(&candidates, 0.45);
        assert_eq!(picked[0].confidence, 0.9);
    }

    #[test]
    fn test_nms_is_idempotent() {
        let candidates = vec![
            candidate((0.0, 0.0), (100.0, 95.0), 1, 0.9),
            candidate((0.0, 5.0), (100.0, 100.0), 1, 0.8),
            candidate((200.0, 200.0), (300.0, 300.0), 1, 0.7),
            candidate((0.0, 5.0), (100.0, 100.0), 2, 0.6),
        ];
        let once = non_max_suppression(&candidates, 0.45);
        let twice = non_max_suppression(&once, 0.45);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(&twice) {
            assert_eq!(a.bbox, b.bbox);
            assert_eq!(a.label, b.label);
        }
    }

    #[test]
    fn test_accepted_order_is_preserved() {
        let candidates = vec![
            candidate((0.0, 0.0), (10.0, 10.0), 1, 0.5),
            candidate((50.0, 50.0), (60.0, 60.0), 1, 0.9),
            candidate((100.0, 100.0), (110.0, 110.0), 1, 0.7),
        ];
        let picked = non_max_suppression(&candidates, 0.45);
        let confidences: Vec<f32> = picked.iter().map(|c| c.confidence).collect();
        assert_eq!(confidences, vec![0.5, 0.9, 0.7]);
    }

    #[test]
    fn test_zero_area_boxes_do_not_divide_by_zero() {
        let candidates = vec![
            candidate((0.0, 0.0), (5.0, 0.0), 1, 0.9),
            candidate((2.0, 0.0), (7.0, 0.0), 1, 0.8),
        ];
        // Zero union counts as non-overlapping, both are kept
        let picked = non_max_suppression(&candidates, 0.45);
        assert_eq!(picked.len(), 2);
    }
}
