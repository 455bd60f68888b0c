use glam::Vec2;
use ndarray::ArrayView2;

use crate::{
    analysis::{bbox::Bbox, object::Candidate},
    consts::CXYWH_OFFSET,
};

/// Memory layout of the prediction tensor.
///
/// Both layouts encode the same logical mapping
/// `grid index → [cx, cy, w, h, score_0 .. score_{C-1}]`; exporters differ in
/// which axis enumerates grid positions. The decoder treats them as
/// equivalent views and the choice is part of the deployment configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputLayout {
    /// Shape `(num_grid, 4 + C)`: one row per grid position.
    BoxesAsRows,
    /// Shape `(4 + C, num_grid)`: one column per grid position.
    BoxesAsColumns,
}

/// Decodes the raw prediction tensor into candidate boxes.
///
/// For every grid position the best class is picked by scanning scores in
/// increasing index order with a strict `>` comparison, so ties resolve to
/// the lowest class index. A candidate is emitted when its best score is at
/// least `prob_threshold` (inclusive). Rects stay in working-tensor space;
/// mapping back to original pixels is the remap stage's job.
///
/// Grid and class counts are derived from the tensor shape (classes =
/// attributes - 4), so differently-sized model variants decode without
/// configuration. A tensor with no grid positions or no class attributes
/// yields an empty list, not an error.
pub fn decode(
    output: ArrayView2<'_, f32>,
    layout: OutputLayout,
    prob_threshold: f32,
) -> Vec<Candidate> {
    let (num_grid, num_attrs) = match layout {
        OutputLayout::BoxesAsRows => (output.nrows(), output.ncols()),
        OutputLayout::BoxesAsColumns => (output.ncols(), output.nrows()),
    };
    if num_attrs <= CXYWH_OFFSET {
        return Vec::new();
    }
    let num_classes = num_attrs - CXYWH_OFFSET;

    let at = |grid: usize, attr: usize| match layout {
        OutputLayout::BoxesAsRows => output[[grid, attr]],
        OutputLayout::BoxesAsColumns => output[[attr, grid]],
    };

    let mut candidates = Vec::new();
    for grid in 0..num_grid {
        let mut label = 0;
        let mut confidence = at(grid, CXYWH_OFFSET);
        for class in 1..num_classes {
            let score = at(grid, CXYWH_OFFSET + class);
            if score > confidence {
                label = class;
                confidence = score;
            }
        }

        if confidence >= prob_threshold {
            let center = Vec2::new(at(grid, 0), at(grid, 1));
            let size = Vec2::new(at(grid, 2), at(grid, 3));
            candidates.push(Candidate {
                bbox: Bbox::from_center_size(center, size),
                label,
                confidence,
            });
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, Axis};

    use super::*;

    /// Builds a rows-layout tensor from per-grid attribute vectors.
    fn rows_tensor(rows: &[Vec<f32>]) -> Array2<f32> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Array2::from_shape_vec((rows.len(), cols), flat).unwrap()
    }

    #[test]
    fn test_decode_emits_corner_form_boxes() {
        let tensor = rows_tensor(&[vec![100.0, 240.0, 100.0, 100.0, 0.1, 0.9]]);
        let candidates = decode(tensor.view(), OutputLayout::BoxesAsRows, 0.25);

        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        assert_eq!(candidate.label, 1);
        assert_eq!(candidate.confidence, 0.9);
        assert_eq!(candidate.bbox.min, Vec2::new(50.0, 190.0));
        assert_eq!(candidate.bbox.max, Vec2::new(150.0, 290.0));
    }

    #[test]
    fn test_layouts_are_equivalent_views() {
        let rows = rows_tensor(&[
            vec![10.0, 20.0, 4.0, 6.0, 0.3, 0.7, 0.1],
            vec![50.0, 60.0, 8.0, 8.0, 0.6, 0.2, 0.4],
        ]);
        let columns = rows.clone().reversed_axes();

        let from_rows = decode(rows.view(), OutputLayout::BoxesAsRows, 0.25);
        let from_columns = decode(columns.view(), OutputLayout::BoxesAsColumns, 0.25);

        assert_eq!(from_rows.len(), from_columns.len());
        for (a, b) in from_rows.iter().zip(&from_columns) {
            assert_eq!(a.bbox, b.bbox);
            assert_eq!(a.label, b.label);
            assert_eq!(a.confidence, b.confidence);
        }
    }

    #[test]
    fn test_argmax_tie_breaks_to_lowest_index() {
        let tensor = rows_tensor(&[vec![0.0, 0.0, 2.0, 2.0, 0.5, 0.8, 0.8]]);
        let candidates = decode(tensor.view(), OutputLayout::BoxesAsRows, 0.25);
        assert_eq!(candidates[0].label, 1);
    }

    #[test]
    fn test_threshold_bound_is_inclusive() {
        let at_threshold = rows_tensor(&[vec![0.0, 0.0, 2.0, 2.0, 0.25]]);
        assert_eq!(
            decode(at_threshold.view(), OutputLayout::BoxesAsRows, 0.25).len(),
            1
        );

        let below = rows_tensor(&[vec![0.0, 0.0, 2.0, 2.0, 0.25 - f32::EPSILON]]);
        assert!(decode(below.view(), OutputLayout::BoxesAsRows, 0.25).is_empty());
    }

    #[test]
    fn test_degenerate_tensors_decode_to_nothing() {
        let no_grids = Array2::<f32>::zeros((0, 84));
        assert!(decode(no_grids.view(), OutputLayout::BoxesAsRows, 0.25).is_empty());

        let no_grids_cols = Array2::<f32>::zeros((84, 0));
        assert!(decode(no_grids_cols.view(), OutputLayout::BoxesAsColumns, 0.25).is_empty());

        // Only box attributes, no class scores at all
        let no_classes = Array2::<f32>::zeros((10, 4));
        assert!(decode(no_classes.view(), OutputLayout::BoxesAsRows, 0.25).is_empty());
    }

    #[test]
    fn test_class_count_derived_from_shape() {
        // 7 attributes -> 3 classes; highest index must be reachable
        let mut tensor = Array2::<f32>::zeros((1, 7));
        tensor.index_axis_mut(Axis(0), 0)[6] = 0.9;
        let candidates = decode(tensor.view(), OutputLayout::BoxesAsRows, 0.5);
        assert_eq!(candidates[0].label, 2);
    }
}
