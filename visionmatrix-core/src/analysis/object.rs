use serde::Serialize;

use crate::analysis::bbox::Bbox;

/// A decoded box before suppression and remapping.
///
/// The rect lives in working-tensor space until the remap stage rewrites it
/// into original-image pixels. Immutable once emitted by the decoder.
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    pub bbox: Bbox,
    /// Class index into the catalog.
    pub label: usize,
    /// Best class score for this grid position, in `[0, 1]`.
    pub confidence: f32,
}

/// A final detection in original-image pixel space.
///
/// This is the only type crossing the pipeline's outward boundary. The rect
/// is flattened to scalar fields so serialized output carries no geometry
/// types, and `x`, `y`, `width`, `height` are guaranteed non-negative.
#[derive(Clone, Debug, Serialize)]
pub struct Detection {
    pub label: usize,
    pub class_name: String,
    pub confidence: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}
