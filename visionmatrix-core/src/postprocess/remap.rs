use glam::Vec2;

use crate::{
    analysis::{bbox::Bbox, object::Candidate},
    postprocess::letterbox::TransformContext,
};

/// Maps a working-space candidate back into original-image pixels.
///
/// Inverts the letterbox transform corner-wise: `x' = (x - pad_x) / scale`
/// and likewise for y. The origin is clamped to `>= 0` and width/height are
/// floored at zero afterwards, so a box hanging past the left/top edge is
/// truncated rather than discarded. The right/bottom image edge is *not*
/// clamped here; callers needing strictly in-bounds boxes clamp the result
/// against the image dimensions themselves (see [`Bbox::clamp`]).
pub fn remap(candidate: &Candidate, ctx: &TransformContext) -> Candidate {
    let x0 = (candidate.bbox.min.x - ctx.pad_x) / ctx.scale;
    let y0 = (candidate.bbox.min.y - ctx.pad_y) / ctx.scale;
    let x1 = (candidate.bbox.max.x - ctx.pad_x) / ctx.scale;
    let y1 = (candidate.bbox.max.y - ctx.pad_y) / ctx.scale;

    let min = Vec2::new(x0.max(0.0), y0.max(0.0));
    let max = Vec2::new(x1.max(min.x), y1.max(min.y));

    Candidate {
        bbox: Bbox::new(min, max),
        ..*candidate
    }
}
