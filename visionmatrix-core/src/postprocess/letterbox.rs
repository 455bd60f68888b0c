use image::{DynamicImage, GenericImageView, imageops::FilterType};
use ndarray::Array4;
use snafu::ensure;

use crate::{
    consts::{BATCH_SIZE, DEFAULT_TARGET_SIZE, INPUT_CHANNELS, LETTERBOX_FILL, PAD_STRIDE},
    error::{EmptyImageSnafu, VisionError},
};

/// How the resized image is padded out to the tensor the model expects.
///
/// The two policies correspond to the two letterbox conventions found in the
/// wild for this model family. They produce different pad offsets, so the
/// policy must stay fixed for a deployment: decoding with one and remapping
/// with the other silently shifts every box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterboxPolicy {
    /// Pad to a fixed `target_size` × `target_size` square with the image
    /// centered, `floor(pad / 2)` on the leading edge.
    CenteredSquare,
    /// Pad each dimension up to the next multiple of `stride`, split with
    /// `floor(pad / 2)` leading and the remainder trailing. The tensor is
    /// generally not square under this policy.
    PadToStride,
}

/// Scale and pad offsets recorded while letterboxing one image.
///
/// Computed once per `detect` call and consumed once by the remap stage;
/// every box of a call must be remapped with the same context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformContext {
    /// Ratio of working-space pixels to original pixels, always > 0.
    pub scale: f32,
    /// Horizontal padding on the leading (left) edge, in working pixels.
    pub pad_x: f32,
    /// Vertical padding on the leading (top) edge, in working pixels.
    pub pad_y: f32,
}

/// Aspect-ratio-preserving resize plus padding to the model's input shape.
#[derive(Clone, Copy, Debug)]
pub struct Letterbox {
    pub target_size: u32,
    pub stride: u32,
    /// Padding fill, pre-normalization (0-255).
    pub fill: f32,
    pub policy: LetterboxPolicy,
}

impl Default for Letterbox {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            stride: PAD_STRIDE,
            fill: LETTERBOX_FILL,
            policy: LetterboxPolicy::CenteredSquare,
        }
    }
}

impl Letterbox {
    /// Resizes `image` to fit the target square, pads it per the policy and
    /// returns the normalized NCHW tensor together with the transform needed
    /// to map boxes back into original pixels.
    ///
    /// Pixels are normalized to `[0, 1]` with no mean subtraction; padding is
    /// filled with `fill / 255`. The only rejected input is a zero-area image.
    pub fn apply(
        &self,
        image: &DynamicImage,
    ) -> Result<(Array4<f32>, TransformContext), VisionError> {
        let (img_w, img_h) = image.dimensions();
        ensure!(
            img_w > 0 && img_h > 0,
            EmptyImageSnafu {
                width: img_w,
                height: img_h
            }
        );

        let scale = self.target_size as f32 / img_w.max(img_h) as f32;
        let new_w = ((img_w as f32 * scale).round() as u32).max(1);
        let new_h = ((img_h as f32 * scale).round() as u32).max(1);

        let (out_w, out_h) = match self.policy {
            LetterboxPolicy::CenteredSquare => (self.target_size, self.target_size),
            LetterboxPolicy::PadToStride => (
                new_w.div_ceil(self.stride) * self.stride,
                new_h.div_ceil(self.stride) * self.stride,
            ),
        };
        let pad_x = (out_w - new_w) / 2;
        let pad_y = (out_h - new_h) / 2;

        let resized = image.resize_exact(new_w, new_h, FilterType::Triangle);

        let mut tensor = Array4::from_elem(
            [BATCH_SIZE, INPUT_CHANNELS, out_h as usize, out_w as usize],
            self.fill / 255.0,
        );
        for (x, y, pixel) in resized.pixels() {
            let x = (x + pad_x) as usize;
            let y = (y + pad_y) as usize;
            let [r, g, b, _] = pixel.0;
            tensor[[0, 0, y, x]] = r as f32 / 255.0;
            tensor[[0, 1, y, x]] = g as f32 / 255.0;
            tensor[[0, 2, y, x]] = b as f32 / 255.0;
        }

        Ok((
            tensor,
            TransformContext {
                scale,
                pad_x: pad_x as f32,
                pad_y: pad_y as f32,
            },
        ))
    }
}
