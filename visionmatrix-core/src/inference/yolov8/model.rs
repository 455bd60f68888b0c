use derive_builder::Builder;
use ndarray::{Array2, Array4};

use crate::{
    consts::{DEFAULT_TARGET_SIZE, LETTERBOX_FILL, NMS_IOU_THRESHOLD, PAD_STRIDE},
    inference::model::Model,
    postprocess::{decode::OutputLayout, letterbox::LetterboxPolicy},
};

pub struct Yolov8 {
    config: Yolov8Config,
}

pub type Yolov8Input = Array4<f32>;
/// Prediction tensor with the batch axis already dropped.
pub type Yolov8Output = Array2<f32>;

/// Deployment configuration for one exported YOLOv8 model.
///
/// The letterbox policy and output layout exist because the model family is
/// exported with two incompatible conventions for each; both are deployment
/// facts, fixed per model, and never inferred from tensor shape (only the
/// class count is, as attributes - 4).
#[derive(Clone, Debug, Builder)]
#[builder(default)]
pub struct Yolov8Config {
    pub target_size: u32,
    pub stride: u32,
    /// Letterbox padding fill, pre-normalization.
    pub fill_value: f32,
    pub letterbox: LetterboxPolicy,
    pub layout: OutputLayout,
    pub iou_threshold: f32,
    /// Sort candidates by descending confidence before suppression.
    ///
    /// The observed reference pipeline suppresses in decode order, which
    /// makes NMS priority an accident of grid traversal; the default here is
    /// the standard highest-confidence-first behavior. Set to `false` to
    /// reproduce the observed pipeline exactly.
    pub sort_candidates: bool,
}

impl Default for Yolov8Config {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            stride: PAD_STRIDE,
            fill_value: LETTERBOX_FILL,
            letterbox: LetterboxPolicy::CenteredSquare,
            layout: OutputLayout::BoxesAsColumns,
            iou_threshold: NMS_IOU_THRESHOLD,
            sort_candidates: true,
        }
    }
}

impl Yolov8 {
    pub fn new(config: Yolov8Config) -> Self {
        Self { config }
    }
}

impl Model for Yolov8 {
    type Input = Yolov8Input;
    type Output = Yolov8Output;
    type Config = Yolov8Config;

    const INPUT_NAME: &'static str = "images";

    const OUTPUT_NAME: &'static str = "output0";

    const MODEL_NAME: &'static str = "yolov8";

    fn config(&self) -> &Self::Config {
        &self.config
    }
}
