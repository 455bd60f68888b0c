/// The number of values representing bounding box coordinates in YOLO format.
///
/// YOLO format uses 4 values: [center_x, center_y, width, height]
/// This constant defines the offset where class score data begins
/// in the model output tensor.
pub const CXYWH_OFFSET: usize = 4;

/// Side length of the square working resolution the model was exported with.
///
/// Input images are letterboxed to fit within this size before inference.
pub const DEFAULT_TARGET_SIZE: u32 = 640;

/// Stride the padded tensor dimensions are rounded up to under the
/// pad-to-stride letterbox policy. YOLOv8 heads downsample by at most 32,
/// so both padded dimensions must be multiples of 32.
pub const PAD_STRIDE: u32 = 32;

/// Pixel value used to fill the letterbox padding, before normalization.
///
/// 114 is the gray the model family is trained with; using anything else
/// shifts scores near the padded borders.
pub const LETTERBOX_FILL: f32 = 114.0;

/// Default confidence threshold for accepting a detection.
///
/// Candidates whose best class score is below this value are discarded
/// during decoding. The bound is inclusive: a score exactly equal to the
/// threshold is kept. Callers can pass a different value per `detect` call.
pub const DEFAULT_PROB_THRESHOLD: f32 = 0.25;

/// IoU threshold for Non-Maximum Suppression.
///
/// When two boxes of the same class overlap with an IoU strictly greater
/// than this value, the lower-priority one is suppressed.
pub const NMS_IOU_THRESHOLD: f32 = 0.45;

/// Number of color channels in the working tensor. RGB, alpha is dropped.
pub const INPUT_CHANNELS: usize = 3;

/// Batch size for model inference. Single image per call.
pub const BATCH_SIZE: usize = 1;

/// Name returned for a class index the catalog does not know.
pub const UNKNOWN_CLASS: &str = "unknown";
