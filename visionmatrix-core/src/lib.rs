pub mod analysis;
pub mod consts;
pub mod error;
pub mod inference;
pub mod postprocess;

// Re-export commonly used types
pub use analysis::{
    bbox::Bbox,
    labels::ClassCatalog,
    object::{Candidate, Detection},
};
pub use error::VisionError;
pub use inference::{
    detector::Detector,
    yolov8::{Yolov8Config, Yolov8ConfigBuilder},
};
pub use postprocess::{
    decode::OutputLayout,
    letterbox::{LetterboxPolicy, TransformContext},
};
