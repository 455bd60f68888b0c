pub mod model;
pub mod session;

pub use model::{Yolov8, Yolov8Config, Yolov8ConfigBuilder};
pub use session::YoloSession;
