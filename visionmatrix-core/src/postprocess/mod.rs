pub mod decode;
pub mod letterbox;
pub mod nms;
pub mod remap;
