use snafu::ResultExt;

use crate::{
    consts::UNKNOWN_CLASS,
    error::{CatalogParseSnafu, VisionError},
};

/// The 80 COCO class names YOLOv8 checkpoints ship with, in label order.
pub const COCO_NAMES: [&str; 80] = [
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];

/// An ordered table of human-readable class names, indexed by label.
///
/// The catalog is a configuration artifact loaded alongside the model
/// weights, so one pipeline can serve differently-trained models. It is
/// read-only after construction. An out-of-range label resolves to the
/// [`UNKNOWN_CLASS`] sentinel instead of failing.
#[derive(Clone, Debug)]
pub struct ClassCatalog {
    names: Vec<String>,
}

impl ClassCatalog {
    /// Builds a catalog from an ordered list of names.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Parses a catalog from a JSON array of strings, e.g.
    /// `["person", "bicycle", "car"]`.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, VisionError> {
        let names: Vec<String> = serde_json::from_slice(bytes).context(CatalogParseSnafu)?;
        Ok(Self::new(names))
    }

    /// The built-in COCO-80 catalog the stock YOLOv8 checkpoints use.
    pub fn coco() -> Self {
        Self::new(COCO_NAMES.iter().map(|name| name.to_string()).collect())
    }

    /// Number of classes in the catalog.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolves a label index to its class name.
    ///
    /// Returns the [`UNKNOWN_CLASS`] sentinel for indices past the end of
    /// the catalog, never panics.
    pub fn name(&self, label: usize) -> &str {
        self.names
            .get(label)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CLASS)
    }

    /// Finds the label index for a class name, matching ASCII
    /// case-insensitively.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
    }
}
