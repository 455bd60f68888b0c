use std::path::Path;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::{
    analysis::{
        labels::ClassCatalog,
        object::{Candidate, Detection},
    },
    error::VisionError,
    inference::{
        model::{OnnxSession, session_builder},
        yolov8::{
            model::{Yolov8, Yolov8Config},
            session::YoloSession,
        },
    },
};

/// Caller-facing detection facade.
///
/// Owns the loaded model handle (if any) and the class catalog, and composes
/// letterbox → inference → decode → suppression → remap into one
/// [`detect`](Detector::detect) call. A detector starts unloaded; `detect`
/// before a successful load logs a warning and returns no detections rather
/// than failing.
///
/// `detect` takes `&mut self`: one call owns the model handle for its whole
/// duration, because the engine's per-call extraction state is not safely
/// shared. Callers invoking `detect` from several threads must wrap the
/// detector in a single `Mutex` spanning the entire call.
pub struct Detector {
    config: Yolov8Config,
    catalog: ClassCatalog,
    session: Option<YoloSession<Yolov8>>,
}

impl Detector {
    /// Creates an unloaded detector with the given deployment configuration
    /// and class catalog.
    pub fn new(config: Yolov8Config, catalog: ClassCatalog) -> Self {
        Self {
            config,
            catalog,
            session: None,
        }
    }

    /// Loads the model artifact from a file path.
    ///
    /// On failure the detector remains (or becomes) unloaded and the error
    /// is reported to the caller; subsequent `detect` calls degrade to empty
    /// results instead of crashing.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), VisionError> {
        self.session = None;
        let model = Yolov8::new(self.config.clone());
        let session = YoloSession::from_file(session_builder()?, model, path.as_ref())?;
        self.session = Some(session);
        Ok(())
    }

    /// Loads the model artifact from bytes already in memory.
    pub fn load_from_memory(&mut self, bytes: &[u8]) -> Result<(), VisionError> {
        self.session = None;
        let model = Yolov8::new(self.config.clone());
        let session = YoloSession::from_memory(session_builder()?, model, bytes)?;
        self.session = Some(session);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    /// Resolves a label index to its class name, with the `"unknown"`
    /// sentinel for out-of-range labels.
    pub fn class_name(&self, label: usize) -> &str {
        self.catalog.name(label)
    }

    /// Runs one detection pass and returns labeled boxes in original-image
    /// pixels, ordered as the suppression stage emitted them.
    ///
    /// The image buffer is only read for the duration of this call; nothing
    /// is retained afterwards. Failure modes: an unloaded detector or a
    /// zero-area image produce `Ok(vec![])`; an engine failure surfaces as
    /// an error for which [`VisionError::is_inference_unavailable`] is true,
    /// so a per-frame caller can retry on the next frame.
    #[tracing::instrument(skip_all, fields(threshold = prob_threshold))]
    pub fn detect(
        &mut self,
        image: &DynamicImage,
        prob_threshold: f32,
    ) -> Result<Vec<Detection>, VisionError> {
        let Some(session) = self.session.as_mut() else {
            warn!("detect called before a model was loaded");
            return Ok(Vec::new());
        };

        let remapped = match session.run(image, prob_threshold) {
            Ok(candidates) => candidates,
            Err(VisionError::EmptyImage { width, height }) => {
                debug!(width, height, "zero-area input image, no detections");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };
        debug!(count = remapped.len(), "detections after suppression");

        Ok(remapped
            .into_iter()
            .map(|candidate| self.to_detection(candidate))
            .collect())
    }

    /// Like [`detect`](Detector::detect), but keeps only detections of the
    /// named class. An unknown class name logs a warning and yields no
    /// detections, matching the catalog's soft-failure contract.
    pub fn detect_class(
        &mut self,
        image: &DynamicImage,
        prob_threshold: f32,
        class_name: &str,
    ) -> Result<Vec<Detection>, VisionError> {
        let Some(label) = self.catalog.index_of(class_name) else {
            warn!(class = class_name, "unknown class name, no detections");
            return Ok(Vec::new());
        };

        let mut detections = self.detect(image, prob_threshold)?;
        detections.retain(|detection| detection.label == label);
        Ok(detections)
    }

    fn to_detection(&self, candidate: Candidate) -> Detection {
        Detection {
            label: candidate.label,
            class_name: self.catalog.name(candidate.label).to_string(),
            confidence: candidate.confidence,
            x: candidate.bbox.min.x,
            y: candidate.bbox.min.y,
            width: candidate.bbox.width(),
            height: candidate.bbox.height(),
        }
    }
}
