use std::path::Path;

use image::DynamicImage;
use ndarray::{Axis, Ix2};
use ort::{
    session::{Session, builder::SessionBuilder},
    value::TensorRef,
};
use snafu::{OptionExt, ResultExt};

use crate::{
    analysis::object::Candidate,
    error::*,
    inference::{
        model::{Model, OnnxSession},
        yolov8::model::Yolov8,
    },
    postprocess::{
        decode::decode,
        letterbox::{Letterbox, TransformContext},
        nms::{non_max_suppression, sort_by_confidence},
        remap::remap,
    },
};

pub struct YoloSession<M: Model> {
    session: Session,
    model: M,
    input_name: String,
    output_name: String,
}

impl YoloSession<Yolov8> {
    /// Loads the model artifact from a file path.
    pub fn from_file(
        builder: SessionBuilder,
        model: Yolov8,
        path: &Path,
    ) -> Result<Self, VisionError> {
        let session = builder
            .commit_from_file(path)
            .context(OrtInitSnafu { stage: "commit" })?;

        Ok(Self::wrap(session, model))
    }

    /// Loads the model artifact from bytes already in memory.
    pub fn from_memory(
        builder: SessionBuilder,
        model: Yolov8,
        bytes: &[u8],
    ) -> Result<Self, VisionError> {
        let session = builder
            .commit_from_memory(bytes)
            .context(OrtInitSnafu { stage: "commit" })?;

        Ok(Self::wrap(session, model))
    }

    fn wrap(session: Session, model: Yolov8) -> Self {
        // Slot names come from the session metadata when present; graphs
        // exported without names fall back to the model's defaults.
        let input_name = session
            .inputs
            .first()
            .map(|input| &input.name)
            .cloned()
            .unwrap_or_else(|| Yolov8::INPUT_NAME.to_string());
        let output_name = session
            .outputs
            .first()
            .map(|output| &output.name)
            .cloned()
            .unwrap_or_else(|| Yolov8::OUTPUT_NAME.to_string());

        Self {
            session,
            model,
            input_name,
            output_name,
        }
    }
}

impl OnnxSession<Yolov8> for YoloSession<Yolov8> {
    /// Surviving boxes, remapped into original-image space. Attaching class
    /// names is the detector facade's job.
    type Output = Vec<Candidate>;

    fn preprocess(
        &self,
        image: &DynamicImage,
    ) -> Result<(<Yolov8 as Model>::Input, TransformContext), VisionError> {
        let config = self.model.config();

        let letterbox = Letterbox {
            target_size: config.target_size,
            stride: config.stride,
            fill: config.fill_value,
            policy: config.letterbox,
        };

        letterbox.apply(image)
    }

    fn infer(
        &mut self,
        input: <Yolov8 as Model>::Input,
    ) -> Result<<Yolov8 as Model>::Output, VisionError> {
        let outputs = self
            .session
            .run(ort::inputs![
                self.input_name.as_str() => TensorRef::from_array_view(&input).context(TensorSnafu { stage: "input" })?
            ])
            .context(InferenceSnafu {})?;

        let tensor = outputs
            .get(self.output_name.as_str())
            .context(NotFoundOutputSnafu {
                output_name: self.output_name.as_str(),
            })?
            .try_extract_array::<f32>()
            .context(TensorSnafu { stage: "extract" })?;

        // Exporters emit either [batch, attrs, grids] or a pre-squeezed 2-D
        // tensor; anything else is a malformed output.
        let tensor = if tensor.ndim() == 3 {
            tensor.index_axis_move(Axis(0), 0)
        } else {
            tensor
        };
        let output = tensor
            .into_dimensionality::<Ix2>()
            .context(ShapeSnafu { stage: "output" })?
            .to_owned();

        Ok(output)
    }

    fn postprocess(
        &self,
        output: <Yolov8 as Model>::Output,
        ctx: &TransformContext,
        prob_threshold: f32,
    ) -> Result<Self::Output, VisionError> {
        let config = self.model.config();

        let mut candidates = decode(output.view(), config.layout, prob_threshold);
        if config.sort_candidates {
            sort_by_confidence(&mut candidates);
        }

        let picked = non_max_suppression(&candidates, config.iou_threshold);

        Ok(picked.iter().map(|candidate| remap(candidate, ctx)).collect())
    }
}
