use image::DynamicImage;
use ort::{
    execution_providers::CPUExecutionProvider,
    session::{
        Session,
        builder::{GraphOptimizationLevel, SessionBuilder},
    },
};
use snafu::ResultExt;

use crate::{
    error::{OrtInitSnafu, VisionError},
    postprocess::letterbox::TransformContext,
};

/// Static description of one deployable model: tensor types, default slot
/// names and the configuration consumed by its session.
pub trait Model {
    type Input;
    type Output;
    type Config;

    /// Input slot name to fall back on when the session metadata has none.
    const INPUT_NAME: &'static str;
    /// Output slot name to fall back on when the session metadata has none.
    const OUTPUT_NAME: &'static str;
    const MODEL_NAME: &'static str;

    fn config(&self) -> &Self::Config;
}

/// One full preprocess → infer → postprocess pass over an inference session.
///
/// The engine behind `infer` is a black box: it takes the working tensor and
/// either returns the prediction tensor or fails. `preprocess` returns the
/// [`TransformContext`] that `postprocess` consumes, so a single call can
/// never mix transform parameters between boxes.
pub trait OnnxSession<M: Model> {
    type Output;

    fn preprocess(
        &self,
        image: &DynamicImage,
    ) -> Result<(M::Input, TransformContext), VisionError>;

    fn infer(&mut self, input: M::Input) -> Result<M::Output, VisionError>;

    fn postprocess(
        &self,
        output: M::Output,
        ctx: &TransformContext,
        prob_threshold: f32,
    ) -> Result<Self::Output, VisionError>;

    fn run(
        &mut self,
        image: &DynamicImage,
        prob_threshold: f32,
    ) -> Result<Self::Output, VisionError> {
        let (input, ctx) = self.preprocess(image)?;

        let output = self.infer(input)?;

        self.postprocess(output, &ctx, prob_threshold)
    }
}

/// common session builder
pub fn session_builder() -> Result<SessionBuilder, VisionError> {
    let session_builder = Session::builder()
        .context(OrtInitSnafu { stage: "builder" })?
        .with_execution_providers(vec![
            #[cfg(all(feature = "coreml", target_os = "macos"))]
            {
                use ort::execution_providers::CoreMLExecutionProvider;
                use ort::execution_providers::coreml::*;
                CoreMLExecutionProvider::default()
                    .with_model_format(CoreMLModelFormat::MLProgram)
                    .build()
            },
            #[cfg(feature = "cuda")]
            {
                use ort::execution_providers::CUDAExecutionProvider;
                CUDAExecutionProvider::default().build()
            },
            CPUExecutionProvider::default().build(),
        ])
        .context(OrtInitSnafu { stage: "provider" })?
        .with_optimization_level(GraphOptimizationLevel::Level1)
        .context(OrtInitSnafu {
            stage: "optimization",
        })?
        .with_intra_threads(4)
        .context(OrtInitSnafu {
            stage: "intra-threads",
        })?;

    Ok(session_builder)
}
