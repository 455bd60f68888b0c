use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum VisionError {
    #[snafu(display("Ort Session init stage `{}` error: {}", stage, source))]
    OrtInit {
        source: ort::error::Error,
        stage: String,
    },
    #[snafu(display("Build Tensor for `{}` error: {}", stage, source))]
    Tensor {
        source: ort::error::Error,
        stage: String,
    },
    #[snafu(display("Onnx Inference error: {}", source))]
    Inference { source: ort::error::Error },
    #[snafu(display("Onnx Output can not found {}", output_name))]
    NotFoundOutput { output_name: String },
    #[snafu(display("Ndarray Shape error at stage `{}`: {}", stage, source))]
    Shape {
        source: ndarray::ShapeError,
        stage: String,
    },
    #[snafu(display("Input image has zero area ({}x{})", width, height))]
    EmptyImage { width: u32, height: u32 },
    #[snafu(display("Class catalog parse error: {}", source))]
    CatalogParse { source: serde_json::Error },
}

impl VisionError {
    /// True for failures of the external inference engine. A caller running
    /// `detect` per frame may treat these as transient and retry on the next
    /// frame instead of tearing the pipeline down.
    pub fn is_inference_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Inference { .. }
                | Self::NotFoundOutput { .. }
                | Self::Shape { .. }
                | Self::Tensor { .. }
        )
    }
}
