#![forbid(unsafe_code)]

//! Constellation image pipeline.
//!
//! `sidera` wires the pure projection/rendering stage from `sidera-render` to an external
//! conditional image generator:
//!
//! 1. render the guide skeleton for the requested graph,
//! 2. turn it into an edge-map control image,
//! 3. build prompts (translating non-ASCII names when a [`Translator`] is configured),
//! 4. ask the [`ImageGenerator`] for the final image and store it under the output root.
//!
//! [`generate_simple`] skips the generator and stores the skeleton directly.

pub mod generate;
pub mod pipeline;
pub mod prompt;
pub mod store;
pub mod translate;

pub use generate::{GenerateError, GenerationRequest, ImageGenerator};
pub use pipeline::{ConstellationImage, ConstellationPipeline, generate_simple};
pub use prompt::{DEFAULT_BASE_PROMPT, NEGATIVE_PROMPT, Prompts, build_prompts};
pub use store::{OutputStore, validate_project_id};
pub use translate::{Passthrough, TranslateError, Translator, needs_translation, prompt_name};

pub use sidera_core::{
    Constellation, ConstellationRequest, Edge, EdgeThresholds, ErrorClass, GenerationParams,
    Node, OutputOptions, Position, RenderOptions, SideraConfig,
};
pub use sidera_render::{PixelMap, PixelPosition, RgbImage, project, render_control, render_skeleton};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Render(#[from] sidera_render::Error),
    #[error(transparent)]
    Config(#[from] sidera_core::Error),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("invalid project id {id:?}")]
    InvalidProjectId { id: String },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Whether the failure was caused by the request rather than by the environment.
    pub fn is_client_error(&self) -> bool {
        match self {
            PipelineError::Render(err) => err.input_class() == Some(ErrorClass::Validation),
            PipelineError::InvalidProjectId { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
