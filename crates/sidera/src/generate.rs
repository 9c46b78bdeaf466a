//! Capability boundary for the conditional image generator.
//!
//! The generator is a heavy resource (model weights, device memory), so it has an explicit
//! lifecycle: the pipeline calls [`ImageGenerator::acquire`] once before the first request and
//! [`ImageGenerator::shutdown`] when it is torn down. Implementations live outside this crate.

use sidera_render::RgbImage;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generator unavailable: {message}")]
    Unavailable { message: String },
    #[error("generation failed: {message}")]
    Failed { message: String },
}

/// Everything the generator needs for one image.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Edge-map control image constraining the output structure.
    pub control_image: &'a RgbImage,
    pub prompt: &'a str,
    pub negative_prompt: &'a str,
    pub seed: u64,
    pub steps: u32,
    pub guidance_scale: f32,
    /// Weight of `control_image` against the prompt, in `[0, 1]`.
    pub conditioning_strength: f32,
}

pub trait ImageGenerator {
    /// Loads whatever the generator needs. Called before the first `generate`, and again after a
    /// `shutdown`.
    fn acquire(&mut self) -> Result<(), GenerateError>;

    fn generate(&self, request: &GenerationRequest<'_>) -> Result<RgbImage, GenerateError>;

    /// Releases the resources taken by `acquire`.
    fn shutdown(&mut self);
}

impl<G: ImageGenerator + ?Sized> ImageGenerator for Box<G> {
    fn acquire(&mut self) -> Result<(), GenerateError> {
        (**self).acquire()
    }

    fn generate(&self, request: &GenerationRequest<'_>) -> Result<RgbImage, GenerateError> {
        (**self).generate(request)
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}
