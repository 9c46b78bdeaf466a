use crate::generate::{GenerationRequest, ImageGenerator};
use crate::prompt::build_prompts;
use crate::store::{OutputStore, validate_project_id};
use crate::translate::{Passthrough, Translator, prompt_name};
use crate::Result;
use serde::Serialize;
use sidera_core::{ConstellationRequest, RenderOptions, SideraConfig};
use sidera_render::{canny, render_skeleton};
use std::path::PathBuf;

/// What a caller gets back for a finished image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstellationImage {
    pub image_url: String,
    pub message: String,
    #[serde(skip)]
    pub path: PathBuf,
}

/// Renders only the skeleton and stores it as the final image.
///
/// Used when no generator is available.
pub fn generate_simple(
    store: &OutputStore,
    options: &RenderOptions,
    request: &ConstellationRequest,
) -> Result<ConstellationImage> {
    let id = validate_project_id(&request.project_id)?;
    let skeleton = render_skeleton(&request.constellation, options)?;
    let path = store.save_image(id, &skeleton)?;
    Ok(ConstellationImage {
        image_url: store.public_url(id)?,
        message: "Skeleton image generated (no AI enhancement)".to_string(),
        path,
    })
}

/// Skeleton, edge map, generator, output store.
///
/// Owns the generator and keeps track of whether it has been acquired, so repeated requests
/// reuse the loaded resources.
pub struct ConstellationPipeline<G, T = Passthrough> {
    config: SideraConfig,
    store: OutputStore,
    generator: G,
    translator: T,
    ready: bool,
}

impl<G: ImageGenerator> ConstellationPipeline<G, Passthrough> {
    pub fn new(config: SideraConfig, generator: G) -> Self {
        Self::with_translator(config, generator, Passthrough)
    }
}

impl<G: ImageGenerator, T: Translator> ConstellationPipeline<G, T> {
    pub fn with_translator(config: SideraConfig, generator: G, translator: T) -> Self {
        let store = OutputStore::new(&config.output);
        Self {
            config,
            store,
            generator,
            translator,
            ready: false,
        }
    }

    pub fn config(&self) -> &SideraConfig {
        &self.config
    }

    pub fn store(&self) -> &OutputStore {
        &self.store
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Acquires the generator if it is not loaded yet.
    pub fn acquire(&mut self) -> Result<()> {
        if !self.ready {
            tracing::info!("acquiring image generator");
            self.generator.acquire()?;
            self.ready = true;
        }
        Ok(())
    }

    pub fn shutdown(&mut self) {
        if self.ready {
            tracing::info!("releasing image generator");
            self.generator.shutdown();
            self.ready = false;
        }
    }

    pub fn generate(&mut self, request: &ConstellationRequest) -> Result<ConstellationImage> {
        let id = validate_project_id(&request.project_id)?;
        let params = self.config.generation;
        params.validate()?;

        let skeleton = render_skeleton(&request.constellation, &self.config.render)?;
        let control = canny(&skeleton, params.edge_thresholds);
        self.store.save_skeleton(id, &skeleton)?;

        self.acquire()?;

        let name = prompt_name(&self.translator, &request.constellation_name);
        let prompts = build_prompts(&name, request.prompt.as_deref());
        tracing::debug!(project_id = id, prompt = %prompts.prompt, "generating constellation");

        let image = self.generator.generate(&GenerationRequest {
            control_image: &control,
            prompt: &prompts.prompt,
            negative_prompt: &prompts.negative_prompt,
            seed: params.seed,
            steps: params.steps,
            guidance_scale: params.guidance_scale,
            conditioning_strength: params.conditioning_strength,
        })?;

        let path = self.store.save_image(id, &image)?;
        Ok(ConstellationImage {
            image_url: self.store.public_url(id)?,
            message: format!(
                "Constellation '{}' generated successfully",
                request.constellation_name
            ),
            path,
        })
    }

    /// Skeleton-only variant that never touches the generator.
    pub fn generate_simple(&self, request: &ConstellationRequest) -> Result<ConstellationImage> {
        generate_simple(&self.store, &self.config.render, request)
    }
}
