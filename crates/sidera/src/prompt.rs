pub const DEFAULT_BASE_PROMPT: &str = "ethereal nebula constellation art";

pub const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, deformed, ugly, bad anatomy, \
watermark, text, signature, frame, border, cartoon, anime, \
oversaturated, overexposed, underexposed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub prompt: String,
    pub negative_prompt: String,
}

/// Builds the positive/negative prompt pair for a constellation named `name`.
///
/// `base` is the caller's free-form style hint; an empty or missing hint uses
/// [`DEFAULT_BASE_PROMPT`].
pub fn build_prompts(name: &str, base: Option<&str>) -> Prompts {
    let base = base.filter(|b| !b.is_empty()).unwrap_or(DEFAULT_BASE_PROMPT);
    let prompt = format!(
        "A breathtaking cosmic nebula scene of {name}, {base}, vibrant stars, ethereal glow, \
cosmic dust, dark deep space background, galaxy clusters, 8k resolution, \
cinematic lighting, ultra detailed, masterpiece"
    );
    Prompts {
        prompt,
        negative_prompt: NEGATIVE_PROMPT.to_string(),
    }
}
