#[derive(Debug, thiserror::Error)]
#[error("translation failed: {message}")]
pub struct TranslateError {
    pub message: String,
}

/// Translates display names into the prompt language.
pub trait Translator {
    fn translate(&self, text: &str) -> Result<String, TranslateError>;
}

/// Identity translator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Translator for Passthrough {
    fn translate(&self, text: &str) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}

pub fn needs_translation(name: &str) -> bool {
    !name.is_ascii()
}

/// Returns the name to use in the prompt.
///
/// ASCII names pass through untouched. Other names go through `translator`; a failed
/// translation falls back to the original name.
pub fn prompt_name(translator: &dyn Translator, name: &str) -> String {
    if !needs_translation(name) {
        return name.to_string();
    }
    match translator.translate(name) {
        Ok(translated) => {
            tracing::info!(original = name, translated = %translated, "translated constellation name");
            translated
        }
        Err(err) => {
            tracing::warn!(error = %err, name, "using untranslated constellation name");
            name.to_string()
        }
    }
}
