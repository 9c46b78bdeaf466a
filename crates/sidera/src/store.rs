use crate::{PipelineError, Result};
use sidera_core::OutputOptions;
use sidera_render::{RgbImage, encode_png};
use std::path::{Path, PathBuf};

/// Checks that `raw` can be used as a file stem under the output root.
///
/// Accepts ASCII letters, digits, `-` and `_` only, which rules out separators, `..` and hidden
/// files.
pub fn validate_project_id(raw: &str) -> Result<&str> {
    let ok = !raw.is_empty()
        && raw
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if ok {
        Ok(raw)
    } else {
        Err(PipelineError::InvalidProjectId { id: raw.to_string() })
    }
}

/// Where finished images are written and how they are addressed publicly.
#[derive(Debug, Clone)]
pub struct OutputStore {
    root: PathBuf,
    url_prefix: String,
}

impl OutputStore {
    pub fn new(options: &OutputOptions) -> Self {
        Self {
            root: options.root.clone(),
            url_prefix: options.url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn image_path(&self, project_id: &str) -> Result<PathBuf> {
        let id = validate_project_id(project_id)?;
        Ok(self.root.join(format!("{id}.png")))
    }

    /// Path of the guide image kept next to the final image for debugging.
    pub fn skeleton_path(&self, project_id: &str) -> Result<PathBuf> {
        let id = validate_project_id(project_id)?;
        Ok(self.root.join(format!("{id}_skeleton.png")))
    }

    pub fn public_url(&self, project_id: &str) -> Result<String> {
        let id = validate_project_id(project_id)?;
        Ok(format!("{}/{id}.png", self.url_prefix))
    }

    pub fn save_image(&self, project_id: &str, image: &RgbImage) -> Result<PathBuf> {
        let path = self.image_path(project_id)?;
        self.write_png(&path, image)?;
        Ok(path)
    }

    pub fn save_skeleton(&self, project_id: &str, image: &RgbImage) -> Result<PathBuf> {
        let path = self.skeleton_path(project_id)?;
        self.write_png(&path, image)?;
        Ok(path)
    }

    fn write_png(&self, path: &Path, image: &RgbImage) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|source| PipelineError::Io {
            path: self.root.clone(),
            source,
        })?;
        let bytes = encode_png(image)?;
        std::fs::write(path, bytes).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "image saved");
        Ok(())
    }
}
