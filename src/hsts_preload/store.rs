//! Dataset persistence.
//!
//! The file is pretty-printed JSON (2-space indent, keys sorted at every
//! level). Writes go straight to the target path: there is no
//! temp-file-then-rename step, so a crash mid-write can leave a partial
//! file, and two refreshes must not target the same path at once.

use std::path::Path;

use tokio::fs;

use crate::error_handling::PreloadError;

use super::models::HstsPreloadDataset;

impl HstsPreloadDataset {
    /// Renders the dataset exactly as it is written to disk.
    pub fn to_pretty_json(&self) -> Result<String, PreloadError> {
        serde_json::to_string_pretty(self).map_err(PreloadError::Encode)
    }

    /// Writes the dataset to `path`, creating parent directories.
    pub async fn save(&self, path: &Path) -> Result<(), PreloadError> {
        // Render first so an encoding failure never touches the file
        let json = self.to_pretty_json()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| PreloadError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        fs::write(path, json)
            .await
            .map_err(|source| PreloadError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Reads a dataset previously written by [`save`](Self::save).
    pub async fn load(path: &Path) -> Result<Self, PreloadError> {
        let json = fs::read_to_string(path)
            .await
            .map_err(|source| PreloadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&json).map_err(PreloadError::Decode)
    }
}
