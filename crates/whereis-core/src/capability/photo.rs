//! Photo import
//!
//! Copies a captured image into app-owned storage so the record keeps
//! pointing at a file the app controls. Files are named
//! `image_<unix millis>.<ext>`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::{info, warn};

use super::CapabilityError;

const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug, Clone)]
pub struct PhotoImporter {
    photos_dir: PathBuf,
}

impl PhotoImporter {
    pub fn new(photos_dir: impl Into<PathBuf>) -> Self {
        Self {
            photos_dir: photos_dir.into(),
        }
    }

    /// Copy `source` into the photos directory and return the new path
    pub async fn import(&self, source: &Path) -> Result<PathBuf, CapabilityError> {
        if source.as_os_str().is_empty() {
            return Err(CapabilityError::Cancelled);
        }

        fs::create_dir_all(&self.photos_dir).await.map_err(|e| {
            CapabilityError::Failed(format!(
                "Could not create photo directory {:?}: {}",
                self.photos_dir, e
            ))
        })?;

        let target = self.next_target(source).await;
        if let Err(e) = fs::copy(source, &target).await {
            warn!("failed to copy photo {:?}: {}", source, e);
            return Err(CapabilityError::Failed(format!(
                "Could not save photo {:?}: {}",
                source, e
            )));
        }

        info!("imported photo {:?} as {:?}", source, target);
        Ok(target)
    }

    /// First free `image_<millis>.<ext>` name, counting up from now
    async fn next_target(&self, source: &Path) -> PathBuf {
        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        let mut millis = Utc::now().timestamp_millis();
        loop {
            let candidate = self
                .photos_dir
                .join(format!("image_{}.{}", millis, extension));
            if !fs::try_exists(&candidate).await.unwrap_or(false) {
                return candidate;
            }
            millis += 1;
        }
    }
}
