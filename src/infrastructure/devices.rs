use crate::domain::ports::{Camera, UploadSource};
use crate::domain::session::ImagePayload;
use crate::error::{KioskError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

fn media_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Camera for kiosks without capture hardware. Starting always fails.
pub struct UnavailableCamera;

#[async_trait]
impl Camera for UnavailableCamera {
    async fn start(&mut self) -> Result<()> {
        Err(KioskError::CameraUnavailable(Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no capture device configured",
        ))))
    }

    fn capture(&mut self) -> Result<ImagePayload> {
        Err(KioskError::CameraUnavailable(Box::new(std::io::Error::other(
            "no stream open",
        ))))
    }

    fn stop(&mut self) {}
}

/// Camera whose "feed" is a still image on disk, read when the stream starts.
pub struct StillImageCamera {
    path: PathBuf,
    frame: Option<ImagePayload>,
}

impl StillImageCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frame: None,
        }
    }
}

#[async_trait]
impl Camera for StillImageCamera {
    async fn start(&mut self) -> Result<()> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| KioskError::CameraUnavailable(Box::new(e)))?;
        self.frame = Some(ImagePayload::new(media_type_for(&self.path), bytes));
        Ok(())
    }

    fn capture(&mut self) -> Result<ImagePayload> {
        self.frame.clone().ok_or_else(|| {
            KioskError::CameraUnavailable(Box::new(std::io::Error::other("no stream open")))
        })
    }

    fn stop(&mut self) {
        self.frame = None;
    }
}

/// Reads uploaded backgrounds from the local filesystem.
pub struct FsUploadSource;

#[async_trait]
impl UploadSource for FsUploadSource {
    async fn read(&self, path: &Path) -> Result<ImagePayload> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| KioskError::UploadError(format!("{}: {}", path.display(), e)))?;
        Ok(ImagePayload::new(media_type_for(path), bytes))
    }
}
