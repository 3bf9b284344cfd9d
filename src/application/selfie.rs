use crate::domain::ports::CameraBox;
use crate::domain::session::ImagePayload;
use crate::error::{KioskError, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No stream open; only "start" is enabled.
    #[default]
    Idle,
    /// Live preview; "capture" is enabled.
    Live,
    /// A frame has been taken; "retake" is enabled.
    Frozen,
}

/// Sequences the camera port behind the quick-selfie controls.
pub struct SelfieStation {
    camera: CameraBox,
    state: CaptureState,
}

impl SelfieStation {
    pub fn new(camera: CameraBox) -> Self {
        Self {
            camera,
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Opens the live stream, restarting it if one is already open.
    ///
    /// On failure the station stays idle so the customer can try again.
    pub async fn start(&mut self) -> Result<()> {
        if self.state != CaptureState::Idle {
            self.stop();
        }
        match self.camera.start().await {
            Ok(()) => {
                self.state = CaptureState::Live;
                debug!("camera stream started");
                Ok(())
            }
            Err(e) => {
                self.state = CaptureState::Idle;
                Err(match e {
                    KioskError::CameraUnavailable(_) => e,
                    other => KioskError::CameraUnavailable(Box::new(other)),
                })
            }
        }
    }

    /// Freezes a frame. `None` when no live stream is open.
    pub fn capture(&mut self) -> Result<Option<ImagePayload>> {
        if self.state != CaptureState::Live {
            return Ok(None);
        }
        let frame = self.camera.capture()?;
        self.state = CaptureState::Frozen;
        Ok(Some(frame))
    }

    /// Drops the frozen frame and goes back to the live preview.
    /// Returns `false` when there was nothing to retake.
    pub fn retake(&mut self) -> bool {
        if self.state != CaptureState::Frozen {
            return false;
        }
        self.state = CaptureState::Live;
        true
    }

    /// Releases the camera. A no-op when idle.
    pub fn stop(&mut self) {
        if self.state != CaptureState::Idle {
            self.camera.stop();
            self.state = CaptureState::Idle;
            debug!("camera stream released");
        }
    }
}
