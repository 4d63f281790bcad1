//! 통합 테스트 공용 fake 어댑터.

#![allow(dead_code)]

use async_trait::async_trait;
use framefit_app::workflow::AnalysisWorkflow;
use framefit_core::error::CoreError;
use framefit_core::models::analysis::AnalysisResult;
use framefit_core::models::image::ImageReference;
use framefit_core::models::permission::{Capability, PermissionStatus};
use framefit_core::ports::acquirer::{CameraDevice, CaptureOutcome, GalleryPicker};
use framefit_core::ports::encoder::ImageEncoder;
use framefit_core::ports::permission::PermissionPlatform;
use framefit_core::ports::presentation::PresentationSurface;
use framefit_core::ports::uploader::AnalysisUploader;
use image::{DynamicImage, ImageFormat, RgbaImage};
use parking_lot::Mutex;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{OnceLock, Weak};
use tokio::sync::{mpsc, Semaphore};

/// 표시 내역을 기록하는 화면
#[derive(Default)]
pub struct RecordingSurface {
    pub images: Mutex<Vec<ImageReference>>,
    pub recommendations: Mutex<Vec<AnalysisResult>>,
    pub notices: Mutex<Vec<String>>,
}

#[async_trait]
impl PresentationSurface for RecordingSurface {
    async fn show_image(&self, reference: &ImageReference) -> Result<(), CoreError> {
        self.images.lock().push(reference.clone());
        Ok(())
    }

    async fn show_recommendation(&self, result: &AnalysisResult) -> Result<(), CoreError> {
        self.recommendations.lock().push(result.clone());
        Ok(())
    }

    async fn show_notice(&self, message: &str) -> Result<(), CoreError> {
        self.notices.lock().push(message.to_string());
        Ok(())
    }
}

/// 고정 응답 권한 플랫폼
pub struct FixedPermissions {
    pub granted: bool,
    pub requests: AtomicUsize,
}

impl FixedPermissions {
    pub fn granting() -> Self {
        Self {
            granted: true,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn denying() -> Self {
        Self {
            granted: false,
            requests: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PermissionPlatform for FixedPermissions {
    fn status(&self, _capability: Capability) -> PermissionStatus {
        PermissionStatus::Denied
    }

    async fn request(&self, _capability: Capability) -> Result<PermissionStatus, CoreError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(if self.granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }
}

/// 호출 횟수를 세는 카메라
pub struct ScriptedCamera {
    pub outcome: CaptureOutcome,
    pub payload: Vec<u8>,
    pub calls: AtomicUsize,
}

impl ScriptedCamera {
    pub fn completing(payload: Vec<u8>) -> Self {
        Self {
            outcome: CaptureOutcome::Completed,
            payload,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            outcome: CaptureOutcome::Cancelled,
            payload: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CameraDevice for ScriptedCamera {
    fn is_available(&self) -> bool {
        true
    }

    async fn capture_into(&self, target: &Path) -> Result<CaptureOutcome, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.outcome == CaptureOutcome::Completed {
            tokio::fs::write(target, &self.payload).await?;
        }
        Ok(self.outcome)
    }
}

/// 고정 선택 갤러리
pub struct FixedPicker(pub Option<String>);

#[async_trait]
impl GalleryPicker for FixedPicker {
    async fn pick_image(&self) -> Result<Option<String>, CoreError> {
        Ok(self.0.clone())
    }
}

/// 디코딩 없이 고정 바이트를 내는 인코더
pub struct StaticEncoder;

#[async_trait]
impl ImageEncoder for StaticEncoder {
    async fn encode(&self, _reference: &ImageReference) -> Result<Vec<u8>, CoreError> {
        Ok(vec![0xFF, 0xD8, 0xFF, 0xD9])
    }
}

/// 테스트가 허가할 때까지 응답을 보류하는 업로더
pub struct GatedUploader {
    body: String,
    started: mpsc::UnboundedSender<()>,
    release: Semaphore,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl GatedUploader {
    pub fn new(body: &str) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (started, started_rx) = mpsc::unbounded_channel();
        let uploader = Self {
            body: body.to_string(),
            started,
            release: Semaphore::new(0),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        };
        (uploader, started_rx)
    }

    /// 보류 중인 업로드 하나를 완료시킨다
    pub fn release_one(&self) {
        self.release.add_permits(1);
    }
}

#[async_trait]
impl AnalysisUploader for GatedUploader {
    async fn upload(&self, _jpeg: Vec<u8>) -> Result<String, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _ = self.started.send(());

        let permit = self
            .release
            .acquire()
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        permit.forget();

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

/// 응답 직전에 워크플로우의 이미지를 교체하는 업로더
pub struct ReplacingUploader {
    body: String,
    replacement: ImageReference,
    workflow: OnceLock<Weak<AnalysisWorkflow>>,
}

impl ReplacingUploader {
    pub fn new(body: &str, replacement: ImageReference) -> Self {
        Self {
            body: body.to_string(),
            replacement,
            workflow: OnceLock::new(),
        }
    }

    pub fn attach(&self, workflow: &Arc<AnalysisWorkflow>) {
        let _ = self.workflow.set(Arc::downgrade(workflow));
    }
}

#[async_trait]
impl AnalysisUploader for ReplacingUploader {
    async fn upload(&self, _jpeg: Vec<u8>) -> Result<String, CoreError> {
        if let Some(workflow) = self.workflow.get().and_then(Weak::upgrade) {
            workflow.select_existing(self.replacement.clone()).await;
        }
        Ok(self.body.clone())
    }
}

/// 테스트용 PNG 바이트
pub fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([(x * 7) as u8, (y * 3) as u8, 90, 255])
    }));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}
