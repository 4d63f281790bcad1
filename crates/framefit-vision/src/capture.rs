//! 이미지 획득.
//!
//! 카메라 촬영 대상 파일 할당(`JPEG_<yyyyMMdd_HHmmss>_<random>.jpg`)과
//! 카메라/갤러리 결과를 [`ImageReference`]로 정규화하는 `ImageAcquirer` 구현.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use framefit_core::error::CoreError;
use framefit_core::models::image::{ImageReference, PendingCapture};
use framefit_core::ports::acquirer::{CameraDevice, CaptureOutcome, GalleryPicker, ImageAcquirer};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::resolver::locator_to_path;

/// 촬영 파일 이름 접두사
pub const CAPTURE_PREFIX: &str = "JPEG_";
/// 촬영 파일 확장자
pub const CAPTURE_SUFFIX: &str = ".jpg";

/// 이름 충돌 시 재시도 횟수
const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// 촬영 파일 이름 생성
pub fn capture_file_name(now: DateTime<Local>, token: &str) -> String {
    format!(
        "{CAPTURE_PREFIX}{}_{token}{CAPTURE_SUFFIX}",
        now.format("%Y%m%d_%H%M%S")
    )
}

/// 촬영 대상 파일 할당: 디렉토리 생성 후 빈 파일을 만든다
pub async fn allocate_capture(dir: &Path) -> Result<PendingCapture, CoreError> {
    tokio::fs::create_dir_all(dir).await?;

    for _ in 0..MAX_ALLOCATION_ATTEMPTS {
        let token = uuid::Uuid::new_v4().simple().to_string();
        let path = dir.join(capture_file_name(Local::now(), &token[..12]));

        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(_) => {
                debug!("촬영 파일 할당: {}", path.display());
                return Ok(PendingCapture::new(path));
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(CoreError::Io(e)),
        }
    }

    Err(CoreError::Internal(format!(
        "촬영 파일 이름 할당 실패: {}",
        dir.display()
    )))
}

/// 실패/취소된 촬영 파일 정리
async fn discard(pending: PendingCapture) {
    let path = pending.into_path();
    if let Err(e) = tokio::fs::remove_file(&path).await {
        if e.kind() != ErrorKind::NotFound {
            warn!("촬영 파일 삭제 실패 {}: {e}", path.display());
        }
    }
}

/// 갤러리 핸들이 이미지 콘텐츠인지 (확장자 기반, 모르는 형식은 허용)
fn is_image_handle(handle: &str) -> bool {
    let Ok(path) = locator_to_path(handle) else {
        return true;
    };
    match mime_guess::from_path(&path).first() {
        Some(mime) => mime.type_() == mime_guess::mime::IMAGE,
        None => true,
    }
}

/// 장치 기반 이미지 획득기
pub struct DeviceImageAcquirer {
    pictures_dir: PathBuf,
    camera: Arc<dyn CameraDevice>,
    gallery: Arc<dyn GalleryPicker>,
}

impl DeviceImageAcquirer {
    pub fn new(
        pictures_dir: impl Into<PathBuf>,
        camera: Arc<dyn CameraDevice>,
        gallery: Arc<dyn GalleryPicker>,
    ) -> Self {
        Self {
            pictures_dir: pictures_dir.into(),
            camera,
            gallery,
        }
    }
}

#[async_trait]
impl ImageAcquirer for DeviceImageAcquirer {
    async fn capture_from_camera(&self) -> Result<ImageReference, CoreError> {
        if !self.camera.is_available() {
            return Err(CoreError::NoCameraAvailable);
        }

        let pending = allocate_capture(&self.pictures_dir).await?;

        let outcome = match self.camera.capture_into(pending.path()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                discard(pending).await;
                return Err(e);
            }
        };

        if outcome == CaptureOutcome::Cancelled {
            info!("촬영 취소");
            discard(pending).await;
            return Err(CoreError::CaptureCancelled);
        }

        let size = tokio::fs::metadata(pending.path())
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if size == 0 {
            warn!("카메라가 빈 파일을 남김: {}", pending.path().display());
            discard(pending).await;
            return Err(CoreError::CaptureCancelled);
        }

        let reference = pending.into_reference();
        info!(locator = %reference.locator, size, "촬영 완료");
        Ok(reference)
    }

    async fn pick_from_gallery(&self) -> Result<ImageReference, CoreError> {
        let Some(handle) = self.gallery.pick_image().await? else {
            info!("갤러리 선택 취소");
            return Err(CoreError::SelectionCancelled);
        };

        if handle.trim().is_empty() {
            return Err(CoreError::SelectionCancelled);
        }

        if !is_image_handle(&handle) {
            warn!(handle = %handle, "이미지가 아닌 콘텐츠 선택");
            return Err(CoreError::SelectionCancelled);
        }

        info!(locator = %handle, "갤러리 이미지 선택");
        Ok(ImageReference::gallery(handle))
    }
}
