//! 이미지 획득 포트.
//!
//! 구현: `framefit-vision` crate (`DeviceImageAcquirer`),
//! 플랫폼 어댑터는 `framefit-app` crate

use async_trait::async_trait;
use std::path::Path;

use crate::error::CoreError;
use crate::models::image::ImageReference;

/// 카메라 촬영 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// 대상 경로에 촬영 결과가 기록됨
    Completed,
    /// 사용자가 촬영을 중단함
    Cancelled,
}

/// 플랫폼 카메라: 지정된 파일에 사진을 기록
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// 촬영을 처리할 수 있는 핸들러가 있는지
    fn is_available(&self) -> bool;

    /// `target`에 촬영 결과 기록. 사용자가 닫을 때까지 대기한다.
    async fn capture_into(&self, target: &Path) -> Result<CaptureOutcome, CoreError>;
}

/// 플랫폼 갤러리 선택기: 이미지 콘텐츠로 제한
#[async_trait]
pub trait GalleryPicker: Send + Sync {
    /// 선택된 콘텐츠 핸들. 취소 시 `None`.
    async fn pick_image(&self) -> Result<Option<String>, CoreError>;
}

/// 이미지 소스 획득기: 카메라/갤러리 결과를 [`ImageReference`]로 정규화
#[async_trait]
pub trait ImageAcquirer: Send + Sync {
    /// 카메라 촬영. 실패: `CaptureCancelled`, `NoCameraAvailable`
    async fn capture_from_camera(&self) -> Result<ImageReference, CoreError>;

    /// 갤러리 선택. 실패: `SelectionCancelled`
    async fn pick_from_gallery(&self) -> Result<ImageReference, CoreError>;
}

/// 이미지 참조 → 원본 바이트
#[async_trait]
pub trait ContentResolver: Send + Sync {
    /// 참조 뒤의 바이트 읽기. 열 수 없거나 비어 있으면 `Decode` 에러.
    async fn read_bytes(&self, reference: &ImageReference) -> Result<Vec<u8>, CoreError>;
}
