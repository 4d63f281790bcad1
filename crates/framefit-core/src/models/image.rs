//! 이미지 참조 모델.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 이미지 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOrigin {
    /// 카메라 촬영: locator는 파일시스템 경로
    Camera,
    /// 갤러리 선택: locator는 콘텐츠 핸들 (경로 또는 `file://` URI)
    Gallery,
}

/// 획득한 이미지에 대한 불투명 핸들.
///
/// 새 이미지를 획득하면 통째로 교체된다. 명시적 파기는 없다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// 이미지 출처
    pub origin: ImageOrigin,
    /// 이미지 위치 (경로 또는 URI)
    pub locator: String,
}

impl ImageReference {
    /// 카메라 촬영 결과 참조 생성
    pub fn camera(path: impl AsRef<Path>) -> Self {
        Self {
            origin: ImageOrigin::Camera,
            locator: path.as_ref().to_string_lossy().into_owned(),
        }
    }

    /// 갤러리 선택 결과 참조 생성
    pub fn gallery(handle: impl Into<String>) -> Self {
        Self {
            origin: ImageOrigin::Gallery,
            locator: handle.into(),
        }
    }
}

/// 진행 중인 카메라 촬영.
///
/// 카메라 실행 직전에 생성되고 촬영 결과가 도착하면 소비된다.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingCapture {
    path: PathBuf,
}

impl PendingCapture {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// 카메라가 기록할 대상 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 촬영 완료: 이미지 참조로 변환
    pub fn into_reference(self) -> ImageReference {
        ImageReference::camera(&self.path)
    }

    /// 촬영 실패/취소: 정리할 경로 반환
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
