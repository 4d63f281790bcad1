//! 권한 모델.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 이미지 획득에 필요한 권한
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// 카메라 촬영
    CameraAccess,
    /// 갤러리(미디어/저장소) 읽기
    GalleryAccess,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CameraAccess => write!(f, "camera_access"),
            Self::GalleryAccess => write!(f, "gallery_access"),
        }
    }
}

/// 권한 확인 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}
