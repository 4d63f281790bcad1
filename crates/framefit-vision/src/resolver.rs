//! 로컬 콘텐츠 해석기.
//!
//! 이미지 참조의 locator를 파일 경로로 풀어 바이트를 읽는다.
//! 지원 형식: 일반 경로, `file://` URI.

use async_trait::async_trait;
use framefit_core::error::CoreError;
use framefit_core::models::image::ImageReference;
use framefit_core::ports::acquirer::ContentResolver;
use std::path::PathBuf;
use tracing::debug;

/// 로컬 파일시스템 콘텐츠 해석기
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalContentResolver;

impl LocalContentResolver {
    pub fn new() -> Self {
        Self
    }
}

/// locator → 파일 경로
pub fn locator_to_path(locator: &str) -> Result<PathBuf, CoreError> {
    if locator.trim().is_empty() {
        return Err(CoreError::Decode("빈 locator".to_string()));
    }

    if locator.contains("://") {
        let parsed = url::Url::parse(locator)
            .map_err(|e| CoreError::Decode(format!("잘못된 URI {locator}: {e}")))?;
        if parsed.scheme() != "file" {
            return Err(CoreError::Decode(format!(
                "지원하지 않는 URI 스킴: {}",
                parsed.scheme()
            )));
        }
        return parsed
            .to_file_path()
            .map_err(|_| CoreError::Decode(format!("파일 경로로 변환 불가: {locator}")));
    }

    Ok(PathBuf::from(locator))
}

#[async_trait]
impl ContentResolver for LocalContentResolver {
    async fn read_bytes(&self, reference: &ImageReference) -> Result<Vec<u8>, CoreError> {
        let path = locator_to_path(&reference.locator)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| CoreError::Decode(format!("{} 열기 실패: {e}", path.display())))?;

        if bytes.is_empty() {
            return Err(CoreError::Decode(format!("빈 이미지 파일: {}", path.display())));
        }

        debug!(path = %path.display(), size = bytes.len(), "이미지 바이트 로드");
        Ok(bytes)
    }
}
