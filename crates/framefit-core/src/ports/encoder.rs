//! 이미지 인코더 포트.
//!
//! 구현: `framefit-vision` crate (image)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::image::ImageReference;

/// 업로드용 이미지 인코더
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    /// 참조된 이미지를 전송용 압축 바이트로 변환
    async fn encode(&self, reference: &ImageReference) -> Result<Vec<u8>, CoreError>;
}
