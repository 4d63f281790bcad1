//! JPEG 인코더.
//!
//! 참조된 이미지를 디코딩한 뒤 고정 품질(90) JPEG으로 재인코딩한다.
//! 같은 입력 바이트는 항상 같은 출력 바이트를 낸다.

use async_trait::async_trait;
use framefit_core::error::CoreError;
use framefit_core::models::image::ImageReference;
use framefit_core::ports::acquirer::ContentResolver;
use framefit_core::ports::encoder::ImageEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::sync::Arc;
use tracing::debug;

/// 업로드용 JPEG 품질
pub const JPEG_QUALITY: u8 = 90;

/// 메모리 상의 이미지 바이트 → JPEG 바이트
pub fn encode_jpeg(source: &[u8], quality: u8) -> Result<Vec<u8>, CoreError> {
    let image = image::load_from_memory(source)
        .map_err(|e| CoreError::Decode(format!("이미지 디코딩 실패: {e}")))?;
    encode_image_jpeg(&image, quality)
}

/// 디코딩된 이미지 → JPEG 바이트 (알파 채널 제거)
pub fn encode_image_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, CoreError> {
    let rgb = image.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality)
        .encode_image(&rgb)
        .map_err(|e| CoreError::Decode(format!("JPEG 인코딩 실패: {e}")))?;

    debug!(
        "JPEG 인코딩: {}x{} → {} bytes (품질 {})",
        rgb.width(),
        rgb.height(),
        encoded.len(),
        quality
    );

    Ok(encoded)
}

/// `ImageEncoder` 포트 구현: 콘텐츠 해석기로 읽고 blocking 풀에서 인코딩
pub struct JpegImageEncoder {
    resolver: Arc<dyn ContentResolver>,
    quality: u8,
}

impl JpegImageEncoder {
    pub fn new(resolver: Arc<dyn ContentResolver>) -> Self {
        Self {
            resolver,
            quality: JPEG_QUALITY,
        }
    }
}

#[async_trait]
impl ImageEncoder for JpegImageEncoder {
    async fn encode(&self, reference: &ImageReference) -> Result<Vec<u8>, CoreError> {
        let source = self.resolver.read_bytes(reference).await?;
        let quality = self.quality;

        tokio::task::spawn_blocking(move || encode_jpeg(&source, quality))
            .await
            .map_err(|e| CoreError::Internal(format!("인코딩 작업 실패: {e}")))?
    }
}
