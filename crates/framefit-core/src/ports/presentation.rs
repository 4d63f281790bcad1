//! 프레젠테이션 포트.
//!
//! 구현: `framefit-app` crate (콘솔 출력)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::analysis::AnalysisResult;
use crate::models::image::ImageReference;

/// 화면 갱신 인터페이스: 워크플로우 상태를 읽기만 한다
#[async_trait]
pub trait PresentationSurface: Send + Sync {
    /// 선택된 이미지 표시
    async fn show_image(&self, reference: &ImageReference) -> Result<(), CoreError>;

    /// 추천 안경테 표시
    async fn show_recommendation(&self, result: &AnalysisResult) -> Result<(), CoreError>;

    /// 일회성 알림 표시
    async fn show_notice(&self, message: &str) -> Result<(), CoreError>;
}
