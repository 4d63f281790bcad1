//! 콘솔 프레젠테이션.
//!
//! 데스크톱에서 플랫폼 UI 대신 선택된 이미지, 추천 결과, 알림을 터미널에 출력한다.
//! 새 이미지를 표시하면 분석 전까지 `FrameAsset::Default` 자리표시자를 함께 보여준다.

use async_trait::async_trait;
use framefit_core::error::CoreError;
use framefit_core::models::analysis::{AnalysisResult, FrameAsset};
use framefit_core::models::image::{ImageOrigin, ImageReference};
use framefit_core::ports::presentation::PresentationSurface;

/// 콘솔 출력 화면
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSurface;

impl ConsoleSurface {
    pub fn new() -> Self {
        Self
    }
}

fn image_line(reference: &ImageReference) -> String {
    let origin = match reference.origin {
        ImageOrigin::Camera => "촬영",
        ImageOrigin::Gallery => "갤러리",
    };
    format!("📷 선택된 사진 ({origin}): {}", reference.locator)
}

/// 분석 전 추천 영역
fn placeholder_line() -> String {
    let asset = FrameAsset::Default;
    format!("👓 추천: {} [{}]", asset.description(), asset.asset_name())
}

fn recommendation_line(result: &AnalysisResult) -> String {
    format!(
        "👓 추천: {} [{}] (frame_type={})",
        result.asset.description(),
        result.asset.asset_name(),
        result.frame_type
    )
}

#[async_trait]
impl PresentationSurface for ConsoleSurface {
    async fn show_image(&self, reference: &ImageReference) -> Result<(), CoreError> {
        println!("{}", image_line(reference));
        println!("{}", placeholder_line());
        Ok(())
    }

    async fn show_recommendation(&self, result: &AnalysisResult) -> Result<(), CoreError> {
        println!("{}", recommendation_line(result));
        Ok(())
    }

    async fn show_notice(&self, message: &str) -> Result<(), CoreError> {
        eprintln!("⚠️  {message}");
        Ok(())
    }
}
