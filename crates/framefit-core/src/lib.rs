//! # framefit-core
//!
//! FrameFit 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 도메인 데이터 구조체 (이미지 참조, 분석 결과, 워크플로우 상태)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 계층형 설정 로드 (기본값 → 파일 → 환경변수)
//! - [`interpreter`]: 서버 응답 해석 (`frame_type` → 안경테 에셋)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod interpreter;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::analysis::FrameAsset;
    use crate::models::image::{ImageOrigin, ImageReference};

    #[test]
    fn image_reference_serde_roundtrip() {
        let reference = ImageReference::camera("/tmp/pictures/JPEG_20261015_101500_ab12.jpg");

        let json = serde_json::to_string(&reference).unwrap();
        let deserialized: ImageReference = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, reference);
        assert_eq!(deserialized.origin, ImageOrigin::Camera);
    }

    #[test]
    fn frame_asset_serializes_lowercase() {
        let json = serde_json::to_string(&FrameAsset::Square).unwrap();
        assert_eq!(json, "\"square\"");
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert!(config.server.endpoint.is_none());
        assert_eq!(config.server.connect_timeout_secs, 30);
        assert_eq!(config.server.read_timeout_secs, 30);
        assert_eq!(config.server.write_timeout_secs, 30);
        assert!(config.workflow.auto_analyze);
        assert!(config.permissions.interactive);
    }
}
