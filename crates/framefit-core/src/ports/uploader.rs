//! 분석 업로드 포트.
//!
//! 구현: `framefit-network` crate (reqwest)

use async_trait::async_trait;

use crate::error::CoreError;

/// 분석 서버 업로드 클라이언트
#[async_trait]
pub trait AnalysisUploader: Send + Sync {
    /// JPEG 바이트 업로드 후 원본 응답 본문 반환. 재시도 없음.
    ///
    /// 2xx 이외: `UploadFailed`, 전송 실패: `Network`
    async fn upload(&self, jpeg: Vec<u8>) -> Result<String, CoreError>;
}
