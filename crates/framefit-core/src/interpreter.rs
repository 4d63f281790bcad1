//! 서버 응답 해석.
//!
//! 응답 본문(JSON)에서 `frame_type`을 읽어 [`FrameAsset`]으로 매핑한다.
//! 인식되지 않는 라벨은 추측하지 않고 `UnrecognizedLabel`로 실패한다.

use serde_json::Value;
use tracing::debug;

use crate::error::CoreError;
use crate::models::analysis::{AnalysisResult, FrameAsset};

/// 분류 라벨 필드명
pub const FRAME_TYPE_FIELD: &str = "frame_type";

/// 응답 본문 → 추천 에셋
pub fn interpret(raw_body: &str) -> Result<FrameAsset, CoreError> {
    parse_analysis(raw_body).map(|result| result.asset)
}

/// 응답 본문 → 분석 결과 (원본 라벨 포함)
pub fn parse_analysis(raw_body: &str) -> Result<AnalysisResult, CoreError> {
    let response: Value = serde_json::from_str(raw_body)
        .map_err(|e| CoreError::InvalidResponse(format!("응답 JSON 파싱 실패: {e}")))?;

    let label = match response.get(FRAME_TYPE_FIELD) {
        Some(Value::String(label)) => label,
        Some(other) => {
            return Err(CoreError::UnrecognizedLabel(format!(
                "{FRAME_TYPE_FIELD}가 문자열이 아님: {other}"
            )))
        }
        None => {
            return Err(CoreError::UnrecognizedLabel(format!(
                "{FRAME_TYPE_FIELD} 필드 없음"
            )))
        }
    };

    let asset = FrameAsset::from_label(label)
        .ok_or_else(|| CoreError::UnrecognizedLabel(label.clone()))?;

    debug!(frame_type = %label, ?asset, "분석 결과 해석");
    Ok(AnalysisResult {
        frame_type: label.clone(),
        asset,
    })
}
