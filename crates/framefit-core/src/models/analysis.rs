//! 분석 결과 모델.

use serde::{Deserialize, Serialize};

/// 추천 안경테 에셋.
///
/// `Default`는 분석 전 표시용 자리표시자이며 해석 결과로는 나오지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameAsset {
    Oval,
    Round,
    Square,
    Default,
}

impl FrameAsset {
    /// 인식 가능한 분류 라벨 → 에셋 (정확히 일치하는 소문자 리터럴만)
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "oval" => Some(Self::Oval),
            "round" => Some(Self::Round),
            "square" => Some(Self::Square),
            _ => None,
        }
    }

    /// 표시할 이미지 에셋 이름
    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Oval => "oval_frames.png",
            Self::Round => "round_frames.png",
            Self::Square => "square_frames.png",
            Self::Default => "default_frames.png",
        }
    }

    /// 사람이 읽는 설명
    pub fn description(&self) -> &'static str {
        match self {
            Self::Oval => "타원형 안경테",
            Self::Round => "둥근 안경테",
            Self::Square => "사각 안경테",
            Self::Default => "추천 없음",
        }
    }
}

/// 서버 응답에서 추출한 분석 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 서버가 반환한 원본 라벨
    pub frame_type: String,
    /// 매핑된 에셋
    pub asset: FrameAsset,
}
