//! 분석 상태 머신.
//!
//! `Idle → AwaitingEncode → AwaitingUpload → AwaitingParse → Done | Failed`.
//! 실패 후 중간 상태로 재개하지 않는다. 재시도는 Idle에서 다시 트리거한다.

use crate::error::ErrorKind;
use crate::models::analysis::FrameAsset;

/// 분석 동작의 현재 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    AwaitingEncode,
    AwaitingUpload,
    AwaitingParse,
    Done(FrameAsset),
    Failed(ErrorKind),
}

impl AnalysisState {
    /// 분석이 진행 중인지 (인코딩/업로드/파싱 대기)
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::AwaitingEncode | Self::AwaitingUpload | Self::AwaitingParse
        )
    }

    /// 종결 상태인지
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Failed(_))
    }
}

/// 겹치는 분석 요청 처리 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// 진행 중인 분석이 끝날 때까지 대기
    Queue,
    /// 즉시 `AnalysisInProgress`로 거부
    #[default]
    Reject,
}

impl std::str::FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queue" => Ok(Self::Queue),
            "reject" => Ok(Self::Reject),
            other => Err(format!("알 수 없는 overlap 정책: {other}")),
        }
    }
}
