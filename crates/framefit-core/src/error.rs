//! FrameFit 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 외부 에러를 `map_err`로 `CoreError`에 매핑한다.
//! 워크플로우 경계에서 [`CoreError::kind`]로 분류한 뒤 사용자 알림으로 변환한다.

use thiserror::Error;

use crate::models::permission::Capability;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 권한 거부 (두 번째 거부는 해당 동작에 대해 종결)
    #[error("권한 거부: {0}")]
    PermissionDenied(Capability),

    /// 사용자가 촬영을 취소함
    #[error("촬영 취소")]
    CaptureCancelled,

    /// 사용자가 갤러리 선택을 취소함
    #[error("이미지 선택 취소")]
    SelectionCancelled,

    /// 촬영을 처리할 카메라가 없음
    #[error("사용 가능한 카메라 없음")]
    NoCameraAvailable,

    /// 이미지를 열거나 디코딩할 수 없음
    #[error("이미지 디코딩 실패: {0}")]
    Decode(String),

    /// 서버가 2xx 이외의 상태 코드를 반환
    #[error("업로드 실패 (HTTP {status_code})")]
    UploadFailed {
        /// 서버 응답 상태 코드
        status_code: u16,
    },

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 응답의 `frame_type`이 없거나 알 수 없는 값
    #[error("인식할 수 없는 분류 라벨: {0}")]
    UnrecognizedLabel(String),

    /// 응답 본문이 JSON이 아님
    #[error("잘못된 응답 형식: {0}")]
    InvalidResponse(String),

    /// 다른 분석이 이미 진행 중 (reject 정책)
    #[error("분석이 이미 진행 중")]
    AnalysisInProgress,

    /// 분석이 명시적으로 취소됨
    #[error("분석 취소됨")]
    Cancelled,

    /// 분석할 이미지가 선택되지 않음
    #[error("선택된 이미지 없음")]
    NoImageSelected,

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 에러 분류 태그 반환 (상태 머신 및 사용자 알림용)
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied(capability) => ErrorKind::PermissionDenied(*capability),
            Self::CaptureCancelled => ErrorKind::CaptureCancelled,
            Self::SelectionCancelled => ErrorKind::SelectionCancelled,
            Self::NoCameraAvailable => ErrorKind::NoCameraAvailable,
            Self::Decode(_) => ErrorKind::DecodeError,
            Self::UploadFailed { status_code } => ErrorKind::UploadFailed {
                status_code: *status_code,
            },
            Self::Network(_) => ErrorKind::NetworkError,
            Self::UnrecognizedLabel(_) => ErrorKind::UnrecognizedLabel,
            Self::InvalidResponse(_) => ErrorKind::InvalidResponse,
            Self::AnalysisInProgress => ErrorKind::AnalysisInProgress,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::NoImageSelected => ErrorKind::NoImageSelected,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// 에러 분류 태그.
///
/// `AnalysisState::Failed`에 보관되므로 `Copy` 가능한 값만 가진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PermissionDenied(Capability),
    CaptureCancelled,
    SelectionCancelled,
    NoCameraAvailable,
    DecodeError,
    UploadFailed { status_code: u16 },
    NetworkError,
    UnrecognizedLabel,
    InvalidResponse,
    AnalysisInProgress,
    Cancelled,
    NoImageSelected,
    Config,
    Io,
    Internal,
}

impl ErrorKind {
    /// 사용자에게 한 번 표시할 알림 문구
    pub fn notice(&self) -> String {
        match self {
            Self::PermissionDenied(Capability::CameraAccess) => {
                "사진을 촬영하려면 카메라 권한이 필요합니다.".to_string()
            }
            Self::PermissionDenied(Capability::GalleryAccess) => {
                "갤러리에 접근하려면 저장소 권한이 필요합니다.".to_string()
            }
            Self::CaptureCancelled => "사진 촬영이 취소되었습니다.".to_string(),
            Self::SelectionCancelled => "이미지 선택이 취소되었습니다.".to_string(),
            Self::NoCameraAvailable => "카메라 앱을 찾을 수 없습니다.".to_string(),
            Self::DecodeError => "이미지를 열 수 없습니다.".to_string(),
            Self::UploadFailed { status_code } => {
                format!("분석 서버가 요청을 거부했습니다 (HTTP {status_code}).")
            }
            Self::NetworkError => "분석 서버에 연결할 수 없습니다.".to_string(),
            Self::UnrecognizedLabel => "얼굴형을 인식하지 못했습니다.".to_string(),
            Self::InvalidResponse => "분석 서버 응답을 해석할 수 없습니다.".to_string(),
            Self::AnalysisInProgress => "이미 분석이 진행 중입니다.".to_string(),
            Self::Cancelled => "분석이 취소되었습니다.".to_string(),
            Self::NoImageSelected => "먼저 사진을 추가하세요.".to_string(),
            Self::Config => "분석 서버 설정이 올바르지 않습니다.".to_string(),
            Self::Io => "파일을 처리하는 중 오류가 발생했습니다.".to_string(),
            Self::Internal => "알 수 없는 오류가 발생했습니다.".to_string(),
        }
    }
}
