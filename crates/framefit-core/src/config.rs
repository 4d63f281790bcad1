//! 애플리케이션 설정 구조체.
//!
//! 분석 서버 엔드포인트, 타임아웃, 촬영 저장 경로, 권한, 워크플로우 정책 등
//! 런타임 설정을 정의한다. `config` crate를 통해 파일/환경변수에서 로드.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;
use crate::models::permission::Capability;
use crate::models::workflow::OverlapPolicy;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 분석 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 촬영 설정
    #[serde(default)]
    pub capture: CaptureConfig,
    /// 권한 설정
    #[serde(default)]
    pub permissions: PermissionConfig,
    /// 워크플로우 설정
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

// ============================================================
// 분석 서버 설정
// ============================================================

/// 분석 서버 설정: 엔드포인트는 필수 외부 설정값
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 업로드 엔드포인트 URL (미설정 시 분석 불가)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bearer 토큰 (선택)
    #[serde(default)]
    pub api_token: Option<String>,
    /// 연결 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// 읽기 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub read_timeout_secs: u64,
    /// 쓰기 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub write_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_token: None,
            connect_timeout_secs: default_timeout_secs(),
            read_timeout_secs: default_timeout_secs(),
            write_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    /// 요청 전체 상한 (연결 + 쓰기 + 읽기)
    pub fn total_timeout(&self) -> Duration {
        self.connect_timeout() + self.write_timeout() + self.read_timeout()
    }
}

fn default_timeout_secs() -> u64 {
    30
}

// ============================================================
// 촬영 설정
// ============================================================

/// 촬영 설정: 앱 전용 사진 디렉토리와 외부 촬영 명령
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// 촬영 파일 저장 디렉토리 (미설정 시 플랫폼 데이터 디렉토리)
    #[serde(default)]
    pub pictures_dir: Option<PathBuf>,
    /// 촬영 프로그램 (미설정 시 카메라 없음)
    #[serde(default)]
    pub camera_command: Option<String>,
    /// 촬영 프로그램 인자. `{output}`은 대상 파일 경로로 치환된다.
    #[serde(default)]
    pub camera_args: Vec<String>,
}

// ============================================================
// 권한 설정
// ============================================================

/// 권한 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionConfig {
    /// 미리 허용된 권한 목록
    #[serde(default)]
    pub granted: Vec<Capability>,
    /// 미허용 권한을 터미널에서 물어볼지 여부
    #[serde(default = "default_true")]
    pub interactive: bool,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            granted: Vec::new(),
            interactive: true,
        }
    }
}

// ============================================================
// 워크플로우 설정
// ============================================================

/// 워크플로우 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// 이미지 획득 직후 자동 분석
    #[serde(default = "default_true")]
    pub auto_analyze: bool,
    /// 겹치는 분석 요청 처리 정책
    #[serde(default)]
    pub overlap: OverlapPolicy,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            auto_analyze: true,
            overlap: OverlapPolicy::Reject,
        }
    }
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            capture: CaptureConfig::default(),
            permissions: PermissionConfig::default(),
            workflow: WorkflowConfig::default(),
        }
    }

    /// 설정값 유효성 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        let server = &self.server;
        for (name, secs) in [
            ("connect_timeout_secs", server.connect_timeout_secs),
            ("read_timeout_secs", server.read_timeout_secs),
            ("write_timeout_secs", server.write_timeout_secs),
        ] {
            if secs == 0 {
                return Err(CoreError::Config(format!("server.{name}는 0보다 커야 합니다")));
            }
        }

        if let Some(endpoint) = &server.endpoint {
            let parsed = url::Url::parse(endpoint).map_err(|e| {
                CoreError::Config(format!("server.endpoint URL 파싱 실패: {endpoint}: {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(CoreError::Config(format!(
                    "server.endpoint는 http(s)여야 합니다: {endpoint}"
                )));
            }
        }

        if let Some(program) = &self.capture.camera_command {
            if program.trim().is_empty() {
                return Err(CoreError::Config("capture.camera_command가 비어 있습니다".into()));
            }
        }

        Ok(())
    }
}
