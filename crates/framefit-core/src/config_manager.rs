//! 설정 로드.
//!
//! 기본값 → 설정 파일(TOML/JSON, 선택) → `FRAMEFIT__*` 환경변수 순으로
//! 계층을 쌓아 [`AppConfig`]를 만든다. CLI 오버라이드는 호출자가 적용한다.

use config::{Config, Environment, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::CoreError;

/// 환경변수 접두사 (`FRAMEFIT__SERVER__ENDPOINT` 형태)
pub const ENV_PREFIX: &str = "FRAMEFIT";

/// 계층형 설정 로더
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// 설정 파일 경로
    file: Option<PathBuf>,
    /// 환경변수 대체 소스 (테스트용, `None`이면 프로세스 환경)
    env: Option<config::Map<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 설정 파일 지정 (확장자로 형식 판별)
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// 프로세스 환경 대신 주어진 변수 집합 사용
    pub fn with_env(mut self, vars: config::Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// 설정 로드 및 검증
    pub fn load(self) -> Result<AppConfig, CoreError> {
        let defaults = Config::try_from(&AppConfig::default_config())
            .map_err(|e| CoreError::Config(format!("기본 설정 직렬화 실패: {e}")))?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = &self.file {
            ensure_exists(path)?;
            debug!("설정 파일 로드: {}", path.display());
            builder = builder.add_source(File::from(path.as_path()));
        }

        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("permissions.granted")
            .source(self.env);
        builder = builder.add_source(env);

        let config: AppConfig = builder
            .build()
            .map_err(|e| CoreError::Config(format!("설정 로드 실패: {e}")))?
            .try_deserialize()
            .map_err(|e| CoreError::Config(format!("설정 역직렬화 실패: {e}")))?;

        config.validate()?;
        info!(
            endpoint = config.server.endpoint.as_deref().unwrap_or("<미설정>"),
            overlap = ?config.workflow.overlap,
            "설정 로드 완료"
        );
        Ok(config)
    }
}

fn ensure_exists(path: &Path) -> Result<(), CoreError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CoreError::Config(format!(
            "설정 파일을 찾을 수 없습니다: {}",
            path.display()
        )))
    }
}
