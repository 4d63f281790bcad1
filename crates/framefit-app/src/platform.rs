//! 데스크톱 플랫폼 어댑터.
//!
//! - [`ConsolePermissionPlatform`]: 설정으로 미리 허용하거나 터미널에서 묻는다
//! - [`CommandCamera`]: 외부 촬영 명령으로 지정 파일에 사진을 기록
//! - [`PathGalleryPicker`]: 사용자가 지정한 경로를 갤러리 선택 결과로 사용

use async_trait::async_trait;
use framefit_core::config::{CaptureConfig, PermissionConfig};
use framefit_core::error::CoreError;
use framefit_core::models::permission::{Capability, PermissionStatus};
use framefit_core::ports::acquirer::{CameraDevice, CaptureOutcome, GalleryPicker};
use framefit_core::ports::permission::PermissionPlatform;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// 출력 경로 자리표시자
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

// ============================================================
// 권한
// ============================================================

/// 콘솔 권한 플랫폼
pub struct ConsolePermissionPlatform {
    granted: Mutex<HashSet<Capability>>,
    interactive: bool,
}

impl ConsolePermissionPlatform {
    pub fn new(config: &PermissionConfig) -> Self {
        Self {
            granted: Mutex::new(config.granted.iter().copied().collect()),
            interactive: config.interactive,
        }
    }

    fn question(capability: Capability) -> &'static str {
        match capability {
            Capability::CameraAccess => "카메라 사용을 허용하시겠습니까?",
            Capability::GalleryAccess => "사진 보관함 접근을 허용하시겠습니까?",
        }
    }
}

/// 사용자 응답 해석 (`y`, `yes`, `예`만 허용)
pub fn parse_answer(answer: &str) -> PermissionStatus {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "예" => PermissionStatus::Granted,
        _ => PermissionStatus::Denied,
    }
}

/// 한 줄 응답 읽기. EOF는 거부로 본다.
pub async fn read_answer<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<PermissionStatus, CoreError> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).await?;
    if read == 0 {
        return Ok(PermissionStatus::Denied);
    }
    Ok(parse_answer(&line))
}

#[async_trait]
impl PermissionPlatform for ConsolePermissionPlatform {
    fn status(&self, capability: Capability) -> PermissionStatus {
        if self.granted.lock().contains(&capability) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn request(&self, capability: Capability) -> Result<PermissionStatus, CoreError> {
        if !self.interactive {
            debug!("비대화형 모드: {capability} 요청 거부");
            return Ok(PermissionStatus::Denied);
        }

        eprint!("{} [y/N] ", Self::question(capability));
        let mut stdin = BufReader::new(tokio::io::stdin());
        let status = read_answer(&mut stdin).await?;

        if status.is_granted() {
            self.granted.lock().insert(capability);
        }
        Ok(status)
    }
}

// ============================================================
// 카메라
// ============================================================

/// 외부 명령 카메라
///
/// 인자의 `{output}`을 대상 경로로 치환한다. 자리표시자가 없으면 마지막 인자로 붙인다.
/// 종료 코드 0이면 완료, 그 외는 사용자 취소로 본다.
#[derive(Debug, Clone)]
pub struct CommandCamera {
    program: Option<String>,
    args: Vec<String>,
}

impl CommandCamera {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            program: config.camera_command.clone(),
            args: config.camera_args.clone(),
        }
    }

    fn expand_args(&self, target: &Path) -> Vec<String> {
        let output = target.to_string_lossy();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace(OUTPUT_PLACEHOLDER, &output))
            .collect();
        if !self.args.iter().any(|arg| arg.contains(OUTPUT_PLACEHOLDER)) {
            args.push(output.into_owned());
        }
        args
    }
}

#[async_trait]
impl CameraDevice for CommandCamera {
    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    async fn capture_into(&self, target: &Path) -> Result<CaptureOutcome, CoreError> {
        let program = self.program.as_deref().ok_or(CoreError::NoCameraAvailable)?;
        let args = self.expand_args(target);
        debug!(program, ?args, "촬영 명령 실행");

        let status = tokio::process::Command::new(program)
            .args(&args)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CoreError::NoCameraAvailable,
                _ => CoreError::Io(e),
            })?;

        if status.success() {
            Ok(CaptureOutcome::Completed)
        } else {
            info!(?status, "촬영 명령이 완료되지 않음");
            Ok(CaptureOutcome::Cancelled)
        }
    }
}

// ============================================================
// 갤러리
// ============================================================

/// 경로 지정 갤러리 선택기
#[derive(Debug, Clone, Default)]
pub struct PathGalleryPicker {
    selection: Option<PathBuf>,
}

impl PathGalleryPicker {
    pub fn new(selection: Option<PathBuf>) -> Self {
        Self { selection }
    }
}

#[async_trait]
impl GalleryPicker for PathGalleryPicker {
    async fn pick_image(&self) -> Result<Option<String>, CoreError> {
        let Some(path) = &self.selection else {
            return Ok(None);
        };

        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => Ok(Some(path.to_string_lossy().into_owned())),
            Ok(_) => {
                warn!("파일이 아님: {}", path.display());
                Ok(None)
            }
            Err(e) => {
                warn!("선택한 이미지를 찾을 수 없음 {}: {e}", path.display());
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn answers() {
        assert_eq!(parse_answer("y\n"), PermissionStatus::Granted);
        assert_eq!(parse_answer(" YES "), PermissionStatus::Granted);
        assert_eq!(parse_answer("예"), PermissionStatus::Granted);
        assert_eq!(parse_answer("n"), PermissionStatus::Denied);
        assert_eq!(parse_answer(""), PermissionStatus::Denied);
    }

    #[tokio::test]
    async fn eof_is_denial() {
        let mut empty: &[u8] = b"";
        assert_eq!(read_answer(&mut empty).await.unwrap(), PermissionStatus::Denied);

        let mut yes: &[u8] = b"y\nignored\n";
        assert_eq!(read_answer(&mut yes).await.unwrap(), PermissionStatus::Granted);
    }

    #[tokio::test]
    async fn non_interactive_platform_denies_without_prompt() {
        let platform = ConsolePermissionPlatform::new(&PermissionConfig {
            granted: vec![Capability::GalleryAccess],
            interactive: false,
        });
        assert_eq!(platform.status(Capability::GalleryAccess), PermissionStatus::Granted);
        assert_eq!(platform.status(Capability::CameraAccess), PermissionStatus::Denied);
        assert_eq!(
            platform.request(Capability::CameraAccess).await.unwrap(),
            PermissionStatus::Denied
        );
    }

    #[test]
    fn placeholder_expansion() {
        let camera = CommandCamera::new(&CaptureConfig {
            camera_command: Some("fswebcam".into()),
            camera_args: vec!["-r".into(), "1280x720".into(), "--save={output}".into()],
            ..CaptureConfig::default()
        });
        let args = camera.expand_args(Path::new("/tmp/JPEG_1.jpg"));
        assert_eq!(args, vec!["-r", "1280x720", "--save=/tmp/JPEG_1.jpg"]);

        let bare = CommandCamera::new(&CaptureConfig {
            camera_command: Some("snap".into()),
            ..CaptureConfig::default()
        });
        assert_eq!(bare.expand_args(Path::new("/tmp/x.jpg")), vec!["/tmp/x.jpg"]);
    }

    #[test]
    fn unconfigured_camera_is_unavailable() {
        assert!(!CommandCamera::new(&CaptureConfig::default()).is_available());
    }

    #[tokio::test]
    async fn missing_program_is_no_camera() {
        let camera = CommandCamera::new(&CaptureConfig {
            camera_command: Some("framefit-no-such-camera-binary".into()),
            ..CaptureConfig::default()
        });
        let dir = tempfile::tempdir().unwrap();
        let result = camera.capture_into(&dir.path().join("a.jpg")).await;
        assert_matches!(result, Err(CoreError::NoCameraAvailable));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_exit_status_maps_to_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("shot.jpg");

        let writes = CommandCamera::new(&CaptureConfig {
            camera_command: Some("sh".into()),
            camera_args: vec!["-c".into(), "printf frame > \"$0\"".into(), "{output}".into()],
            ..CaptureConfig::default()
        });
        assert_eq!(writes.capture_into(&target).await.unwrap(), CaptureOutcome::Completed);
        assert_eq!(std::fs::read(&target).unwrap(), b"frame");

        let aborts = CommandCamera::new(&CaptureConfig {
            camera_command: Some("sh".into()),
            camera_args: vec!["-c".into(), "exit 1".into(), "{output}".into()],
            ..CaptureConfig::default()
        });
        assert_eq!(aborts.capture_into(&target).await.unwrap(), CaptureOutcome::Cancelled);
    }

    #[tokio::test]
    async fn gallery_picker_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.png");
        std::fs::write(&path, b"png").unwrap();

        let picked = PathGalleryPicker::new(Some(path.clone())).pick_image().await.unwrap();
        assert_eq!(picked.as_deref(), Some(path.to_string_lossy().as_ref()));

        let missing = PathGalleryPicker::new(Some(dir.path().join("none.png")));
        assert_eq!(missing.pick_image().await.unwrap(), None);

        let directory = PathGalleryPicker::new(Some(dir.path().to_path_buf()));
        assert_eq!(directory.pick_image().await.unwrap(), None);

        assert_eq!(PathGalleryPicker::default().pick_image().await.unwrap(), None);
    }
}
