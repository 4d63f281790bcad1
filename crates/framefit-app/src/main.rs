//! # framefit
//!
//! FrameFit 클라이언트 바이너리 진입점.
//! 설정 로드, 어댑터 와이어링, 사진 획득 → 분석 실행.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use framefit_app::gate::PermissionGate;
use framefit_app::lifecycle;
use framefit_app::platform::{CommandCamera, ConsolePermissionPlatform, PathGalleryPicker};
use framefit_app::surface::ConsoleSurface;
use framefit_app::workflow::{AnalysisWorkflow, ImageSource};
use framefit_core::config::{AppConfig, CaptureConfig};
use framefit_core::config_manager::ConfigLoader;
use framefit_core::error::CoreError;
use framefit_core::models::image::ImageReference;
use framefit_core::models::workflow::OverlapPolicy;
use framefit_core::ports::uploader::AnalysisUploader;
use framefit_network::http_client::HttpAnalysisClient;
use framefit_vision::capture::DeviceImageAcquirer;
use framefit_vision::encoder::JpegImageEncoder;
use framefit_vision::resolver::LocalContentResolver;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 종료 시 남은 blocking 작업 대기 상한
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// FrameFit: 얼굴 사진으로 어울리는 안경테 추천
#[derive(Parser, Debug)]
#[command(name = "framefit")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// 설정 파일 경로 (TOML/JSON)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// 분석 엔드포인트 URL (설정 파일보다 우선)
    #[arg(long, short = 'e', global = true)]
    endpoint: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    /// 사진만 획득하고 분석하지 않음
    #[arg(long, global = true)]
    no_analyze: bool,

    /// 겹치는 분석 요청 정책 (queue, reject)
    #[arg(long, global = true)]
    overlap: Option<OverlapPolicy>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 카메라로 촬영 후 분석
    Camera,
    /// 갤러리(파일)에서 선택 후 분석
    Gallery {
        /// 선택할 이미지 경로
        path: PathBuf,
    },
    /// 획득 절차 없이 기존 이미지 분석
    Analyze {
        /// 분석할 이미지 경로
        path: PathBuf,
    },
}

/// 촬영 저장 디렉토리 결정 (설정값 또는 플랫폼별 데이터 디렉토리)
///
/// # 플랫폼별 기본 경로:
/// - macOS: `~/Library/Application Support/dev.framefit.framefit/pictures`
/// - Windows: `%APPDATA%\framefit\framefit\data\pictures`
/// - Linux: `~/.local/share/framefit/pictures`
fn resolve_pictures_dir(capture: &CaptureConfig) -> PathBuf {
    capture
        .pictures_dir
        .clone()
        .or_else(|| {
            ProjectDirs::from("dev", "framefit", "framefit").map(|p| p.data_dir().join("pictures"))
        })
        .unwrap_or_else(|| PathBuf::from("./pictures"))
}

/// 설정 로드 + CLI 오버라이드
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    let mut config = loader
        .load()
        .map_err(|e| anyhow!("설정 로드 실패: {e}"))?;

    if let Some(endpoint) = &args.endpoint {
        config.server.endpoint = Some(endpoint.clone());
    }
    if let Some(overlap) = args.overlap {
        config.workflow.overlap = overlap;
    }
    if args.no_analyze {
        config.workflow.auto_analyze = false;
    }

    config
        .validate()
        .map_err(|e| anyhow!("설정 검증 실패: {e}"))?;
    Ok(config)
}

/// 어댑터 와이어링
fn build_workflow(config: &AppConfig, gallery_selection: Option<PathBuf>) -> Result<AnalysisWorkflow> {
    let pictures_dir = resolve_pictures_dir(&config.capture);
    info!("촬영 저장 경로: {}", pictures_dir.display());

    let gate = PermissionGate::new(Arc::new(ConsolePermissionPlatform::new(&config.permissions)));
    let acquirer = Arc::new(DeviceImageAcquirer::new(
        pictures_dir,
        Arc::new(CommandCamera::new(&config.capture)),
        Arc::new(PathGalleryPicker::new(gallery_selection)),
    ));
    let encoder = Arc::new(JpegImageEncoder::new(Arc::new(LocalContentResolver::new())));

    let workflow = AnalysisWorkflow::new(gate, acquirer, encoder, Arc::new(ConsoleSurface::new()))
        .with_overlap_policy(config.workflow.overlap);

    match HttpAnalysisClient::new(&config.server) {
        Ok(client) => {
            let uploader: Arc<dyn AnalysisUploader> = Arc::new(client);
            Ok(workflow.with_uploader(uploader))
        }
        Err(CoreError::Config(msg)) => {
            warn!("{msg}: 분석 비활성화");
            Ok(workflow)
        }
        Err(e) => Err(anyhow!("업로드 클라이언트 생성 실패: {e}")),
    }
}

async fn run(workflow: &AnalysisWorkflow, command: &Command, auto_analyze: bool) -> Result<(), CoreError> {
    match command {
        Command::Camera => {
            workflow.acquire(ImageSource::Camera).await?;
        }
        Command::Gallery { .. } => {
            workflow.acquire(ImageSource::Gallery).await?;
        }
        Command::Analyze { path } => {
            workflow
                .select_existing(ImageReference::gallery(path.to_string_lossy()))
                .await;
            workflow.analyze().await?;
            return Ok(());
        }
    }

    if auto_analyze {
        workflow.analyze().await?;
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let log_filter = format!(
        "framefit={},framefit_app={},framefit_core={},framefit_vision={},framefit_network={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args)?;

    let gallery_selection = match &args.command {
        Command::Gallery { path } => Some(path.clone()),
        _ => None,
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let workflow = {
        let _enter = runtime.enter();
        build_workflow(&config, gallery_selection)?
    };

    // 시그널 → 진행 중인 단계(권한 질문, 촬영, 업로드)를 버리고 종료
    let outcome = runtime.block_on(workflow.run_until(
        run(&workflow, &args.command, config.workflow.auto_analyze),
        lifecycle::wait_for_signal(),
    ));
    // 중단된 stdin 읽기가 blocking 풀에 남아 있을 수 있다
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    match outcome {
        Ok(()) => {
            info!(state = ?workflow.state(), "FrameFit 종료");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            info!(kind = ?e.kind(), "FrameFit 실패 종료");
            Ok(ExitCode::FAILURE)
        }
    }
}
