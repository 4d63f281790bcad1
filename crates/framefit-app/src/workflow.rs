//! 사진 획득 및 분석 워크플로우.
//!
//! 권한 게이트 → 이미지 획득 → 표시 → 인코딩 → 업로드 → 응답 해석 → 표시.
//! 현재 이미지 참조와 분석 결과는 워크플로우만 변경한다.
//!
//! 분석은 워크플로우가 소유한 구조화된 작업으로 실행된다:
//! - 동시에 하나의 업로드만 진행 (`OverlapPolicy`에 따라 대기 또는 거부)
//! - `cancel()`, 새 이미지 획득 시 진행 중인 분석 취소
//! - 모든 에러는 경계에서 한 번의 알림으로 변환되고 자동 재시도는 없다

use framefit_core::error::{CoreError, ErrorKind};
use framefit_core::interpreter;
use framefit_core::models::analysis::AnalysisResult;
use framefit_core::models::image::ImageReference;
use framefit_core::models::permission::Capability;
use framefit_core::models::workflow::{AnalysisState, OverlapPolicy};
use framefit_core::ports::acquirer::ImageAcquirer;
use framefit_core::ports::encoder::ImageEncoder;
use framefit_core::ports::presentation::PresentationSurface;
use framefit_core::ports::uploader::AnalysisUploader;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::gate::PermissionGate;

/// 이미지 소스 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Camera,
    Gallery,
}

impl ImageSource {
    /// 소스에 필요한 권한
    pub fn capability(self) -> Capability {
        match self {
            Self::Camera => Capability::CameraAccess,
            Self::Gallery => Capability::GalleryAccess,
        }
    }
}

/// 워크플로우가 소유하는 가변 상태
#[derive(Debug, Default)]
struct Session {
    image: Option<ImageReference>,
    result: Option<AnalysisResult>,
    state: AnalysisState,
    /// 이미지가 교체될 때마다 증가
    generation: u64,
}

/// 분석 워크플로우 오케스트레이터
pub struct AnalysisWorkflow {
    gate: PermissionGate,
    acquirer: Arc<dyn ImageAcquirer>,
    encoder: Arc<dyn ImageEncoder>,
    uploader: Option<Arc<dyn AnalysisUploader>>,
    surface: Arc<dyn PresentationSurface>,
    overlap: OverlapPolicy,
    session: Mutex<Session>,
    /// 진행 중인 분석 직렬화
    analysis_lock: tokio::sync::Mutex<()>,
    /// 진행 중인 분석의 취소 신호
    cancel_slot: Mutex<Option<watch::Sender<bool>>>,
}

impl AnalysisWorkflow {
    /// 새 워크플로우 생성. 업로더가 없으면 분석은 `Config` 에러로 실패한다.
    pub fn new(
        gate: PermissionGate,
        acquirer: Arc<dyn ImageAcquirer>,
        encoder: Arc<dyn ImageEncoder>,
        surface: Arc<dyn PresentationSurface>,
    ) -> Self {
        Self {
            gate,
            acquirer,
            encoder,
            uploader: None,
            surface,
            overlap: OverlapPolicy::default(),
            session: Mutex::new(Session::default()),
            analysis_lock: tokio::sync::Mutex::new(()),
            cancel_slot: Mutex::new(None),
        }
    }

    /// 업로드 클라이언트 설정
    pub fn with_uploader(mut self, uploader: Arc<dyn AnalysisUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// 겹치는 분석 요청 정책 설정
    pub fn with_overlap_policy(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// 현재 분석 상태
    pub fn state(&self) -> AnalysisState {
        self.session.lock().state
    }

    /// 현재 이미지 참조
    pub fn current_image(&self) -> Option<ImageReference> {
        self.session.lock().image.clone()
    }

    /// 마지막 분석 결과
    pub fn result(&self) -> Option<AnalysisResult> {
        self.session.lock().result.clone()
    }

    /// 권한 확인 후 이미지 획득. 성공하면 현재 이미지를 교체하고 표시한다.
    pub async fn acquire(&self, source: ImageSource) -> Result<ImageReference, CoreError> {
        let outcome = self.try_acquire(source).await;
        if let Err(e) = &outcome {
            self.settle_to_idle();
            self.notify_failure(e).await;
        }
        outcome
    }

    async fn try_acquire(&self, source: ImageSource) -> Result<ImageReference, CoreError> {
        let capability = source.capability();
        if !self.gate.ensure(capability).await?.is_granted() {
            return Err(CoreError::PermissionDenied(capability));
        }

        let reference = match source {
            ImageSource::Camera => self.acquirer.capture_from_camera().await?,
            ImageSource::Gallery => self.acquirer.pick_from_gallery().await?,
        };

        self.replace_image(reference.clone());
        self.present_image(&reference).await;
        Ok(reference)
    }

    /// 획득 절차 없이 이미 있는 이미지를 현재 이미지로 지정
    pub async fn select_existing(&self, reference: ImageReference) {
        self.replace_image(reference.clone());
        self.present_image(&reference).await;
    }

    /// 현재 이미지 분석
    pub async fn analyze(&self) -> Result<AnalysisResult, CoreError> {
        let outcome = self.run_analysis().await;
        match &outcome {
            Ok(result) => {
                if let Err(e) = self.surface.show_recommendation(result).await {
                    warn!("추천 표시 실패: {e}");
                }
            }
            Err(e) => self.notify_failure(e).await,
        }
        outcome
    }

    /// 진행 중인 분석 취소. 취소할 분석이 있었으면 `true`.
    pub fn cancel(&self) -> bool {
        match self.cancel_slot.lock().take() {
            Some(cancel_tx) => {
                info!("분석 취소 요청");
                let _ = cancel_tx.send(true);
                true
            }
            None => false,
        }
    }

    /// `interrupt`가 먼저 끝나면 `task`를 버리고 진행 중인 분석을 취소한다.
    ///
    /// 권한 질문이나 카메라 대기 중이어도 중단된다.
    pub async fn run_until<T, F, S>(&self, task: F, interrupt: S) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
        S: Future<Output = ()>,
    {
        tokio::select! {
            outcome = task => outcome,
            () = interrupt => {
                info!("중단 신호 수신");
                self.cancel();
                let mut session = self.session.lock();
                if session.state.is_in_flight() {
                    session.state = AnalysisState::Failed(ErrorKind::Cancelled);
                }
                Err(CoreError::Cancelled)
            }
        }
    }

    async fn run_analysis(&self) -> Result<AnalysisResult, CoreError> {
        let uploader = self.uploader.clone().ok_or_else(|| {
            CoreError::Config("분석 엔드포인트가 설정되지 않았습니다".to_string())
        })?;

        let _guard = match self.overlap {
            OverlapPolicy::Reject => self.analysis_lock.try_lock().map_err(|_| {
                debug!("분석 요청 거부: 이미 진행 중");
                CoreError::AnalysisInProgress
            })?,
            OverlapPolicy::Queue => {
                debug!("분석 요청 대기");
                self.analysis_lock.lock().await
            }
        };

        let (reference, generation) = {
            let session = self.session.lock();
            let reference = session.image.clone().ok_or(CoreError::NoImageSelected)?;
            (reference, session.generation)
        };

        let (cancel_tx, cancel_rx) = watch::channel(false);
        *self.cancel_slot.lock() = Some(cancel_tx);
        {
            let mut session = self.session.lock();
            session.result = None;
            session.state = AnalysisState::AwaitingEncode;
        }

        info!(locator = %reference.locator, "분석 시작");
        let mut outcome = tokio::select! {
            outcome = self.run_steps(&reference, uploader.as_ref()) => outcome,
            _ = cancelled(cancel_rx) => Err(CoreError::Cancelled),
        };
        self.cancel_slot.lock().take();

        {
            let mut session = self.session.lock();
            // 분석 도중 이미지가 바뀌었으면 이전 이미지의 결과는 버린다
            if session.generation != generation {
                debug!(locator = %reference.locator, "교체된 이미지의 분석 결과 폐기");
                outcome = Err(CoreError::Cancelled);
            }
            match &outcome {
                Ok(result) => {
                    session.result = Some(result.clone());
                    session.state = AnalysisState::Done(result.asset);
                }
                Err(e) => session.state = AnalysisState::Failed(e.kind()),
            }
        }

        if let Ok(result) = &outcome {
            info!(frame_type = %result.frame_type, asset = ?result.asset, "분석 완료");
        }
        outcome
    }

    async fn run_steps(
        &self,
        reference: &ImageReference,
        uploader: &dyn AnalysisUploader,
    ) -> Result<AnalysisResult, CoreError> {
        let jpeg = self.encoder.encode(reference).await?;
        debug!(size = jpeg.len(), "인코딩 완료");

        self.set_state(AnalysisState::AwaitingUpload);
        let body = uploader.upload(jpeg).await?;

        self.set_state(AnalysisState::AwaitingParse);
        interpreter::parse_analysis(&body)
    }

    fn set_state(&self, state: AnalysisState) {
        self.session.lock().state = state;
    }

    /// 새 이미지로 교체: 진행 중인 분석을 취소하고 결과를 비운다
    fn replace_image(&self, reference: ImageReference) {
        self.cancel();
        let mut session = self.session.lock();
        session.image = Some(reference);
        session.generation = session.generation.wrapping_add(1);
        session.result = None;
        if !session.state.is_in_flight() {
            session.state = AnalysisState::Idle;
        }
    }

    /// 종결 상태였으면 Idle로 되돌린다 (진행 중인 분석은 건드리지 않음)
    fn settle_to_idle(&self) {
        let mut session = self.session.lock();
        if session.state.is_terminal() {
            session.state = AnalysisState::Idle;
        }
    }

    async fn present_image(&self, reference: &ImageReference) {
        if let Err(e) = self.surface.show_image(reference).await {
            warn!("이미지 표시 실패: {e}");
        }
    }

    async fn notify_failure(&self, error: &CoreError) {
        warn!(kind = ?error.kind(), "워크플로우 실패: {error}");
        if let Err(e) = self.surface.show_notice(&error.kind().notice()).await {
            warn!("알림 표시 실패: {e}");
        }
    }
}

/// 취소 신호가 올 때까지 대기. 송신측이 신호 없이 사라지면 영원히 대기한다.
async fn cancelled(mut cancel_rx: watch::Receiver<bool>) {
    loop {
        let is_cancelled = *cancel_rx.borrow_and_update();
        if is_cancelled {
            return;
        }
        if cancel_rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
