//! 시그널 처리.
//!
//! 실행 중 SIGINT/SIGTERM(Windows는 Ctrl+C)을 기다린다.
//! 핸들러 등록에 실패하면 경고만 남기고 신호 없이 계속 실행한다.

use tracing::{info, warn};

/// OS 종료 시그널 대기
pub async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigint, mut sigterm) =
            match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
                (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("시그널 핸들러 등록 실패: {e}");
                    return std::future::pending().await;
                }
            };

        tokio::select! {
            _ = sigint.recv() => info!("SIGINT 수신"),
            _ = sigterm.recv() => info!("SIGTERM 수신"),
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl+C 핸들러 등록 실패: {e}");
            return std::future::pending().await;
        }
        info!("Ctrl+C 수신");
    }
}
