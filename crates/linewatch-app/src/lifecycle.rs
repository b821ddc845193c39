//! 종료 처리.
//!
//! OS 시그널을 watch 채널로 폴링 루프에 전달한다.

use tokio::sync::watch;
use tracing::{info, warn};

/// 종료 신호 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self { shutdown_tx }
    }

    /// 폴링 루프용 종료 수신기
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        self.shutdown_tx.send_replace(true);
    }

    /// SIGINT/SIGTERM (비 unix: Ctrl+C) 대기 후 종료 신호 발송
    ///
    /// 핸들러 등록에 실패하면 신호를 보내지 않고 반환한다.
    /// 이 경우 프로세스는 외부 kill로만 종료된다.
    pub async fn wait_for_signal(&self) {
        if Self::recv_os_signal().await {
            self.shutdown();
        }
    }

    #[cfg(unix)]
    async fn recv_os_signal() -> bool {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigint, mut sigterm) =
            match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
                (Ok(int), Ok(term)) => (int, term),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("시그널 핸들러 등록 실패: {e}");
                    return false;
                }
            };

        tokio::select! {
            _ = sigint.recv() => info!("SIGINT 수신"),
            _ = sigterm.recv() => info!("SIGTERM 수신"),
        }
        true
    }

    #[cfg(not(unix))]
    async fn recv_os_signal() -> bool {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl+C 수신");
                true
            }
            Err(e) => {
                warn!("Ctrl+C 핸들러 등록 실패: {e}");
                false
            }
        }
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}
