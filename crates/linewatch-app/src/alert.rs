//! 알림 디스패처.
//!
//! 확인된 감지를 데스크톱 알림 + 비프음으로 전달한다.
//! 전달은 분리된 tokio 태스크에서 실행되며, 실패는 태스크 자체 로그로만 드러난다.

use linewatch_core::config::AlertConfig;
use linewatch_core::ports::notifier::AlertNotifier;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 알림 디스패처
#[derive(Clone)]
pub struct AlertDispatcher {
    config: AlertConfig,
    notifier: Arc<dyn AlertNotifier>,
}

impl AlertDispatcher {
    /// 새 디스패처 생성
    pub fn new(config: AlertConfig, notifier: Arc<dyn AlertNotifier>) -> Self {
        Self { config, notifier }
    }

    /// 알림 본문
    pub fn message(line_y: i32) -> String {
        format!("Price bubble reached red line (Y={line_y})")
    }

    /// 알림 태스크 시작 (fire-and-forget)
    ///
    /// 반환된 핸들을 버리면 컨트롤러와 동기화되지 않는 분리 태스크가 된다.
    pub fn dispatch(&self, line_y: i32) -> JoinHandle<()> {
        let notifier = self.notifier.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            let message = Self::message(line_y);

            if let Err(e) = notifier.notify(&config.title, &message).await {
                warn!("알림 표시 실패: {e}");
            }
            if let Err(e) = notifier
                .beep(config.beep_frequency_hz, config.beep_duration_ms)
                .await
            {
                warn!("비프음 실패: {e}");
            }
            info!("ALERT: {message}");
        })
    }
}
